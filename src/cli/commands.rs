//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::demo_product;
use crate::application::tree::render_tree;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output::{self, CheckEntry};
use crate::cli::{CliError, CliResult};
use crate::config::{self, expand_path, OutputFormat, Settings};
use crate::domain::ValidationResult;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

/// Run the parsed command line; returns the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".into()));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(exitcode::OK);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.output.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Demo { format } => cmd_demo(&container, *format),
        Commands::Check { files, format } => cmd_check(&container, files, *format),
        Commands::Tree { file } => cmd_tree(&container, file),
        Commands::Config { command } => cmd_config(&container, cli, command),
        Commands::Completion { .. } => Ok(exitcode::OK),
    }
}

fn status(result: &ValidationResult) -> i32 {
    if result.is_valid() {
        exitcode::OK
    } else {
        exitcode::INVALID
    }
}

#[instrument(skip(container))]
fn cmd_demo(container: &ServiceContainer, format: Option<OutputFormat>) -> CliResult<i32> {
    let product = demo_product();
    let result = container.validation.validate_product(Some(&product))?;
    match format.unwrap_or(container.settings.output.format) {
        OutputFormat::Text => output::text_report(&result),
        OutputFormat::Json => output::json(&result)?,
    }
    // the demo exists to show failures, so they do not fail the process
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn cmd_check(
    container: &ServiceContainer,
    files: &[std::path::PathBuf],
    format: Option<OutputFormat>,
) -> CliResult<i32> {
    let format = format.unwrap_or(container.settings.output.format);
    let paths: Vec<_> = files.iter().map(|f| expand_path(f)).collect();
    let reports = container.validation.validate_files(&paths);

    let mut error_code = None;
    let mut code = exitcode::OK;
    let mut entries = Vec::new();
    for report in reports {
        match report.outcome {
            Ok(result) => {
                debug!("{}: valid={}", report.path.display(), result.is_valid());
                code = code.max(status(&result));
                match format {
                    OutputFormat::Text => {
                        if paths.len() > 1 {
                            output::header(&report.path.display());
                        }
                        output::text_report(&result);
                    }
                    OutputFormat::Json => entries.push(CheckEntry {
                        path: report.path,
                        result,
                    }),
                }
            }
            Err(e) => {
                let err = CliError::from(e);
                output::error(&err);
                error_code.get_or_insert(err.exit_code());
            }
        }
    }

    // one document on stdout; load errors already went to stderr
    if format == OutputFormat::Json {
        output::json(&entries)?;
    }

    Ok(error_code.unwrap_or(code))
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<i32> {
    let path = expand_path(file);
    let document = container.validation.load(&path)?;
    let result = container
        .validation
        .validate_product(document.product.as_ref())?;
    if let Some(product) = &document.product {
        output::info(&render_tree(product, &result));
    }
    Ok(status(&result))
}

fn cmd_config(
    container: &ServiceContainer,
    cli: &Cli,
    command: &ConfigCommands,
) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(p) => output::info(&format!("global: {}", describe(&p))),
                None => output::info("global: <no config directory>"),
            }
            let local = cli
                .config
                .as_deref()
                .map(expand_path)
                .unwrap_or_else(|| config::LOCAL_CONFIG_FILE.into());
            output::info(&format!("local:  {}", describe(&local)));
        }
    }
    Ok(exitcode::OK)
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}
