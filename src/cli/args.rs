//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Validate product catalogs: every failure in the tree, with its parent context
#[derive(Parser, Debug)]
#[command(name = "catval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ./.catval.toml if present)
    #[arg(short, long, global = true, env = "CATVAL_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the built-in sample catalog
    Demo {
        /// Output format (default: from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate catalog files (.toml or .json)
    Check {
        /// Catalog files
        #[arg(required = true, num_args = 1.., value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
        /// Output format (default: from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show catalog as tree with failures per node
    Tree {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
