//! Catalog validation service
//!
//! Loads catalog documents and runs the nested validator over them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::application::catalog::{parse_catalog, CatalogDocument, CatalogFormat};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    Category, Product, ProductInCategory, ValidationResult, Validator, ValidatorOptions,
};
use crate::infrastructure::traits::FileSystem;

/// Outcome of validating one file out of a batch.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: ApplicationResult<ValidationResult>,
}

/// Service for validating product trees, in memory or from disk.
pub struct ValidationService {
    fs: Arc<dyn FileSystem>,
    validator: Validator,
}

impl ValidationService {
    /// Create a new validation service.
    pub fn new(fs: Arc<dyn FileSystem>, options: ValidatorOptions) -> Self {
        Self {
            fs,
            validator: Validator::new(options),
        }
    }

    /// Read and parse a catalog document.
    pub fn load(&self, path: &Path) -> ApplicationResult<CatalogDocument> {
        debug!("load: path={}", path.display());
        let format = CatalogFormat::from_path(path)?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;
        parse_catalog(&content, format, path)
    }

    /// Validate an in-memory tree.
    pub fn validate_product(
        &self,
        product: Option<&Product>,
    ) -> ApplicationResult<ValidationResult> {
        let result = self.validator.validate_root(product)?;
        debug!(
            "validate_product: valid={}, failures={}",
            result.is_valid(),
            result.failures().len()
        );
        Ok(result)
    }

    /// Load and validate a single catalog file.
    #[instrument(skip(self))]
    pub fn validate_file(&self, path: &Path) -> ApplicationResult<ValidationResult> {
        let document = self.load(path)?;
        self.validate_product(document.product.as_ref())
    }

    /// Validate several catalog files.
    ///
    /// Files are independent trees, so they are validated in parallel;
    /// reports come back in input order.
    pub fn validate_files(&self, paths: &[PathBuf]) -> Vec<FileReport> {
        info!("validating {} catalog file(s)", paths.len());
        paths
            .par_iter()
            .map(|path| FileReport {
                path: path.clone(),
                outcome: self.validate_file(path),
            })
            .collect()
    }
}

/// The sample catalog the demo command validates.
///
/// Two problems are planted: the product has no name, and the first
/// product of the only category has no name.
pub fn demo_product() -> Product {
    Product::new(1, None).with_category(
        Category::new(1, Some("TestCategory"), Some("TestDescription"))
            .with_product(ProductInCategory::new(1, None))
            .with_product(ProductInCategory::new(2, Some("TestProduct"))),
    )
}
