//! Nested validation of the catalog tree.
//!
//! Each level validates its own fields, then delegates to a fresh child
//! validation and merges the child's failures. The child never knows its
//! parent: context (path segment, message prefix, context id) is added by
//! the parent when it builds its own copies of the child failures.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::rules::{check_id, check_text, ValidatorOptions};
use crate::domain::{Category, Failure, Product, ProductInCategory, ValidationResult};

/// Validator for product trees.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Validate a product and everything below it.
    ///
    /// Failures come out in traversal order: the product's own checks
    /// (`Id`, then `Name`), then each category in order with its own checks
    /// followed by its leaves. Failures from a category are rewritten to
    /// `Categories[i].<path>` with the message prefixed by
    /// `Category ID {id}: ` and the category id as context.
    ///
    /// # Errors
    /// [`DomainError::InvalidArgument`] if `product` is absent. Data problems
    /// are never errors; they are collected into the result.
    pub fn validate_root(&self, product: Option<&Product>) -> DomainResult<ValidationResult> {
        let product = product
            .ok_or_else(|| DomainError::InvalidArgument("product must not be absent".into()))?;

        let mut failures = Vec::new();
        check_id(&mut failures, "Id", "Id", product.id);
        check_text(
            &mut failures,
            "Name",
            "Name",
            product.name.as_deref(),
            &self.options.name_rules(),
            self.options.cascade,
        );

        for (i, category) in product.categories.iter().enumerate() {
            let segment = format!("Categories[{}]", i);
            let prefix = format!("Category ID {}: ", category.id);
            failures.extend(
                self.validate_category(category)
                    .iter()
                    .map(|f| f.within(&segment, &prefix, category.id)),
            );
        }

        Ok(ValidationResult::new(failures))
    }

    /// Validate a category and its leaves. Paths are relative to the category.
    pub fn validate_category(&self, category: &Category) -> Vec<Failure> {
        let mut failures = Vec::new();
        check_text(
            &mut failures,
            "Name",
            "Category Name",
            category.name.as_deref(),
            &self.options.name_rules(),
            self.options.cascade,
        );
        check_text(
            &mut failures,
            "Description",
            "Category Description",
            category.description.as_deref(),
            &self.options.description_rules(),
            self.options.cascade,
        );

        let missing = ProductInCategory::default();
        for (j, item) in category.products.iter().enumerate() {
            let segment = format!("Products[{}]", j);
            // an absent entry is a missing required value: check it as an empty leaf
            let item = item.as_ref().unwrap_or(&missing);
            failures.extend(self.validate_leaf(item).iter().map(|f| f.nested(&segment)));
        }

        failures
    }

    /// Validate a single leaf product.
    pub fn validate_leaf(&self, item: &ProductInCategory) -> Vec<Failure> {
        let mut failures = Vec::new();
        check_id(&mut failures, "Id", "Product ID", item.id);
        check_text(
            &mut failures,
            "Name",
            "Product Name",
            item.name.as_deref(),
            &self.options.name_rules(),
            self.options.cascade,
        );
        failures
    }
}
