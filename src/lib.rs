//! catval: nested validation of product catalogs
//!
//! A product owns categories, a category owns leaf products. Validating the
//! root walks the whole tree and returns every failure in traversal order,
//! with category failures carrying the category's id in their message and
//! context.
//!
//! ```
//! use catval::domain::{Category, Product, ProductInCategory, Validator};
//!
//! let product = Product::new(1, Some("Shelf")).with_category(
//!     Category::new(7, Some("Books"), Some("Printed"))
//!         .with_product(ProductInCategory::new(1, None)),
//! );
//! let result = Validator::default().validate_root(Some(&product)).unwrap();
//! assert_eq!(
//!     result.failures()[0].to_string(),
//!     "Categories[0].Products[0].Name: Category ID 7: Product Name is required"
//! );
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
