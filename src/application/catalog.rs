//! Catalog documents: TOML/JSON files holding one product tree
//!
//! ```toml
//! [product]
//! id = 1
//!
//! [[product.categories]]
//! id = 1
//! name = "TestCategory"
//! description = "TestDescription"
//!
//! [[product.categories.products]]
//! id = 2
//! name = "TestProduct"
//! ```
//!
//! A document without a `product` section carries no root at all, which the
//! validator reports as an invalid argument rather than a failure.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Product;

/// On-disk representation of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub product: Option<Product>,
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    /// The only format able to express absent leaf entries (`null`)
    Json,
}

impl CatalogFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ApplicationError::Config {
                message: format!(
                    "unsupported catalog format (expected .toml or .json): {}",
                    path.display()
                ),
            }),
        }
    }
}

/// Parse catalog content. `path` is only used for error messages.
pub fn parse_catalog(
    content: &str,
    format: CatalogFormat,
    path: &Path,
) -> ApplicationResult<CatalogDocument> {
    let parsed = match format {
        CatalogFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        CatalogFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ApplicationError::Catalog {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ProductInCategory};
    use rstest::rstest;

    #[rstest]
    #[case("a.toml", CatalogFormat::Toml)]
    #[case("a.TOML", CatalogFormat::Toml)]
    #[case("dir/a.json", CatalogFormat::Json)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: CatalogFormat) {
        assert_eq!(CatalogFormat::from_path(Path::new(path)).unwrap(), expected);
    }

    #[rstest]
    #[case("a.yaml")]
    #[case("a")]
    fn test_format_from_path_rejects_unknown(#[case] path: &str) {
        let err = CatalogFormat::from_path(Path::new(path)).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_toml_with_missing_fields_when_parsing_then_defaults_apply() {
        let content = r#"
[product]
id = 1

[[product.categories]]
id = 5
name = "TestCategory"

[[product.categories.products]]
name = "NoId"
"#;

        let doc = parse_catalog(content, CatalogFormat::Toml, Path::new("c.toml")).unwrap();

        let product = doc.product.unwrap();
        assert_eq!(product.name, None);
        assert_eq!(
            product.categories,
            vec![Category {
                id: 5,
                name: Some("TestCategory".into()),
                description: None,
                products: vec![Some(ProductInCategory::new(0, Some("NoId")))],
            }]
        );
    }

    #[test]
    fn given_json_with_null_leaf_when_parsing_then_entry_is_absent() {
        let content = r#"{"product": {"id": 1, "categories": [{"id": 2, "products": [null, {"id": 3}]}]}}"#;

        let doc = parse_catalog(content, CatalogFormat::Json, Path::new("c.json")).unwrap();

        let products = &doc.product.unwrap().categories[0].products;
        assert_eq!(products[0], None);
        assert_eq!(products[1], Some(ProductInCategory::new(3, None)));
    }

    #[test]
    fn given_document_without_product_when_parsing_then_root_is_absent() {
        let doc = parse_catalog("", CatalogFormat::Toml, Path::new("empty.toml")).unwrap();
        assert_eq!(doc.product, None);
    }

    #[test]
    fn given_malformed_json_when_parsing_then_catalog_error_names_file() {
        let err = parse_catalog("{", CatalogFormat::Json, Path::new("bad.json")).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
