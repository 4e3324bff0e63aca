//! Domain entities: the product catalog tree

use serde::{Deserialize, Serialize};

/// Root of the catalog tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub name: Option<String>,
    /// Categories in document order (may be empty)
    pub categories: Vec<Category>,
}

/// Category owned by a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Leaf products; `None` marks an entry that is present in the
    /// collection but has no value (e.g. JSON `null`)
    pub products: Vec<Option<ProductInCategory>>,
}

/// Leaf product listed inside a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInCategory {
    pub id: i64,
    pub name: Option<String>,
}

impl Product {
    pub fn new(id: i64, name: Option<&str>) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }
}

impl Category {
    pub fn new(id: i64, name: Option<&str>, description: Option<&str>) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            products: Vec::new(),
        }
    }

    pub fn with_product(mut self, product: ProductInCategory) -> Self {
        self.products.push(Some(product));
        self
    }

    /// Append an absent entry to the products collection.
    pub fn with_missing_product(mut self) -> Self {
        self.products.push(None);
        self
    }
}

impl ProductInCategory {
    pub fn new(id: i64, name: Option<&str>) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
        }
    }
}
