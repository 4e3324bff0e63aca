//! Tree view of a product with its failures attached to the owning node

use itertools::Itertools;
use termtree::Tree;

use crate::domain::{Failure, Product, ProductInCategory, ValidationResult};

/// Build a display tree for `product`, annotating each node with the
/// failures recorded directly against its own fields.
pub fn render_tree(product: &Product, result: &ValidationResult) -> Tree<String> {
    let mut root = Tree::new(node_label(
        &format!("Product #{}", product.id),
        product.name.as_deref(),
        own_failures(result, ""),
    ));

    for (i, category) in product.categories.iter().enumerate() {
        let prefix = format!("Categories[{}].", i);
        let mut node = Tree::new(node_label(
            &format!("Category #{}", category.id),
            category.name.as_deref(),
            own_failures(result, &prefix),
        ));

        for (j, item) in category.products.iter().enumerate() {
            let leaf_prefix = format!("{}Products[{}].", prefix, j);
            let failures = own_failures(result, &leaf_prefix);
            let label = match item {
                Some(ProductInCategory { id, name }) => {
                    node_label(&format!("Product #{}", id), name.as_deref(), failures)
                }
                None => node_label("<missing product>", None, failures),
            };
            node.push(Tree::new(label));
        }
        root.push(node);
    }

    root
}

/// Failures whose path is a direct field of the node at `prefix`.
fn own_failures<'a>(result: &'a ValidationResult, prefix: &str) -> Vec<&'a Failure> {
    result
        .failures()
        .iter()
        .filter(|f| {
            f.field_path()
                .strip_prefix(prefix)
                .is_some_and(|rest| !rest.contains('.'))
        })
        .collect()
}

fn node_label(kind: &str, name: Option<&str>, failures: Vec<&Failure>) -> String {
    let name = name.map_or_else(|| "<no name>".to_string(), |n| format!("\"{}\"", n));
    if failures.is_empty() {
        format!("{} {} ✓", kind, name)
    } else {
        let details = failures.iter().map(|f| f.message()).join("; ");
        format!("{} {} ✗ {}", kind, name, details)
    }
}
