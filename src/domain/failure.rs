//! Validation failures and the aggregate result

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// One recorded validation problem.
///
/// Failures are never mutated after construction; parents that need to add
/// context build a new failure via [`Failure::within`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    field_path: String,
    message: String,
    context_id: Option<i64>,
}

impl Failure {
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            message: message.into(),
            context_id: None,
        }
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Id of the parent entity the failure was attributed to, if any.
    pub fn context_id(&self) -> Option<i64> {
        self.context_id
    }

    /// Re-root this failure under a parent path segment, leaving the message alone.
    ///
    /// `Name` under `Products[0]` becomes `Products[0].Name`.
    pub fn nested(&self, segment: &str) -> Self {
        Self {
            field_path: join_path(segment, &self.field_path),
            message: self.message.clone(),
            context_id: self.context_id,
        }
    }

    /// Build the parent's view of a child failure: path re-rooted under
    /// `segment`, message prefixed with `prefix`, context set to `context_id`.
    pub fn within(&self, segment: &str, prefix: &str, context_id: i64) -> Self {
        Self {
            field_path: join_path(segment, &self.field_path),
            message: format!("{}{}", prefix, self.message),
            context_id: Some(context_id),
        }
    }
}

fn join_path(segment: &str, path: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", segment, path)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_path, self.message)
    }
}

/// Outcome of validating one entity tree.
///
/// Serializes as `{ "is_valid": bool, "failures": [...] }`. `is_valid` is
/// derived from the failures, so it is ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    failures: Vec<Failure>,
}

impl ValidationResult {
    pub fn new(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures in traversal order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("failures", &self.failures)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_failure_when_nested_then_path_prefixed_and_message_kept() {
        let failure = Failure::new("Name", "Product Name is required");

        let nested = failure.nested("Products[1]");

        assert_eq!(nested.field_path(), "Products[1].Name");
        assert_eq!(nested.message(), "Product Name is required");
        assert_eq!(nested.context_id(), None);
    }

    #[test]
    fn given_failure_when_within_then_original_is_untouched() {
        let failure = Failure::new("Name", "Category Name is required");

        let rewritten = failure.within("Categories[0]", "Category ID 7: ", 7);

        assert_eq!(rewritten.field_path(), "Categories[0].Name");
        assert_eq!(rewritten.message(), "Category ID 7: Category Name is required");
        assert_eq!(rewritten.context_id(), Some(7));
        assert_eq!(failure.field_path(), "Name");
        assert_eq!(failure.message(), "Category Name is required");
    }

    #[test]
    fn given_empty_path_when_nested_then_segment_becomes_path() {
        let failure = Failure::new("", "Product is required");
        assert_eq!(failure.nested("Products[3]").field_path(), "Products[3]");
    }

    #[test]
    fn given_failures_when_serializing_result_then_is_valid_is_written() {
        let result = ValidationResult::new(vec![Failure::new("Id", "Id is required")]);

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["is_valid"], false);
        assert_eq!(json["failures"][0]["field_path"], "Id");
        assert_eq!(json["failures"][0]["context_id"], serde_json::Value::Null);
    }

    #[test]
    fn given_valid_result_when_serializing_then_is_valid_and_empty_failures() {
        let json = serde_json::to_value(ValidationResult::default()).unwrap();

        assert_eq!(json, serde_json::json!({"is_valid": true, "failures": []}));
    }

    #[test]
    fn given_serialized_result_when_deserializing_then_failures_restored() {
        let result = ValidationResult::new(vec![Failure::new("Name", "Name is required")
            .within("Categories[0]", "Category ID 2: ", 2)]);
        let json = serde_json::to_string(&result).unwrap();

        let restored: ValidationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, result);
        assert!(!restored.is_valid());
    }
}
