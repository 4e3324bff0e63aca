//! Field rules and per-field rule chains

use serde::{Deserialize, Serialize};

use crate::domain::Failure;

/// How a single field's rule chain reacts to a failing rule.
///
/// Only ever scoped to one field: sibling fields, categories and
/// leaves are always validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadeMode {
    /// Run every rule of the chain
    #[default]
    Continue,
    /// End the chain at the first failing rule
    Stop,
}

/// Knobs for the validators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub cascade: CascadeMode,
    /// Upper bound for name fields, in characters; `None` disables the rule
    pub max_name_length: Option<usize>,
}

/// A single check against a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    NotEmpty,
    MaxLength(usize),
}

impl TextRule {
    /// Returns the failure message if `value` violates the rule.
    pub fn check(&self, label: &str, value: Option<&str>) -> Option<String> {
        match self {
            TextRule::NotEmpty if is_blank(value) => Some(format!("{} is required", label)),
            TextRule::NotEmpty => None,
            TextRule::MaxLength(max) => match value {
                // absent values are left to NotEmpty
                Some(v) if v.chars().count() > *max => {
                    Some(format!("{} must be {} characters or fewer", label, max))
                }
                _ => None,
            },
        }
    }
}

/// Absent, empty and whitespace-only strings are all blank.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Validates one text field through its rule chain, appending failures to `out`.
pub(crate) fn check_text(
    out: &mut Vec<Failure>,
    path: &str,
    label: &str,
    value: Option<&str>,
    rules: &[TextRule],
    cascade: CascadeMode,
) {
    for rule in rules {
        if let Some(message) = rule.check(label, value) {
            out.push(Failure::new(path, message));
            if cascade == CascadeMode::Stop {
                break;
            }
        }
    }
}

/// Ids are required to differ from their default (`0`).
pub(crate) fn check_id(out: &mut Vec<Failure>, path: &str, label: &str, id: i64) {
    if id == 0 {
        out.push(Failure::new(path, format!("{} is required", label)));
    }
}

impl ValidatorOptions {
    /// Rule chain for name fields.
    pub fn name_rules(&self) -> Vec<TextRule> {
        let mut rules = vec![TextRule::NotEmpty];
        if let Some(max) = self.max_name_length {
            rules.push(TextRule::MaxLength(max));
        }
        rules
    }

    pub fn description_rules(&self) -> Vec<TextRule> {
        vec![TextRule::NotEmpty]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, true)]
    #[case(Some(""), true)]
    #[case(Some("   "), true)]
    #[case(Some("\t\n"), true)]
    #[case(Some("x"), false)]
    #[case(Some(" x "), false)]
    fn test_is_blank(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_blank(value), expected);
    }

    #[test]
    fn given_absent_value_when_max_length_then_passes() {
        assert_eq!(TextRule::MaxLength(1).check("Name", None), None);
    }

    #[test]
    fn given_multibyte_value_when_max_length_then_counts_chars() {
        assert_eq!(TextRule::MaxLength(3).check("Name", Some("äöü")), None);
        assert_eq!(
            TextRule::MaxLength(2).check("Name", Some("äöü")),
            Some("Name must be 2 characters or fewer".to_string())
        );
    }

    #[test]
    fn given_stop_cascade_when_first_rule_fails_then_chain_ends() {
        let mut out = Vec::new();
        let rules = [TextRule::NotEmpty, TextRule::MaxLength(2)];

        check_text(&mut out, "Name", "Name", Some("    "), &rules, CascadeMode::Stop);

        assert_eq!(out, vec![Failure::new("Name", "Name is required")]);
    }

    #[test]
    fn given_continue_cascade_when_first_rule_fails_then_chain_runs_on() {
        let mut out = Vec::new();
        let rules = [TextRule::NotEmpty, TextRule::MaxLength(2)];

        check_text(&mut out, "Name", "Name", Some("    "), &rules, CascadeMode::Continue);

        assert_eq!(
            out,
            vec![
                Failure::new("Name", "Name is required"),
                Failure::new("Name", "Name must be 2 characters or fewer"),
            ]
        );
    }

    #[test]
    fn given_zero_id_when_checking_then_fails_with_label() {
        let mut out = Vec::new();
        check_id(&mut out, "Id", "Product ID", 0);
        check_id(&mut out, "Id", "Product ID", -3);
        assert_eq!(out, vec![Failure::new("Id", "Product ID is required")]);
    }
}
