//! Literal variable references.
//!
//! A literal reference is a string of the exact form `((scope.name))`. Strings
//! that merely contain such a token (`prefix((var.x))`) are interpolated
//! expressions and are not literal references. Only the `var` scope resolves
//! here; module-output references are expanded before validation runs.

use crate::error::{BlueprintError, Result};
use crate::value::{Dict, TypedValue};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Scope name for deployment variables.
pub const VAR_SCOPE: &str = "var";

static LITERAL_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\(([^()]*)\)\)$").expect("Invalid literal reference regex")
});

/// Returns true if `s` is exactly one `((...))` token.
pub fn is_literal_variable(s: &str) -> bool {
    LITERAL_REFERENCE_REGEX.is_match(s)
}

/// Strips the `((` `))` delimiters, returning `scope.name`.
pub fn handle_literal_variable(s: &str) -> Option<&str> {
    LITERAL_REFERENCE_REGEX
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A parsed `((scope.name))` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralReference {
    pub scope: String,
    pub name: String,
}

impl LiteralReference {
    /// Parse a literal reference.
    ///
    /// Returns `None` unless the body splits on `.` into exactly two
    /// non-empty components; `((var.x.y))` is not a resolvable reference.
    pub fn parse(s: &str) -> Option<Self> {
        let body = handle_literal_variable(s)?;
        let mut parts = body.split('.');
        let (scope, name) = (parts.next()?, parts.next()?);
        if parts.next().is_some() || scope.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            scope: scope.to_string(),
            name: name.to_string(),
        })
    }

    pub fn is_var(&self) -> bool {
        self.scope == VAR_SCOPE
    }
}

impl fmt::Display for LiteralReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(({}.{}))", self.scope, self.name)
    }
}

/// Resolve a validator input to a concrete string.
///
/// The input must be a string holding a `((var.name))` reference to a
/// string-valued deployment variable. Anything else is an error: non-strings
/// fail with [`BlueprintError::Type`], non-string variables with
/// [`BlueprintError::TypeMismatch`], and everything else with
/// [`BlueprintError::UnresolvedReference`].
pub fn get_string_value(input: &TypedValue, vars: &Dict) -> Result<String> {
    let TypedValue::String(reference) = input else {
        return Err(BlueprintError::Type(format!(
            "the value {} cannot be cast to a string",
            input
        )));
    };

    if let Some(parsed) = LiteralReference::parse(reference)
        && parsed.is_var()
        && let Some(value) = vars.get(&parsed.name)
    {
        return match value.as_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(BlueprintError::TypeMismatch {
                reference: reference.clone(),
            }),
        };
    }

    Err(BlueprintError::UnresolvedReference {
        reference: reference.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Dict {
        let mut d = Dict::new();
        d.set("project_id", "p1").set("zone_count", 3i64);
        d
    }

    #[test]
    fn test_is_literal_variable_exact_match() {
        assert!(is_literal_variable("((var.x))"));
        assert!(is_literal_variable("((network.subnet_name))"));
        assert!(!is_literal_variable("prefix((var.x))suffix"));
        assert!(!is_literal_variable("((var.x)) and ((var.y))"));
        assert!(!is_literal_variable("$(var.x)"));
        assert!(!is_literal_variable("var.x"));
    }

    #[test]
    fn test_handle_literal_variable_strips_delimiters() {
        assert_eq!(handle_literal_variable("((var.project_id))"), Some("var.project_id"));
        assert_eq!(handle_literal_variable("var.project_id"), None);
    }

    #[test]
    fn test_parse_requires_exactly_one_dot() {
        let parsed = LiteralReference::parse("((var.x))").unwrap();
        assert_eq!(parsed.scope, "var");
        assert_eq!(parsed.name, "x");
        assert!(parsed.is_var());
        assert_eq!(parsed.to_string(), "((var.x))");

        assert_eq!(LiteralReference::parse("((var.x.y))"), None);
        assert_eq!(LiteralReference::parse("((var))"), None);
        assert_eq!(LiteralReference::parse("((.x))"), None);
        assert_eq!(LiteralReference::parse("prefix((var.x))suffix"), None);
    }

    #[test]
    fn test_get_string_value_resolves_var() {
        let value = get_string_value(&TypedValue::from("((var.project_id))"), &vars()).unwrap();
        assert_eq!(value, "p1");
    }

    #[test]
    fn test_get_string_value_rejects_non_string_input() {
        let err = get_string_value(&TypedValue::from(5i64), &vars()).unwrap_err();
        assert!(matches!(err, BlueprintError::Type(_)));
    }

    #[test]
    fn test_get_string_value_rejects_non_string_variable() {
        let err = get_string_value(&TypedValue::from("((var.zone_count))"), &vars()).unwrap_err();
        assert!(matches!(err, BlueprintError::TypeMismatch { .. }));
    }

    #[test]
    fn test_get_string_value_unresolved_cases() {
        for input in [
            "((var.missing))",
            "((network.subnet))",
            "p1",
            "prefix((var.project_id))",
            "((var.project_id.extra))",
        ] {
            let err = get_string_value(&TypedValue::from(input), &vars()).unwrap_err();
            assert!(
                matches!(err, BlueprintError::UnresolvedReference { .. }),
                "input {} gave {:?}",
                input,
                err
            );
        }
    }
}
