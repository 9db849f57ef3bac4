//! Input validation.
//!
//! Each check takes the field name used in the failure message and the raw
//! `Input`, and hands back a borrowed typed value on success. Checks run in
//! the order presence, type, emptiness, format.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_PATTERN, FIELD_EMAIL};
use crate::error::{DomainError, DomainResult};
use crate::input::Input;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// Fail with `NotOptional` when the value is undefined or null.
pub fn require_present<'a>(field: &str, input: &'a Input) -> DomainResult<&'a Input> {
    if input.is_absent() {
        return Err(DomainError::not_optional(field));
    }
    Ok(input)
}

/// Require a string (possibly blank).
pub fn require_string<'a>(field: &str, input: &'a Input) -> DomainResult<&'a str> {
    match require_present(field, input)? {
        Input::String(s) => Ok(s),
        other => Err(DomainError::type_mismatch(field, other.stringify(), "string")),
    }
}

/// Require a string with at least one non-whitespace character.
pub fn require_non_empty_string<'a>(field: &str, input: &'a Input) -> DomainResult<&'a str> {
    let value = require_string(field, input)?;
    if value.trim().is_empty() {
        return Err(DomainError::empty(field));
    }
    Ok(value)
}

/// Require a non-empty string shaped like an e-mail address.
pub fn require_email(input: &Input) -> DomainResult<&str> {
    let value = require_non_empty_string(FIELD_EMAIL, input)?;
    if !is_email(value) {
        return Err(DomainError::format(value, "an e-mail"));
    }
    Ok(value)
}

/// Require a key/value object.
pub fn require_object<'a>(
    field: &str,
    input: &'a Input,
) -> DomainResult<&'a BTreeMap<String, Input>> {
    match require_present(field, input)? {
        Input::Object(map) => Ok(map),
        other => Err(DomainError::type_mismatch(field, other.stringify(), "object")),
    }
}

/// Require an array.
pub fn require_array<'a>(field: &str, input: &'a Input) -> DomainResult<&'a [Input]> {
    match require_present(field, input)? {
        Input::Array(items) => Ok(items),
        other => Err(DomainError::type_mismatch(field, other.stringify(), "array")),
    }
}

/// Require an array whose every element is a non-empty string.
///
/// Elements are reported as `field[index]`.
pub fn require_non_empty_strings(field: &str, input: &Input) -> DomainResult<Vec<String>> {
    require_array(field, input)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            require_non_empty_string(&format!("{}[{}]", field, i), item).map(str::to_string)
        })
        .collect()
}

/// Require a finite number.
pub fn require_number(field: &str, input: &Input) -> DomainResult<f64> {
    match require_present(field, input)? {
        Input::Number(n) if n.is_finite() => Ok(*n),
        other => Err(DomainError::type_mismatch(field, other.stringify(), "number")),
    }
}

/// Require a finite number that is zero or greater.
pub fn require_non_negative(field: &str, input: &Input) -> DomainResult<f64> {
    let value = require_number(field, input)?;
    if value < 0.0 {
        return Err(DomainError::format(input.stringify(), "a non-negative number"));
    }
    Ok(value)
}

/// Check a string against the e-mail pattern.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_are_not_optional() {
        let err = require_non_empty_string("name", &Input::Missing).unwrap_err();
        assert_eq!(err.to_string(), "name is not optional");

        let err = require_non_empty_string("name", &Input::Null).unwrap_err();
        assert_eq!(err.to_string(), "name is not optional");
    }

    #[test]
    fn test_whitespace_is_empty() {
        let err = require_non_empty_string("name", &Input::from(" \t    \n")).unwrap_err();
        assert_eq!(err, DomainError::empty("name"));

        let err = require_non_empty_string("token", &Input::from("")).unwrap_err();
        assert_eq!(err.to_string(), "token is empty");
    }

    #[test]
    fn test_type_mismatch_embeds_stringified_value() {
        let err = require_string("email", &Input::from(json!([]))).unwrap_err();
        assert_eq!(err.to_string(), "email  is not a string");

        let err = require_string("token", &Input::from(1i64)).unwrap_err();
        assert_eq!(err.to_string(), "token 1 is not a string");

        let err = require_string("token", &Input::from(true)).unwrap_err();
        assert_eq!(err.to_string(), "token true is not a string");
    }

    #[test]
    fn test_require_string_allows_blank() {
        assert_eq!(require_string("x", &Input::from("  ")).unwrap(), "  ");
    }

    #[test]
    fn test_require_email() {
        assert_eq!(
            require_email(&Input::from("ann@test.com")).unwrap(),
            "ann@test.com"
        );
        assert_eq!(
            require_email(&Input::from("a.com")).unwrap_err().to_string(),
            "a.com is not an e-mail"
        );
        assert_eq!(
            require_email(&Input::from(" ")).unwrap_err().to_string(),
            "email is empty"
        );
        assert_eq!(
            require_email(&Input::Missing).unwrap_err().to_string(),
            "email is not optional"
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("Jon.Doe@yahoo.com"));
        assert!(is_email("daniela-0.42@gmail.com"));
        assert!(is_email("ann@mail.test.co.uk"));
        assert!(!is_email("234@gmail"));
        assert!(!is_email("ann@test.comm"));
        assert!(!is_email("ann test@test.com"));
    }

    #[test]
    fn test_require_object() {
        let patch = Input::from(json!({"name": "Test"}));
        assert_eq!(require_object("data", &patch).unwrap().len(), 1);

        let err = require_object("data", &Input::from(1i64)).unwrap_err();
        assert_eq!(err.to_string(), "data 1 is not a object");

        let err = require_object("data", &Input::from("hola")).unwrap_err();
        assert_eq!(err.to_string(), "data hola is not a object");

        let err = require_object("data", &Input::Missing).unwrap_err();
        assert_eq!(err.to_string(), "data is not optional");
    }

    #[test]
    fn test_require_non_empty_strings() {
        let flavors = Input::from(vec!["vanilla", "chocolate"]);
        assert_eq!(
            require_non_empty_strings("flavors", &flavors).unwrap(),
            vec!["vanilla".to_string(), "chocolate".to_string()]
        );

        let flavors = Input::from(vec!["vanilla", " "]);
        assert_eq!(
            require_non_empty_strings("flavors", &flavors)
                .unwrap_err()
                .to_string(),
            "flavors[1] is empty"
        );

        let err = require_non_empty_strings("flavors", &Input::from("vanilla")).unwrap_err();
        assert_eq!(err.to_string(), "flavors vanilla is not a array");
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("totalPrice", &Input::from(12i64)).unwrap(), 12.0);
        assert_eq!(require_non_negative("totalPrice", &Input::from(0.0)).unwrap(), 0.0);
        assert_eq!(
            require_non_negative("totalPrice", &Input::from(-3i64))
                .unwrap_err()
                .to_string(),
            "-3 is not a non-negative number"
        );
        assert_eq!(
            require_non_negative("totalPrice", &Input::from("12"))
                .unwrap_err()
                .to_string(),
            "totalPrice 12 is not a number"
        );
    }
}
