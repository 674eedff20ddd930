//! Field-rule tables for validating JSON request bodies.
//!
//! Each resource declares a [`RuleSet`]: an ordered list of field names and
//! the [`FieldRule`] constraints that apply to them. [`validate_payload`]
//! evaluates a body against a rule set and collects one message per failing
//! field into [`ValidationErrors`], which converts into
//! [`AppError::Validation`].
//!
//! Checks run in this order and stop at the first failure for a field:
//! presence, type, length/bounds, allowed values, foreign-key existence.
//! Existence lookups only run for fields that passed every other check.
//!
//! ```ignore
//! const RULES: RuleSet = &[
//!     ("title", FieldRule::sometimes(FieldKind::String).max_length(255)),
//!     ("user_id", FieldRule::required(FieldKind::Integer).exists(Reference::Users)),
//! ];
//! validate_payload(&body, RULES, lookup).await?;
//! ```

use serde_json::{Map, Value, json};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::domain::entities::Reference;
use crate::domain::repositories::ReferenceLookup;
use crate::error::AppError;

/// Whether a field must be present in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present, non-null, and not a blank string.
    Required,
    /// Validated only when present.
    Sometimes,
}

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// A JSON number without fractional part that fits in `i64`.
    Integer,
    /// Any JSON number.
    Numeric,
}

/// Constraints for a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub presence: Presence,
    pub kind: FieldKind,
    /// Maximum length in characters (strings only).
    pub max_length: Option<usize>,
    /// Inclusive lower bound (numbers only).
    pub min: Option<f64>,
    /// Allowed values (strings only).
    pub one_of: Option<&'static [&'static str]>,
    /// Table the value must reference (integers only).
    pub exists: Option<Reference>,
}

impl FieldRule {
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            presence: Presence::Required,
            kind,
            max_length: None,
            min: None,
            one_of: None,
            exists: None,
        }
    }

    pub const fn sometimes(kind: FieldKind) -> Self {
        Self {
            presence: Presence::Sometimes,
            ..Self::required(kind)
        }
    }

    pub const fn max_length(self, max: usize) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    pub const fn min(self, min: f64) -> Self {
        Self {
            min: Some(min),
            ..self
        }
    }

    pub const fn one_of(self, values: &'static [&'static str]) -> Self {
        Self {
            one_of: Some(values),
            ..self
        }
    }

    pub const fn exists(self, reference: Reference) -> Self {
        Self {
            exists: Some(reference),
            ..self
        }
    }
}

/// Ordered field rules for one request shape.
pub type RuleSet = &'static [(&'static str, FieldRule)];

/// Validates `payload` against `rules`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with `{ field: [message] }` details if the
/// body is not a JSON object or any field fails its rule.
/// Returns [`AppError::Internal`] if an existence lookup fails.
pub async fn validate_payload(
    payload: &Value,
    rules: RuleSet,
    lookup: &dyn ReferenceLookup,
) -> Result<(), AppError> {
    let Some(body) = payload.as_object() else {
        return Err(AppError::bad_request(
            "Validation failed",
            json!({ "body": ["The request body must be a JSON object."] }),
        ));
    };

    let mut errors = ValidationErrors::new();

    for &(field, rule) in rules {
        if let Some(err) = check_field(body, field, &rule, lookup).await? {
            errors.add(field, err);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

async fn check_field(
    body: &Map<String, Value>,
    field: &'static str,
    rule: &FieldRule,
    lookup: &dyn ReferenceLookup,
) -> Result<Option<ValidationError>, AppError> {
    let label = field.replace('_', " ");

    let value = match (body.get(field), rule.presence) {
        (None, Presence::Sometimes) => return Ok(None),
        (None, Presence::Required) | (Some(Value::Null), Presence::Required) => {
            return Ok(Some(error(
                "required",
                format!("The {label} field is required."),
            )));
        }
        (Some(Value::String(s)), Presence::Required) if s.trim().is_empty() => {
            return Ok(Some(error(
                "required",
                format!("The {label} field is required."),
            )));
        }
        (Some(value), _) => value,
    };

    match rule.kind {
        FieldKind::String => {
            let Some(s) = value.as_str() else {
                return Ok(Some(error("string", format!("The {label} field must be a string."))));
            };
            if let Some(max) = rule.max_length
                && s.chars().count() > max
            {
                return Ok(Some(error(
                    "max",
                    format!("The {label} field must not be greater than {max} characters."),
                )));
            }
            if let Some(allowed) = rule.one_of
                && !allowed.contains(&s)
            {
                return Ok(Some(error(
                    "in",
                    format!(
                        "The selected {label} is invalid. Allowed: {}.",
                        allowed.join(", ")
                    ),
                )));
            }
            Ok(None)
        }
        FieldKind::Integer => {
            let Some(n) = value.as_i64() else {
                return Ok(Some(error(
                    "integer",
                    format!("The {label} field must be an integer."),
                )));
            };
            if let Some(min) = rule.min
                && (n as f64) < min
            {
                return Ok(Some(error(
                    "min",
                    format!("The {label} field must be at least {min}."),
                )));
            }
            if let Some(reference) = rule.exists
                && !lookup.exists(reference, n).await?
            {
                return Ok(Some(error("exists", format!("The selected {label} is invalid."))));
            }
            Ok(None)
        }
        FieldKind::Numeric => {
            let Some(n) = value.as_f64() else {
                return Ok(Some(error("numeric", format!("The {label} field must be a number."))));
            };
            if let Some(min) = rule.min
                && n < min
            {
                return Ok(Some(error(
                    "min",
                    format!("The {label} field must be at least {min}."),
                )));
            }
            Ok(None)
        }
    }
}

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockReferenceLookup;

    const RULES: RuleSet = &[
        ("title", FieldRule::sometimes(FieldKind::String).max_length(5)),
        ("price", FieldRule::sometimes(FieldKind::Numeric).min(0.0)),
        (
            "status",
            FieldRule::required(FieldKind::String).one_of(&["draft", "published"]),
        ),
        (
            "user_id",
            FieldRule::required(FieldKind::Integer).exists(Reference::Users),
        ),
    ];

    fn lookup_accepting(id: i64) -> MockReferenceLookup {
        let mut lookup = MockReferenceLookup::new();
        lookup
            .expect_exists()
            .returning(move |_, candidate| Ok(candidate == id));
        lookup
    }

    fn details(err: AppError) -> Value {
        match err {
            AppError::Validation { details, .. } => details,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_valid_payload() {
        let lookup = lookup_accepting(7);
        let body = json!({ "title": "Mate", "price": 12.5, "status": "draft", "user_id": 7 });

        assert!(validate_payload(&body, RULES, &lookup).await.is_ok());
    }

    #[tokio::test]
    async fn test_optional_fields_may_be_absent() {
        let lookup = lookup_accepting(1);
        let body = json!({ "status": "published", "user_id": 1 });

        assert!(validate_payload(&body, RULES, &lookup).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_required_fields() {
        let mut lookup = MockReferenceLookup::new();
        lookup.expect_exists().never();

        let err = validate_payload(&json!({}), RULES, &lookup)
            .await
            .unwrap_err();
        let details = details(err);

        assert_eq!(details["status"][0], "The status field is required.");
        assert_eq!(details["user_id"][0], "The user id field is required.");
        assert!(details.get("title").is_none());
    }

    #[tokio::test]
    async fn test_blank_string_counts_as_missing() {
        let lookup = lookup_accepting(1);
        let body = json!({ "status": "   ", "user_id": 1 });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert_eq!(details["status"][0], "The status field is required.");
    }

    #[tokio::test]
    async fn test_type_errors() {
        let lookup = lookup_accepting(1);
        let body = json!({ "title": 3, "price": "cheap", "status": "draft", "user_id": "1" });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert_eq!(details["title"][0], "The title field must be a string.");
        assert_eq!(details["price"][0], "The price field must be a number.");
        assert_eq!(details["user_id"][0], "The user id field must be an integer.");
    }

    #[tokio::test]
    async fn test_integral_float_is_not_an_integer() {
        let mut lookup = MockReferenceLookup::new();
        lookup.expect_exists().never();
        let body = json!({ "status": "draft", "user_id": 3.0 });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert_eq!(details["user_id"][0], "The user id field must be an integer.");
    }

    #[tokio::test]
    async fn test_present_null_fails_type_check() {
        let lookup = lookup_accepting(1);
        let body = json!({ "title": null, "status": "draft", "user_id": 1 });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert_eq!(details["title"][0], "The title field must be a string.");
    }

    #[tokio::test]
    async fn test_bounds() {
        let lookup = lookup_accepting(1);
        let body = json!({ "title": "Mañanas", "price": -1, "status": "draft", "user_id": 1 });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert_eq!(
            details["title"][0],
            "The title field must not be greater than 5 characters."
        );
        assert_eq!(details["price"][0], "The price field must be at least 0.");
    }

    #[tokio::test]
    async fn test_max_length_counts_characters() {
        let lookup = lookup_accepting(1);
        let body = json!({ "title": "ñañañ", "status": "draft", "user_id": 1 });

        assert!(validate_payload(&body, RULES, &lookup).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_status() {
        let lookup = lookup_accepting(1);
        let body = json!({ "status": "archived", "user_id": 1 });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert!(
            details["status"][0]
                .as_str()
                .unwrap()
                .starts_with("The selected status is invalid.")
        );
    }

    #[tokio::test]
    async fn test_missing_reference() {
        let lookup = lookup_accepting(1);
        let body = json!({ "status": "draft", "user_id": 99 });

        let details = details(validate_payload(&body, RULES, &lookup).await.unwrap_err());
        assert_eq!(details["user_id"][0], "The selected user id is invalid.");
    }

    #[tokio::test]
    async fn test_non_object_body() {
        let lookup = MockReferenceLookup::new();

        let details = details(
            validate_payload(&json!([1, 2]), RULES, &lookup)
                .await
                .unwrap_err(),
        );
        assert!(details.get("body").is_some());
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let mut lookup = MockReferenceLookup::new();
        lookup
            .expect_exists()
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let body = json!({ "status": "draft", "user_id": 1 });
        let err = validate_payload(&body, RULES, &lookup).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
