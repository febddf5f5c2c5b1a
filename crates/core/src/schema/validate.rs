//! Record validation against an entity schema.
//!
//! [`EntitySchema::validate`] checks a raw JSON record against the declared
//! field specs and produces a normalised record:
//!
//! - required fields must be present and non-null
//! - absent optional fields with a declared default get the default
//! - absent optional fields without one are omitted from the output
//! - undeclared fields are dropped (only declared fields are persisted)
//! - every violated field is reported, not just the first
//!
//! Validation is a pure function of its input; it never touches storage.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::entities;
use super::fields::{EntitySchema, FieldType};

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Path to the offending field, e.g. `price` or `variants[2].name`.
    pub field: String,
    /// The constraint that was violated, in human-readable form.
    pub constraint: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
        }
    }
}

/// A record failed schema validation.
///
/// Carries one [`FieldViolation`] per violated field so callers can report
/// everything wrong with a record in a single response.
#[derive(Debug, Clone, Error, Serialize)]
#[error("validation failed for {}: {}", .entity, summary(.violations))]
pub struct ValidationError {
    /// Entity the record was validated against.
    pub entity: String,
    /// Every violated field, in field declaration order.
    pub violations: Vec<FieldViolation>,
}

fn summary(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.constraint))
        .collect::<Vec<_>>()
        .join(", ")
}

impl EntitySchema {
    /// Validate a raw record, returning the normalised record on success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violated field.
    pub fn validate(&self, raw: &Value) -> Result<Map<String, Value>, ValidationError> {
        let Some(record) = raw.as_object() else {
            return Err(ValidationError {
                entity: self.name.to_owned(),
                violations: vec![FieldViolation::new(self.name, "expected a JSON object")],
            });
        };

        let mut normalised = Map::new();
        let mut violations = Vec::new();

        for spec in &self.fields {
            match record.get(spec.name) {
                None | Some(Value::Null) => {
                    if let Some(default) = &spec.default {
                        normalised.insert(spec.name.to_owned(), default.clone());
                    } else if spec.required {
                        violations.push(FieldViolation::new(spec.name, "is required"));
                    }
                    // Optional without a default: omitted from the output.
                }
                Some(value) => {
                    if let Some(checked) = check_field(spec.name, spec, value, &mut violations) {
                        normalised.insert(spec.name.to_owned(), checked);
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(normalised)
        } else {
            Err(ValidationError {
                entity: self.name.to_owned(),
                violations,
            })
        }
    }
}

/// Check one present field value. Pushes violations and returns the
/// normalised value when the field is acceptable.
fn check_field(
    path: &str,
    spec: &super::fields::FieldSpec,
    value: &Value,
    violations: &mut Vec<FieldViolation>,
) -> Option<Value> {
    match spec.ty {
        FieldType::Text => {
            let Some(text) = value.as_str() else {
                violations.push(FieldViolation::new(path, "expected text"));
                return None;
            };
            if spec.non_empty && text.is_empty() {
                violations.push(FieldViolation::new(path, "must not be empty"));
                return None;
            }
            Some(value.clone())
        }
        FieldType::Real => {
            let Some(number) = value.as_f64() else {
                violations.push(FieldViolation::new(path, "expected a number"));
                return None;
            };
            check_bounds(path, number, spec, violations).then(|| value.clone())
        }
        FieldType::Integer => {
            let Some(number) = value.as_i64() else {
                violations.push(FieldViolation::new(path, "expected an integer"));
                return None;
            };
            #[allow(clippy::cast_precision_loss)]
            let number = number as f64;
            check_bounds(path, number, spec, violations).then(|| value.clone())
        }
        FieldType::Boolean => {
            if value.is_boolean() {
                Some(value.clone())
            } else {
                violations.push(FieldViolation::new(path, "expected a boolean"));
                None
            }
        }
        FieldType::TextList => {
            let Some(items) = value.as_array() else {
                violations.push(FieldViolation::new(path, "expected a list of text"));
                return None;
            };
            let mut ok = true;
            for (index, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(FieldViolation::new(format!("{path}[{index}]"), "expected text"));
                    ok = false;
                }
            }
            ok.then(|| value.clone())
        }
        FieldType::TextMap => {
            let Some(entries) = value.as_object() else {
                violations.push(FieldViolation::new(path, "expected a map of text to text"));
                return None;
            };
            let mut ok = true;
            for (key, entry) in entries {
                if !entry.is_string() {
                    violations.push(FieldViolation::new(format!("{path}.{key}"), "expected text"));
                    ok = false;
                }
            }
            ok.then(|| value.clone())
        }
        FieldType::NestedList(entity_name) => {
            let Some(items) = value.as_array() else {
                violations.push(FieldViolation::new(
                    path,
                    format!("expected a list of {entity_name} records"),
                ));
                return None;
            };
            let Some(nested) = entities::entity(entity_name) else {
                violations.push(FieldViolation::new(
                    path,
                    format!("unknown embedded entity {entity_name}"),
                ));
                return None;
            };

            let mut checked = Vec::with_capacity(items.len());
            let mut ok = true;
            for (index, item) in items.iter().enumerate() {
                match nested.validate(item) {
                    Ok(normalised) => checked.push(Value::Object(normalised)),
                    Err(err) => {
                        ok = false;
                        for violation in err.violations {
                            violations.push(FieldViolation::new(
                                format!("{path}[{index}].{}", violation.field),
                                violation.constraint,
                            ));
                        }
                    }
                }
            }
            ok.then_some(Value::Array(checked))
        }
    }
}

/// Numeric range check shared by real and integer fields.
fn check_bounds(
    path: &str,
    number: f64,
    spec: &super::fields::FieldSpec,
    violations: &mut Vec<FieldViolation>,
) -> bool {
    if let Some(min) = spec.minimum
        && number < min
    {
        violations.push(FieldViolation::new(path, format!("must be at least {min}")));
        return false;
    }
    if let Some(max) = spec.maximum
        && number > max
    {
        violations.push(FieldViolation::new(path, format!("must be at most {max}")));
        return false;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{entities, fields::FieldSpec};
    use serde_json::json;

    fn widget_schema() -> EntitySchema {
        EntitySchema::new(
            "widget",
            vec![
                FieldSpec::text("label").required().non_empty(),
                FieldSpec::real("score")
                    .minimum(0.0)
                    .maximum(5.0)
                    .default_value(json!(5.0)),
                FieldSpec::integer("count").minimum(0.0).default_value(json!(0)),
                FieldSpec::text("note"),
            ],
        )
    }

    #[test]
    fn test_valid_record_normalises_with_defaults() {
        let schema = widget_schema();
        let out = schema.validate(&json!({"label": "a"})).unwrap();

        assert_eq!(out["label"], "a");
        assert_eq!(out["score"], json!(5.0));
        assert_eq!(out["count"], json!(0));
        // Optional without default stays absent.
        assert!(out.get("note").is_none());
    }

    #[test]
    fn test_undeclared_fields_are_dropped() {
        let schema = widget_schema();
        let out = schema
            .validate(&json!({"label": "a", "smuggled": true}))
            .unwrap();
        assert!(out.get("smuggled").is_none());
    }

    #[test]
    fn test_all_violations_reported_not_just_first() {
        let schema = widget_schema();
        let err = schema
            .validate(&json!({"label": "", "score": 7, "count": -1}))
            .unwrap_err();

        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["label", "score", "count"]);
        assert_eq!(err.violations[1].constraint, "must be at most 5");
    }

    #[test]
    fn test_missing_required_field() {
        let schema = widget_schema();
        let err = schema.validate(&json!({})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "label");
        assert_eq!(err.violations[0].constraint, "is required");
    }

    #[test]
    fn test_null_counts_as_absent() {
        let schema = widget_schema();
        let err = schema.validate(&json!({"label": null})).unwrap_err();
        assert_eq!(err.violations[0].constraint, "is required");
    }

    #[test]
    fn test_non_object_input() {
        let schema = widget_schema();
        let err = schema.validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.violations[0].constraint, "expected a JSON object");
    }

    #[test]
    fn test_type_mismatches() {
        let schema = widget_schema();
        let err = schema
            .validate(&json!({"label": 12, "score": "high"}))
            .unwrap_err();

        assert_eq!(err.violations[0].constraint, "expected text");
        assert_eq!(err.violations[1].constraint, "expected a number");
    }

    #[test]
    fn test_integer_field_rejects_fractions() {
        let schema = widget_schema();
        let err = schema
            .validate(&json!({"label": "a", "count": 1.5}))
            .unwrap_err();
        assert_eq!(err.violations[0].field, "count");
        assert_eq!(err.violations[0].constraint, "expected an integer");
    }

    #[test]
    fn test_nested_violations_carry_indexed_paths() {
        let schema = entities::product();
        let err = schema
            .validate(&json!({
                "title": "Widget",
                "slug": "widget",
                "price": 10,
                "category": "hardware",
                "variants": [
                    {"name": "Color", "options": ["Red"]},
                    {"options": "not-a-list"},
                ],
            }))
            .unwrap_err();

        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["variants[1].name", "variants[1].options"]);
    }

    #[test]
    fn test_error_display_names_fields() {
        let schema = widget_schema();
        let err = schema.validate(&json!({"score": -1})).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("label"));
        assert!(rendered.contains("score"));
    }
}
