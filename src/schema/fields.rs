use bson::{Bson, Document};
use serde_json::Value;

use crate::error::AppError;

/// Default applied to an optional field when the input omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Null,
    EmptyText,
    EmptyList,
}

impl DefaultValue {
    fn to_bson(self) -> Bson {
        match self {
            DefaultValue::Null => Bson::Null,
            DefaultValue::EmptyText => Bson::String(String::new()),
            DefaultValue::EmptyList => Bson::Array(Vec::new()),
        }
    }
}

/// Structural rule for a declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// Must be present and non-empty.
    Required,
    /// Absent (or explicitly empty) input takes the declared default.
    Optional(DefaultValue),
    /// Must be present and a member of the allowed set.
    Enumerated { allowed: &'static [&'static str] },
}

/// A single declared field of a resource schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

pub const fn required(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        rule: FieldRule::Required,
    }
}

pub const fn optional(name: &'static str, default: DefaultValue) -> FieldSpec {
    FieldSpec {
        name,
        rule: FieldRule::Optional(default),
    }
}

pub const fn enumerated(name: &'static str, allowed: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        rule: FieldRule::Enumerated { allowed },
    }
}

/// Missing, null, empty string and empty array all count as absent.
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn check_enum(name: &str, allowed: &[&str], value: &Value) -> Result<(), AppError> {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(AppError::not_in_enum(name, allowed)),
    }
}

fn to_bson(name: &str, value: &Value) -> Result<Bson, AppError> {
    Bson::try_from(value.clone()).map_err(|_| AppError::malformed(name, "a representable JSON value"))
}

/// Shape a full create payload into a stored document.
///
/// Declared fields are checked for presence and enum membership, defaults
/// are applied, and undeclared input fields are dropped.
pub fn validate(
    fields: &[FieldSpec],
    raw: &serde_json::Map<String, Value>,
) -> Result<Document, AppError> {
    let mut shaped = Document::new();

    for spec in fields {
        let value = raw.get(spec.name);
        match spec.rule {
            FieldRule::Required => {
                if is_absent(value) {
                    return Err(AppError::required(spec.name));
                }
                shaped.insert(spec.name, to_bson(spec.name, value.unwrap())?);
            }
            FieldRule::Optional(default) => {
                if is_absent(value) {
                    shaped.insert(spec.name, default.to_bson());
                } else {
                    shaped.insert(spec.name, to_bson(spec.name, value.unwrap())?);
                }
            }
            FieldRule::Enumerated { allowed } => {
                if is_absent(value) {
                    return Err(AppError::required(spec.name));
                }
                let value = value.unwrap();
                check_enum(spec.name, allowed, value)?;
                shaped.insert(spec.name, to_bson(spec.name, value)?);
            }
        }
    }

    Ok(shaped)
}

/// Shape a partial update payload.
///
/// Only fields present in the input are checked, against the same
/// per-field rules as `validate`. Identity and bookkeeping fields are
/// not declared in any schema, so they are stripped here along with
/// every other undeclared field.
pub fn validate_partial(
    fields: &[FieldSpec],
    raw: &serde_json::Map<String, Value>,
) -> Result<Document, AppError> {
    let mut shaped = Document::new();

    for spec in fields {
        let Some(value) = raw.get(spec.name) else {
            continue;
        };
        match spec.rule {
            FieldRule::Required => {
                if is_absent(Some(value)) {
                    return Err(AppError::required(spec.name));
                }
                shaped.insert(spec.name, to_bson(spec.name, value)?);
            }
            FieldRule::Optional(default) => {
                if is_absent(Some(value)) {
                    shaped.insert(spec.name, default.to_bson());
                } else {
                    shaped.insert(spec.name, to_bson(spec.name, value)?);
                }
            }
            FieldRule::Enumerated { allowed } => {
                check_enum(spec.name, allowed, value)?;
                shaped.insert(spec.name, to_bson(spec.name, value)?);
            }
        }
    }

    Ok(shaped)
}
