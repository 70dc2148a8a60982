//! Small helpers for the hand-rolled document codec.
//!
//! Documents are `serde_json::Value` sub-trees nested inside a larger
//! schematic file.  Required fields fail with `MissingField`/`InvalidField`;
//! optional fields take an explicit default.  Fields these helpers never ask
//! for are simply ignored, which is what gives the codec its forward
//! compatibility.

use crate::SchematicError;
use serde_json::Value;
use uuid::Uuid;

pub(crate) fn req<'a>(j: &'a Value, field: &'static str) -> Result<&'a Value, SchematicError> {
    j.get(field).ok_or(SchematicError::MissingField(field))
}

pub(crate) fn req_str<'a>(j: &'a Value, field: &'static str) -> Result<&'a str, SchematicError> {
    req(j, field)?
        .as_str()
        .ok_or_else(|| SchematicError::InvalidField {
            field,
            reason: "expected a string".to_string(),
        })
}

pub(crate) fn req_uuid(j: &Value, field: &'static str) -> Result<Uuid, SchematicError> {
    let s = req_str(j, field)?;
    s.parse().map_err(|e| SchematicError::InvalidField {
        field,
        reason: format!("not a UUID: {e}"),
    })
}

pub(crate) fn opt_bool(
    j: &Value,
    field: &'static str,
    default: bool,
) -> Result<bool, SchematicError> {
    match j.get(field) {
        None => Ok(default),
        Some(v) => v.as_bool().ok_or_else(|| SchematicError::InvalidField {
            field,
            reason: "expected a boolean".to_string(),
        }),
    }
}

pub(crate) fn opt_str<'a>(
    j: &'a Value,
    field: &'static str,
) -> Result<Option<&'a str>, SchematicError> {
    match j.get(field) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| SchematicError::InvalidField {
                field,
                reason: "expected a string".to_string(),
            }),
    }
}

pub(crate) fn opt_u64(
    j: &Value,
    field: &'static str,
    default: u64,
) -> Result<u64, SchematicError> {
    match j.get(field) {
        None => Ok(default),
        Some(v) => v.as_u64().ok_or_else(|| SchematicError::InvalidField {
            field,
            reason: "expected an unsigned integer".to_string(),
        }),
    }
}

/// Read an optional array of UUID strings (absent ⇒ empty).
pub(crate) fn opt_uuid_array(
    j: &Value,
    field: &'static str,
) -> Result<Vec<Uuid>, SchematicError> {
    let Some(v) = j.get(field) else {
        return Ok(Vec::new());
    };
    let arr = v.as_array().ok_or_else(|| SchematicError::InvalidField {
        field,
        reason: "expected an array".to_string(),
    })?;
    arr.iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| SchematicError::InvalidField {
                    field,
                    reason: "expected an array of strings".to_string(),
                })?
                .parse()
                .map_err(|e| SchematicError::InvalidField {
                    field,
                    reason: format!("not a UUID: {e}"),
                })
        })
        .collect()
}
