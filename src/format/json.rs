//! Structured-data (JSON) literals

use super::LiteralError;
use crate::dataset::{Record, Value};
use crate::schema::MAX_SAFE_INTEGER;
use crate::types::{JsonObject, JsonValue};
use serde_json::Number;

/// Render one value as a JSON literal
///
/// Values pass through unchanged. Non-finite floats have no JSON literal
/// and are rejected; with `strict_safe_integers`, so are integers a double
/// cannot hold exactly.
pub fn json_literal(
    value: &Value,
    strict_safe_integers: bool,
) -> std::result::Result<JsonValue, LiteralError> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(i) => {
            if strict_safe_integers && i.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
                return Err(LiteralError::UnsafeInteger(*i));
            }
            JsonValue::Number((*i).into())
        }
        Value::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or(LiteralError::NonFinite(*f))?,
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Composite(c) => c.clone(),
    })
}

/// Render a record as a JSON object, keeping column order
///
/// On failure returns the offending column alongside the error.
pub fn json_object(
    record: &Record,
    strict_safe_integers: bool,
) -> std::result::Result<JsonObject, (String, LiteralError)> {
    let mut object = JsonObject::new();
    for (column, value) in record.iter() {
        let literal = json_literal(value, strict_safe_integers)
            .map_err(|e| (column.to_string(), e))?;
        object.insert(column.to_string(), literal);
    }
    Ok(object)
}
