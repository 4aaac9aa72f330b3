//! Structural validation of normalized payloads.
//!
//! # Design
//! The declared shape of each endpoint is the serde definition of its
//! record type in `types`. `validate` runs that definition over a
//! normalized `Value` and reports the first mismatch together with the
//! field path where it occurred (`[2].powerInfo.circuitID`). The helpers
//! below cover the checks serde derive does not express directly: the
//! top-level "object" / "array of objects" guard and the 0/1 integer
//! booleans the server emits for some switch fields.

use serde::de::{self, DeserializeOwned, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FrmError;

/// Deserialize `value` into `T`, reporting the failing field path.
pub fn validate<T: DeserializeOwned>(value: Value) -> Result<T, FrmError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        FrmError::Validation {
            path,
            message: err.into_inner().to_string(),
        }
    })
}

/// Require `value` to be a JSON object.
pub fn expect_object(value: Value) -> Result<Value, FrmError> {
    match value {
        Value::Object(_) => Ok(value),
        other => Err(FrmError::Validation {
            path: ".".to_string(),
            message: format!("expected an object, found {}", kind_of(&other)),
        }),
    }
}

/// Require `value` to be an array whose every element is a JSON object.
pub fn expect_object_array(value: Value) -> Result<Value, FrmError> {
    let items = match &value {
        Value::Array(items) => items,
        other => {
            return Err(FrmError::Validation {
                path: ".".to_string(),
                message: format!("expected an array of objects, found {}", kind_of(other)),
            })
        }
    };
    if let Some((index, item)) = items.iter().enumerate().find(|(_, v)| !v.is_object()) {
        return Err(FrmError::Validation {
            path: format!("[{index}]"),
            message: format!("expected an object, found {}", kind_of(item)),
        });
    }
    Ok(value)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accept `0`/`1` (or a real boolean) and expose it as `bool`.
pub fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Bool(bool),
        Int(i64),
    }

    match IntOrBool::deserialize(deserializer)
        .map_err(|_| de::Error::custom("expected 0, 1 or a boolean"))?
    {
        IntOrBool::Bool(b) => Ok(b),
        IntOrBool::Int(0) => Ok(false),
        IntOrBool::Int(1) => Ok(true),
        IntOrBool::Int(n) => Err(de::Error::invalid_value(
            Unexpected::Signed(n),
            &"0 or 1",
        )),
    }
}

/// Serialize a `bool` back to the server's `0`/`1` form.
pub fn bool_to_int<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}
