//! Key re-casing for server payloads.
//!
//! The FRM mod emits PascalCase keys (`ClassName`, `PowerInfo`, `ID`); the
//! typed records use camelCase. `normalize_keys` rewrites every object key
//! in a JSON tree without touching the values.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Rewrite one key: `ID` becomes `id`, anything else gets its first
/// character lower-cased.
pub fn normalize_key(key: &str) -> Cow<'_, str> {
    if key == "ID" {
        return Cow::Borrowed("id");
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut out = String::with_capacity(key.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(key),
    }
}

/// Recursively normalize the keys of every object in `value`.
///
/// Arrays are walked element-wise; scalars and `null` are returned as-is.
/// When two keys collapse onto the same name the later one wins.
pub fn normalize_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .iter()
                .map(|(key, val)| (normalize_key(key).into_owned(), normalize_keys(val)))
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_keys).collect()),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_special_case() {
        assert_eq!(normalize_key("ID"), "id");
        assert_eq!(normalize_key("Id"), "id");
        assert_eq!(normalize_key("CircuitID"), "circuitID");
    }

    #[test]
    fn lowercase_keys_pass_through() {
        assert!(matches!(normalize_key("className"), Cow::Borrowed("className")));
        assert!(matches!(normalize_key(""), Cow::Borrowed("")));
        assert_eq!(normalize_key("circuitGroupID"), "circuitGroupID");
    }

    #[test]
    fn non_ascii_first_character() {
        assert_eq!(normalize_key("Ärger"), "ärger");
        assert_eq!(normalize_key("_Private"), "_Private");
    }

    #[test]
    fn nested_objects_and_arrays() {
        let raw = json!([
            {
                "ID": "Build_ConstructorMk1_C_0",
                "Location": { "X": 1.0, "Y": 2.0, "Z": 3.0, "Rotation": 90 },
                "Production": [{ "Name": "Iron Rod", "CurrentProd": 15.0 }],
                "Tags": ["Keep", "Values"]
            }
        ]);
        let expected = json!([
            {
                "id": "Build_ConstructorMk1_C_0",
                "location": { "x": 1.0, "y": 2.0, "z": 3.0, "rotation": 90 },
                "production": [{ "name": "Iron Rod", "currentProd": 15.0 }],
                "tags": ["Keep", "Values"]
            }
        ]);
        assert_eq!(normalize_keys(&raw), expected);
    }

    #[test]
    fn scalars_are_unchanged() {
        for value in [json!(null), json!(true), json!(42), json!("ID")] {
            assert_eq!(normalize_keys(&value), value);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let raw = json!({ "Sender": "ADA" });
        let _ = normalize_keys(&raw);
        assert_eq!(raw, json!({ "Sender": "ADA" }));
    }

    #[test]
    fn idempotent_on_own_output() {
        let raw = json!({
            "SessionName": "Home",
            "PowerInfo": { "CircuitGroupID": -1, "FuseTriggered": false },
            "Inventory": [{ "ClassName": "Desc_IronPlate_C", "Amount": 5 }]
        });
        let once = normalize_keys(&raw);
        let twice = normalize_keys(&once);
        assert_eq!(once, twice);
    }
}
