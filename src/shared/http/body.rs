/// Request body decoding
///
/// Bodies are read as raw bytes and decoded here so every malformed body is
/// reported as a `ValidationError` with the usual `{message}` shape.
use crate::shared::domain::Record;
use crate::shared::errors::{AppError, AppResult};
use serde_json::Value;

/// Decode a record from a JSON body. With `path_key`, a missing or null key
/// in the body is filled from the path and a differing one is rejected.
pub fn decode_record<T: Record>(body: &[u8], path_key: Option<&str>) -> AppResult<T> {
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("Malformed JSON body: {}", e)))?;

    let object = value.as_object_mut().ok_or_else(|| {
        AppError::ValidationError(format!("{} body must be a JSON object", T::LABEL))
    })?;

    if let Some(key) = path_key {
        match object.get(T::KEY_FIELD) {
            None | Some(Value::Null) => {
                object.insert(T::KEY_FIELD.to_string(), Value::String(key.to_string()));
            }
            Some(Value::String(existing)) if existing != key => {
                return Err(AppError::ValidationError(format!(
                    "{} cannot be changed (path '{}', body '{}')",
                    T::KEY_FIELD,
                    key,
                    existing
                )));
            }
            Some(_) => {}
        }
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::ValidationError(format!("Invalid {} body: {}", T::LABEL, e)))
}

/// Best-effort JSON view of a body for the request log
pub fn body_as_json(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(body).into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::materias::Materia;
    use serde_json::json;

    #[test]
    fn decodes_full_body() {
        let body = br#"{"id":"ISC01","nombre":"Algoritmos"}"#;
        let materia: Materia = decode_record(body, None).unwrap();
        assert_eq!(materia.id, "ISC01");
        assert_eq!(materia.nombre.as_deref(), Some("Algoritmos"));
    }

    #[test]
    fn fills_missing_key_from_path() {
        let body = br#"{"nombre":"Algoritmos"}"#;
        let materia: Materia = decode_record(body, Some("ISC01")).unwrap();
        assert_eq!(materia.id, "ISC01");
    }

    #[test]
    fn rejects_key_change() {
        let body = br#"{"id":"OTHER","nombre":"Algoritmos"}"#;
        let err = decode_record::<Materia>(body, Some("ISC01")).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn malformed_bodies_are_validation_errors() {
        let bodies: [&[u8]; 4] = [b"{not json", b"[1,2]", br#"{"nombre":"sin id"}"#, b""];
        for body in bodies {
            let err = decode_record::<Materia>(body, None).unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "{:?}", body);
        }
    }

    #[test]
    fn log_view_keeps_non_json_as_text() {
        assert_eq!(body_as_json(b""), None);
        assert_eq!(body_as_json(br#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(body_as_json(b"plain"), Some(json!("plain")));
    }
}
