// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use base64::Engine;
use fnaction_core::DeployError;

pub const MAX_SECRETS: usize = 5;

/// Decode the function secrets, a base64-encoded JSON object of strings.
///
/// Error messages never contain secret values.
pub fn decode_secrets(encoded: &str) -> Result<std::collections::BTreeMap<String, String>, DeployError> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|err| DeployError::Validation(format!("Function secrets are not valid base64: {}", err)))?;
    let object = match serde_json::from_slice::<serde_json::Value>(&decoded) {
        Ok(serde_json::Value::Object(object)) => object,
        _ => return Err(DeployError::Validation(String::from("Function secrets must be a JSON object"))),
    };
    if object.len() > MAX_SECRETS {
        return Err(DeployError::Validation(format!(
            "At most {} secrets are allowed, got {}",
            MAX_SECRETS,
            object.len()
        )));
    }

    let mut secrets = std::collections::BTreeMap::new();
    for (key, value) in object {
        if key.is_empty() || key != key.to_lowercase() {
            return Err(DeployError::Validation(format!(
                "Invalid secret key '{}': keys must be non-empty and lowercase",
                key
            )));
        }
        match value {
            serde_json::Value::String(value) => {
                secrets.insert(key, value);
            }
            _ => return Err(DeployError::Validation(format!("Value of secret '{}' must be a string", key))),
        }
    }
    Ok(secrets)
}

#[cfg(test)]
mod test {
    use super::*;

    fn encode(value: serde_json::Value) -> String {
        base64::engine::general_purpose::STANDARD.encode(value.to_string())
    }

    #[test]
    fn test_decode_secrets() {
        let secrets = decode_secrets(&encode(serde_json::json!({"token": "abc", "db-password": "xyz"}))).unwrap();
        assert_eq!(secrets.len(), 2);
        assert_eq!(secrets["token"], "abc");
        assert_eq!(secrets["db-password"], "xyz");
    }

    #[test]
    fn test_invalid_secrets() {
        let too_many = serde_json::json!({"a": "1", "b": "2", "c": "3", "d": "4", "e": "5", "f": "6"});
        for encoded in [
            String::from("not base64!"),
            encode(serde_json::json!(["a", "b"])),
            encode(serde_json::json!({"Token": "abc"})),
            encode(serde_json::json!({"": "abc"})),
            encode(serde_json::json!({"token": 42})),
            encode(too_many),
        ] {
            assert!(matches!(decode_secrets(&encoded), Err(DeployError::Validation(_))), "{}", encoded);
        }
    }

    #[test]
    fn test_values_not_leaked() {
        let err = decode_secrets(&encode(serde_json::json!({"Token": "hunter2"}))).unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }
}
