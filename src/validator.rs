//! Structural check of generated specs.

use log::debug;
use serde_yaml::Value;

/// Top-level key every OpenAPI document carries.
const OPENAPI_KEY: &str = "openapi";

/// Returns true if `text` parses as YAML whose root is a mapping containing an
/// `openapi` key.
///
/// This is advisory: callers persist the spec either way and only warn.
pub fn validate_openapi_yaml(text: &str) -> bool {
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(root)) => root.get(OPENAPI_KEY).is_some(),
        Ok(other) => {
            debug!("Generated spec root is not a mapping: {:?}", other);
            false
        }
        Err(e) => {
            debug!("Generated spec is not valid YAML: {}", e);
            false
        }
    }
}
