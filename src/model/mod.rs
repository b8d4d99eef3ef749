pub mod image;
pub mod synset;

pub use image::Image;
pub use synset::Synset;

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// Validate a request document against one of the entity schemas.
///
/// Returns the validator's first failure message so handlers can surface it
/// in the error document.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), String> {
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| e.to_string())?;

    if let Err(errors) = compiled.validate(instance) {
        let message = errors
            .map(|e| e.to_string())
            .next()
            .unwrap_or_else(|| "document does not match schema".to_string());
        return Err(message);
    }

    Ok(())
}
