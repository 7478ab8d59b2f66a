use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No JSON object found in model response")]
    NoJsonObject,

    #[error("Model response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Extract the JSON document from raw model output.
///
/// Takes everything from the first `{` to the last `}` inclusive and parses
/// it. There is no brace matching and no awareness of string escaping, so
/// surrounding prose or code fences are tolerated but stray braces in that
/// prose are not.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let start = text.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }

    Ok(serde_json::from_str(&text[start..=end])?)
}
