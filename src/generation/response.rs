//! Parsing raw generator responses

use serde_json::Value;

use crate::core::error::Error;
use crate::core::types::Result;

/// Extract the raw block entries from a generator response.
///
/// An empty body or an object without `blocks` yields no blocks; a bare JSON
/// array is taken as the block list itself. Entries are not validated here,
/// see [`BlockSet::from_generation_result`](crate::block::BlockSet::from_generation_result).
pub fn parse_response(text: &str) -> Result<Vec<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let parsed: Value = serde_json::from_str(text)
        .map_err(|e| Error::Generation(format!("response is not valid JSON: {}", e)))?;

    match parsed {
        Value::Array(blocks) => Ok(blocks),
        Value::Object(mut obj) => match obj.remove("blocks") {
            Some(Value::Array(blocks)) => Ok(blocks),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(Error::Generation(format!("`blocks` is not an array: {}", other))),
        },
        other => Err(Error::Generation(format!("unexpected response shape: {}", other))),
    }
}
