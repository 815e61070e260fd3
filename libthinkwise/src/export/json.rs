//! Pretty JSON output

use serde::Serialize;

use crate::error::{ExportError, Result};

/// Serialize `value` with a two-space indent. Timestamps come out as
/// ISO-8601 strings.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(value).map_err(ExportError::from)?;
    Ok(json)
}
