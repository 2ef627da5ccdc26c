//! Validator JSON export document.

use serde::{Deserialize, Serialize};
use std::error::Error;

/// Top-level validator export. Only `roas` is read, other keys are ignored.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ValidatorExport {
    /// ROA records, kept raw so rejected records can be reported verbatim.
    pub roas: Vec<serde_json::Value>,
}

/// Parse an export document, reporting the JSON path of any failure.
///
/// # Arguments
/// * `json` - The export document text
/// * `origin` - Where the document came from, used in error messages
pub fn parse_export(json: &str, origin: &str) -> Result<ValidatorExport, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let export: ValidatorExport = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing export from {origin}: path={} error={}", e.path(), e))?;
    deserializer
        .end()
        .map_err(|e| format!("Trailing data in export from {origin}: {e}"))?;
    log::info!("Parsed {} ROA records from {origin}", export.roas.len());
    Ok(export)
}
