//! RPKI cache source selection and reading.

use super::export::{parse_export, ValidatorExport};
use reqwest::header::ACCEPT;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the validator export is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSource {
    /// Fetched with an HTTP GET.
    Url(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl CacheSource {
    /// Any location mentioning `http` is fetched, everything else is a file.
    pub fn new(location: &str) -> CacheSource {
        if location.contains("http") {
            CacheSource::Url(location.to_string())
        } else {
            CacheSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for CacheSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheSource::Url(url) => write!(f, "{url}"),
            CacheSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read and parse the validator export from `source`.
///
/// # Returns
/// * `Ok(ValidatorExport)` - The parsed export document
/// * `Err` - If the fetch or read fails, or the document is not a valid export
pub async fn read_validator_export(source: &CacheSource) -> Result<ValidatorExport, Box<dyn Error>> {
    let json = match source {
        CacheSource::Url(url) => fetch_url(url).await?,
        CacheSource::File(path) => read_file(path)?,
    };
    parse_export(&json, &source.to_string())
}

async fn fetch_url(url: &str) -> Result<String, Box<dyn Error>> {
    log::info!("Fetching RPKI cache from {url}");
    let response = reqwest::Client::new()
        .get(url)
        .header(ACCEPT, "text/json")
        .send()
        .await
        .map_err(|e| format!("Error fetching {url}: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Error fetching {url}: {e}"))?;
    let body = response
        .text()
        .await
        .map_err(|e| format!("Error reading response body from {url}: {e}"))?;
    log::debug!("Fetched {} bytes from {url}", body.len());
    Ok(body)
}

fn read_file(path: &Path) -> Result<String, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("Cache file does not exist: {}", path.display()).into());
    }
    log::info!("Reading RPKI cache file: {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading cache file {}: {e}", path.display()).into())
}
