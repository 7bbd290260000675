//! CSV resource resolution and retrieval
//!
//! A source is either an HTTP(S) URL or a local file path. Every fetch goes to
//! the source again; nothing is cached between calls.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::{Error, Result};

/// Location of the surveillance CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Remote resource fetched over HTTP(S)
    Url(String),
    /// Local file
    File(PathBuf),
}

impl DataSource {
    /// Classify a location string: anything starting with http:// or https://
    /// is a URL, the rest is a file path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Fetch the raw CSV text
    ///
    /// Non-success HTTP responses and transport failures surface as
    /// [`Error::Fetch`]; a body that is not UTF-8 surfaces as [`Error::Parse`].
    pub async fn fetch_text(&self) -> Result<String> {
        let bytes = match self {
            Self::Url(url) => fetch_url(url).await?,
            Self::File(path) => {
                debug!("Reading local CSV file: {}", path.display());
                tokio::fs::read(path)
                    .await
                    .map_err(|e| Error::fetch(path.display().to_string(), e.to_string()))?
            }
        };

        info!("Fetched {} bytes from {}", bytes.len(), self);
        decode_body(bytes)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        Self::parse(location)
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>> {
    debug!("Requesting {}", url);
    let response = reqwest::get(url)
        .await
        .map_err(|e| Error::fetch(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::fetch_status(url, status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::fetch(url, e.to_string()))?;
    Ok(body.to_vec())
}

/// Decode a response body as UTF-8, dropping a leading byte order mark
pub fn decode_body(bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes)
        .map_err(|e| Error::parse(format!("CSV body is not valid UTF-8: {e}"), None))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
