//! Reference data sources
//!
//! [`HttpSource`] talks to the reference web service; [`DirSource`] reads the
//! same documents from a local directory (`{id}.json` plus the index file),
//! which is how snapshots are replayed offline.
//!
//! No retries: a failed fetch is returned to the caller, which logs it and
//! moves on to the next category.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::types::{decode_category, decode_index, Index, IndexEntry, RemoteItem};

pub const USER_AGENT: &str = concat!("athkar-tools/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document shape in {origin}: {reason}")]
    Shape { origin: String, reason: String },
}

/// Somewhere reference documents come from
pub trait ReferenceSource {
    /// Fetches the list of all categories
    fn fetch_index(&self) -> Result<Index, FetchError>;

    /// Fetches the texts of one category by id
    fn fetch_category(&self, id: u32) -> Result<Vec<RemoteItem>, FetchError>;

    /// Fetches the texts of an index entry
    fn fetch_entry(&self, entry: &IndexEntry) -> Result<Vec<RemoteItem>, FetchError> {
        self.fetch_category(entry.id)
    }

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Parses a document, tolerating a UTF-8 byte order mark
fn parse_document(bytes: &[u8], origin: &str) -> Result<Value, FetchError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    serde_json::from_slice(bytes).map_err(|source| FetchError::Decode {
        origin: origin.to_string(),
        source,
    })
}

/// Blocking HTTP client for the reference service
pub struct HttpSource {
    http: reqwest::blocking::Client,
    base_url: String,
    index_name: String,
}

impl HttpSource {
    pub fn new(base_url: &str, index_name: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            index_name: index_name.to_string(),
        })
    }

    /// URL of a category document
    pub fn category_url(&self, id: u32) -> String {
        format!("{}/{}.json", self.base_url, id)
    }

    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_name)
    }

    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.http.get(url).send().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        parse_document(&bytes, url)
    }
}

impl ReferenceSource for HttpSource {
    fn fetch_index(&self) -> Result<Index, FetchError> {
        let url = self.index_url();
        decode_index(self.get_json(&url)?, &url)
    }

    fn fetch_category(&self, id: u32) -> Result<Vec<RemoteItem>, FetchError> {
        let url = self.category_url(id);
        decode_category(self.get_json(&url)?, &url)
    }

    fn fetch_entry(&self, entry: &IndexEntry) -> Result<Vec<RemoteItem>, FetchError> {
        match &entry.url {
            Some(url) => decode_category(self.get_json(url)?, url),
            None => self.fetch_category(entry.id),
        }
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads reference documents from a directory snapshot
pub struct DirSource {
    dir: PathBuf,
    index_name: String,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>, index_name: &str) -> Self {
        Self {
            dir: dir.into(),
            index_name: index_name.to_string(),
        }
    }

    fn read_json(&self, path: &Path) -> Result<Value, FetchError> {
        let bytes = fs::read(path).map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_document(&bytes, &path.display().to_string())
    }
}

impl ReferenceSource for DirSource {
    fn fetch_index(&self) -> Result<Index, FetchError> {
        let path = self.dir.join(&self.index_name);
        decode_index(self.read_json(&path)?, &path.display().to_string())
    }

    fn fetch_category(&self, id: u32) -> Result<Vec<RemoteItem>, FetchError> {
        let path = self.dir.join(format!("{}.json", id));
        decode_category(self.read_json(&path)?, &path.display().to_string())
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
