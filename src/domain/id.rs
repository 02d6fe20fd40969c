//! Record identifiers
//!
//! Generated IDs have the format `{prefix}-{source}-{index:03}` with an optional
//! variant suffix:
//! - `adhkar-4-002` - third item of raw source category 4
//! - `adhkar-1-000-m` - morning variant of the first item of the split category
//! - `sync-28-011` - twelfth item of remote category 28
//!
//! Records read from disk may carry any non-empty ID; only generation follows
//! the format above.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::period::Period;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Record ID must not be empty")]
    Empty,
}

/// Identifier of a [`TextRecord`](super::TextRecord)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Generates an ID for the item at `index` (0-based) of source category `source`
    pub fn generate(prefix: &str, source: u32, index: usize) -> Self {
        Self(format!("{}-{}-{:03}", prefix, source, index))
    }

    /// Generates the ID of a morning or evening variant of a split item
    pub fn variant(prefix: &str, source: u32, index: usize, period: Period) -> Self {
        Self(format!("{}-{}-{:03}-{}", prefix, source, index, period.suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for RecordId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
