//! JSON corpus files
//!
//! | File | Shape |
//! |------|-------|
//! | Daily corpus | `{ "athkar": [TextRecord, ...] }` |
//! | Library corpus | `{ "categories": [{ id, name, icon }], "duas": [TextRecord, ...] }` |
//! | Raw dataset | `[{ id, category, array: [{ id, text, count }] }]` |
//!
//! Corpus reads are lenient per entry: a record or category that does not
//! decode (unknown category, missing text) is dropped and reported in
//! [`Loaded::skipped`] instead of failing the whole file.
//!
//! Writes are atomic: the document goes to a locked temp file that is then
//! renamed over the target. Output is pretty-printed with non-ASCII text kept
//! as-is.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Category, SourceCategory, TextRecord};

/// Icon given to library categories created by a sync
pub const DEFAULT_LIBRARY_ICON: &str = "leaf.fill";

/// The daily athkar file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyCorpus {
    #[serde(default)]
    pub athkar: Vec<TextRecord>,
}

/// A category of the library file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryCategory {
    pub id: Category,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    DEFAULT_LIBRARY_ICON.to_string()
}

impl LibraryCategory {
    pub fn new(id: Category, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: default_icon(),
        }
    }
}

/// The Fortress of the Muslim library file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryCorpus {
    #[serde(default)]
    pub categories: Vec<LibraryCategory>,
    #[serde(default)]
    pub duas: Vec<TextRecord>,
}

impl LibraryCorpus {
    /// Display name of a library category
    pub fn category_name(&self, id: &Category) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.as_str())
    }
}

/// A corpus read from disk, with the entries that had to be dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded<T> {
    pub corpus: T,
    /// One message per dropped entry
    pub skipped: Vec<String>,
}

impl<T> Loaded<T> {
    /// Passes each skip message to `warn` and returns the corpus
    pub fn reported(self, mut warn: impl FnMut(&str)) -> T {
        for message in &self.skipped {
            warn(message);
        }
        self.corpus
    }
}

#[derive(Deserialize)]
struct RawDaily {
    #[serde(default)]
    athkar: Vec<Value>,
}

#[derive(Deserialize)]
struct RawLibrary {
    #[serde(default)]
    categories: Vec<Value>,
    #[serde(default)]
    duas: Vec<Value>,
}

/// Decodes each entry on its own, collecting a message for every failure
fn decode_each<T: DeserializeOwned>(
    values: Vec<Value>,
    kind: &str,
    path: &Path,
    skipped: &mut Vec<String>,
) -> Vec<T> {
    let mut decoded = Vec::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        let label = match value.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => format!("#{}", position + 1),
        };
        match serde_json::from_value(value) {
            Ok(entry) => decoded.push(entry),
            Err(e) => skipped.push(format!(
                "{}: skipping {} {}: {}",
                path.display(),
                kind,
                label,
                e
            )),
        }
    }
    decoded
}

/// A JSON document stored at a fixed path
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and parses the document; missing or malformed files are errors
    pub fn read<T: DeserializeOwned>(&self) -> Result<T> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        file.lock_shared()
            .with_context(|| format!("Failed to acquire read lock on {}", self.path.display()))?;

        serde_json::from_reader(BufReader::new(&file))
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Writes the document atomically (temp file + rename)
    pub fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to acquire write lock on {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, value)
                .with_context(|| format!("Failed to serialize {}", self.path.display()))?;
            writeln!(writer).context("Failed to write trailing newline")?;
            writer
                .flush()
                .with_context(|| format!("Failed to flush {}", temp_path.display()))?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Reads the daily corpus, dropping records that do not decode
    pub fn read_daily(&self) -> Result<Loaded<DailyCorpus>> {
        let raw: RawDaily = self.read()?;
        let mut skipped = Vec::new();
        let athkar = decode_each(raw.athkar, "record", &self.path, &mut skipped);

        Ok(Loaded {
            corpus: DailyCorpus { athkar },
            skipped,
        })
    }

    /// Reads the library corpus, dropping categories and records that do not decode
    pub fn read_library(&self) -> Result<Loaded<LibraryCorpus>> {
        let raw: RawLibrary = self.read()?;
        let mut skipped = Vec::new();
        let categories = decode_each(raw.categories, "category", &self.path, &mut skipped);
        let duas = decode_each(raw.duas, "record", &self.path, &mut skipped);

        Ok(Loaded {
            corpus: LibraryCorpus { categories, duas },
            skipped,
        })
    }

    pub fn read_dataset(&self) -> Result<Vec<SourceCategory>> {
        self.read()
    }
}
