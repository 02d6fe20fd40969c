//! # Storage Layer
//!
//! Corpus files and configuration.
//!
//! | Data | Format | Default location |
//! |------|--------|------------------|
//! | Daily athkar | JSON object (`athkar`) | `daily_athkar.json` |
//! | Library | JSON object (`categories`, `duas`) | `hisn.json` |
//! | Raw dataset | JSON array | `adhkar.json` |
//! | Config | TOML | `athkar.toml` |
//!
//! Corpus files are always rewritten whole: read, transform in memory, then
//! an atomic write (temp file + lock + rename).

mod config;
mod corpus;

pub use config::{
    CompareConfig, CompareTarget, Config, ConfigError, PathsConfig, RemoteConfig, LOCAL_CONFIG_FILE,
};
pub use corpus::{
    DailyCorpus, JsonFile, LibraryCategory, LibraryCorpus, Loaded, DEFAULT_LIBRARY_ICON,
};
