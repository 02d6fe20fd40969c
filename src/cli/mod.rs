//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `convert` | Raw dataset to the daily corpus |
//! | `dedupe` | Remove duplicate texts from the daily corpus |
//! | `check` | Audit a corpus file |
//! | `compare` | HTML report of differences with the reference service |
//! | `sync` | Rebuild the daily and library corpora from the reference service |
//! | `revision` | HTML listing of every record |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Use `--verbose` (or `-v`) for progress on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod check;
mod compare;
mod convert;
mod dedupe;
mod output;
mod revision;
mod sync_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
