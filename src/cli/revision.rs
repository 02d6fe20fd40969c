//! `revision`: HTML listing of both corpora

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use super::output::Output;
use crate::report::{render_revision, revision_rows};
use crate::storage::{Config, JsonFile};

pub fn run(output: &Output, config: &Config, out: Option<&Path>) -> Result<()> {
    let daily = JsonFile::new(&config.paths.daily)
        .read_daily()?
        .reported(|m| output.warn(m));
    let library = JsonFile::new(&config.paths.library)
        .read_library()?
        .reported(|m| output.warn(m));

    let rows = revision_rows(&daily, &library);
    output.verbose_ctx("revision", &format!("{} rows", rows.len()));

    let path = out.unwrap_or(config.paths.revision_report.as_path());
    fs::write(path, render_revision(&rows, &Local::now()))
        .with_context(|| format!("Failed to write listing: {}", path.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({ "output": path, "rows": rows.len() }));
    } else {
        output.success(&format!("Revision listing written to {}", path.display()));
    }

    Ok(())
}
