//! `check`: corpus audit

use std::path::Path;

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::audit;
use crate::storage::{Config, JsonFile};

pub fn run(output: &Output, config: &Config, path: Option<&Path>, library: bool) -> Result<()> {
    let default = if library {
        config.paths.library.as_path()
    } else {
        config.paths.daily.as_path()
    };
    let file = JsonFile::new(path.unwrap_or(default));

    let (records, skipped) = if library {
        let loaded = file.read_library()?;
        (loaded.corpus.duas, loaded.skipped)
    } else {
        let loaded = file.read_daily()?;
        (loaded.corpus.athkar, loaded.skipped)
    };
    for message in &skipped {
        output.warn(message);
    }
    output.verbose_ctx("check", &format!("Auditing {} records", records.len()));

    let findings = audit(&records);

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": file.path(),
            "records": records.len(),
            "skipped": skipped.len(),
            "findings": findings,
        }));
    } else {
        for finding in &findings {
            output.row(&[&finding.to_string()]);
        }
    }

    if !findings.is_empty() {
        bail!("{} problem(s) found in {}", findings.len(), file.path().display());
    }

    output.success(&format!("{}: {} records, no problems", file.path().display(), records.len()));
    Ok(())
}
