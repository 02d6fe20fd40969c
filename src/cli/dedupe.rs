//! `dedupe`: duplicate reconciliation of the daily corpus

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::{reconcile, GroupDecision};
use crate::storage::{Config, DailyCorpus, JsonFile};

pub fn run(output: &Output, config: &Config, input: Option<&Path>, dry_run: bool) -> Result<()> {
    let file = JsonFile::new(input.unwrap_or(config.paths.daily.as_path()));
    let loaded = file.read_daily()?;
    if !loaded.skipped.is_empty() && !dry_run {
        output.warn(&format!(
            "{} unreadable record(s) will be dropped from {}",
            loaded.skipped.len(),
            file.path().display()
        ));
    }
    let corpus = loaded.reported(|m| output.warn(m));
    let before = corpus.athkar.len();

    output.verbose_ctx(
        "dedupe",
        &format!("{} records, key length {}", before, config.dedupe.key_chars),
    );

    let reconciled = reconcile(corpus.athkar, &config.dedupe);
    let removed = reconciled.removed();

    if output.is_json() {
        output.data(&serde_json::json!({
            "before": before,
            "after": reconciled.records.len(),
            "removed": removed,
            "dry_run": dry_run,
            "decisions": reconciled.decisions,
        }));
    } else {
        for decision in &reconciled.decisions {
            match decision {
                GroupDecision::KeptAll { title, members } => {
                    output.verbose_ctx(
                        "dedupe",
                        &format!("Essential, keeping all {} copies: {}", members.len(), title),
                    );
                }
                GroupDecision::KeptOne { title, kept, removed, .. } => {
                    let ids: Vec<&str> = removed.iter().map(|id| id.as_str()).collect();
                    output.row(&["kept", kept.as_str(), "removed", &ids.join(", "), title]);
                }
            }
        }
        output.success(&format!(
            "{} records -> {} ({} duplicates removed)",
            before,
            reconciled.records.len(),
            removed
        ));
    }

    if dry_run {
        output.verbose("Dry run, corpus left untouched");
        return Ok(());
    }

    file.write(&DailyCorpus {
        athkar: reconciled.records,
    })
}
