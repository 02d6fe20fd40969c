//! `sync`: rebuild the corpora from the reference service

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use super::output::Output;
use crate::remote::{ReferenceSource, SyncBuilder};
use crate::storage::{Config, JsonFile};

pub fn run(
    output: &Output,
    config: &Config,
    source: &dyn ReferenceSource,
    delay: Duration,
    dry_run: bool,
) -> Result<()> {
    let index = source
        .fetch_index()
        .with_context(|| format!("Failed to fetch the category index from {}", source.describe()))?;

    for title in &index.skipped {
        output.warn(&format!("Index entry without a usable id: {}", title));
    }
    output.verbose_ctx("sync", &format!("{} categories in index", index.entries.len()));

    let mut builder = SyncBuilder::default();
    for (n, entry) in index.entries.iter().enumerate() {
        if n > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        output.verbose_ctx("sync", &format!("Processing: {} (ID: {})", entry.title, entry.id));

        match source.fetch_entry(entry) {
            Ok(items) => builder.add_category(entry, &items),
            Err(e) => {
                output.warn(&format!("Skipping {} (ID: {}): {}", entry.title, entry.id, e));
                builder.skip();
            }
        }
    }

    let synced = builder.finish();
    let daily = JsonFile::new(&config.paths.daily);
    let library = JsonFile::new(&config.paths.library);

    if !dry_run {
        daily.write(&synced.daily)?;
        library.write(&synced.library)?;
    }

    let stats = &synced.stats;
    if output.is_json() {
        output.data(&serde_json::json!({
            "daily": daily.path(),
            "library": library.path(),
            "dry_run": dry_run,
            "stats": stats,
        }));
    } else {
        output.row(&["daily records", &stats.daily.to_string()]);
        output.row(&["library categories", &stats.library_categories.to_string()]);
        output.row(&["library duas", &stats.duas.to_string()]);
        output.row(&["failed", &stats.failed.to_string()]);
        if dry_run {
            output.success("Sync dry run complete, nothing written");
        } else {
            output.success(&format!(
                "Sync complete! Updated {} and {}",
                daily.path().display(),
                library.path().display()
            ));
        }
    }

    Ok(())
}
