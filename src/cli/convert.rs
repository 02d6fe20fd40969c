//! `convert`: raw dataset to daily corpus

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::Reclassifier;
use crate::storage::{Config, DailyCorpus, JsonFile};

pub fn run(output: &Output, config: &Config, input: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let source = JsonFile::new(input.unwrap_or(config.paths.dataset.as_path()));
    let target = JsonFile::new(out.unwrap_or(config.paths.daily.as_path()));

    output.verbose_ctx("convert", &format!("Reading {}", source.path().display()));
    let dataset = source.read_dataset()?;

    let reclassifier = Reclassifier::default();
    output.verbose_ctx(
        "convert",
        &format!("{} source categories, {} mapped", dataset.len(), reclassifier.table().len()),
    );

    let converted = reclassifier.reclassify(&dataset);
    for warning in &converted.warnings {
        output.warn(&warning.to_string());
    }

    target.write(&DailyCorpus {
        athkar: converted.records,
    })?;

    let stats = &converted.stats;
    if output.is_json() {
        output.data(&serde_json::json!({
            "output": target.path(),
            "stats": stats,
        }));
    } else {
        output.success(&format!(
            "Converted {} items from {} categories into {} records",
            stats.source_items, stats.source_categories, stats.output_items
        ));
        output.row(&["daily", &stats.daily.to_string()]);
        output.row(&["hisn", &stats.hisn.to_string()]);
        output.row(&["dropped", &stats.dropped.to_string()]);
        output.success(&format!("Wrote {}", target.path().display()));
    }

    Ok(())
}
