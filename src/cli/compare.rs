//! `compare`: local corpora against the reference service

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use super::output::Output;
use crate::domain::{match_corpus, FindingStatus, TextRecord};
use crate::remote::ReferenceSource;
use crate::report::{comparison_rows, render_comparison};
use crate::storage::{Config, JsonFile};

pub fn run(
    output: &Output,
    config: &Config,
    source: &dyn ReferenceSource,
    out: Option<&Path>,
) -> Result<()> {
    let daily = JsonFile::new(&config.paths.daily)
        .read_daily()?
        .reported(|m| output.warn(m));
    let library = JsonFile::new(&config.paths.library)
        .read_library()?
        .reported(|m| output.warn(m));

    let local: Vec<TextRecord> = daily.athkar.into_iter().chain(library.duas).collect();
    output.verbose_ctx(
        "compare",
        &format!("{} local records, source {}", local.len(), source.describe()),
    );

    let mut rows = Vec::new();
    let mut compared = 0;
    for target in &config.compare.categories {
        output.verbose_ctx("compare", &format!("Comparing {} (remote id {})", target.name, target.id));

        let items = match source.fetch_category(target.id) {
            Ok(items) => items,
            Err(e) => {
                output.warn(&format!("Skipping {}: {}", target.name, e));
                continue;
            }
        };

        let results = match_corpus(&items, &local, &config.matching);
        rows.extend(comparison_rows(&target.name, &items, &local, &results));
        compared += items.len();
    }

    let report_path = out.unwrap_or(config.paths.compare_report.as_path());
    fs::write(report_path, render_comparison(&rows, &Local::now()))
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    let count = |status: FindingStatus| rows.iter().filter(|r| r.status == status).count();
    let missing = count(FindingStatus::Missing);
    let potential = count(FindingStatus::PotentialMismatch);
    let repeat = count(FindingStatus::RepeatMismatch);

    if output.is_json() {
        output.data(&serde_json::json!({
            "report": report_path,
            "compared": compared,
            "missing": missing,
            "potential_mismatch": potential,
            "repeat_mismatch": repeat,
            "rows": rows,
        }));
    } else {
        output.row(&["Missing", &missing.to_string()]);
        output.row(&["Potential Mismatch", &potential.to_string()]);
        output.row(&["Repeat Mismatch", &repeat.to_string()]);
        output.success(&format!(
            "Compared {} reference texts, report generated at: {}",
            compared,
            report_path.display()
        ));
    }

    Ok(())
}
