//! # HTML reports
//!
//! Right-to-left pages rendered with maud. All interpolated corpus text is
//! escaped by the template engine.

mod comparison;
mod revision;

pub use comparison::{comparison_rows, render_comparison, ComparisonRow};
pub use revision::{render_revision, revision_rows, RevisionRow};

use chrono::{DateTime, Local};

/// Timestamp format shown under report headings
pub(crate) fn generated_label(at: &DateTime<Local>) -> String {
    format!("Generated {}", at.format("%Y-%m-%d %H:%M"))
}
