//! Reference comparison report

use chrono::{DateTime, Local};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

use crate::domain::{clean_text, prefix_chars, FindingStatus, MatchOutcome, MatchResult, TextRecord};
use crate::remote::RemoteItem;

const STYLE: &str = r#"
body { font-family: sans-serif; background: #f8fafc; padding: 20px; }
.container { max-width: 1200px; margin: 0 auto; }
h1 { color: #1e293b; text-align: center; }
.generated { color: #64748b; text-align: center; margin-bottom: 20px; }
table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; overflow: hidden; box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1); }
th, td { padding: 15px; border-bottom: 1px solid #e2e8f0; text-align: right; }
th { background: #f1f5f9; color: #475569; }
.status-Missing { color: #dc2626; font-weight: bold; }
.status-Potential { color: #d97706; font-weight: bold; }
.status-Repeat { color: #2563eb; font-weight: bold; }
.text-box { font-size: 0.9rem; line-height: 1.5; max-width: 400px; overflow: hidden; }
"#;

/// One line of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub status: FindingStatus,
    pub category: String,
    pub title: String,
    pub remote: String,
    pub local: String,
}

impl ComparisonRow {
    /// CSS class derived from the first word of the status label
    pub fn status_class(&self) -> String {
        let word = self.status.label().split_whitespace().next().unwrap_or_default();
        format!("status-{}", word)
    }
}

fn excerpt(text: &str, chars: usize) -> String {
    format!("{}...", prefix_chars(text, chars))
}

/// Turns match results for one reference category into report rows
///
/// Clean matches produce no row. `results` must come from matching `remote`
/// against `local`.
pub fn comparison_rows(
    category: &str,
    remote: &[RemoteItem],
    local: &[TextRecord],
    results: &[MatchResult],
) -> Vec<ComparisonRow> {
    results
        .iter()
        .filter_map(|result| {
            let status = result.finding()?;
            let item = remote.get(result.remote)?;
            let remote_text = clean_text(&item.text);

            let (remote_cell, local_cell) = match &result.outcome {
                MatchOutcome::Matched {
                    local: idx,
                    repeat_mismatch: Some(mismatch),
                    ..
                } => {
                    let local_text = local.get(*idx).map(|r| clean_text(&r.text)).unwrap_or_default();
                    (
                        format!("Text: {} | Repeat: {}", excerpt(&remote_text, 100), mismatch.remote),
                        format!("Text: {} | Repeat: {}", excerpt(&local_text, 100), mismatch.local),
                    )
                }
                MatchOutcome::PotentialMismatch { local: idx, score } => {
                    let local_text = local.get(*idx).map(|r| clean_text(&r.text)).unwrap_or_default();
                    (
                        excerpt(&remote_text, 200),
                        format!("{} (Ratio: {:.2})", excerpt(&local_text, 200), score),
                    )
                }
                _ => (excerpt(&remote_text, 200), "Not found in app".to_string()),
            };

            Some(ComparisonRow {
                status,
                category: category.to_string(),
                title: item.title.clone(),
                remote: remote_cell,
                local: local_cell,
            })
        })
        .collect()
}

/// Renders the full report page
pub fn render_comparison(rows: &[ComparisonRow], generated_at: &DateTime<Local>) -> String {
    page(rows, generated_at).into_string()
}

fn page(rows: &[ComparisonRow], generated_at: &DateTime<Local>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ar" dir="rtl" {
            head {
                meta charset="UTF-8";
                title { "تقرير مقارنة API | أذكاري" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.container {
                    h1 { "تقرير مقارنة البيانات مع API حصن المسلم" }
                    div.generated { (super::generated_label(generated_at)) }
                    table {
                        thead {
                            tr {
                                th { "الحالة" }
                                th { "القسم" }
                                th { "العنوان" }
                                th { "البيانات الرسمية (API)" }
                                th { "بيانات التطبيق الحالي" }
                            }
                        }
                        tbody {
                            @for row in rows {
                                tr {
                                    td class=(row.status_class()) { (row.status.label()) }
                                    td { (row.category) }
                                    td { (row.title) }
                                    td { div.text-box { (row.remote) } }
                                    td { div.text-box { (row.local) } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{match_corpus, Category, MatchConfig, RecordId, Repeat};
    use chrono::TimeZone;

    fn local(text: &str, count: u32) -> TextRecord {
        TextRecord::new(RecordId::generate("adhkar", 1, 0), Category::Morning, text, 1)
            .with_repeat(Repeat::exactly(count))
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn rows_cover_every_finding() {
        let remote = vec![
            RemoteItem::new("تسبيح", "سُبْحَانَ اللَّهِ وَبِحَمْدِهِ", 100),
            RemoteItem::new("", "abcd", 1),
            RemoteItem::new("", "zzzzzzzz", 1),
            RemoteItem::new("", "لَا إِلَهَ إِلَّا اللَّهُ", 1),
        ];
        let locals = vec![
            local("سُبْحَانَ اللَّهِ وَبِحَمْدِهِ", 3),
            local("bcde", 1),
            local("لَا إِلَهَ إِلَّا اللَّهُ", 1),
        ];

        let results = match_corpus(&remote, &locals, &MatchConfig::default());
        let rows = comparison_rows("أذكار الصباح والمساء", &remote, &locals, &results);

        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].status, FindingStatus::RepeatMismatch);
        assert_eq!(rows[0].title, "تسبيح");
        assert!(rows[0].remote.ends_with("| Repeat: 100"));
        assert!(rows[0].local.ends_with("| Repeat: 3"));

        assert_eq!(rows[1].status, FindingStatus::PotentialMismatch);
        assert_eq!(rows[1].remote, "abcd...");
        assert_eq!(rows[1].local, "bcde... (Ratio: 0.75)");

        assert_eq!(rows[2].status, FindingStatus::Missing);
        assert_eq!(rows[2].local, "Not found in app");
        assert_eq!(rows[2].status_class(), "status-Missing");
    }

    #[test]
    fn page_is_rtl_and_escaped() {
        let rows = vec![ComparisonRow {
            status: FindingStatus::PotentialMismatch,
            category: "أذكار النوم".to_string(),
            title: "<script>".to_string(),
            remote: "a & b".to_string(),
            local: "c".to_string(),
        }];

        let html = render_comparison(&rows, &fixed_time());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"dir="rtl""#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains(r#"class="status-Potential""#));
        assert!(html.contains("Generated 2026-01-15 09:30"));
    }

    #[test]
    fn empty_report_still_renders_table() {
        let html = render_comparison(&[], &fixed_time());
        assert!(html.contains("<tbody></tbody>"));
    }
}
