//! Full corpus listing for manual review

use chrono::{DateTime, Local};
use maud::{html, PreEscaped, DOCTYPE};

use crate::storage::{DailyCorpus, LibraryCorpus};

const STYLE: &str = r#"
:root { --primary: #2563eb; --bg: #0f172a; --card: #1e293b; --text: #f8fafc; --border: #334155; }
body { font-family: sans-serif; background: var(--bg); color: var(--text); padding: 40px; }
.container { max-width: 1300px; margin: 0 auto; }
h1 { text-align: center; font-size: 2.5rem; margin-bottom: 10px; }
.subtitle { text-align: center; color: #94a3b8; margin-bottom: 40px; }
table { width: 100%; border-collapse: separate; border-spacing: 0; background: var(--card); border-radius: 12px; overflow: hidden; }
th, td { padding: 18px; text-align: right; border-bottom: 1px solid var(--border); }
th { font-weight: 600; font-size: 0.9rem; color: #94a3b8; }
.cat-tag { color: var(--primary); font-weight: 700; white-space: nowrap; }
.title { font-weight: 600; width: 180px; }
.text { font-size: 1.35rem; line-height: 1.8; min-width: 450px; }
.ref { font-size: 0.85rem; color: #94a3b8; width: 220px; }
.rep { color: var(--primary); padding: 4px 10px; border-radius: 6px; font-weight: 700; }
"#;

/// One listed record
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionRow {
    pub category: String,
    pub title: String,
    pub text: String,
    pub repeat: u32,
    pub reference: String,
}

/// Daily records first, then library duas, each in file order
pub fn revision_rows(daily: &DailyCorpus, library: &LibraryCorpus) -> Vec<RevisionRow> {
    let daily_rows = daily.athkar.iter().map(|record| {
        let category = record
            .category
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| record.category.to_string());
        (category, record)
    });

    let library_rows = library.duas.iter().map(|record| {
        let category = library
            .category_name(&record.category)
            .map(str::to_string)
            .unwrap_or_else(|| record.category.to_string());
        (category, record)
    });

    daily_rows
        .chain(library_rows)
        .map(|(category, record)| RevisionRow {
            category,
            title: record.title.clone(),
            text: record.text.clone(),
            repeat: record.repeat.max,
            reference: record.reference.clone(),
        })
        .collect()
}

pub fn render_revision(rows: &[RevisionRow], generated_at: &DateTime<Local>) -> String {
    html! {
        (DOCTYPE)
        html lang="ar" dir="rtl" {
            head {
                meta charset="UTF-8";
                title { "قائمة الأذكار الرسمية الشاملة | أذكاري" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.container {
                    h1 { "قائمة الأذكار الشاملة" }
                    div.subtitle { (super::generated_label(generated_at)) }
                    table {
                        thead {
                            tr {
                                th { "القسم" }
                                th { "العنوان" }
                                th { "النص" }
                                th { "التكرار" }
                                th { "المرجع" }
                            }
                        }
                        tbody {
                            @for row in rows {
                                tr {
                                    td.cat-tag { (row.category) }
                                    td.title { (row.title) }
                                    td.text { (row.text) }
                                    td { span.rep { (row.repeat) } }
                                    td.ref { (row.reference) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}
