//! Corpus invariant checks
//!
//! Verifies that a record collection is ready to ship: unique IDs, non-empty
//! texts, repeat bounds as written in the file, and order indexes forming
//! `1..=n` within each category. Gaps are reported as ranges.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::category::Category;
use super::id::RecordId;
use super::record::TextRecord;

/// A violated invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditFinding {
    DuplicateId { id: RecordId, count: usize },
    EmptyText { id: RecordId },
    /// `min > max` in the file; the loaded value was clamped
    RepeatBounds { id: RecordId, min: u32, max: u32 },
    /// Order indexes start at 1
    InvalidOrderIndex { id: RecordId, order_index: u32 },
    DuplicateOrderIndex { category: Category, order_index: u32 },
    /// Indexes `from..=to` are unused
    OrderGap { category: Category, from: u32, to: u32 },
}

impl std::fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditFinding::DuplicateId { id, count } => {
                write!(f, "ID {} used by {} records", id, count)
            }
            AuditFinding::EmptyText { id } => write!(f, "Record {} has no text", id),
            AuditFinding::RepeatBounds { id, min, max } => {
                write!(f, "Record {} repeats min {} above max {}", id, min, max)
            }
            AuditFinding::InvalidOrderIndex { id, order_index } => {
                write!(f, "Record {} has order index {}, expected 1 or more", id, order_index)
            }
            AuditFinding::DuplicateOrderIndex { category, order_index } => {
                write!(f, "Order index {} repeated in {}", order_index, category)
            }
            AuditFinding::OrderGap { category, from, to } if from == to => {
                write!(f, "Order index {} missing in {}", from, category)
            }
            AuditFinding::OrderGap { category, from, to } => {
                write!(f, "Order indexes {}-{} missing in {}", from, to, category)
            }
        }
    }
}

/// Checks all invariants; an empty result means the collection is clean
pub fn audit(records: &[TextRecord]) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    let mut id_counts: BTreeMap<&RecordId, usize> = BTreeMap::new();
    for record in records {
        *id_counts.entry(&record.id).or_insert(0) += 1;
        if record.text.trim().is_empty() {
            findings.push(AuditFinding::EmptyText { id: record.id.clone() });
        }
        if let Some((min, max)) = record.repeat.clamped_from() {
            findings.push(AuditFinding::RepeatBounds { id: record.id.clone(), min, max });
        }
        if record.order_index < 1 {
            findings.push(AuditFinding::InvalidOrderIndex {
                id: record.id.clone(),
                order_index: record.order_index,
            });
        }
    }
    findings.extend(
        id_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, count)| AuditFinding::DuplicateId { id: id.clone(), count }),
    );

    let mut by_category: HashMap<Category, Vec<u32>> = HashMap::new();
    for record in records {
        by_category.entry(record.category).or_default().push(record.order_index);
    }

    let mut categories: Vec<_> = by_category.into_iter().collect();
    categories.sort_by_cached_key(|(category, _)| category.to_string());

    for (category, mut indexes) in categories {
        indexes.sort_unstable();

        for pair in indexes.windows(2) {
            if pair[0] == pair[1] {
                findings.push(AuditFinding::DuplicateOrderIndex {
                    category,
                    order_index: pair[0],
                });
            }
        }
        indexes.dedup();

        let mut expected: u32 = 1;
        for index in indexes.into_iter().filter(|&i| i >= 1) {
            if index > expected {
                findings.push(AuditFinding::OrderGap {
                    category,
                    from: expected,
                    to: index - 1,
                });
            }
            expected = index.saturating_add(1);
        }
    }

    findings
}
