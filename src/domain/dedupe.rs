//! Duplicate reconciliation
//!
//! Records are grouped by the first `key_chars` characters of their text.
//! - A singleton group passes through.
//! - A group containing an essential text keeps every member.
//! - Any other group keeps one member: the first in the preferred category,
//!   or the first member if none is.
//!
//! Survivors are sorted by `(category, orderIndex)`. The pass is idempotent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::RecordId;
use super::record::TextRecord;
use super::text::prefix_chars;

/// Canonical texts that legitimately appear in several categories
pub const ESSENTIAL_MARKERS: &[&str] = &[
    "آية الكرسي",
    "قُلْ هُوَ اللَّهُ أَحَدٌ",
    "قُلْ أَعُوذُ بِرَبِّ الْفَلَقِ",
    "قُلْ أَعُوذُ بِرَبِّ النَّاسِ",
    "سيد الاستغفار",
    "أَصْبَحْنَا وَأَصْبَحَ الْمُلْكُ",
    "أَمْسَيْنَا وَأَمْسَى الْمُلْكُ",
];

/// Reconciliation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DedupePolicy {
    /// Characters of text forming the grouping key
    pub key_chars: usize,

    /// Category whose member survives a non-essential group
    pub prefer: Option<Category>,

    /// Markers exempting a group from removal
    pub essential: Vec<String>,

    /// Recompact order indexes per category after sorting
    pub renumber: bool,
}

impl Default for DedupePolicy {
    fn default() -> Self {
        Self {
            key_chars: 100,
            prefer: Some(Category::Morning),
            essential: ESSENTIAL_MARKERS.iter().map(|s| s.to_string()).collect(),
            renumber: false,
        }
    }
}

/// What happened to one duplicate group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GroupDecision {
    /// Essential text, every member kept
    KeptAll { title: String, members: Vec<RecordId> },
    /// One member kept, the rest removed
    KeptOne {
        title: String,
        kept: RecordId,
        kept_category: Category,
        preferred: bool,
        removed: Vec<RecordId>,
    },
}

impl GroupDecision {
    pub fn removed(&self) -> usize {
        match self {
            GroupDecision::KeptAll { .. } => 0,
            GroupDecision::KeptOne { removed, .. } => removed.len(),
        }
    }
}

/// Output of [`reconcile`]
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub records: Vec<TextRecord>,
    /// One entry per duplicate group, in encounter order
    pub decisions: Vec<GroupDecision>,
}

impl Reconciled {
    pub fn removed(&self) -> usize {
        self.decisions.iter().map(GroupDecision::removed).sum()
    }
}

/// Removes duplicates according to `policy`
pub fn reconcile(records: Vec<TextRecord>, policy: &DedupePolicy) -> Reconciled {
    // Group in encounter order, remembering each record's input position
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<(usize, TextRecord)>> = HashMap::new();
    for (position, record) in records.into_iter().enumerate() {
        let key = prefix_chars(&record.text, policy.key_chars).to_string();
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push((position, record));
    }

    let mut survivors: Vec<(usize, TextRecord)> = Vec::new();
    let mut decisions = Vec::new();

    for key in order {
        let Some(mut members) = groups.remove(&key) else {
            continue;
        };

        if members.len() == 1 {
            survivors.append(&mut members);
            continue;
        }

        let title = members[0].1.title.clone();
        if members.iter().any(|(_, r)| r.mentions_any(&policy.essential)) {
            decisions.push(GroupDecision::KeptAll {
                title,
                members: members.iter().map(|(_, r)| r.id.clone()).collect(),
            });
            survivors.append(&mut members);
            continue;
        }

        let preferred = policy
            .prefer
            .and_then(|cat| members.iter().position(|(_, r)| r.category == cat));
        let keep = preferred.unwrap_or(0);
        let kept = members.remove(keep);

        decisions.push(GroupDecision::KeptOne {
            title,
            kept: kept.1.id.clone(),
            kept_category: kept.1.category,
            preferred: preferred.is_some(),
            removed: members.iter().map(|(_, r)| r.id.clone()).collect(),
        });
        survivors.push(kept);
    }

    // Ties in (category, orderIndex) keep input order, so a second pass
    // reproduces the first
    survivors.sort_by_key(|(position, _)| *position);
    let mut survivors: Vec<TextRecord> = survivors.into_iter().map(|(_, r)| r).collect();

    sort_records(&mut survivors);
    if policy.renumber {
        renumber(&mut survivors);
    }

    Reconciled {
        records: survivors,
        decisions,
    }
}

/// Stable sort by category name, then order index
pub fn sort_records(records: &mut [TextRecord]) {
    records.sort_by_cached_key(|r| (r.category.to_string(), r.order_index));
}

/// Rewrites order indexes as 1..n per category, keeping the current order
pub fn renumber(records: &mut [TextRecord]) {
    let mut next: HashMap<Category, u32> = HashMap::new();
    for record in records.iter_mut() {
        let slot = next.entry(record.category).or_insert(0);
        *slot += 1;
        record.order_index = *slot;
    }
}
