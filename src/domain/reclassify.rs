//! Conversion of raw categorized blocks into [`TextRecord`]s
//!
//! Each source block is looked up in a [`MappingTable`]:
//! - fixed rules copy their labels onto every item
//! - the morning/evening rule classifies each item with [`PeriodMarkers`] and
//!   emits one record per period it belongs to
//! - unknown ids are dropped and reported
//!
//! Order indexes run per target category, so two source blocks feeding the
//! same category produce one contiguous sequence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::category::{Category, SourceKind};
use super::id::RecordId;
use super::mapping::{CategoryRule, MappingTable};
use super::period::PeriodMarkers;
use super::record::{lenient_count, lenient_id, Repeat, TextRecord};

/// ID prefix for records produced from the raw dataset
pub const DATASET_ID_PREFIX: &str = "adhkar";

/// One item of a raw source block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u32>,

    pub text: String,

    #[serde(default = "one", deserialize_with = "lenient_count")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

impl RawItem {
    pub fn new(text: impl Into<String>, count: u32) -> Self {
        Self {
            id: None,
            text: text.into(),
            count: count.max(1),
        }
    }
}

/// A raw source block: `{ id, category, array: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCategory {
    pub id: u32,

    /// Display name of the block
    #[serde(rename = "category")]
    pub name: String,

    #[serde(rename = "array", default)]
    pub items: Vec<RawItem>,
}

impl SourceCategory {
    pub fn new(id: u32, name: impl Into<String>, items: Vec<RawItem>) -> Self {
        Self {
            id,
            name: name.into(),
            items,
        }
    }
}

/// Irregularity found while converting; never fatal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReclassifyWarning {
    /// Source id absent from the mapping table; its items were dropped
    UnknownCategory { id: u32, name: String, items: usize },
}

impl std::fmt::Display for ReclassifyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReclassifyWarning::UnknownCategory { id, name, items } => write!(
                f,
                "Unknown category id={} '{}' - skipping {} item(s)",
                id, name, items
            ),
        }
    }
}

/// Counters for a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub source_categories: usize,
    pub source_items: usize,
    pub output_items: usize,
    pub daily: usize,
    pub hisn: usize,
    pub dropped: usize,
}

/// Output of [`Reclassifier::reclassify`]
#[derive(Debug, Clone, Default)]
pub struct Reclassified {
    pub records: Vec<TextRecord>,
    pub warnings: Vec<ReclassifyWarning>,
    pub stats: ConversionStats,
}

/// Converts source blocks using a mapping table
#[derive(Debug, Clone)]
pub struct Reclassifier {
    table: MappingTable,
    markers: PeriodMarkers,
    id_prefix: String,
}

impl Default for Reclassifier {
    fn default() -> Self {
        Self::new(MappingTable::athkar_dataset())
    }
}

impl Reclassifier {
    pub fn new(table: MappingTable) -> Self {
        Self {
            table,
            markers: PeriodMarkers::vocalized(),
            id_prefix: DATASET_ID_PREFIX.to_string(),
        }
    }

    pub fn with_markers(mut self, markers: PeriodMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Converts every block found in the table, in input order
    pub fn reclassify(&self, sources: &[SourceCategory]) -> Reclassified {
        let mut out = Reclassified::default();
        let mut sequencer = Sequencer::default();

        for block in sources {
            out.stats.source_categories += 1;
            out.stats.source_items += block.items.len();

            let Some(rule) = self.table.get(block.id) else {
                out.stats.dropped += block.items.len();
                out.warnings.push(ReclassifyWarning::UnknownCategory {
                    id: block.id,
                    name: block.name.clone(),
                    items: block.items.len(),
                });
                continue;
            };

            for item in &block.items {
                let position = sequencer.next_item(block.id);

                match *rule {
                    CategoryRule::Fixed { source, category, hisn_category } => {
                        let record = TextRecord::new(
                            RecordId::generate(&self.id_prefix, block.id, position),
                            category,
                            item.text.clone(),
                            sequencer.next_order(category),
                        )
                        .with_title(block.name.clone())
                        .with_repeat(Repeat::exactly(item.count))
                        .with_source(source)
                        .with_hisn_category(hisn_category);
                        out.push(record);
                    }
                    CategoryRule::MorningEvening => {
                        for &period in self.markers.classify(&item.text).periods() {
                            let category = period.category();
                            let record = TextRecord::new(
                                RecordId::variant(&self.id_prefix, block.id, position, period),
                                category,
                                item.text.clone(),
                                sequencer.next_order(category),
                            )
                            .with_title(period.title())
                            .with_repeat(Repeat::exactly(item.count))
                            .with_source(SourceKind::Daily);
                            out.push(record);
                        }
                    }
                }
            }
        }

        out
    }
}

impl Reclassified {
    fn push(&mut self, record: TextRecord) {
        match record.source {
            Some(SourceKind::Hisn) => self.stats.hisn += 1,
            _ => self.stats.daily += 1,
        }
        self.stats.output_items += 1;
        self.records.push(record);
    }
}

/// Hands out item positions per source id and order indexes per category
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    items: HashMap<u32, usize>,
    orders: HashMap<Category, u32>,
}

impl Sequencer {
    /// 0-based position of the next item of a source category
    pub(crate) fn next_item(&mut self, source: u32) -> usize {
        let slot = self.items.entry(source).or_insert(0);
        let position = *slot;
        *slot += 1;
        position
    }

    /// 1-based order index of the next record in a category
    pub(crate) fn next_order(&mut self, category: Category) -> u32 {
        let slot = self.orders.entry(category).or_insert(0);
        *slot += 1;
        *slot
    }
}
