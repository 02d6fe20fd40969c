//! Builds the app corpora from reference categories
//!
//! Daily categories (per [`MappingTable::reference_daily`]) become
//! [`DailyCorpus`] records; everything else becomes a library category with
//! its duas. The builder is fed one category at a time so the caller decides
//! how (and how politely) documents are fetched.

use serde::Serialize;

use crate::domain::{
    clean_text, Category, CategoryRule, MappingTable, PeriodMarkers, RecordId, Repeat, Sequencer,
    SourceKind, TextRecord,
};
use crate::storage::{DailyCorpus, LibraryCategory, LibraryCorpus};

use super::types::{IndexEntry, RemoteItem};

pub const SYNC_ID_PREFIX: &str = "sync";

/// Counters reported after a sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub categories: usize,
    pub daily_categories: usize,
    pub library_categories: usize,
    pub daily: usize,
    pub duas: usize,
    pub failed: usize,
}

/// Result of a sync run
#[derive(Debug, Clone, Default)]
pub struct Synced {
    pub daily: DailyCorpus,
    pub library: LibraryCorpus,
    pub stats: SyncStats,
}

/// Accumulates reference categories into the two corpora
#[derive(Debug)]
pub struct SyncBuilder {
    table: MappingTable,
    markers: PeriodMarkers,
    sequencer: Sequencer,
    out: Synced,
}

impl Default for SyncBuilder {
    fn default() -> Self {
        Self::new(MappingTable::reference_daily(), PeriodMarkers::roots())
    }
}

impl SyncBuilder {
    pub fn new(table: MappingTable, markers: PeriodMarkers) -> Self {
        Self {
            table,
            markers,
            sequencer: Sequencer::default(),
            out: Synced::default(),
        }
    }

    /// Records a category whose document could not be fetched
    pub fn skip(&mut self) {
        self.out.stats.failed += 1;
    }

    /// Adds the texts of one index entry
    pub fn add_category(&mut self, entry: &IndexEntry, items: &[RemoteItem]) {
        self.out.stats.categories += 1;

        match self.table.get(entry.id).copied() {
            Some(rule) => {
                self.out.stats.daily_categories += 1;
                for (position, item) in items.iter().enumerate() {
                    self.add_daily(entry, rule, position, item, items.len());
                }
            }
            None => {
                self.out.stats.library_categories += 1;
                let category = Category::library(entry.id);
                self.out
                    .library
                    .categories
                    .push(LibraryCategory::new(category, entry.title.clone()));

                for (position, item) in items.iter().enumerate() {
                    let id = RecordId::generate(SYNC_ID_PREFIX, entry.id, position);
                    let record = self
                        .base_record(entry, id, position, item, items.len(), category)
                        .with_source(SourceKind::Hisn);
                    self.out.stats.duas += 1;
                    self.out.library.duas.push(record);
                }
            }
        }
    }

    fn add_daily(
        &mut self,
        entry: &IndexEntry,
        rule: CategoryRule,
        position: usize,
        item: &RemoteItem,
        total: usize,
    ) {
        match rule {
            CategoryRule::Fixed { category, .. } => {
                let id = RecordId::generate(SYNC_ID_PREFIX, entry.id, position);
                let record = self.base_record(entry, id, position, item, total, category);
                self.push_daily(record);
            }
            CategoryRule::MorningEvening => {
                let text = clean_text(&item.text);
                for &period in self.markers.classify(&text).periods() {
                    let id = RecordId::variant(SYNC_ID_PREFIX, entry.id, position, period);
                    let record = self.base_record(entry, id, position, item, total, period.category());
                    self.push_daily(record);
                }
            }
        }
    }

    fn base_record(
        &mut self,
        entry: &IndexEntry,
        id: RecordId,
        position: usize,
        item: &RemoteItem,
        total: usize,
        category: Category,
    ) -> TextRecord {
        let title = if total == 1 {
            entry.title.clone()
        } else {
            format!("{} ({})", entry.title, position + 1)
        };

        TextRecord::new(
            id,
            category,
            clean_text(&item.text),
            self.sequencer.next_order(category),
        )
        .with_title(title)
        .with_reference(item.reference.clone())
        .with_repeat(Repeat::exactly(item.repeat))
    }

    fn push_daily(&mut self, record: TextRecord) {
        self.out.stats.daily += 1;
        self.out.daily.athkar.push(record.with_source(SourceKind::Daily));
    }

    pub fn finish(self) -> Synced {
        self.out
    }
}
