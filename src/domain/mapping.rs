//! Source category mapping tables
//!
//! A [`MappingTable`] is an immutable lookup from a source category id to the
//! place its items take in the app's taxonomy. Ids missing from the table are
//! never guessed: callers drop them and report a warning.

use std::collections::BTreeMap;

use super::category::{Category, HisnCategory, SourceKind};

/// Where the items of one source category go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    /// Every item gets these labels verbatim
    Fixed {
        source: SourceKind,
        category: Category,
        hisn_category: Option<HisnCategory>,
    },
    /// Mixed morning/evening content, split per item by keyword
    MorningEvening,
}

impl CategoryRule {
    /// A daily category with no sub-category
    pub const fn daily(category: Category) -> Self {
        CategoryRule::Fixed {
            source: SourceKind::Daily,
            category,
            hisn_category: None,
        }
    }

    /// A `hisn` item with the given sub-category
    pub const fn hisn(hisn_category: HisnCategory) -> Self {
        CategoryRule::Fixed {
            source: SourceKind::Hisn,
            category: Category::Hisn,
            hisn_category: Some(hisn_category),
        }
    }

    /// Source kind of the produced records
    pub fn source(&self) -> SourceKind {
        match self {
            CategoryRule::Fixed { source, .. } => *source,
            CategoryRule::MorningEvening => SourceKind::Daily,
        }
    }
}

/// Immutable source-id -> rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    rules: BTreeMap<u32, CategoryRule>,
}

impl MappingTable {
    pub fn new(rules: impl IntoIterator<Item = (u32, CategoryRule)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Table for the raw athkar dataset (132 source categories)
    pub fn athkar_dataset() -> Self {
        Self::new(ATHKAR_DATASET.iter().copied())
    }

    /// Daily categories of the reference service; other ids are library categories
    pub fn reference_daily() -> Self {
        Self::new([
            (27, CategoryRule::MorningEvening),
            (28, CategoryRule::daily(Category::Sleep)),
            (1, CategoryRule::daily(Category::Waking)),
            (25, CategoryRule::daily(Category::AfterPrayer)),
        ])
    }

    pub fn get(&self, id: u32) -> Option<&CategoryRule> {
        self.rules.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.rules.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &CategoryRule)> {
        self.rules.iter().map(|(id, rule)| (*id, rule))
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::athkar_dataset()
    }
}

const ATHKAR_DATASET: &[(u32, CategoryRule)] = &[
    (1, CategoryRule::MorningEvening),
    (2, CategoryRule::daily(Category::Sleep)),
    (27, CategoryRule::daily(Category::AfterPrayer)),
    (3, CategoryRule::hisn(HisnCategory::Waking)),
    (4, CategoryRule::hisn(HisnCategory::Home)),
    (5, CategoryRule::hisn(HisnCategory::Home)),
    (6, CategoryRule::hisn(HisnCategory::Wudu)),
    (7, CategoryRule::hisn(HisnCategory::Wudu)),
    (8, CategoryRule::hisn(HisnCategory::Home)),
    (9, CategoryRule::hisn(HisnCategory::Home)),
    (10, CategoryRule::hisn(HisnCategory::Prayer)),
    (11, CategoryRule::hisn(HisnCategory::Prayer)),
    (12, CategoryRule::hisn(HisnCategory::Prayer)),
    (13, CategoryRule::hisn(HisnCategory::Adhan)),
    (14, CategoryRule::hisn(HisnCategory::Misc)),
    (15, CategoryRule::hisn(HisnCategory::Misc)),
    (16, CategoryRule::hisn(HisnCategory::Misc)),
    (17, CategoryRule::hisn(HisnCategory::Misc)),
    (18, CategoryRule::hisn(HisnCategory::Prayer)),
    (19, CategoryRule::hisn(HisnCategory::Prayer)),
    (20, CategoryRule::hisn(HisnCategory::Prayer)),
    (21, CategoryRule::hisn(HisnCategory::Prayer)),
    (22, CategoryRule::hisn(HisnCategory::Prayer)),
    (23, CategoryRule::hisn(HisnCategory::Prayer)),
    (24, CategoryRule::hisn(HisnCategory::Prayer)),
    (25, CategoryRule::hisn(HisnCategory::Prayer)),
    (26, CategoryRule::hisn(HisnCategory::Prayer)),
    (28, CategoryRule::hisn(HisnCategory::Prayer)),
    (29, CategoryRule::hisn(HisnCategory::Sleeping)),
    (30, CategoryRule::hisn(HisnCategory::Sleeping)),
    (31, CategoryRule::hisn(HisnCategory::Sleeping)),
    (32, CategoryRule::hisn(HisnCategory::Prayer)),
    (33, CategoryRule::hisn(HisnCategory::Prayer)),
    (34, CategoryRule::hisn(HisnCategory::Distress)),
    (35, CategoryRule::hisn(HisnCategory::Distress)),
    (36, CategoryRule::hisn(HisnCategory::Protection)),
    (37, CategoryRule::hisn(HisnCategory::Protection)),
    (38, CategoryRule::hisn(HisnCategory::Protection)),
    (39, CategoryRule::hisn(HisnCategory::Protection)),
    (40, CategoryRule::hisn(HisnCategory::Protection)),
    (41, CategoryRule::hisn(HisnCategory::Distress)),
    (42, CategoryRule::hisn(HisnCategory::Prayer)),
    (43, CategoryRule::hisn(HisnCategory::Distress)),
    (44, CategoryRule::hisn(HisnCategory::Forgiveness)),
    (45, CategoryRule::hisn(HisnCategory::Protection)),
    (46, CategoryRule::hisn(HisnCategory::Misc)),
    (47, CategoryRule::hisn(HisnCategory::Misc)),
    (48, CategoryRule::hisn(HisnCategory::Protection)),
    (49, CategoryRule::hisn(HisnCategory::Illness)),
    (50, CategoryRule::hisn(HisnCategory::Illness)),
    (51, CategoryRule::hisn(HisnCategory::Illness)),
    (52, CategoryRule::hisn(HisnCategory::Illness)),
    (53, CategoryRule::hisn(HisnCategory::Illness)),
    (54, CategoryRule::hisn(HisnCategory::Illness)),
    (55, CategoryRule::hisn(HisnCategory::Illness)),
    (56, CategoryRule::hisn(HisnCategory::Illness)),
    (57, CategoryRule::hisn(HisnCategory::Illness)),
    (58, CategoryRule::hisn(HisnCategory::Illness)),
    (59, CategoryRule::hisn(HisnCategory::Illness)),
    (60, CategoryRule::hisn(HisnCategory::Illness)),
    (61, CategoryRule::hisn(HisnCategory::Misc)),
    (62, CategoryRule::hisn(HisnCategory::Misc)),
    (63, CategoryRule::hisn(HisnCategory::Misc)),
    (64, CategoryRule::hisn(HisnCategory::Misc)),
    (65, CategoryRule::hisn(HisnCategory::Misc)),
    (66, CategoryRule::hisn(HisnCategory::Misc)),
    (67, CategoryRule::hisn(HisnCategory::Misc)),
    (68, CategoryRule::hisn(HisnCategory::Food)),
    (69, CategoryRule::hisn(HisnCategory::Food)),
    (70, CategoryRule::hisn(HisnCategory::Food)),
    (71, CategoryRule::hisn(HisnCategory::Food)),
    (72, CategoryRule::hisn(HisnCategory::Food)),
    (73, CategoryRule::hisn(HisnCategory::Food)),
    (74, CategoryRule::hisn(HisnCategory::Food)),
    (75, CategoryRule::hisn(HisnCategory::Food)),
    (76, CategoryRule::hisn(HisnCategory::Food)),
    (77, CategoryRule::hisn(HisnCategory::Misc)),
    (78, CategoryRule::hisn(HisnCategory::Misc)),
    (79, CategoryRule::hisn(HisnCategory::Misc)),
    (80, CategoryRule::hisn(HisnCategory::Misc)),
    (81, CategoryRule::hisn(HisnCategory::Misc)),
    (82, CategoryRule::hisn(HisnCategory::Protection)),
    (83, CategoryRule::hisn(HisnCategory::Misc)),
    (84, CategoryRule::hisn(HisnCategory::Misc)),
    (85, CategoryRule::hisn(HisnCategory::Misc)),
    (86, CategoryRule::hisn(HisnCategory::Misc)),
    (87, CategoryRule::hisn(HisnCategory::Gratitude)),
    (88, CategoryRule::hisn(HisnCategory::Protection)),
    (89, CategoryRule::hisn(HisnCategory::Misc)),
    (90, CategoryRule::hisn(HisnCategory::Misc)),
    (91, CategoryRule::hisn(HisnCategory::Misc)),
    (92, CategoryRule::hisn(HisnCategory::Protection)),
    (93, CategoryRule::hisn(HisnCategory::Misc)),
    (94, CategoryRule::hisn(HisnCategory::Protection)),
    (95, CategoryRule::hisn(HisnCategory::Travel)),
    (96, CategoryRule::hisn(HisnCategory::Travel)),
    (97, CategoryRule::hisn(HisnCategory::Travel)),
    (98, CategoryRule::hisn(HisnCategory::Travel)),
    (99, CategoryRule::hisn(HisnCategory::Travel)),
    (100, CategoryRule::hisn(HisnCategory::Travel)),
    (101, CategoryRule::hisn(HisnCategory::Travel)),
    (102, CategoryRule::hisn(HisnCategory::Travel)),
    (103, CategoryRule::hisn(HisnCategory::Travel)),
    (104, CategoryRule::hisn(HisnCategory::Travel)),
    (105, CategoryRule::hisn(HisnCategory::Travel)),
    (106, CategoryRule::hisn(HisnCategory::Misc)),
    (107, CategoryRule::hisn(HisnCategory::Prayer)),
    (108, CategoryRule::hisn(HisnCategory::Misc)),
    (109, CategoryRule::hisn(HisnCategory::Misc)),
    (110, CategoryRule::hisn(HisnCategory::Misc)),
    (111, CategoryRule::hisn(HisnCategory::Misc)),
    (112, CategoryRule::hisn(HisnCategory::Forgiveness)),
    (113, CategoryRule::hisn(HisnCategory::Misc)),
    (114, CategoryRule::hisn(HisnCategory::Misc)),
    (115, CategoryRule::hisn(HisnCategory::Misc)),
    (116, CategoryRule::hisn(HisnCategory::Misc)),
    (117, CategoryRule::hisn(HisnCategory::Misc)),
    (118, CategoryRule::hisn(HisnCategory::Misc)),
    (119, CategoryRule::hisn(HisnCategory::Misc)),
    (120, CategoryRule::hisn(HisnCategory::Misc)),
    (121, CategoryRule::hisn(HisnCategory::Misc)),
    (122, CategoryRule::hisn(HisnCategory::Gratitude)),
    (123, CategoryRule::hisn(HisnCategory::Gratitude)),
    (124, CategoryRule::hisn(HisnCategory::Illness)),
    (125, CategoryRule::hisn(HisnCategory::Protection)),
    (126, CategoryRule::hisn(HisnCategory::Protection)),
    (127, CategoryRule::hisn(HisnCategory::Misc)),
    (128, CategoryRule::hisn(HisnCategory::Protection)),
    (129, CategoryRule::hisn(HisnCategory::Forgiveness)),
    (130, CategoryRule::hisn(HisnCategory::Gratitude)),
    (131, CategoryRule::hisn(HisnCategory::Gratitude)),
    (132, CategoryRule::hisn(HisnCategory::Misc)),];
