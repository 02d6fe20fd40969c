//! Morning/evening classification
//!
//! Some source categories mix morning and evening athkar. Each item is
//! classified by keyword presence:
//!
//! | morning marker | evening marker | result |
//! |---|---|---|
//! | yes | no | morning |
//! | no | yes | evening |
//! | yes | yes | both |
//! | no | no | both |
//!
//! An ambiguous item is emitted under both periods rather than risk leaving a
//! recitation out of the period it belongs to.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Time of day a recitation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Morning,
    Evening,
}

impl Period {
    /// Single-letter ID suffix for variants
    pub fn suffix(&self) -> char {
        match self {
            Period::Morning => 'm',
            Period::Evening => 'e',
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Period::Morning => Category::Morning,
            Period::Evening => Category::Evening,
        }
    }

    /// Title given to converted items of this period
    pub fn title(&self) -> &'static str {
        match self {
            Period::Morning => "أذكار الصباح",
            Period::Evening => "أذكار المساء",
        }
    }
}

/// Outcome of classifying one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSet {
    Morning,
    Evening,
    Both,
}

impl PeriodSet {
    /// Periods in emission order (morning first)
    pub fn periods(&self) -> &'static [Period] {
        match self {
            PeriodSet::Morning => &[Period::Morning],
            PeriodSet::Evening => &[Period::Evening],
            PeriodSet::Both => &[Period::Morning, Period::Evening],
        }
    }

    pub fn contains(&self, period: Period) -> bool {
        self.periods().contains(&period)
    }
}

/// Keyword sets used to detect morning and evening texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMarkers {
    pub morning: Vec<String>,
    pub evening: Vec<String>,
}

impl PeriodMarkers {
    pub fn new<S: Into<String>>(
        morning: impl IntoIterator<Item = S>,
        evening: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            morning: morning.into_iter().map(Into::into).collect(),
            evening: evening.into_iter().map(Into::into).collect(),
        }
    }

    /// Vocalized markers used when converting the raw athkar dataset
    pub fn vocalized() -> Self {
        Self::new(
            ["أَصْبَحْنَا", "أَصْبَحْتُ", "أَصْبَحَ", "إذا أصبحَ", "إذا أصبح"],
            ["أَمْسَيْنَا", "أَمْسَيْتُ", "أَمْسَى", "إذا أمسى"],
        )
    }

    /// Root-based markers used against the reference service, whose texts are
    /// not consistently vocalized
    pub fn roots() -> Self {
        Self::new(["صباح", "أصبح"], ["مسا", "أمس"])
    }

    /// Classifies a text into the periods it belongs to
    pub fn classify(&self, text: &str) -> PeriodSet {
        let has_morning = self.morning.iter().any(|kw| text.contains(kw.as_str()));
        let has_evening = self.evening.iter().any(|kw| text.contains(kw.as_str()));

        match (has_morning, has_evening) {
            (true, false) => PeriodSet::Morning,
            (false, true) => PeriodSet::Evening,
            _ => PeriodSet::Both,
        }
    }
}

impl Default for PeriodMarkers {
    fn default() -> Self {
        Self::vocalized()
    }
}
