//! Category taxonomy understood by the app
//!
//! - Daily categories: `morning`, `evening`, `sleep`, `waking`, `after_prayer`
//! - `hisn`: items from the Fortress of the Muslim library, refined by a [`HisnCategory`]
//! - Library ids: `hisn-cat-{n}`, one per remote library category (see `sync`)
//!
//! Anything else is rejected at parse time so a record can never carry a
//! category the app does not know about.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix for library category ids created by a sync run
pub const LIBRARY_PREFIX: &str = "hisn-cat-";

#[derive(Debug, Error, PartialEq)]
pub enum CategoryError {
    #[error("Unknown category: '{0}'")]
    Unknown(String),

    #[error("Unknown hisn category: '{0}'")]
    UnknownHisn(String),

    #[error("Invalid library category id: '{0}'")]
    InvalidLibraryId(String),
}

/// Top-level category of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Morning,
    Evening,
    Sleep,
    Waking,
    AfterPrayer,
    Hisn,
    /// A remote library category, `hisn-cat-{id}`
    Library(u32),
}

impl Category {
    /// Creates the library category for a remote category id
    pub fn library(remote_id: u32) -> Self {
        Category::Library(remote_id)
    }

    /// Returns true for the categories shown on the daily screen
    pub fn is_daily(&self) -> bool {
        matches!(
            self,
            Category::Morning
                | Category::Evening
                | Category::Sleep
                | Category::Waking
                | Category::AfterPrayer
        )
    }

    /// Arabic display name for daily categories
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            Category::Morning => Some("أذكار الصباح"),
            Category::Evening => Some("أذكار المساء"),
            Category::Sleep => Some("أذكار النوم"),
            Category::Waking => Some("الاستيقاظ من النوم"),
            Category::AfterPrayer => Some("أذكار بعد الصلاة"),
            Category::Hisn => Some("حصن المسلم"),
            Category::Library(_) => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Morning => write!(f, "morning"),
            Category::Evening => write!(f, "evening"),
            Category::Sleep => write!(f, "sleep"),
            Category::Waking => write!(f, "waking"),
            Category::AfterPrayer => write!(f, "after_prayer"),
            Category::Hisn => write!(f, "hisn"),
            Category::Library(id) => write!(f, "{}{}", LIBRARY_PREFIX, id),
        }
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "morning" => Ok(Category::Morning),
            "evening" => Ok(Category::Evening),
            "sleep" => Ok(Category::Sleep),
            "waking" => Ok(Category::Waking),
            "after_prayer" => Ok(Category::AfterPrayer),
            "hisn" => Ok(Category::Hisn),
            _ => match s.strip_prefix(LIBRARY_PREFIX) {
                Some(id) => id
                    .parse()
                    .map(Category::Library)
                    .map_err(|_| CategoryError::InvalidLibraryId(s.to_string())),
                None => Err(CategoryError::Unknown(s.to_string())),
            },
        }
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

/// Sub-category for items under [`Category::Hisn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HisnCategory {
    Waking,
    Home,
    Wudu,
    Prayer,
    Adhan,
    Misc,
    Sleeping,
    Distress,
    Protection,
    Forgiveness,
    Illness,
    Food,
    Travel,
    Gratitude,
}

impl HisnCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HisnCategory::Waking => "waking",
            HisnCategory::Home => "home",
            HisnCategory::Wudu => "wudu",
            HisnCategory::Prayer => "prayer",
            HisnCategory::Adhan => "adhan",
            HisnCategory::Misc => "misc",
            HisnCategory::Sleeping => "sleeping",
            HisnCategory::Distress => "distress",
            HisnCategory::Protection => "protection",
            HisnCategory::Forgiveness => "forgiveness",
            HisnCategory::Illness => "illness",
            HisnCategory::Food => "food",
            HisnCategory::Travel => "travel",
            HisnCategory::Gratitude => "gratitude",
        }
    }
}

impl FromStr for HisnCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
            .map_err(|_| CategoryError::UnknownHisn(s.to_string()))
    }
}

impl fmt::Display for HisnCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of the app a record is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Daily,
    Hisn,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Daily => "daily",
            SourceKind::Hisn => "hisn",
        }
    }
}
