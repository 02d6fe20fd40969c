//! Text record domain model
//!
//! A [`TextRecord`] is one devotional text in the app's canonical schema.
//! Serialization matches the app's JSON (camelCase keys).

use serde::{Deserialize, Deserializer, Serialize};

use super::category::{Category, HisnCategory, SourceKind};
use super::id::RecordId;

/// Recommended recitation count
///
/// Always satisfies `1 <= min <= max`; out-of-range input is clamped on
/// construction and deserialization. Bounds clamped while reading a file are
/// kept in [`Repeat::clamped_from`] so audits can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRepeat")]
pub struct Repeat {
    pub min: u32,
    pub max: u32,
    pub note: Option<String>,
    #[serde(skip)]
    clamped: Option<(u32, u32)>,
}

impl Repeat {
    /// Creates a repeat range, clamping both bounds to at least 1 and `max` to at least `min`
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
            note: None,
            clamped: None,
        }
    }

    /// A fixed count (`min == max`)
    pub fn exactly(count: u32) -> Self {
        Self::new(count, count)
    }

    /// Raw `(min, max)` as read, when they had to be clamped
    pub fn clamped_from(&self) -> Option<(u32, u32)> {
        self.clamped
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::exactly(1)
    }
}

#[derive(Deserialize)]
struct RawRepeat {
    #[serde(default)]
    min: Option<serde_json::Value>,
    #[serde(default)]
    max: Option<serde_json::Value>,
    #[serde(default)]
    note: Option<String>,
}

impl From<RawRepeat> for Repeat {
    fn from(raw: RawRepeat) -> Self {
        // A missing max means a fixed count
        let min = raw.min.as_ref().map(parse_count).unwrap_or(1);
        let max = raw.max.as_ref().map(parse_count).unwrap_or(min);

        let mut repeat = Repeat::new(min, max);
        if (repeat.min, repeat.max) != (min, max) {
            repeat.clamped = Some((min, max));
        }
        repeat.note = raw.note;
        repeat
    }
}

/// Parses a recitation count from a JSON value
///
/// Accepts integers, floats with no fractional part and numeric strings.
/// Anything else (missing, empty, zero, negative, non-numeric) yields 1.
pub fn parse_count(value: &serde_json::Value) -> u32 {
    let parsed = match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Serde adapter for [`parse_count`]; never fails
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(parse_count).unwrap_or(1))
}

/// Parses an id that may be a number or a numeric string
pub fn parse_id(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Serde adapter for [`parse_id`]; unparseable ids become `None`
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_id))
}

fn default_grading() -> String {
    "sahih".to_string()
}

fn default_order() -> u32 {
    1
}

/// A devotional text item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRecord {
    pub id: RecordId,

    pub category: Category,

    #[serde(default)]
    pub hisn_category: Option<HisnCategory>,

    #[serde(default)]
    pub source: Option<SourceKind>,

    #[serde(default)]
    pub title: String,

    pub text: String,

    #[serde(default)]
    pub reference: String,

    #[serde(default)]
    pub repeat: Repeat,

    /// 1-based position within the category
    #[serde(default = "default_order")]
    pub order_index: u32,

    #[serde(default)]
    pub benefit: Option<String>,

    #[serde(default = "default_grading")]
    pub grading: String,

    #[serde(default)]
    pub is_optional: bool,
}

impl TextRecord {
    /// Creates a record with default metadata (`sahih`, not optional, no reference)
    pub fn new(id: RecordId, category: Category, text: impl Into<String>, order_index: u32) -> Self {
        Self {
            id,
            category,
            hisn_category: None,
            source: None,
            title: String::new(),
            text: text.into(),
            reference: String::new(),
            repeat: Repeat::default(),
            order_index,
            benefit: None,
            grading: default_grading(),
            is_optional: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_hisn_category(mut self, hisn_category: Option<HisnCategory>) -> Self {
        self.hisn_category = hisn_category;
        self
    }

    /// Recitation count used for comparisons
    pub fn repeat_count(&self) -> u32 {
        self.repeat.max
    }

    /// Returns true if the title or text contains any of the given markers
    pub fn mentions_any<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        markers.iter().any(|m| {
            let m = m.as_ref();
            self.title.contains(m) || self.text.contains(m)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeat_clamps_bounds() {
        assert_eq!(Repeat::new(0, 0), Repeat::exactly(1));
        let r = Repeat::new(5, 2);
        assert_eq!((r.min, r.max), (5, 5));
    }

    #[test]
    fn parse_count_is_lenient() {
        assert_eq!(parse_count(&json!(3)), 3);
        assert_eq!(parse_count(&json!("100")), 100);
        assert_eq!(parse_count(&json!(" 7 ")), 7);
        assert_eq!(parse_count(&json!(3.0)), 3);
        assert_eq!(parse_count(&json!("")), 1);
        assert_eq!(parse_count(&json!("three")), 1);
        assert_eq!(parse_count(&json!(0)), 1);
        assert_eq!(parse_count(&json!(-4)), 1);
        assert_eq!(parse_count(&json!(2.5)), 1);
        assert_eq!(parse_count(&json!(null)), 1);
    }

    #[test]
    fn parse_id_variants() {
        assert_eq!(parse_id(&json!(27)), Some(27));
        assert_eq!(parse_id(&json!(" 27 ")), Some(27));
        assert_eq!(parse_id(&json!(-1)), None);
        assert_eq!(parse_id(&json!("abc")), None);
        assert_eq!(parse_id(&json!(null)), None);
    }

    #[test]
    fn deserialize_app_record() {
        let value = json!({
            "id": "morning-001",
            "category": "morning",
            "title": "آية الكرسي",
            "text": "اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ",
            "reference": "البقرة ٢٥٥",
            "repeat": { "min": 1, "max": 1, "note": null },
            "orderIndex": 3,
            "benefit": null,
            "grading": "sahih",
            "isOptional": false
        });

        let record: TextRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.category, Category::Morning);
        assert_eq!(record.order_index, 3);
        assert_eq!(record.repeat, Repeat::exactly(1));
        assert!(record.hisn_category.is_none());
    }

    #[test]
    fn deserialize_fills_defaults() {
        let value = json!({
            "id": "x-1",
            "category": "hisn",
            "hisnCategory": "travel",
            "text": "..."
        });

        let record: TextRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.hisn_category, Some(HisnCategory::Travel));
        assert_eq!(record.repeat, Repeat::exactly(1));
        assert_eq!(record.grading, "sahih");
        assert_eq!(record.order_index, 1);
    }

    #[test]
    fn malformed_repeat_defaults_to_one() {
        let value = json!({
            "id": "x-1",
            "category": "sleep",
            "text": "...",
            "repeat": { "min": "abc", "max": null }
        });

        let record: TextRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.repeat, Repeat::exactly(1));

        let repeat: Repeat = serde_json::from_value(json!({ "min": 3 })).unwrap();
        assert_eq!(repeat, Repeat::exactly(3));
    }

    #[test]
    fn inverted_repeat_is_clamped_and_remembered() {
        let value = json!({
            "id": "x-1",
            "category": "sleep",
            "text": "...",
            "repeat": { "min": 3, "max": 1 }
        });

        let record: TextRecord = serde_json::from_value(value).unwrap();
        assert_eq!((record.repeat.min, record.repeat.max), (3, 3));
        assert_eq!(record.repeat.clamped_from(), Some((3, 1)));
        assert_eq!(Repeat::new(3, 1).clamped_from(), None);
    }

    #[test]
    fn unknown_category_fails_parse() {
        let value = json!({ "id": "x-1", "category": "dusk", "text": "..." });
        assert!(serde_json::from_value::<TextRecord>(value).is_err());
    }

    #[test]
    fn serialize_uses_camel_case() {
        let record = TextRecord::new(RecordId::generate("adhkar", 4, 0), Category::Hisn, "نص", 1)
            .with_source(SourceKind::Hisn)
            .with_hisn_category(Some(HisnCategory::Home));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["hisnCategory"], "home");
        assert_eq!(value["source"], "hisn");
        assert_eq!(value["orderIndex"], 1);
        assert_eq!(value["isOptional"], false);
        assert_eq!(value["repeat"]["max"], 1);
        assert!(value["repeat"].get("clamped").is_none());
    }

    #[test]
    fn serialize_writes_null_optionals() {
        let record = TextRecord::new(RecordId::generate("sync", 27, 0), Category::Morning, "نص", 1);

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("hisnCategory"), Some(&serde_json::Value::Null));
        assert_eq!(object.get("source"), Some(&serde_json::Value::Null));
        assert_eq!(object.get("benefit"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn mentions_checks_title_and_text() {
        let record = TextRecord::new(RecordId::generate("a", 1, 0), Category::Morning, "نص", 1)
            .with_title("سيد الاستغفار");
        assert!(record.mentions_any(&["سيد الاستغفار"]));
        assert!(!record.mentions_any(&["آية الكرسي"]));
    }
}
