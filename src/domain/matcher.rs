//! Alignment of a reference corpus against the local corpus
//!
//! For every reference item the local corpus is scanned in order and each
//! candidate is scored on the first `window` characters of both cleaned texts.
//!
//! - The first candidate scoring above `match_threshold` is a match; its
//!   repeat count is compared with the reference count.
//! - Otherwise, if the best candidate scores above `review_threshold`, the pair
//!   is reported for manual review.
//! - Otherwise the reference item is missing locally.

use serde::{Deserialize, Serialize};

use super::record::TextRecord;
use super::text::{clean_text, prefix_chars, similarity_with, SimilarityOptions};

/// Anything that can be aligned: a local record or a reference item
pub trait Recitation {
    fn title(&self) -> &str;
    fn text(&self) -> &str;
    fn repeat_count(&self) -> u32;
}

impl Recitation for TextRecord {
    fn title(&self) -> &str {
        &self.title
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn repeat_count(&self) -> u32 {
        self.repeat.max
    }
}

/// Thresholds and window for [`match_corpus`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Characters of each cleaned text that are compared
    pub window: usize,

    /// Score above which a candidate is the same text
    pub match_threshold: f64,

    /// Score above which the best candidate is worth a manual look
    pub review_threshold: f64,

    /// difflib's popular-character heuristic
    pub autojunk: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            window: 200,
            match_threshold: 0.85,
            review_threshold: 0.50,
            autojunk: true,
        }
    }
}

/// Differing recitation counts between a matched pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepeatMismatch {
    pub remote: u32,
    pub local: u32,
}

/// How a reference item relates to the local corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched {
        local: usize,
        score: f64,
        repeat_mismatch: Option<RepeatMismatch>,
    },
    PotentialMismatch {
        local: usize,
        score: f64,
    },
    Missing {
        best_score: f64,
    },
}

/// Status shown in the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingStatus {
    #[serde(rename = "Missing")]
    Missing,
    #[serde(rename = "Potential Mismatch")]
    PotentialMismatch,
    #[serde(rename = "Repeat Mismatch")]
    RepeatMismatch,
}

impl FindingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FindingStatus::Missing => "Missing",
            FindingStatus::PotentialMismatch => "Potential Mismatch",
            FindingStatus::RepeatMismatch => "Repeat Mismatch",
        }
    }
}

/// Result for one reference item (`remote` indexes the reference slice)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub remote: usize,
    #[serde(flatten)]
    pub outcome: MatchOutcome,
}

impl MatchResult {
    /// Report status, or `None` for a clean match
    pub fn finding(&self) -> Option<FindingStatus> {
        match &self.outcome {
            MatchOutcome::Matched { repeat_mismatch: Some(_), .. } => {
                Some(FindingStatus::RepeatMismatch)
            }
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::PotentialMismatch { .. } => Some(FindingStatus::PotentialMismatch),
            MatchOutcome::Missing { .. } => Some(FindingStatus::Missing),
        }
    }

    /// Index of the local record involved, if any
    pub fn local(&self) -> Option<usize> {
        match &self.outcome {
            MatchOutcome::Matched { local, .. } | MatchOutcome::PotentialMismatch { local, .. } => {
                Some(*local)
            }
            MatchOutcome::Missing { .. } => None,
        }
    }

    /// Best score seen for this reference item
    pub fn score(&self) -> f64 {
        match &self.outcome {
            MatchOutcome::Matched { score, .. } | MatchOutcome::PotentialMismatch { score, .. } => {
                *score
            }
            MatchOutcome::Missing { best_score } => *best_score,
        }
    }
}

/// Aligns every reference item against the local corpus
pub fn match_corpus<R: Recitation, L: Recitation>(
    remote: &[R],
    local: &[L],
    config: &MatchConfig,
) -> Vec<MatchResult> {
    let options = SimilarityOptions { autojunk: config.autojunk };

    // Clean each local text once
    let local_keys: Vec<String> = local
        .iter()
        .map(|item| prefix_chars(&clean_text(item.text()), config.window).to_string())
        .collect();

    remote
        .iter()
        .enumerate()
        .map(|(remote_idx, item)| {
            let cleaned = clean_text(item.text());
            let key = prefix_chars(&cleaned, config.window);

            let mut best: Option<(usize, f64)> = None;
            let mut matched = None;

            for (local_idx, local_key) in local_keys.iter().enumerate() {
                let score = similarity_with(key, local_key, options);
                if best.map_or(score > 0.0, |(_, best_score)| score > best_score) {
                    best = Some((local_idx, score));
                }
                if score > config.match_threshold {
                    matched = Some((local_idx, score));
                    break;
                }
            }

            let outcome = match (matched, best) {
                (Some((local_idx, score)), _) => {
                    let remote_count = item.repeat_count();
                    let local_count = local[local_idx].repeat_count();
                    MatchOutcome::Matched {
                        local: local_idx,
                        score,
                        repeat_mismatch: (remote_count != local_count).then_some(RepeatMismatch {
                            remote: remote_count,
                            local: local_count,
                        }),
                    }
                }
                (None, Some((local_idx, score))) if score > config.review_threshold => {
                    MatchOutcome::PotentialMismatch { local: local_idx, score }
                }
                (None, best) => MatchOutcome::Missing {
                    best_score: best.map_or(0.0, |(_, score)| score),
                },
            };

            MatchResult { remote: remote_idx, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, RecordId, Repeat};

    fn record(text: &str, count: u32) -> TextRecord {
        TextRecord::new(RecordId::generate("t", 1, 0), Category::Morning, text, 1)
            .with_repeat(Repeat::exactly(count))
    }

    #[test]
    fn identical_text_same_count_is_clean_match() {
        let remote = vec![record("سُبْحَانَ اللَّهِ وَبِحَمْدِهِ", 100)];
        let local = vec![record("سُبْحَانَ   اللَّهِ\nوَبِحَمْدِهِ ۝", 100)];

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].outcome,
            MatchOutcome::Matched { local: 0, score: 1.0, repeat_mismatch: None }
        );
        assert_eq!(results[0].finding(), None);
    }

    #[test]
    fn differing_count_reports_repeat_mismatch() {
        let remote = vec![record("أَصْبَحْنَا وَأَصْبَحَ", 1)];
        let local = vec![record("أَصْبَحْنَا وَأَصْبَحَ", 3)];

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(results[0].finding(), Some(FindingStatus::RepeatMismatch));
        match &results[0].outcome {
            MatchOutcome::Matched { repeat_mismatch: Some(m), .. } => {
                assert_eq!(m.remote, 1);
                assert_eq!(m.local, 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn first_qualifying_candidate_wins() {
        let remote = vec![record("abcdefghij", 1)];
        // Both qualify; the first in local order is taken even though the second is exact
        let local = vec![record("abcdefghiX", 1), record("abcdefghij", 1)];

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(results[0].local(), Some(0));
        assert!((results[0].score() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn moderate_similarity_is_potential_mismatch() {
        // ratio("abcdefgh", "abcdwxyz") = 0.5, ratio("abcdefgh", "abcdefyz") = 0.75
        let remote = vec![record("abcdefgh", 1)];
        let local = vec![record("abcdwxyz", 1), record("abcdefyz", 1), record("zzzz", 1)];

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(
            results[0].outcome,
            MatchOutcome::PotentialMismatch { local: 1, score: 0.75 }
        );
        assert_eq!(results[0].finding(), Some(FindingStatus::PotentialMismatch));
    }

    #[test]
    fn review_threshold_is_exclusive() {
        let remote = vec![record("abcdefgh", 1)];
        let local = vec![record("abcdwxyz", 1)];

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(results[0].outcome, MatchOutcome::Missing { best_score: 0.5 });
    }

    #[test]
    fn empty_local_corpus_is_missing() {
        let remote = vec![record("abc", 1)];
        let local: Vec<TextRecord> = vec![];

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(results[0].outcome, MatchOutcome::Missing { best_score: 0.0 });
    }

    #[test]
    fn window_limits_compared_prefix() {
        let shared = "ب".repeat(30);
        let remote = vec![record(&format!("{}{}", shared, "ا".repeat(50)), 1)];
        let local = vec![record(&format!("{}{}", shared, "ي".repeat(50)), 1)];

        let config = MatchConfig { window: 30, ..MatchConfig::default() };
        let results = match_corpus(&remote, &local, &config);
        assert_eq!(results[0].finding(), None);

        let results = match_corpus(&remote, &local, &MatchConfig::default());
        assert_eq!(results[0].finding(), Some(FindingStatus::Missing));
    }

    #[test]
    fn status_labels() {
        assert_eq!(FindingStatus::RepeatMismatch.label(), "Repeat Mismatch");
        assert_eq!(
            serde_json::to_value(FindingStatus::PotentialMismatch).unwrap(),
            "Potential Mismatch"
        );
    }
}
