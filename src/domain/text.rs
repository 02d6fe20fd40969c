//! Text normalization and similarity scoring
//!
//! [`similarity`] reproduces the ratio of Python's `difflib.SequenceMatcher`
//! (Ratcliff/Obershelp): find the longest common block, recurse on both
//! sides of it, and score `2 * matched / (len(a) + len(b))`. Scores computed
//! here are directly comparable with reports produced by that tool.

use std::collections::{HashMap, HashSet};

/// Decorative end-of-verse glyph (U+06DD ARABIC END OF AYAH)
pub const AYAH_MARKER: char = '\u{06DD}';

/// Removes the verse marker, collapses whitespace runs and trims
pub fn clean_text(text: &str) -> String {
    text.replace(AYAH_MARKER, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the first `n` characters of `text`
pub fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Options for [`similarity_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityOptions {
    /// Ignore characters of `b` that are too frequent to seed a match
    /// (difflib's `autojunk`, active when `b` has at least 200 characters)
    pub autojunk: bool,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self { autojunk: true }
    }
}

/// Similarity ratio in `[0.0, 1.0]` with default options
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with(a, b, SimilarityOptions::default())
}

/// Similarity ratio in `[0.0, 1.0]`
pub fn similarity_with(a: &str, b: &str, options: SimilarityOptions) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matcher = BlockMatcher::new(&a, &b, options);
    2.0 * matcher.matched_len() as f64 / total as f64
}

/// Longest-common-block matcher over two character sequences
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, minus popular characters
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char], options: SimilarityOptions) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let n = b.len();
        if options.autojunk && n >= 200 {
            let limit = n / 100 + 1;
            let popular: HashSet<char> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > limit)
                .map(|(&c, _)| c)
                .collect();
            for c in popular {
                b2j.remove(&c);
            }
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]` as `(i, j, size)`
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters cannot seed a match but may extend one
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }

    /// Total length of all matching blocks
    fn matched_len(&self) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn clean_strips_marker_and_whitespace() {
        assert_eq!(clean_text("  سُبْحَانَ\n\tاللَّهِ ۝  "), "سُبْحَانَ اللَّهِ");
        assert_eq!(clean_text("a۝b"), "ab");
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" ۝ "), "");
    }

    #[test]
    fn prefix_counts_characters() {
        assert_eq!(prefix_chars("أَصْبَحْنَا", 2), "أَ");
        assert_eq!(prefix_chars("abc", 10), "abc");
        assert_eq!(prefix_chars("abc", 0), "");
    }

    #[test]
    fn identical_strings_score_one() {
        assert!(approx(similarity("abcd", "abcd"), 1.0));
        assert!(approx(similarity("", ""), 1.0));
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert!(approx(similarity("abc", "xyz"), 0.0));
        assert!(approx(similarity("abc", ""), 0.0));
    }

    #[test]
    fn matches_difflib_reference_values() {
        // difflib.SequenceMatcher(None, a, b).ratio()
        assert!(approx(similarity("abcd", "bcde"), 0.75));
        assert!(approx(
            similarity("private Thread currentThread;", "private volatile Thread currentThread;"),
            58.0 / 67.0
        ));
        assert!(approx(similarity("tide", "diet"), 0.25));
        assert!(approx(similarity("qabxcd", "abycdf"), 2.0 * 4.0 / 12.0));
    }

    #[test]
    fn autojunk_only_applies_to_long_inputs() {
        let a = "a".repeat(10);
        let b = "a".repeat(10);
        let opts = SimilarityOptions { autojunk: true };
        assert!(approx(similarity_with(&a, &b, opts), 1.0));
    }

    #[test]
    fn autojunk_drops_popular_characters() {
        // Every character of b is popular, so nothing can seed a match
        let a = format!("xy{}", "ab".repeat(100));
        let b = format!("{}zq", "ab".repeat(100));
        assert!(approx(similarity_with(&a, &b, SimilarityOptions { autojunk: true }), 0.0));
        assert!(approx(
            similarity_with(&a, &b, SimilarityOptions { autojunk: false }),
            400.0 / 404.0
        ));
    }

    proptest! {
        #[test]
        fn ratio_is_bounded(a in "\\PC{0,40}", b in "\\PC{0,40}") {
            let r = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&r));
        }

        #[test]
        fn ratio_of_self_is_one(a in "\\PC{0,120}") {
            prop_assert!(approx(similarity(&a, &a), 1.0));
        }

        #[test]
        fn whitespace_and_marker_noise_is_normalized(words in proptest::collection::vec("[ا-ي]{1,6}", 1..8)) {
            let plain = words.join(" ");
            let noisy = format!("  {}  ۝", words.join(" \n\t "));
            prop_assert_eq!(clean_text(&plain), clean_text(&noisy));
        }
    }
}
