//! Information-theoretic comparison of text samples
//!
//! Every measure here is computed from the character-frequency distribution
//! of a text. Accumulation runs at full `f64` precision; only the published
//! result structs are rounded (to 4 decimal places).
//!
//! # Example
//!
//! ```rust
//! use infogrid::analysis::{compare, shannon_entropy};
//!
//! assert_eq!(shannon_entropy("ab"), 1.0);
//!
//! let result = compare("hello", "hello");
//! assert_eq!(result.kl_divergence, Some(0.0));
//! ```

mod entropy;
mod frequency;

pub use entropy::{cross_entropy, kl_divergence, shannon_entropy};
pub use frequency::{frequency, CharFrequency};

use serde::{Deserialize, Serialize};

/// Number of decimal places kept in published results
pub const PUBLISHED_DECIMALS: i32 = 4;

/// Round to the published precision.
///
/// Negative zero is folded into positive zero so that equal inputs always
/// serialize identically.
pub fn round_published(value: f64) -> f64 {
    let scale = 10f64.powi(PUBLISHED_DECIMALS);
    (value * scale).round() / scale + 0.0
}

/// Single-text summary, the local replacement for the old remote entropy call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyResult {
    /// Shannon entropy in bits, rounded
    pub entropy: f64,
    /// Length in characters (code points)
    pub text_length: usize,
    pub unique_characters: usize,
    #[serde(default)]
    pub character_frequency: CharFrequency,
}

/// Pairwise comparison of two texts, `A` playing P and `B` playing Q
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceResult {
    pub entropy_a: f64,
    pub entropy_b: f64,
    /// `None` when either text is empty
    pub cross_entropy: Option<f64>,
    /// `None` when either text is empty
    pub kl_divergence: Option<f64>,
}

/// Build the published entropy summary of `text`
pub fn entropy_report(text: &str) -> EntropyResult {
    let freq = frequency(text);
    EntropyResult {
        entropy: round_published(entropy::entropy_of(&freq)),
        text_length: freq.total(),
        unique_characters: freq.unique(),
        character_frequency: freq,
    }
}

/// Compare `a` against `b`.
///
/// Cross-entropy and KL divergence are taken with `a` as P and `b` as Q,
/// see [`cross_entropy`] for the exact convention.
pub fn compare(a: &str, b: &str) -> DivergenceResult {
    let freq_a = frequency(a);
    let freq_b = frequency(b);
    let entropy_a = entropy::entropy_of(&freq_a);
    let cross = entropy::cross_entropy_of(&freq_a, &freq_b);

    DivergenceResult {
        entropy_a: round_published(entropy_a),
        entropy_b: round_published(entropy::entropy_of(&freq_b)),
        cross_entropy: cross.map(round_published),
        kl_divergence: cross.map(|h| round_published(h - entropy_a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_published() {
        assert_eq!(round_published(1.23456), 1.2346);
        assert_eq!(round_published(0.00004), 0.0);
        assert!(round_published(-0.00001).is_sign_positive());
    }

    #[test]
    fn test_entropy_report_counts() {
        let report = entropy_report("hello");
        assert_eq!(report.text_length, 5);
        assert_eq!(report.unique_characters, 4);
        assert_eq!(report.character_frequency.get('l'), 2);
        // -(3 * 0.2*log2(0.2) + 0.4*log2(0.4)) = 1.92193
        assert_eq!(report.entropy, 1.9219);
    }

    #[test]
    fn test_entropy_report_empty() {
        let report = entropy_report("");
        assert_eq!(report.entropy, 0.0);
        assert_eq!(report.text_length, 0);
        assert_eq!(report.unique_characters, 0);
        assert!(report.character_frequency.is_empty());
    }

    #[test]
    fn test_compare_identical_texts() {
        let result = compare("the quick brown fox", "the quick brown fox");
        assert_eq!(result.entropy_a, result.entropy_b);
        assert_eq!(result.cross_entropy, Some(result.entropy_a));
        assert_eq!(result.kl_divergence, Some(0.0));
    }

    #[test]
    fn test_compare_with_empty_side() {
        let result = compare("abc", "");
        assert_eq!(result.entropy_a, round_published(3f64.log2()));
        assert_eq!(result.entropy_b, 0.0);
        assert_eq!(result.cross_entropy, None);
        assert_eq!(result.kl_divergence, None);
    }

    #[test]
    fn test_compare_shared_support_only() {
        // Q = "ac": only 'a' is in P's support, contributing 0.5 * 1 bit
        let result = compare("ab", "ac");
        assert_eq!(result.cross_entropy, Some(0.5));
        assert_eq!(result.kl_divergence, Some(-0.5));
    }

    #[test]
    fn test_compare_is_deterministic() {
        let a = "Lorem ipsum dolor sit amet, consectetur adipiscing elit";
        let b = "sed do eiusmod tempor incididunt ut labore et dolore";
        let first = compare(a, b);
        for _ in 0..10 {
            let again = compare(a, b);
            assert_eq!(again.entropy_a.to_bits(), first.entropy_a.to_bits());
            assert_eq!(again.entropy_b.to_bits(), first.entropy_b.to_bits());
            assert_eq!(
                again.cross_entropy.map(f64::to_bits),
                first.cross_entropy.map(f64::to_bits)
            );
            assert_eq!(
                again.kl_divergence.map(f64::to_bits),
                first.kl_divergence.map(f64::to_bits)
            );
        }
    }

    #[test]
    fn test_compare_order_matters() {
        // P = {a: .8, b: .2}, Q = uniform
        let forward = compare("aaaab", "ab");
        assert_eq!(forward.cross_entropy, Some(1.3219));
        assert_eq!(forward.kl_divergence, Some(0.6));

        // P uniform: every log2(p) is -1, so H(P,Q) == H(P)
        let backward = compare("ab", "aaaab");
        assert_eq!(backward.cross_entropy, Some(1.0));
        assert_eq!(backward.kl_divergence, Some(0.0));
    }
}
