//! Shannon entropy, cross-entropy and KL divergence (bits)

use super::frequency::{frequency, CharFrequency};

/// Shannon entropy of `text` in bits, 0 for empty text.
///
/// Bounded by `log2(unique characters)`, reached only when every character
/// occurs equally often.
pub fn shannon_entropy(text: &str) -> f64 {
    entropy_of(&frequency(text))
}

/// Cross-entropy H(P, Q) with P taken from `p_text` and Q from `q_text`.
///
/// Returns `None` if either text is empty. Characters that occur in Q but
/// not in P are skipped rather than contributing an infinite term, so the
/// sum only covers the shared support.
pub fn cross_entropy(p_text: &str, q_text: &str) -> Option<f64> {
    cross_entropy_of(&frequency(p_text), &frequency(q_text))
}

/// KL divergence as `H(P, Q) - H(P)`.
///
/// The argument order is significant. With the shared-support rule in
/// [`cross_entropy`] the value can be negative when Q puts mass outside P.
pub fn kl_divergence(p_text: &str, q_text: &str) -> Option<f64> {
    let p = frequency(p_text);
    let q = frequency(q_text);
    cross_entropy_of(&p, &q).map(|h| h - entropy_of(&p))
}

pub(super) fn entropy_of(freq: &CharFrequency) -> f64 {
    let mut h = 0.0;
    for (_, p) in freq.probabilities() {
        h -= p * p.log2();
    }
    h
}

// Must mirror entropy_of term for term so that H(P, P) == H(P) exactly.
pub(super) fn cross_entropy_of(p: &CharFrequency, q: &CharFrequency) -> Option<f64> {
    if p.is_empty() || q.is_empty() {
        return None;
    }

    let p_total = p.total() as f64;
    let mut h = 0.0;
    for (c, q_c) in q.probabilities() {
        let p_c = p.get(c) as f64 / p_total;
        if p_c > 0.0 && q_c > 0.0 {
            h -= q_c * p_c.log2();
        }
    }
    Some(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "a",
        "ab",
        "aab",
        "hello world",
        "mississippi",
        "abcdefgh",
        "the quick brown fox jumps over the lazy dog",
        "ÄÖÜäöüß and some ascii",
        "🦀🦀🐍",
    ];

    #[test]
    fn test_empty_and_constant_text() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
    }

    #[test]
    fn test_two_equiprobable_symbols() {
        assert_eq!(shannon_entropy("ab"), 1.0);
        assert_eq!(shannon_entropy("abab"), 1.0);
    }

    #[test]
    fn test_entropy_bounds() {
        for text in SAMPLES {
            let h = shannon_entropy(text);
            let unique = frequency(text).unique() as f64;
            assert!(h >= 0.0, "{text:?}: {h}");
            assert!(h <= unique.log2() + 1e-12, "{text:?}: {h}");
        }
    }

    #[test]
    fn test_upper_bound_iff_uniform() {
        // uniform distributions hit log2(k)
        for text in ["abcdefgh", "aabbcc", "xy", "🦀🐍"] {
            let unique = frequency(text).unique() as f64;
            assert!((shannon_entropy(text) - unique.log2()).abs() < 1e-12);
        }
        // skewed ones stay strictly below it
        for text in ["aab", "mississippi", "hello world"] {
            let unique = frequency(text).unique() as f64;
            assert!(shannon_entropy(text) < unique.log2() - 1e-9);
        }
    }

    #[test]
    fn test_kl_reflexive() {
        for text in SAMPLES {
            assert_eq!(kl_divergence(text, text), Some(0.0), "{text:?}");
        }
    }

    #[test]
    fn test_undefined_on_empty() {
        assert_eq!(cross_entropy("", "abc"), None);
        assert_eq!(cross_entropy("abc", ""), None);
        assert_eq!(kl_divergence("", ""), None);
    }

    #[test]
    fn test_cross_entropy_skips_missing_support() {
        // 'c' is absent from P and is ignored instead of yielding infinity
        let h = cross_entropy("ab", "ac").unwrap();
        assert!(h.is_finite());
        assert_eq!(h, 0.5);

        // disjoint supports accumulate nothing
        assert_eq!(cross_entropy("aaa", "bbb"), Some(0.0));
    }

    #[test]
    fn test_kl_argument_order() {
        let forward = kl_divergence("aaaab", "ab").unwrap();
        let backward = kl_divergence("ab", "aaaab").unwrap();
        assert!((forward - 0.6).abs() < 1e-12);
        assert!(backward.abs() < 1e-12);
    }
}
