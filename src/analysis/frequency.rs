//! Character frequency tables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count per character (code point).
///
/// Ordered by code point so that anything summed over the table is
/// accumulated in the same order on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharFrequency(BTreeMap<char, usize>);

impl CharFrequency {
    /// Count of `c`, 0 if it never occurs
    pub fn get(&self, c: char) -> usize {
        self.0.get(&c).copied().unwrap_or(0)
    }

    /// Total number of characters counted
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of distinct characters
    pub fn unique(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.0.iter().map(|(&c, &n)| (c, n))
    }

    /// Probability of each character, in code point order
    pub(crate) fn probabilities(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        let total = self.total() as f64;
        self.iter().map(move |(c, n)| (c, n as f64 / total))
    }
}

/// Count occurrences of each character in `text`
pub fn frequency(text: &str) -> CharFrequency {
    let mut counts = BTreeMap::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    CharFrequency(counts)
}
