//! One-shot scroll reveal bookkeeping.
//!
//! Each observed element is identified by its position in the list queried
//! at startup. An element is revealed the first time it is intersecting the
//! trigger zone with at least `threshold` of its area, and never hidden again.

use std::collections::BTreeSet;

use crate::config::RevealOptions;

/// Ratios reported at exactly the threshold can come back a hair short.
const RATIO_SLACK: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub index: usize,
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[derive(Clone, Debug)]
pub struct RevealSet {
    threshold: f64,
    len: usize,
    revealed: BTreeSet<usize>,
}

impl RevealSet {
    pub fn new(len: usize, options: &RevealOptions) -> Self {
        Self {
            threshold: options.threshold,
            len,
            revealed: BTreeSet::new(),
        }
    }

    /// Feeds one observer entry. Returns the index only when this entry is
    /// the one that reveals the element.
    pub fn observe(&mut self, entry: Intersection) -> Option<usize> {
        if entry.index >= self.len || !entry.is_intersecting {
            return None;
        }
        if entry.ratio + RATIO_SLACK < self.threshold {
            return None;
        }
        self.revealed.insert(entry.index).then_some(entry.index)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.len() == self.len
    }
}

/// Stylesheet injected at startup: cards start hidden and slide in once
/// they carry the marker class.
pub fn stylesheet(options: &RevealOptions) -> String {
    let hidden = options.targets.join(",\n");
    let shown = options
        .targets
        .iter()
        .map(|sel| format!("{sel}.{}", options.marker_class))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "{hidden} {{\n  opacity: 0;\n  transform: translateY(20px);\n  \
         transition: opacity 0.6s ease, transform 0.6s ease;\n}}\n\
         {shown} {{\n  opacity: 1;\n  transform: translateY(0);\n}}\n\
         .notification {{\n  box-shadow: 0 10px 25px rgba(0, 0, 0, 0.2);\n}}\n"
    )
}
