//! Heuristic summary quality scoring
//!
//! The score is advisory, not a correctness guarantee: a deterministic
//! combination of compression-ratio fit and salient-term coverage, in [0, 1].

use super::{count_words, SummaryStyle};
use std::collections::HashMap;

/// Number of salient input terms checked for coverage
const SALIENT_TERMS: usize = 10;

/// Minimum length for a word to count as salient
const MIN_TERM_LEN: usize = 5;

/// Weight of the compression-ratio component
const RATIO_WEIGHT: f64 = 0.6;

/// Weight of the term-coverage component
const COVERAGE_WEIGHT: f64 = 0.4;

/// Score a summary against its input for the given style. Returns [0, 1].
pub fn quality_score(input: &str, summary: &str, style: SummaryStyle) -> f64 {
    let input_words = count_words(input);
    let output_words = count_words(summary);

    if input_words == 0 || output_words == 0 {
        return 0.0;
    }

    let ratio = output_words as f64 / input_words as f64;
    let ratio_component = ratio_fit(ratio, style);
    let coverage_component = term_coverage(input, summary);

    (RATIO_WEIGHT * ratio_component + COVERAGE_WEIGHT * coverage_component).clamp(0.0, 1.0)
}

/// Style-specific target compression ranges (output words / input words)
fn target_range(style: SummaryStyle) -> (f64, f64) {
    match style {
        SummaryStyle::Bullets => (0.10, 0.40),
        SummaryStyle::Abstract => (0.05, 0.25),
        SummaryStyle::Detailed => (0.20, 0.60),
    }
}

/// 1.0 inside the style's target range, falling off linearly outside it.
fn ratio_fit(ratio: f64, style: SummaryStyle) -> f64 {
    let (lo, hi) = target_range(style);

    if ratio >= lo && ratio <= hi {
        1.0
    } else if ratio < lo {
        (ratio / lo).clamp(0.0, 1.0)
    } else {
        ((1.0 - ratio) / (1.0 - hi)).clamp(0.0, 1.0)
    }
}

/// Fraction of the most frequent long input terms that reappear in the
/// summary. Ties broken alphabetically so the result is deterministic.
fn term_coverage(input: &str, summary: &str) -> f64 {
    let mut frequency: HashMap<String, usize> = HashMap::new();
    for word in input.split_whitespace() {
        let term: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if term.chars().count() >= MIN_TERM_LEN {
            *frequency.entry(term).or_insert(0) += 1;
        }
    }

    if frequency.is_empty() {
        // Nothing salient to check; don't penalize short inputs.
        return 1.0;
    }

    let mut terms: Vec<(String, usize)> = frequency.into_iter().collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    terms.truncate(SALIENT_TERMS);

    let summary_lower = summary.to_lowercase();
    let matched = terms
        .iter()
        .filter(|(term, _)| summary_lower.contains(term.as_str()))
        .count();

    matched as f64 / terms.len() as f64
}
