//! Context relevance scoring.
//!
//! # Responsibility
//! - Tokenize free text into sets of significant lowercase terms.
//! - Score notes by overlap with a context term set and rank them.
//!
//! # Invariants
//! - Only terms longer than [`MIN_TERM_CHARS`] characters are significant.
//! - score = |note ∩ context| / max(|context|, |note|), and 0 when both
//!   sets are empty.
//! - Ranking keeps scores strictly above [`RELEVANCE_THRESHOLD`], sorted
//!   descending, ties in input order.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Terms must be strictly longer than this many characters.
pub const MIN_TERM_CHARS: usize = 3;

/// Notes must score strictly above this to be returned.
pub const RELEVANCE_THRESHOLD: f64 = 0.1;

static TERM_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("valid term separator regex"));

/// Builds the set of significant lowercase terms in `text`.
pub fn term_set(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    TERM_SEPARATOR_RE
        .split(&lowered)
        .filter(|term| term.chars().count() > MIN_TERM_CHARS)
        .map(str::to_string)
        .collect()
}

/// Normalized overlap between a note's terms and the context terms.
pub fn overlap_score(context_terms: &HashSet<String>, note_terms: &HashSet<String>) -> f64 {
    let denominator = context_terms.len().max(note_terms.len());
    if denominator == 0 {
        return 0.0;
    }
    let shared = note_terms
        .iter()
        .filter(|term| context_terms.contains(*term))
        .count();
    shared as f64 / denominator as f64
}

/// Scores one note against pre-tokenized context terms.
pub fn score_note(context_terms: &HashSet<String>, note: &Note) -> f64 {
    overlap_score(context_terms, &term_set(&note.searchable_text()))
}

/// Returns notes relevant to `context`, best first, with scores attached.
pub fn rank_by_relevance(notes: Vec<Note>, context: &str) -> Vec<Note> {
    let context_terms = term_set(context);
    let mut ranked: Vec<Note> = notes
        .into_iter()
        .filter_map(|mut note| {
            let score = score_note(&context_terms, &note);
            if score > RELEVANCE_THRESHOLD {
                note.relevance_score = Some(score);
                Some(note)
            } else {
                None
            }
        })
        .collect();

    // `sort_by` is stable, so equal scores keep collection order.
    ranked.sort_by(|left, right| {
        let left = left.relevance_score.unwrap_or_default();
        let right = right.relevance_score.unwrap_or_default();
        right.partial_cmp(&left).unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::{overlap_score, rank_by_relevance, term_set};
    use crate::model::note::Note;
    use std::collections::HashSet;

    fn set(terms: &[&str]) -> HashSet<String> {
        terms.iter().map(|term| term.to_string()).collect()
    }

    #[test]
    fn term_set_drops_short_words_and_punctuation() {
        let terms = term_set("The cat, the HOUSE; and context-preservation!");
        assert_eq!(terms, set(&["house", "context", "preservation"]));
    }

    #[test]
    fn term_length_counts_characters_not_bytes() {
        assert!(term_set("ñaña").contains("ñaña"));
        assert!(term_set("ñañ").is_empty());
    }

    #[test]
    fn score_divides_by_larger_set() {
        let context = set(&["alpha", "beta"]);
        let note = set(&["alpha", "gamma", "delta", "omega"]);
        assert!((overlap_score(&context, &note) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_sets_score_zero() {
        let score = overlap_score(&HashSet::new(), &HashSet::new());
        assert_eq!(score, 0.0);
        assert!(!score.is_nan());
    }

    #[test]
    fn ranking_filters_threshold_and_sorts_descending() {
        let notes = vec![
            Note::new(
                "weak",
                ["alpha three four five seven eight nine eleven twelve thirteen"],
            ),
            Note::new("partial", ["alpha gamma"]),
            Note::new("none", ["unrelated words entirely"]),
            Note::new("strong", ["alpha beta"]),
        ];
        let ranked = rank_by_relevance(notes, "alpha beta");
        let titles: Vec<_> = ranked.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["strong", "partial"]);

        let strong = ranked[0].relevance_score.unwrap();
        let partial = ranked[1].relevance_score.unwrap();
        assert!(strong > partial);
        assert!(partial > 0.1);
    }

    #[test]
    fn ties_keep_input_order() {
        let notes = vec![
            Note::new("first", ["shared words"]),
            Note::new("second", ["shared words"]),
        ];
        let ranked = rank_by_relevance(notes, "shared words first second");
        let titles: Vec<_> = ranked.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(ranked[0].relevance_score, ranked[1].relevance_score);
    }

    #[test]
    fn score_exactly_at_threshold_is_excluded() {
        let words: Vec<String> = (0..10).map(|idx| format!("word{idx}")).collect();
        let notes = vec![Note::new("", [words.join(" ")])];
        assert!(rank_by_relevance(notes, "word0").is_empty());
    }
}
