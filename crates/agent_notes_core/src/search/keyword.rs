//! Conjunctive keyword filter.
//!
//! # Invariants
//! - Every query term must appear as a substring of the note's lowercased
//!   searchable text.
//! - Output preserves collection order.
//! - A query without terms matches every note.

use crate::model::note::Note;

/// Splits a query into lowercase whitespace-separated terms.
pub fn query_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Returns whether `note` contains every term.
pub fn matches_all_terms(note: &Note, terms: &[String]) -> bool {
    let haystack = note.searchable_text().to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// Filters notes matching every term of `query`, in input order.
pub fn filter_notes(notes: Vec<Note>, query: &str) -> Vec<Note> {
    let terms = query_terms(query);
    notes
        .into_iter()
        .filter(|note| matches_all_terms(note, &terms))
        .collect()
}
