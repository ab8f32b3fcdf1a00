//! In-memory note search.
//!
//! # Responsibility
//! - Keyword filtering by conjunctive substring match.
//! - Context relevance ranking by normalized term overlap.
//!
//! Both algorithms scan the loaded collection; there is no index.

pub mod keyword;
pub mod relevance;
