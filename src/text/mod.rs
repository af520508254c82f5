//! Deterministic text cleaning applied to contract descriptions.
//!
//! - [`normalize`] — lowercase, accent-stripped, punctuation-free canonical form.
//! - [`typos`] — ordered table of known misspellings.
//! - [`prefix`] — removal of non-informative leading tokens.

pub mod normalize;
pub mod prefix;
pub mod typos;
