//! Keyword taxonomy: multi-category classification and macro-category rollup.
//!
//! - [`classifier`] — ordered keyword dictionaries with leftmost-match priority.
//! - [`rollup`] — maps a sub-category to its sectoral macro-category.

pub mod classifier;
pub mod rollup;
