//! Filtering of the dataset by user selections.
//!
//! This module handles:
//! - Combining per-attribute selections into one predicate
//! - Translating "all" choices into pass-through
//! - Listing the choices available for each filter

pub mod options;
pub mod selection;

// Re-export main types
pub use options::{filter_options, FilterOptions};
pub use selection::{is_all_sentinel, Selection};
