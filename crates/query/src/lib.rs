//! The catalog's query engine: derived views over a full table scan.
//!
//! Every operation takes a `&[ScholarshipRecord]` slice (the store's scan
//! order) and returns a derived sequence or summary. Nothing here touches
//! the store, holds state between calls, or mutates its input.

mod aggregate;
mod deadline;
mod error;
mod filter;
mod fuzzy;
mod narrative;
mod search;
#[cfg(test)]
mod test_support;

pub use aggregate::{proportion_summary, top_n, GroupCount, GroupShare};
pub use deadline::closing_soon;
pub use error::{QueryError, Result};
pub use filter::{filter, Criteria};
pub use fuzzy::{FuzzySearch, JaroWinkler, Similarity, DEFAULT_FIELD, DEFAULT_THRESHOLD};
pub use narrative::{busiest_entity_sentence, leading_share_sentence};
pub use search::substring_search;
