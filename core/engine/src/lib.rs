//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the cleaning/review engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cleaning;
pub mod dataset;
pub mod filter;
pub mod history;
pub mod pagination;

// Re-export commonly used types at the crate root
pub use cleaning::{ChangeLog, CleaningState, RemovedRow};
pub use dataset::{Dataset, Record, Value};
pub use filter::{
    apply_selection, distinct_values, filterable_columns, FilterColumn, FilterSelection,
    MAX_FILTER_VALUES,
};
pub use history::History;
pub use pagination::{page_count, page_slice, Pager, DEFAULT_PAGE_SIZE};
