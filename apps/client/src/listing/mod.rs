//! Shared pieces of the job and resume listings: filter DSL builder,
//! pagination state, and column-aligned tables.

pub mod filter;
pub mod pagination;
pub mod table;

pub use filter::FilterBuilder;
pub use pagination::Pagination;
pub use table::{Cell, Table};

/// Every listing is newest-first.
pub const DEFAULT_SORT: &str = "createdAt,desc";
