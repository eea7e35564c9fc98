//! Call-shape resolution, filter normalization and sort parsing.

pub mod args;
pub mod normalizer;
pub mod sort;

pub use args::QueryArgs;
pub use normalizer::normalize_filter;
pub use sort::{resolve_sort, SortSpec};
