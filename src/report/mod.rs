/// Markdown run summary.
pub mod summary;
