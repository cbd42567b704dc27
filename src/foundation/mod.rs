/// Small value types shared across stages.
pub mod core;
/// Error taxonomy.
pub mod error;
