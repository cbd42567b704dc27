/// Scene-element to visual-element expansion.
pub mod mapper;
/// Concrete visual records.
pub mod model;
/// Deterministic illustrative sample.
pub mod sampler;
