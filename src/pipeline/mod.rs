/// Run options, outcome and the feedback loop.
pub mod controller;
/// Structured mutations applied to unapproved scenes.
pub mod revise;
/// Immutable per-iteration state.
pub mod snapshot;
