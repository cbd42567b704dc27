/// Verdict types: feedback items, revision actions, approval.
pub mod analysis;
/// Rule-based evaluators and the critic seam.
pub mod rules;
