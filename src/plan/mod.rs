/// Template-driven scene planning.
pub mod scenes;
