/// Time-boxed subprocess invocation.
pub mod process;
/// Per-scene rendering through an external animation engine.
pub mod renderer;
/// Joining rendered clips into one video.
pub mod concat;
