//! Eduviz turns explanatory text into an animated 3-D visualization script.
//!
//! A run is a fixed pipeline driven by [`PipelineController`]:
//!
//! - Extract lexicon [`Concept`]s from the text
//! - Plan ordered [`Scene`]s from a topic's template catalog (or a generic plan)
//! - Map scene elements to concrete [`SceneVisual`]s
//! - Emit a Manim script, critique every scene and revise until approved or out of iterations
//!
//! All fixed vocabularies (lexicon, templates, animation library, palette) live in a swappable
//! [`Registry`].
#![forbid(unsafe_code)]

mod foundation;

/// Swappable registries.
pub mod config;
/// Rule-based scene critic.
pub mod critic;
/// Script emission.
pub mod emit;
/// External render and concatenation tools.
pub mod external;
/// Concept extraction.
pub mod extract;
/// Feedback-loop controller.
pub mod pipeline;
/// Scene planning.
pub mod plan;
/// Run summary.
pub mod report;
/// Visual mapping.
pub mod visual;

pub use crate::foundation::core::{PropValue, Props, Vec3};
pub use crate::foundation::error::{EduvizError, EduvizResult};

pub use crate::config::registry::Registry;
pub use crate::critic::analysis::{
    AnimationAnalysis, Approval, CriticAspect, CriticFeedback, Recommendations, RevisionAction,
    Severity,
};
pub use crate::critic::rules::{Critic, SceneCritic};
pub use crate::emit::script::CodeEmitter;
pub use crate::external::concat::{FfmpegConcatenator, VideoConcatenator};
pub use crate::external::renderer::{ManimRenderer, SceneRenderer};
pub use crate::extract::concepts::{Concept, ConceptExtractor};
pub use crate::pipeline::controller::{
    Degradation, PipelineController, PipelineOpts, RunOutcome, Termination,
};
pub use crate::pipeline::snapshot::Snapshot;
pub use crate::plan::scenes::{Scene, SceneElement, ScenePlanner};
pub use crate::report::summary::render as render_report;
pub use crate::visual::mapper::VisualMapper;
pub use crate::visual::model::{SceneVisual, VisualElement, VisualType};
