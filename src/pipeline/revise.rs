//! Mutations the controller applies to unapproved scenes between iterations.
//!
//! The full visual mapping is never re-run here: trims and duration edits would be lost. The
//! only structural addition is the mapper's title label.

use crate::critic::analysis::RevisionAction;
use crate::visual::mapper::VisualMapper;
use crate::visual::model::SceneVisual;

pub const MIN_SCENE_DURATION: f64 = 5.0;
pub const MAX_SCENE_DURATION: f64 = 25.0;
pub const INCREASE_FACTOR: f64 = 1.3;
pub const DECREASE_FACTOR: f64 = 0.8;
/// Element count an overloaded scene is truncated to.
pub const TRIM_TO: usize = 10;
/// Narration at or above this many characters is left alone.
pub const EXTEND_BELOW: usize = 50;
pub const NARRATION_EXTENSION: &str =
    " This concept is fundamental to understanding the underlying mathematical principles.";

/// Scale a duration and clamp it to the allowed scene range.
pub fn scale_duration(duration: f64, factor: f64) -> f64 {
    (duration * factor).clamp(MIN_SCENE_DURATION, MAX_SCENE_DURATION)
}

/// Apply each action once, in the given order.
pub fn apply(scene: &mut SceneVisual, actions: &[RevisionAction], mapper: &VisualMapper<'_>) {
    for action in actions {
        match action {
            RevisionAction::IncreaseDuration => {
                scene.duration = scale_duration(scene.duration, INCREASE_FACTOR);
            }
            RevisionAction::DecreaseDuration => {
                scene.duration = scale_duration(scene.duration, DECREASE_FACTOR);
            }
            RevisionAction::TrimElements => scene.elements.truncate(TRIM_TO),
            RevisionAction::AddLabels => {
                if !scene.labelled {
                    let label = mapper.label_for(scene);
                    scene.elements.push(label);
                    scene.labelled = true;
                }
            }
            RevisionAction::ExtendNarration => {
                if scene.narration.chars().count() < EXTEND_BELOW {
                    scene.narration.push_str(NARRATION_EXTENSION);
                }
            }
        }
        tracing::debug!(scene = %scene.name, ?action, "revision applied");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/revise.rs"]
mod tests;
