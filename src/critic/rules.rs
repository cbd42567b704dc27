//! Five independent rule evaluators over a scene's visual record and the full script text.

use std::collections::BTreeSet;

use crate::config::registry::Registry;
use crate::critic::analysis::{
    AnimationAnalysis, CriticAspect, CriticFeedback, RevisionAction, Severity,
};
use crate::visual::model::{SceneVisual, VisualType};

/// Minimum comfortable scene duration in seconds.
pub const MIN_DURATION: f64 = 5.0;
/// Maximum comfortable scene duration in seconds.
pub const MAX_DURATION: f64 = 30.0;
/// More elements than this is an overload.
pub const MAX_ELEMENTS: usize = 15;
/// Fewer elements than this is sparse.
pub const MIN_ELEMENTS: usize = 3;
/// More distinct colors than this is flagged.
pub const MAX_COLORS: usize = 6;
/// More code lines than this is flagged as overly complex.
pub const MAX_CODE_LINES: usize = 200;
/// Generic narration shorter than this is flagged.
pub const MIN_NARRATION: usize = 20;

/// Scores one scene. The controller only depends on this seam.
pub trait SceneCritic {
    fn analyze(&self, scene: &SceneVisual, script: &str, topic: &str) -> AnimationAnalysis;
}

/// Built-in rule-based critic.
pub struct Critic<'r> {
    registry: &'r Registry,
}

impl<'r> Critic<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }
}

impl SceneCritic for Critic<'_> {
    #[tracing::instrument(skip_all, fields(scene = %scene.name))]
    fn analyze(&self, scene: &SceneVisual, script: &str, topic: &str) -> AnimationAnalysis {
        let mut feedback = timing(scene);
        feedback.extend(visual_clarity(scene));
        if self.registry.catalog_for(topic).is_some() {
            feedback.extend(catalog_educational_value(scene));
        } else {
            feedback.extend(generic_educational_value(scene));
        }
        feedback.extend(animation_flow(scene));
        feedback.extend(technical_accuracy(script));

        let analysis = AnimationAnalysis::from_feedback(&scene.name, feedback);
        tracing::debug!(
            score = analysis.overall_score,
            approval = analysis.approval.as_str(),
            "scene analyzed"
        );
        analysis
    }
}

pub fn timing(scene: &SceneVisual) -> Vec<CriticFeedback> {
    let mut out = Vec::new();
    let duration = scene.duration;
    if duration < MIN_DURATION {
        out.push(
            CriticFeedback::new(
                CriticAspect::Timing,
                4.0,
                Severity::Medium,
                "Scene duration is too short for effective learning",
            )
            .suggest(&[
                "Increase scene duration to at least 8-10 seconds",
                "Add more time for concept absorption",
            ])
            .act(RevisionAction::IncreaseDuration),
        );
    } else if duration > MAX_DURATION {
        out.push(
            CriticFeedback::new(
                CriticAspect::Timing,
                5.0,
                Severity::Low,
                "Scene duration is too long, risking viewer attention",
            )
            .suggest(&[
                "Reduce scene duration or break into multiple shorter scenes",
                "Add more dynamic elements to maintain engagement",
            ])
            .act(RevisionAction::DecreaseDuration),
        );
    } else {
        out.push(CriticFeedback::new(
            CriticAspect::Timing,
            8.0,
            Severity::Low,
            "Scene duration is appropriate for the content",
        ));
    }

    if !scene.elements.is_empty() && duration / (scene.elements.len() as f64) < 1.0 {
        out.push(
            CriticFeedback::new(
                CriticAspect::Timing,
                5.0,
                Severity::Medium,
                "Elements appear too quickly for comprehension",
            )
            .suggest(&[
                "Increase time between element appearances",
                "Add pauses for concept processing",
            ]),
        );
    }
    out
}

pub fn visual_clarity(scene: &SceneVisual) -> Vec<CriticFeedback> {
    let mut out = Vec::new();
    let count = scene.elements.len();
    if count > MAX_ELEMENTS {
        out.push(
            CriticFeedback::new(
                CriticAspect::VisualClarity,
                4.0,
                Severity::High,
                "Too many visual elements may cause cognitive overload",
            )
            .suggest(&[
                "Reduce number of simultaneous elements",
                "Group related elements together",
                "Use progressive disclosure",
            ])
            .act(RevisionAction::TrimElements),
        );
    } else if count < MIN_ELEMENTS {
        out.push(
            CriticFeedback::new(
                CriticAspect::VisualClarity,
                6.0,
                Severity::Low,
                "Scene is sparse and might benefit from more visual elements",
            )
            .suggest(&["Add supporting visual elements", "Include labels or annotations"])
            .act(RevisionAction::AddLabels),
        );
    } else {
        out.push(CriticFeedback::new(
            CriticAspect::VisualClarity,
            8.5,
            Severity::Low,
            "Good balance of visual elements",
        ));
    }

    let colors: BTreeSet<&str> = scene.elements.iter().filter_map(|e| e.color()).collect();
    if colors.len() > MAX_COLORS {
        out.push(
            CriticFeedback::new(
                CriticAspect::VisualClarity,
                5.0,
                Severity::Medium,
                "Too many colors may reduce visual clarity",
            )
            .suggest(&[
                "Limit color palette to 4-5 colors",
                "Use color consistently for similar concepts",
            ]),
        );
    }
    out
}

/// Scene-name driven checks for topics that have a template catalog.
pub fn catalog_educational_value(scene: &SceneVisual) -> Vec<CriticFeedback> {
    let has = |ty: VisualType, needles: &[&str]| {
        scene
            .elements
            .iter()
            .any(|e| e.visual_type == ty || needles.iter().any(|n| e.id.contains(n)))
    };

    let name = scene.name.as_str();
    if name.contains("data_introduction") {
        let points = has(VisualType::Point, &["point"]);
        let axes = has(VisualType::AxisSet, &["axis"]);
        if points && axes {
            vec![CriticFeedback::new(
                CriticAspect::EducationalValue,
                9.0,
                Severity::Low,
                "Excellent foundation - shows data in coordinate system",
            )]
        } else {
            vec![
                CriticFeedback::new(
                    CriticAspect::EducationalValue,
                    5.0,
                    Severity::High,
                    "Missing key elements for data introduction",
                )
                .suggest(&["Add coordinate axes", "Ensure data points are visible"]),
            ]
        }
    } else if name.contains("variance") {
        if has(VisualType::Ellipse, &["ellipse", "variance"]) {
            Vec::new()
        } else {
            vec![
                CriticFeedback::new(
                    CriticAspect::EducationalValue,
                    4.0,
                    Severity::High,
                    "Variance concept not clearly visualized",
                )
                .suggest(&[
                    "Add variance ellipse or spread indicator",
                    "Show data distribution visually",
                ]),
            ]
        }
    } else if name.contains("pca_transformation") {
        if has(VisualType::Arrow, &["arrow", "component"]) {
            Vec::new()
        } else {
            vec![
                CriticFeedback::new(
                    CriticAspect::EducationalValue,
                    3.0,
                    Severity::High,
                    "Principal components not shown",
                )
                .suggest(&[
                    "Add arrows showing principal component directions",
                    "Highlight maximum variance directions",
                ]),
            ]
        }
    } else {
        Vec::new()
    }
}

pub fn generic_educational_value(scene: &SceneVisual) -> Vec<CriticFeedback> {
    if scene.narration.chars().count() >= MIN_NARRATION {
        return Vec::new();
    }
    vec![
        CriticFeedback::new(
            CriticAspect::EducationalValue,
            5.0,
            Severity::Medium,
            "Narration is too brief for effective learning",
        )
        .suggest(&["Expand narration with more explanation", "Add context and examples"])
        .act(RevisionAction::ExtendNarration),
    ]
}

pub fn animation_flow(scene: &SceneVisual) -> Vec<CriticFeedback> {
    let kinds: BTreeSet<&str> = scene
        .elements
        .iter()
        .flat_map(|e| e.events.iter().map(|ev| ev.kind.as_str()))
        .collect();
    if kinds.len() < 2 {
        vec![
            CriticFeedback::new(
                CriticAspect::AnimationFlow,
                5.0,
                Severity::Medium,
                "Limited animation variety may reduce engagement",
            )
            .suggest(&[
                "Add more animation types",
                "Use different entrances for different elements",
            ]),
        ]
    } else {
        vec![CriticFeedback::new(
            CriticAspect::AnimationFlow,
            8.0,
            Severity::Low,
            "Good variety in animations",
        )]
    }
}

/// Textual checks on the whole emitted script.
pub fn technical_accuracy(script: &str) -> Vec<CriticFeedback> {
    let mut out = Vec::new();
    let code_lines = script
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .count();
    if code_lines > MAX_CODE_LINES {
        out.push(
            CriticFeedback::new(
                CriticAspect::TechnicalAccuracy,
                5.0,
                Severity::Low,
                "Generated code is quite complex",
            )
            .suggest(&[
                "Consider breaking into smaller functions",
                "Simplify animation logic where possible",
            ]),
        );
    }

    let construct = script.contains("def construct(self):");
    let play = script.contains("self.play(");
    let three_d = script.contains("ThreeDScene") || script.contains("set_camera_orientation");

    if !construct {
        out.push(
            CriticFeedback::new(
                CriticAspect::TechnicalAccuracy,
                2.0,
                Severity::High,
                "Missing construct method",
            )
            .suggest(&["Add proper construct method"]),
        );
    }
    if !play {
        out.push(
            CriticFeedback::new(
                CriticAspect::TechnicalAccuracy,
                3.0,
                Severity::High,
                "No animations found in code",
            )
            .suggest(&["Add self.play() calls for animations"]),
        );
    }
    if !three_d {
        out.push(
            CriticFeedback::new(
                CriticAspect::TechnicalAccuracy,
                5.0,
                Severity::Medium,
                "No 3D scene setup found",
            )
            .suggest(&["Derive scenes from ThreeDScene and set the camera orientation"]),
        );
    }
    if construct && play && three_d {
        out.push(CriticFeedback::new(
            CriticAspect::TechnicalAccuracy,
            9.0,
            Severity::Low,
            "Proper 3D scene setup detected",
        ));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/critic/rules.rs"]
mod tests;
