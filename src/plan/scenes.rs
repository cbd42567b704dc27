use std::collections::BTreeSet;

use crate::config::registry::{
    ConceptCategory, Registry, SceneCategory, SceneTemplate, TemplateCatalog,
};
use crate::extract::concepts::Concept;
use crate::foundation::core::Props;

/// Default fade duration at a scene boundary, in seconds.
pub const DEFAULT_FADE: f64 = 1.0;
/// Fade duration between adjacent scenes that share an element kind.
pub const SHARED_FADE: f64 = 0.5;

/// Abstract per-scene visual requirement, expanded later by the visual mapper.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneElement {
    /// Element kind; equals the matched concept name.
    pub kind: String,
    /// Properties copied from the concept's hints.
    pub props: Props,
    /// Animation kind (`fade_in` unless the concept hints otherwise).
    pub animation: String,
    /// Share of the scene duration, in seconds.
    pub duration: f64,
    /// Kinds this element depends on.
    pub depends_on: Vec<String>,
}

/// Fade durations at both ends of a scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transitions {
    /// Fade-in seconds.
    pub fade_in: f64,
    /// Fade-out seconds.
    pub fade_out: f64,
}

impl Default for Transitions {
    fn default() -> Self {
        Self {
            fade_in: DEFAULT_FADE,
            fade_out: DEFAULT_FADE,
        }
    }
}

/// Ordered, timed narrative unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// Template id (snake_case).
    pub name: String,
    /// Scene category.
    pub category: SceneCategory,
    /// Human-readable description.
    pub description: String,
    /// Elements in template declaration order.
    pub elements: Vec<SceneElement>,
    /// Total duration in seconds, always > 0.
    pub duration: f64,
    /// Narration text.
    pub narration: String,
    /// Boundary fades.
    pub transitions: Transitions,
}

/// Plans scenes from extracted concepts.
///
/// A topic with a catalog uses its templates; any other topic gets the generic plan of up to
/// three category buckets.
pub struct ScenePlanner<'r> {
    registry: &'r Registry,
}

impl<'r> ScenePlanner<'r> {
    /// Planner over `registry.catalogs`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Plan ordered scenes for `topic`.
    #[tracing::instrument(skip(self, concepts), fields(concepts = concepts.len()))]
    pub fn plan(&self, concepts: &[Concept], topic: &str) -> Vec<Scene> {
        let mut scenes = match self.registry.catalog_for(topic) {
            Some(catalog) => plan_from_catalog(catalog, concepts),
            None => {
                tracing::debug!(topic, "no catalog for topic, using generic plan");
                plan_generic(concepts)
            }
        };
        smooth_transitions(&mut scenes);
        tracing::info!(scenes = scenes.len(), "planned scenes");
        scenes
    }
}

fn plan_from_catalog(catalog: &TemplateCatalog, concepts: &[Concept]) -> Vec<Scene> {
    catalog
        .templates
        .iter()
        .filter(|t| {
            let included = t.always_include
                || t.required
                    .iter()
                    .any(|req| concepts.iter().any(|c| &c.name == req));
            if !included {
                tracing::debug!(template = %t.name, "required concepts absent, template skipped");
            }
            included
        })
        .map(|t| scene_from_template(t, concepts))
        .collect()
}

fn scene_from_template(template: &SceneTemplate, concepts: &[Concept]) -> Scene {
    // Share is by declared kinds, not by how many of them matched.
    let share = template.duration / template.kinds.len().max(1) as f64;

    let elements = template
        .kinds
        .iter()
        .filter_map(|kind| concepts.iter().find(|c| &c.name == kind))
        .map(|concept| element_for(concept, share))
        .collect();

    Scene {
        name: template.name.clone(),
        category: template.category,
        description: template.description.clone(),
        elements,
        duration: template.duration,
        narration: template.narration.clone(),
        transitions: Transitions::default(),
    }
}

fn element_for(concept: &Concept, duration: f64) -> SceneElement {
    let animation = concept
        .hints
        .get("animation")
        .and_then(|v| v.as_str())
        .unwrap_or("fade_in")
        .to_string();
    SceneElement {
        kind: concept.name.clone(),
        props: concept.hints.clone(),
        animation,
        duration,
        depends_on: concept.related.clone(),
    }
}

const GENERIC_BUCKETS: [(ConceptCategory, &str); 3] = [
    (ConceptCategory::Entity, "Mathematical Concepts"),
    (ConceptCategory::Visual, "Visual Elements"),
    (ConceptCategory::Process, "Process Steps"),
];

fn plan_generic(concepts: &[Concept]) -> Vec<Scene> {
    GENERIC_BUCKETS
        .iter()
        .filter_map(|(category, title)| {
            let members: Vec<&Concept> =
                concepts.iter().filter(|c| c.category == *category).collect();
            if members.is_empty() {
                return None;
            }
            let elements: Vec<SceneElement> = members
                .iter()
                .map(|c| element_for(c, 3.0 + c.importance * 5.0))
                .collect();
            let duration = elements.iter().map(|e| e.duration).sum();
            let lower = title.to_lowercase();
            Some(Scene {
                name: lower.replace(' ', "_"),
                category: SceneCategory::ConceptExplanation,
                description: format!("Explanation of {lower}"),
                elements,
                duration,
                narration: format!("Let's explore {lower} in detail."),
                transitions: Transitions::default(),
            })
        })
        .collect()
}

/// Shorten the fades between adjacent scenes whose element kinds intersect.
fn smooth_transitions(scenes: &mut [Scene]) {
    for i in 1..scenes.len() {
        let shared = {
            let prev: BTreeSet<&str> =
                scenes[i - 1].elements.iter().map(|e| e.kind.as_str()).collect();
            scenes[i].elements.iter().any(|e| prev.contains(e.kind.as_str()))
        };
        if shared {
            scenes[i - 1].transitions.fade_out = SHARED_FADE;
            scenes[i].transitions.fade_in = SHARED_FADE;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/scenes.rs"]
mod tests;
