use crate::config::registry::{Palette, Registry};
use crate::foundation::core::{PropValue, Props, Vec3};
use crate::plan::scenes::{Scene, SceneElement};
use crate::visual::model::{
    AnimationEvent, CameraMovement, SceneVisual, VisualElement, VisualType, title_case,
};
use crate::visual::sampler::sample_points;

/// Stagger between consecutive data points, in seconds.
pub const POINT_STAGGER: f64 = 0.05;
/// Stagger between consecutive projection lines, in seconds.
pub const LINE_STAGGER: f64 = 0.1;
/// Stagger between consecutive coordinate axes, in seconds.
pub const AXIS_STAGGER: f64 = 0.3;
/// Number of projection lines drawn under the plane.
pub const PROJECTION_LINES: usize = 20;
/// Endpoints of the two camera moves every scene gets.
pub const CAMERA_ENDPOINTS: [Vec3; 2] = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];

/// Expands scene elements into concrete visual elements via per-kind generators.
pub struct VisualMapper<'r> {
    registry: &'r Registry,
    sample: Vec<Vec3>,
}

impl<'r> VisualMapper<'r> {
    /// Mapper over the registry palette and sample.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            sample: sample_points(&registry.sample),
        }
    }

    fn palette(&self) -> &Palette {
        &self.registry.palette
    }

    /// Map every scene, preserving scene order.
    #[tracing::instrument(skip_all, fields(scenes = scenes.len()))]
    pub fn map(&self, scenes: &[Scene]) -> Vec<SceneVisual> {
        let visuals: Vec<SceneVisual> = scenes.iter().map(|s| self.map_scene(s)).collect();
        tracing::info!(
            elements = visuals.iter().map(|v| v.elements.len()).sum::<usize>(),
            "mapped scenes to visuals"
        );
        visuals
    }

    /// Map one scene.
    pub fn map_scene(&self, scene: &Scene) -> SceneVisual {
        let elements = scene
            .elements
            .iter()
            .flat_map(|e| self.map_element(e))
            .collect();

        SceneVisual {
            name: scene.name.clone(),
            duration: scene.duration,
            elements,
            camera_movements: camera_movements(),
            narration: scene.narration.clone(),
            background_color: self.palette().background.clone(),
            labelled: false,
        }
    }

    /// Route one scene element to its generator and merge the element's hints.
    pub fn map_element(&self, element: &SceneElement) -> Vec<VisualElement> {
        let mut visuals = match element.kind.as_str() {
            "data_points" => self.points("data_point"),
            "scatter_plot" => self.points("scatter_point"),
            "principal_component" => self.principal_directions(),
            "variance" => vec![self.variance_ellipse()],
            "projection" => self.projection(),
            "shadow" => vec![self.shadow()],
            "axis" | "axes" => self.axes(),
            other => vec![self.text(
                &format!("generic_{other}"),
                &title_case(other),
                Vec3::ZERO,
                0.5,
            )],
        };
        for v in &mut visuals {
            merge_hints(&mut v.props, &element.props);
        }
        visuals
    }

    /// Title label for a scene, produced when a revision asks for labels.
    pub fn label_for(&self, scene: &SceneVisual) -> VisualElement {
        self.text("scene_label", &title_case(&scene.name), Vec3::new(0.0, 3.5, 0.0), 0.6)
    }

    fn points(&self, prefix: &str) -> Vec<VisualElement> {
        self.sample
            .iter()
            .enumerate()
            .map(|(i, p)| VisualElement {
                id: format!("{prefix}_{i}"),
                visual_type: VisualType::Point,
                position: *p,
                props: props([
                    ("color", self.palette().neutral.as_str().into()),
                    ("size", PropValue::Num(0.1)),
                    ("opacity", PropValue::Num(0.8)),
                ]),
                events: vec![AnimationEvent::new("fade_in", i as f64 * POINT_STAGGER, 0.5)],
                depends_on: Vec::new(),
            })
            .collect()
    }

    fn principal_directions(&self) -> Vec<VisualElement> {
        let p = self.palette();
        // (id, color, direction, thickness, length, delay, depends on)
        [
            ("pc1_arrow", &p.primary, Vec3::new(2.0, 1.5, 0.5), 0.05, 3.0, 1.0, "data_points"),
            ("pc2_arrow", &p.secondary, Vec3::new(-1.0, 1.0, 0.2), 0.04, 2.0, 2.5, "pc1_arrow"),
        ]
        .into_iter()
        .map(|(id, color, dir, thickness, length, delay, dep)| VisualElement {
            id: id.to_string(),
            visual_type: VisualType::Arrow,
            position: Vec3::ZERO,
            props: props([
                ("color", color.as_str().into()),
                ("direction", dir.into()),
                ("thickness", PropValue::Num(thickness)),
                ("length", PropValue::Num(length)),
            ]),
            events: vec![AnimationEvent::new("grow_arrow", delay, 1.5)],
            depends_on: vec![dep.to_string()],
        })
        .collect()
    }

    fn variance_ellipse(&self) -> VisualElement {
        VisualElement {
            id: "variance_ellipse".to_string(),
            visual_type: VisualType::Ellipse,
            position: Vec3::ZERO,
            props: props([
                ("color", self.palette().accent.as_str().into()),
                ("opacity", PropValue::Num(0.3)),
                ("width", PropValue::Num(4.0)),
                ("height", PropValue::Num(2.0)),
                ("rotation", PropValue::Num(30.0)),
            ]),
            events: vec![
                AnimationEvent::new("fade_in", 0.5, 1.0),
                AnimationEvent::new("pulse", 2.0, 2.0),
            ],
            depends_on: vec!["data_points".to_string()],
        }
    }

    fn projection(&self) -> Vec<VisualElement> {
        let plane = VisualElement {
            id: "projection_plane".to_string(),
            visual_type: VisualType::Surface,
            position: Vec3::new(0.0, 0.0, -1.0),
            props: props([
                ("color", self.palette().warning.as_str().into()),
                ("opacity", PropValue::Num(0.2)),
                ("width", PropValue::Num(6.0)),
                ("height", PropValue::Num(4.0)),
            ]),
            events: vec![AnimationEvent::new("fade_in", 0.0, 1.0)],
            depends_on: Vec::new(),
        };

        let lines = (0..PROJECTION_LINES).map(|i| VisualElement {
            id: format!("projection_line_{i}"),
            visual_type: VisualType::Line,
            position: Vec3::ZERO,
            props: props([
                ("color", self.palette().neutral.as_str().into()),
                ("opacity", PropValue::Num(0.5)),
                ("thickness", PropValue::Num(0.01)),
                ("sample_index", (i as f64).into()),
            ]),
            events: vec![AnimationEvent::new("fade_in", 1.0 + i as f64 * LINE_STAGGER, 0.5)],
            depends_on: vec!["data_points".to_string(), "projection_plane".to_string()],
        });

        std::iter::once(plane).chain(lines).collect()
    }

    fn shadow(&self) -> VisualElement {
        VisualElement {
            id: "shadow_points".to_string(),
            visual_type: VisualType::Point,
            position: Vec3::new(0.0, 0.0, -1.0),
            props: props([
                ("color", self.palette().neutral.as_str().into()),
                ("opacity", PropValue::Num(0.6)),
                ("size", PropValue::Num(0.08)),
                ("collection", true.into()),
            ]),
            events: vec![AnimationEvent::new("cast_shadow", 2.0, 1.5)],
            depends_on: vec!["data_points".to_string(), "projection_plane".to_string()],
        }
    }

    fn axes(&self) -> Vec<VisualElement> {
        let p = self.palette();
        [
            ("x_axis", p.primary.as_str(), Vec3::new(1.0, 0.0, 0.0)),
            ("y_axis", p.success.as_str(), Vec3::new(0.0, 1.0, 0.0)),
            ("z_axis", p.secondary.as_str(), Vec3::new(0.0, 0.0, 1.0)),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, color, dir))| VisualElement {
            id: id.to_string(),
            visual_type: VisualType::AxisSet,
            position: Vec3::ZERO,
            props: props([
                ("color", color.into()),
                ("direction", dir.into()),
                ("thickness", PropValue::Num(0.02)),
                ("length", PropValue::Num(3.0)),
            ]),
            events: vec![AnimationEvent::new("fade_in", i as f64 * AXIS_STAGGER, 0.5)],
            depends_on: Vec::new(),
        })
        .collect()
    }

    fn text(&self, id: &str, text: &str, position: Vec3, size: f64) -> VisualElement {
        VisualElement {
            id: id.to_string(),
            visual_type: VisualType::Text,
            position,
            props: props([
                ("text", text.into()),
                ("color", self.palette().text.as_str().into()),
                ("size", size.into()),
            ]),
            events: vec![AnimationEvent::new("fade_in", 0.0, 1.0)],
            depends_on: Vec::new(),
        }
    }
}

/// Scene-agnostic camera plan: two moves from the origin toward fixed endpoints.
fn camera_movements() -> Vec<CameraMovement> {
    CAMERA_ENDPOINTS
        .iter()
        .map(|end| CameraMovement {
            start: Vec3::ZERO,
            end: *end,
            duration: end.norm(),
            easing: "linear".to_string(),
        })
        .collect()
}

/// Generator defaults win; hints only fill keys the generator left unset.
fn merge_hints(dst: &mut Props, hints: &Props) {
    for (k, v) in hints {
        dst.entry(k.clone()).or_insert_with(|| v.clone());
    }
}

fn props<const N: usize>(pairs: [(&str, PropValue); N]) -> Props {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/visual/mapper.rs"]
mod tests;
