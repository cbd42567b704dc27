//! Deterministic text templating from [`SceneVisual`] records to a Manim (`ThreeDScene`) script.
//!
//! Each scene becomes one class whose `construct` body has a fixed internal order:
//! view setup, data setup, one snippet per visual element, the animation sequence, optional
//! camera moves, and a final hold sized to the scene duration.

use std::path::Path;

use anyhow::Context as _;

use crate::config::registry::{AnimationEffect, Registry};
use crate::foundation::core::Vec3;
use crate::foundation::error::EduvizResult;
use crate::visual::model::{CameraMovement, SceneVisual, VisualElement, VisualType};

const INDENT: &str = "        ";

/// Serializes visual scenes into an executable animation script.
pub struct CodeEmitter<'r> {
    registry: &'r Registry,
}

impl<'r> CodeEmitter<'r> {
    /// Emitter using the registry's color table, animation library and sample spec.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Emit the complete script: header, one class per scene, trailing scene list.
    #[tracing::instrument(skip_all, fields(scenes = scenes.len()))]
    pub fn emit(&self, scenes: &[SceneVisual]) -> String {
        let mut out = String::new();
        out.push_str("#!/usr/bin/env python3\n");
        out.push_str("\"\"\"\nGenerated animation script\n\"\"\"\n\n");
        out.push_str("from manim import *\n");
        out.push_str("import numpy as np\n");
        out.push_str("from sklearn.decomposition import PCA\n\n\n");

        for scene in scenes {
            out.push_str(&self.emit_scene(scene));
            out.push_str("\n\n");
        }

        out.push_str(&scene_index(scenes));
        tracing::debug!(bytes = out.len(), "emitted script");
        out
    }

    /// Emit and write the script to `path`, creating parent directories.
    pub fn emit_to(&self, scenes: &[SceneVisual], path: &Path) -> EduvizResult<String> {
        let script = self.emit(scenes);
        persist(&script, path)?;
        Ok(script)
    }

    /// One scene class.
    pub fn emit_scene(&self, scene: &SceneVisual) -> String {
        let mut code = format!("class {}(ThreeDScene):\n", scene.class_name());
        code.push_str(&format!("    \"\"\"Scene: {}\"\"\"\n\n", scene.name));
        code.push_str("    def construct(self):\n");

        code.push_str(&format!("{INDENT}# Set up 3D scene\n"));
        code.push_str(&format!(
            "{INDENT}self.set_camera_orientation(phi=60 * DEGREES, theta=45 * DEGREES)\n"
        ));
        code.push_str(&format!(
            "{INDENT}self.camera.background_color = {}\n\n",
            self.color(&scene.background_color)
        ));

        code.push_str(&self.data_setup());

        for element in &scene.elements {
            code.push_str(&self.element_snippet(element));
        }

        code.push_str(&self.animation_sequence(&scene.elements));

        if !scene.camera_movements.is_empty() {
            code.push_str(&camera_moves(&scene.camera_movements));
        }

        code.push_str(&format!("{INDENT}# Hold for narration\n"));
        code.push_str(&format!("{INDENT}self.wait({})\n", secs(scene.duration)));
        code
    }

    fn data_setup(&self) -> String {
        let s = &self.registry.sample;
        let cov = s
            .covariance
            .iter()
            .map(|row| format!("[{}]", row.map(py_num).join(", ")))
            .collect::<Vec<_>>()
            .join(", ");
        let mut code = format!("{INDENT}# Generate sample data\n");
        code.push_str(&format!("{INDENT}rng = np.random.RandomState({})\n", s.seed));
        code.push_str(&format!("{INDENT}n_samples = {}\n", s.count));
        code.push_str(&format!("{INDENT}mean = [{}]\n", s.mean.map(py_num).join(", ")));
        code.push_str(&format!("{INDENT}cov = [{cov}]\n"));
        code.push_str(&format!(
            "{INDENT}self.data_3d = rng.multivariate_normal(mean, cov, n_samples)\n"
        ));
        code.push_str(&format!("{INDENT}self.pca = PCA(n_components=3)\n"));
        code.push_str(&format!("{INDENT}self.pca.fit(self.data_3d)\n"));
        code.push_str(&format!("{INDENT}self.components = self.pca.components_\n"));
        code.push_str(&format!(
            "{INDENT}self.explained_variance = self.pca.explained_variance_\n\n"
        ));
        code
    }

    fn element_snippet(&self, e: &VisualElement) -> String {
        let id = &e.id;
        let color = self.color(e.color().unwrap_or(self.registry.palette.neutral.as_str()));
        let mut lines = vec![format!("# {id}")];

        match e.visual_type {
            VisualType::Point if e.flag("collection") => {
                let size = py_num(e.num("size", 0.1));
                lines.push(format!(
                    "{id} = VGroup(*[Sphere(radius={size}).move_to([p[0], p[1], {z:.2}]) {}])",
                    "for p in self.data_3d",
                    z = e.position.z
                ));
                lines.push(format!("{id}.set_color({color})"));
                lines.push(format!("{id}.set_opacity({})", py_num(e.num("opacity", 1.0))));
            }
            VisualType::Point => {
                lines.push(format!(
                    "{id} = Sphere(radius={}).move_to({})",
                    py_num(e.num("size", 0.1)),
                    point(e.position)
                ));
                lines.push(format!("{id}.set_color({color})"));
                lines.push(format!("{id}.set_opacity({})", py_num(e.num("opacity", 1.0))));
            }
            VisualType::Arrow => {
                let end = direction(e).scale(e.num("length", 2.0));
                let end = Vec3::new(
                    e.position.x + end.x,
                    e.position.y + end.y,
                    e.position.z + end.z,
                );
                lines.push(format!("{id} = Arrow3D("));
                lines.push(format!("    start={},", point(e.position)));
                lines.push(format!("    end={},", point(end)));
                lines.push(format!("    color={color},"));
                lines.push(format!("    thickness={}", py_num(e.num("thickness", 0.05))));
                lines.push(")".to_string());
            }
            VisualType::AxisSet => {
                let half = direction(e).scale(e.num("length", 3.0));
                lines.push(format!("{id} = Line3D("));
                lines.push(format!("    start={},", point(half.scale(-1.0))));
                lines.push(format!("    end={},", point(half)));
                lines.push(format!("    color={color},"));
                lines.push(format!("    thickness={}", py_num(e.num("thickness", 0.02))));
                lines.push(")".to_string());
            }
            VisualType::Line => {
                let count = self.registry.sample.count.max(1);
                let idx = e.num("sample_index", 0.0).max(0.0) as usize % count;
                lines.push(format!("{id} = Line3D("));
                lines.push(format!("    start=self.data_3d[{idx}],"));
                lines.push(format!(
                    "    end=[self.data_3d[{idx}][0], self.data_3d[{idx}][1], -1.00],"
                ));
                lines.push(format!("    color={color},"));
                lines.push(format!("    thickness={}", py_num(e.num("thickness", 0.02))));
                lines.push(")".to_string());
                lines.push(format!("{id}.set_opacity({})", py_num(e.num("opacity", 0.5))));
            }
            VisualType::Surface => {
                lines.push(format!(
                    "{id} = Rectangle(width={}, height={})",
                    py_num(e.num("width", 4.0)),
                    py_num(e.num("height", 3.0))
                ));
                lines.push(format!(
                    "{id}.set_fill({color}, opacity={})",
                    py_num(e.num("opacity", 0.3))
                ));
                lines.push(format!("{id}.set_stroke({color}, width=2)"));
                lines.push(format!("{id}.move_to({})", point(e.position)));
            }
            VisualType::Ellipse => {
                lines.push(format!(
                    "{id} = Ellipse(width={}, height={})",
                    py_num(e.num("width", 2.0)),
                    py_num(e.num("height", 1.0))
                ));
                lines.push(format!(
                    "{id}.set_fill({color}, opacity={})",
                    py_num(e.num("opacity", 0.3))
                ));
                lines.push(format!("{id}.set_stroke({color}, width=2)"));
                lines.push(format!("{id}.rotate({} * DEGREES)", py_num(e.num("rotation", 0.0))));
                lines.push(format!("{id}.move_to({})", point(e.position)));
            }
            VisualType::Text => {
                let text = e.props.get("text").and_then(|v| v.as_str()).unwrap_or("Text");
                lines.push(format!(
                    "{id} = Text({}, font_size={})",
                    py_str(text),
                    py_num(e.num("size", 0.5) * 48.0)
                ));
                lines.push(format!("{id}.set_color({color})"));
                lines.push(format!("{id}.move_to({})", point(e.position)));
            }
        }

        let mut code: String = lines.iter().map(|l| format!("{INDENT}{l}\n")).collect();
        code.push('\n');
        code
    }

    /// Group events sharing an identical delay into one `self.play` batch.
    ///
    /// Batches are ordered by ascending delay; statements within a batch follow element order.
    fn animation_sequence(&self, elements: &[VisualElement]) -> String {
        let mut batches: Vec<(f64, Vec<(&str, &str, f64)>)> = Vec::new();
        for e in elements {
            for ev in &e.events {
                let entry = (e.id.as_str(), ev.kind.as_str(), ev.duration);
                match batches.iter_mut().find(|(d, _)| *d == ev.delay) {
                    Some((_, batch)) => batch.push(entry),
                    None => batches.push((ev.delay, vec![entry])),
                }
            }
        }
        batches.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut code = format!("{INDENT}# Animation sequence\n");
        let mut clock = 0.0;
        for (i, (delay, batch)) in batches.iter().enumerate() {
            let gap = delay - clock;
            if i > 0 && gap > 0.0 {
                code.push_str(&format!("{INDENT}self.wait({})\n", secs(gap)));
            }
            clock = *delay;

            code.push_str(&format!("{INDENT}self.play(\n"));
            for (id, kind, _) in batch {
                code.push_str(&format!("{INDENT}    {},\n", self.play_statement(id, kind)));
            }
            let run_time = batch.last().map(|(_, _, d)| *d).unwrap_or(1.0);
            code.push_str(&format!("{INDENT}    run_time={}\n", secs(run_time)));
            code.push_str(&format!("{INDENT})\n"));
        }
        code.push('\n');
        code
    }

    fn play_statement(&self, id: &str, kind: &str) -> String {
        let effect = self
            .registry
            .animations
            .get(kind)
            .map(|spec| spec.effect)
            .unwrap_or(AnimationEffect::FadeIn);
        match effect {
            AnimationEffect::FadeIn => format!("FadeIn({id})"),
            AnimationEffect::FadeOut => format!("FadeOut({id})"),
            AnimationEffect::Grow => format!("GrowFromPoint({id}, ORIGIN)"),
            AnimationEffect::Scale { to } => format!("{id}.animate.scale({})", py_num(to)),
            AnimationEffect::Morph => format!("Transform({id}, {id}.copy())"),
            AnimationEffect::Projection => format!("FadeIn({id}, shift=IN)"),
            AnimationEffect::Rotation { degrees } => {
                format!("Rotate({id}, angle={} * DEGREES)", py_num(degrees))
            }
        }
    }

    /// Named constant for mapped hex colors; anything else is passed through quoted.
    fn color(&self, value: &str) -> String {
        match self.registry.color_name(value) {
            Some(name) => name.to_string(),
            None => py_str(value),
        }
    }
}

fn camera_moves(moves: &[CameraMovement]) -> String {
    let mut code = format!("{INDENT}# Camera movements\n");
    for m in moves {
        let rate = match m.easing.as_str() {
            "ease_in_out" => "smooth",
            "ease_in" => "rush_into",
            "ease_out" => "rush_from",
            _ => "linear",
        };
        code.push_str(&format!(
            "{INDENT}self.move_camera(frame_center={}, run_time={}, rate_func={rate})\n",
            point(m.end),
            secs(m.duration)
        ));
    }
    code.push('\n');
    code
}

fn scene_index(scenes: &[SceneVisual]) -> String {
    let classes = scenes
        .iter()
        .map(SceneVisual::class_name)
        .collect::<Vec<_>>()
        .join(", ");
    let mut code = String::from("if __name__ == \"__main__\":\n");
    code.push_str("    # Render one scene with: manim -pql <this file> <SceneName>\n");
    code.push_str(&format!("    scenes = [{classes}]\n"));
    code.push_str("    print(\"Available scenes:\")\n");
    code.push_str("    for i, scene in enumerate(scenes):\n");
    code.push_str("        print(f\"{i + 1}. {scene.__name__}\")\n");
    code
}

/// Write a script to disk, creating parent directories.
pub fn persist(script: &str, path: &Path) -> EduvizResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    std::fs::write(path, script).with_context(|| format!("write script '{}'", path.display()))?;
    Ok(())
}

fn direction(e: &VisualElement) -> Vec3 {
    e.props
        .get("direction")
        .and_then(|v| v.as_vec3())
        .unwrap_or(Vec3::new(1.0, 0.0, 0.0))
}

/// Position literal with two decimals.
fn point(p: Vec3) -> String {
    format!("[{:.2}, {:.2}, {:.2}]", p.x, p.y, p.z)
}

/// Python-style number literal: integral values keep a trailing `.0`.
pub(crate) fn py_num(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Durations are rounded to milliseconds so accumulated float noise never reaches the script.
fn secs(v: f64) -> String {
    py_num((v * 1000.0).round() / 1000.0)
}

fn py_str(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
#[path = "../../tests/unit/emit/script.rs"]
mod tests;
