//! The feedback state machine: EXTRACT, PLAN, MAP, then EMIT and CRITIQUE until every scene is
//! approved or the iteration cap is reached, REVISE in between.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::config::registry::Registry;
use crate::critic::rules::{Critic, SceneCritic};
use crate::emit::script::{CodeEmitter, persist};
use crate::external::concat::{FfmpegConcatenator, VideoConcatenator};
use crate::external::renderer::{ManimRenderer, SceneRenderer};
use crate::extract::concepts::{Concept, ConceptExtractor};
use crate::foundation::error::{EduvizError, EduvizResult};
use crate::pipeline::revise;
use crate::pipeline::snapshot::Snapshot;
use crate::plan::scenes::{Scene, ScenePlanner};
use crate::report::summary;
use crate::visual::mapper::VisualMapper;
use crate::visual::model::SceneVisual;

/// Per-run request.
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    /// Topic key; selects a template catalog or the generic plan.
    pub topic: String,
    /// Upper bound on EMIT/CRITIQUE passes; must be positive.
    pub max_iterations: usize,
    /// Where scripts, the report and renders go. Nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    /// Render approved scenes after the loop.
    pub render: bool,
    /// Deadline for each external tool invocation.
    pub tool_timeout: Duration,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            topic: "pca".to_string(),
            max_iterations: 3,
            output_dir: None,
            render: false,
            tool_timeout: Duration::from_secs(300),
        }
    }
}

impl PipelineOpts {
    /// Longest accepted per-tool deadline.
    pub const MAX_TOOL_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn validate(&self) -> EduvizResult<()> {
        if self.topic.trim().is_empty() {
            return Err(EduvizError::validation("topic must be non-empty"));
        }
        if self.max_iterations == 0 {
            return Err(EduvizError::validation("max_iterations must be positive"));
        }
        if self.render && self.output_dir.is_none() {
            return Err(EduvizError::validation("rendering requires an output directory"));
        }
        if self.tool_timeout.is_zero() {
            return Err(EduvizError::validation("tool timeout must be non-zero"));
        }
        if self.tool_timeout > Self::MAX_TOOL_TIMEOUT {
            return Err(EduvizError::validation(format!(
                "tool timeout must be at most {}s",
                Self::MAX_TOOL_TIMEOUT.as_secs()
            )));
        }
        Ok(())
    }
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every scene approved.
    Approved,
    /// Iteration cap reached without full approval.
    IterationExhausted,
}

impl Termination {
    pub fn as_str(self) -> &'static str {
        match self {
            Termination::Approved => "approved",
            Termination::IterationExhausted => "iteration_exhausted",
        }
    }
}

/// A partial failure absorbed by the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Degradation {
    ToolMissing { tool: String },
    RenderFailed { scene: String, reason: String },
    ConcatFailed { reason: String },
    WriteFailed { path: PathBuf, reason: String },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::ToolMissing { tool } => write!(f, "'{tool}' not available, step skipped"),
            Degradation::RenderFailed { scene, reason } => {
                write!(f, "render of '{scene}' dropped: {reason}")
            }
            Degradation::ConcatFailed { reason } => write!(f, "concatenation skipped: {reason}"),
            Degradation::WriteFailed { path, reason } => {
                write!(f, "could not write '{}': {reason}", path.display())
            }
        }
    }
}

/// Everything a run produced. The last snapshot is the result.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub topic: String,
    pub concepts: Vec<Concept>,
    pub scenes: Vec<Scene>,
    /// One snapshot per iteration run, oldest first.
    pub history: Vec<Snapshot>,
    pub pipeline_success: bool,
    pub termination: Termination,
    pub degradations: Vec<Degradation>,
    /// Scripts and report written, in write order.
    pub files: Vec<PathBuf>,
    /// Rendered scene videos, in scene order.
    pub videos: Vec<PathBuf>,
    /// Concatenation of `videos`, when produced.
    pub final_video: Option<PathBuf>,
}

impl RunOutcome {
    pub fn last(&self) -> Option<&Snapshot> {
        self.history.last()
    }

    /// Emitted script of the final iteration.
    pub fn script(&self) -> &str {
        self.last().map(|s| s.script.as_str()).unwrap_or_default()
    }

    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

/// Lowercase `[a-z0-9_]` form of a topic for file names.
pub fn file_stem(topic: &str) -> String {
    topic
        .trim()
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() { c } else { '_' }
        })
        .collect()
}

/// Script file name for a 1-based iteration.
pub fn script_file_name(topic: &str, iteration: usize) -> String {
    if iteration <= 1 {
        format!("{}_visualization.py", file_stem(topic))
    } else {
        format!("{}_visualization_v{iteration}.py", file_stem(topic))
    }
}

pub fn report_file_name(topic: &str) -> String {
    format!("{}_analysis_report.md", file_stem(topic))
}

/// Owns the run; collaborators are swappable for tests and alternative engines.
pub struct PipelineController<'r> {
    registry: &'r Registry,
    critic: Box<dyn SceneCritic + 'r>,
    renderer: Option<Box<dyn SceneRenderer + 'r>>,
    concatenator: Option<Box<dyn VideoConcatenator + 'r>>,
}

impl<'r> PipelineController<'r> {
    /// Controller with the rule-based critic and command-line render tools.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            critic: Box::new(Critic::new(registry)),
            renderer: None,
            concatenator: None,
        }
    }

    pub fn with_critic(mut self, critic: impl SceneCritic + 'r) -> Self {
        self.critic = Box::new(critic);
        self
    }

    pub fn with_renderer(mut self, renderer: impl SceneRenderer + 'r) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_concatenator(mut self, concatenator: impl VideoConcatenator + 'r) -> Self {
        self.concatenator = Some(Box::new(concatenator));
        self
    }

    /// Run the whole pipeline on `text`.
    ///
    /// Only an invalid request or an unusable output directory is an error; tool and write
    /// failures are recorded in [`RunOutcome::degradations`].
    #[tracing::instrument(skip_all, fields(topic = %opts.topic, iterations = opts.max_iterations))]
    pub fn run(&self, text: &str, opts: &PipelineOpts) -> EduvizResult<RunOutcome> {
        opts.validate()?;
        if let Some(dir) = &opts.output_dir {
            preflight(dir)?;
        }

        let concepts = ConceptExtractor::new(self.registry).parse(text);
        let scenes = ScenePlanner::new(self.registry).plan(&concepts, &opts.topic);
        if scenes.is_empty() {
            tracing::warn!("empty plan, nothing to visualize");
        }
        let mapper = VisualMapper::new(self.registry);
        let emitter = CodeEmitter::new(self.registry);

        let mut outcome = RunOutcome {
            topic: opts.topic.clone(),
            concepts,
            history: Vec::new(),
            pipeline_success: false,
            termination: Termination::IterationExhausted,
            degradations: Vec::new(),
            files: Vec::new(),
            videos: Vec::new(),
            final_video: None,
            scenes: Vec::new(),
        };

        let mut current = mapper.map(&scenes);
        outcome.scenes = scenes;

        for iteration in 1..=opts.max_iterations {
            let script = emitter.emit(&current);
            let script_path = opts.output_dir.as_deref().and_then(|dir| {
                let path = dir.join(script_file_name(&opts.topic, iteration));
                self.write(&script, path, &mut outcome)
            });

            let analyses = current
                .iter()
                .map(|scene| self.critic.analyze(scene, &script, &opts.topic))
                .collect::<Vec<_>>();
            for a in &analyses {
                tracing::info!(
                    iteration,
                    scene = %a.scene,
                    score = a.overall_score,
                    approval = a.approval.as_str(),
                    "critique"
                );
            }

            let snapshot = Snapshot::new(iteration, current, script, analyses, script_path);
            let approved = snapshot.all_approved();
            let next = (!approved && iteration < opts.max_iterations)
                .then(|| revised_scenes(&snapshot, &mapper));
            outcome.history.push(snapshot);

            if approved {
                outcome.termination = Termination::Approved;
                break;
            }
            match next {
                Some(scenes) => current = scenes,
                None => break,
            }
        }
        outcome.pipeline_success = outcome.termination == Termination::Approved;

        if opts.render {
            if let Some(dir) = &opts.output_dir {
                self.render_approved(dir, opts, &mut outcome);
            }
        }

        if let Some(dir) = &opts.output_dir {
            let path = dir.join(report_file_name(&opts.topic));
            outcome.files.push(path.clone());
            let report = summary::render(&outcome);
            if self.write(&report, path, &mut outcome).is_none() {
                outcome.files.pop();
            }
        }

        tracing::info!(
            success = outcome.pipeline_success,
            iterations = outcome.iterations(),
            termination = outcome.termination.as_str(),
            degradations = outcome.degradations.len(),
            "pipeline finished"
        );
        Ok(outcome)
    }

    fn write(&self, text: &str, path: PathBuf, outcome: &mut RunOutcome) -> Option<PathBuf> {
        match persist(text, &path) {
            Ok(()) => {
                if !outcome.files.contains(&path) {
                    outcome.files.push(path.clone());
                }
                Some(path)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "write failed");
                outcome.degradations.push(Degradation::WriteFailed {
                    path,
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    /// Best-effort render of approved scenes from the final script, then concatenation.
    fn render_approved(&self, dir: &Path, opts: &PipelineOpts, outcome: &mut RunOutcome) {
        let default_renderer;
        let renderer: &dyn SceneRenderer = match &self.renderer {
            Some(r) => r.as_ref(),
            None => {
                default_renderer = ManimRenderer::new(opts.tool_timeout);
                &default_renderer
            }
        };
        if !renderer.is_available() {
            tracing::warn!(tool = renderer.name(), "renderer not available, skipping render");
            outcome.degradations.push(Degradation::ToolMissing {
                tool: renderer.name().to_string(),
            });
            return;
        }

        let Some(last) = outcome.history.last() else {
            return;
        };
        let Some(script) = last.script_path.clone() else {
            return;
        };
        let approved: Vec<(String, String)> = last
            .scored_scenes()
            .filter(|(_, a)| a.is_approved())
            .map(|(s, _)| (s.name.clone(), s.class_name()))
            .collect();

        let media = dir.join("media");
        for (scene, class) in approved {
            match renderer.render(&script, &class, &media) {
                Ok(video) => outcome.videos.push(video),
                Err(e) => {
                    tracing::warn!(scene = %scene, error = %e, "render dropped");
                    outcome.degradations.push(Degradation::RenderFailed {
                        scene,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if outcome.videos.is_empty() {
            return;
        }

        let default_concat;
        let concat: &dyn VideoConcatenator = match &self.concatenator {
            Some(c) => c.as_ref(),
            None => {
                default_concat = FfmpegConcatenator::new(opts.tool_timeout);
                &default_concat
            }
        };
        if !concat.is_available() {
            tracing::warn!(tool = concat.name(), "concatenator not available");
            outcome.degradations.push(Degradation::ToolMissing {
                tool: concat.name().to_string(),
            });
            return;
        }

        let out = dir.join(format!("{}_full.mp4", file_stem(&opts.topic)));
        match concat.concat(&outcome.videos, &out) {
            Ok(video) => outcome.final_video = Some(video),
            Err(e) => {
                tracing::warn!(error = %e, "concatenation failed");
                outcome.degradations.push(Degradation::ConcatFailed {
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Clone the snapshot's scenes and apply each unapproved scene's actions.
fn revised_scenes(snapshot: &Snapshot, mapper: &VisualMapper<'_>) -> Vec<SceneVisual> {
    snapshot
        .scored_scenes()
        .map(|(scene, analysis)| {
            let mut scene = scene.clone();
            if !analysis.is_approved() {
                revise::apply(&mut scene, &analysis.actions(), mapper);
            }
            scene
        })
        .collect()
}

/// Create the output directory and prove it is writable before any stage runs.
fn preflight(dir: &Path) -> EduvizResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        EduvizError::io(format!("cannot create output directory '{}': {e}", dir.display()))
    })?;
    let probe = dir.join(".eduviz_probe");
    std::fs::write(&probe, b"").map_err(|e| {
        EduvizError::io(format!("output directory '{}' is not writable: {e}", dir.display()))
    })?;
    let _ = std::fs::remove_file(&probe);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/controller.rs"]
mod tests;
