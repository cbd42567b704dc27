use std::{
    path::{Path, PathBuf},
    process::Command,
    time::Duration,
};

use crate::external::process::{is_available_within, run_with_timeout};
use crate::foundation::error::{EduvizError, EduvizResult};

/// Renders one scene class of an emitted script into a video file.
pub trait SceneRenderer {
    /// Tool name used in logs and degradations.
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Render `class` from `script` below `out_dir`, returning the produced video.
    fn render(&self, script: &Path, class: &str, out_dir: &Path) -> EduvizResult<PathBuf>;
}

/// Low-quality preview render through the `manim` command line.
#[derive(Clone, Debug)]
pub struct ManimRenderer {
    program: String,
    timeout: Duration,
}

impl ManimRenderer {
    /// Quality directory manim uses for `-ql`.
    pub const QUALITY_DIR: &'static str = "480p15";

    pub fn new(timeout: Duration) -> Self {
        Self::with_program("manim", timeout)
    }

    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Where manim places the video for `class` rendered from `script`.
    pub fn expected_video(script: &Path, class: &str, out_dir: &Path) -> PathBuf {
        let stem = script
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        out_dir
            .join("videos")
            .join(stem)
            .join(Self::QUALITY_DIR)
            .join(format!("{class}.mp4"))
    }
}

impl SceneRenderer for ManimRenderer {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        is_available_within(&self.program, "--version", self.timeout)
    }

    #[tracing::instrument(skip(self, script, out_dir))]
    fn render(&self, script: &Path, class: &str, out_dir: &Path) -> EduvizResult<PathBuf> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-ql")
            .arg("--media_dir")
            .arg(out_dir)
            .arg(script)
            .arg(class);
        run_with_timeout(&mut cmd, &self.program, self.timeout)?;

        let video = Self::expected_video(script, class, out_dir);
        if !video.exists() {
            return Err(EduvizError::tool_failed(
                &self.program,
                format!("expected video '{}' was not produced", video.display()),
            ));
        }
        tracing::info!(video = %video.display(), "scene rendered");
        Ok(video)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/external/renderer.rs"]
mod tests;
