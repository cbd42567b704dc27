use std::{
    path::{Path, PathBuf},
    process::Command,
    time::Duration,
};

use anyhow::Context as _;

use crate::external::process::{is_available_within, run_with_timeout};
use crate::foundation::error::{EduvizError, EduvizResult};

/// Joins rendered clips, in order, into one video.
pub trait VideoConcatenator {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    fn concat(&self, videos: &[PathBuf], out: &Path) -> EduvizResult<PathBuf>;
}

/// Stream-copy concatenation through the ffmpeg concat demuxer.
#[derive(Clone, Debug)]
pub struct FfmpegConcatenator {
    program: String,
    timeout: Duration,
}

impl FfmpegConcatenator {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("ffmpeg", timeout)
    }

    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

/// Concat-demuxer list body, one quoted `file` line per clip.
///
/// The demuxer resolves relative entries against the list file's directory, so every
/// clip is written as an absolute path.
pub fn concat_list(videos: &[PathBuf]) -> String {
    videos
        .iter()
        .map(|v| {
            let abs = std::path::absolute(v).unwrap_or_else(|_| v.clone());
            let quoted = abs.display().to_string().replace('\'', "'\\''");
            format!("file '{quoted}'\n")
        })
        .collect()
}

impl VideoConcatenator for FfmpegConcatenator {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        is_available_within(&self.program, "-version", self.timeout)
    }

    #[tracing::instrument(skip_all, fields(clips = videos.len()))]
    fn concat(&self, videos: &[PathBuf], out: &Path) -> EduvizResult<PathBuf> {
        if videos.is_empty() {
            return Err(EduvizError::validation("nothing to concatenate"));
        }

        let list = out.with_extension("txt");
        std::fs::write(&list, concat_list(videos))
            .with_context(|| format!("write concat list '{}'", list.display()))?;

        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-loglevel", "error", "-f", "concat", "-safe", "0", "-i"])
            .arg(&list)
            .args(["-c", "copy"])
            .arg(out);
        let result = run_with_timeout(&mut cmd, &self.program, self.timeout);
        let _ = std::fs::remove_file(&list);
        result?;

        if !out.exists() {
            return Err(EduvizError::tool_failed(
                &self.program,
                format!("expected video '{}' was not produced", out.display()),
            ));
        }
        Ok(out.to_path_buf())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/external/concat.rs"]
mod tests;
