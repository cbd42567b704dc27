/// Convenience result type used across eduviz.
pub type EduvizResult<T> = Result<T, EduvizError>;

/// Top-level error taxonomy.
///
/// Only request validation and the output-directory pre-flight abort a run. Everything raised
/// by an external tool is absorbed by the pipeline controller and surfaced as a degradation.
#[derive(thiserror::Error, Debug)]
pub enum EduvizError {
    /// Invalid user-provided request or registry data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem failure (unreadable/unwritable output directory, failed write).
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// An external tool could not be discovered on `PATH`.
    #[error("external tool '{tool}' is not available")]
    ToolMissing {
        /// Program name that was probed.
        tool: String,
    },

    /// An external tool did not finish before its deadline and was killed.
    #[error("external tool '{tool}' timed out after {secs}s")]
    ToolTimeout {
        /// Program name that was invoked.
        tool: String,
        /// Timeout that elapsed, in whole seconds.
        secs: u64,
    },

    /// An external tool exited unsuccessfully or produced no artifact.
    #[error("external tool '{tool}' failed: {detail}")]
    ToolFailed {
        /// Program name that was invoked.
        tool: String,
        /// Exit status and trimmed stderr, or a description of the missing artifact.
        detail: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EduvizError {
    /// Build a [`EduvizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EduvizError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`EduvizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`EduvizError::ToolMissing`] value.
    pub fn tool_missing(tool: impl Into<String>) -> Self {
        Self::ToolMissing { tool: tool.into() }
    }

    /// Build a [`EduvizError::ToolTimeout`] value.
    pub fn tool_timeout(tool: impl Into<String>, secs: u64) -> Self {
        Self::ToolTimeout {
            tool: tool.into(),
            secs,
        }
    }

    /// Build a [`EduvizError::ToolFailed`] value.
    pub fn tool_failed(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
