//! Pipeline failures and exit-code propagation.
//!
//! The CLI exits with the first failing stage's own exit code, so errors
//! raised around child processes carry the child's code with them.

use thiserror::Error;

/// A failure that aborts the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input was missing before a stage started.
    #[error("{0}")]
    Precondition(String),
    /// The Go toolchain returned non-zero for one matrix target.
    #[error("go build for {platform_key} failed with exit code: {code:?}")]
    Toolchain {
        /// Catalog key of the target that failed
        platform_key: String,
        /// Child exit code, `None` when killed by a signal
        code: Option<i32>,
    },
    /// An external command returned non-zero.
    #[error("`{program}` failed with exit code: {code:?}")]
    CommandFailed {
        /// Program that was invoked
        program: String,
        /// Child exit code, `None` when killed by a signal
        code: Option<i32>,
    },
    /// Publishing cannot authenticate against the registry.
    #[error("{0}")]
    Auth(String),
}

impl PipelineError {
    /// Exit code the `ndist` process should terminate with.
    ///
    /// Child process codes propagate unchanged; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Toolchain { code, .. } | Self::CommandFailed { code, .. } => code.unwrap_or(1),
            Self::Precondition(_) | Self::Auth(_) => 1,
        }
    }
}

/// Exit code for a pipeline failure, walking the error chain for a
/// [`PipelineError`] whose child exit code should be propagated.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PipelineError>())
        .map_or(1, PipelineError::exit_code)
}
