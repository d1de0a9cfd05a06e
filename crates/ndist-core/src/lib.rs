//! Core library for ndist.
//!
//! Implements the whole distribution pipeline: wiping and rebuilding the
//! output tree, bundling frontend assets, cross-compiling the Go binary
//! for every catalog platform, generating the per-platform npm packages
//! and the launcher-carrying main package, and publishing the result.
//!
//! The pipeline is strictly sequential. Every external tool (`go`,
//! `pnpm`, `npm`) is run as a blocking child process through
//! [`process::ExecSpec`], and the first failure aborts the run.

pub mod assemble;
pub mod assets;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod matrix;
pub mod package;
pub mod process;
pub mod publish;

// Re-exports
pub use error::{PipelineError, exit_code};
pub use layout::DistLayout;
pub use process::ExecSpec;
