//! Blocking child-process invocation.
//!
//! Every external tool the pipeline touches goes through [`ExecSpec`]: a
//! structured program + argument list + optional working directory +
//! per-invocation environment overlay. The overlay is applied to the
//! spawned process only; the parent environment is never mutated, so
//! matrix iterations stay independent of each other.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use crate::error::PipelineError;

/// A single external command invocation.
#[derive(Debug, Clone)]
pub struct ExecSpec {
    program: String,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(String, OsString)>,
}

impl ExecSpec {
    /// Start describing an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run with `dir` as the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Overlay one environment variable onto the spawned process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The invocation as a printable command line.
    pub fn render(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn command(&self) -> Command {
        // npm and pnpm ship as .cmd shims on Windows, which CreateProcess
        // cannot launch directly; cmd /C handles every program uniformly.
        #[cfg(windows)]
        let mut cmd = {
            let mut shell = Command::new("cmd");
            shell.arg("/C").arg(&self.program);
            shell
        };
        #[cfg(not(windows))]
        let mut cmd = Command::new(&self.program);

        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Spawn, stream stdio to the terminal, and wait for the exit status.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be spawned at all. A non-zero exit
    /// is reported through the returned status, not as an error.
    pub fn status(&self) -> Result<ExitStatus> {
        tracing::debug!(command = %self.render(), "spawning");
        self.command()
            .status()
            .with_context(|| format!("failed to run `{}`", self.render()))
    }

    /// Like [`status`](Self::status), but a non-zero exit becomes a
    /// [`PipelineError::CommandFailed`] carrying the child's exit code.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be spawned or exits non-zero.
    pub fn run(&self) -> Result<()> {
        let status = self.status()?;
        if !status.success() {
            return Err(PipelineError::CommandFailed {
                program: self.program.clone(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_program_and_args() {
        let spec = ExecSpec::new("npm").args(["publish", "--access", "public"]);
        assert_eq!(spec.render(), "npm publish --access public");
    }

    #[cfg(unix)]
    mod unix {
        use crate::error::exit_code;

        use super::*;

        #[test]
        fn status_reports_the_child_exit_code() {
            let status = ExecSpec::new("sh").args(["-c", "exit 3"]).status().unwrap();
            assert_eq!(status.code(), Some(3));
        }

        #[test]
        fn run_turns_nonzero_exit_into_a_pipeline_error() {
            let err = ExecSpec::new("sh").args(["-c", "exit 5"]).run().unwrap_err();
            assert_eq!(exit_code(&err), 5);
        }

        #[test]
        fn env_overlay_reaches_the_child_only() {
            let spec = ExecSpec::new("sh")
                .args(["-c", "test \"$NDIST_OVERLAY\" = probe"])
                .env("NDIST_OVERLAY", "probe");
            spec.run().unwrap();
            assert!(std::env::var("NDIST_OVERLAY").is_err());
        }

        #[test]
        fn current_dir_is_honored() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("probe"), "").unwrap();
            ExecSpec::new("sh")
                .args(["-c", "test -f probe"])
                .current_dir(dir.path())
                .run()
                .unwrap();
        }

        #[test]
        fn missing_program_is_a_spawn_error() {
            let err = ExecSpec::new("ndist-definitely-not-a-real-tool").run().unwrap_err();
            assert!(err.to_string().contains("failed to run"));
        }
    }
}
