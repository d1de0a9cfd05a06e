//! Publishing the generated packages to the npm registry.
//!
//! Platform packages publish first, in catalog order, then the main
//! package, so `optionalDependencies` never point at versions the
//! registry has not seen. The first failing publish aborts the rest and
//! its exit code becomes the pipeline's.
//!
//! Diagnostics never print credential values: the npmrc check reports
//! the path only and the token check reports its length only.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndist_schema::platform::PLATFORM_CATALOG;

use crate::error::PipelineError;
use crate::layout::{DistLayout, MANIFEST_FILE};
use crate::process::ExecSpec;

/// Snapshot of the ambient environment the publish flow depends on.
///
/// Captured once up front so every decision in the flow reads the same
/// state, and so tests can construct the struct directly.
#[derive(Debug, Clone)]
pub struct CiEnv {
    /// Whether `GITHUB_ACTIONS` is exactly `true`
    pub github_actions: bool,
    /// Length of `NODE_AUTH_TOKEN`, never its value
    pub node_auth_token_len: Option<usize>,
    /// Home directory, for locating an `.npmrc`
    pub home_dir: Option<PathBuf>,
}

impl CiEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            github_actions: std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"),
            node_auth_token_len: std::env::var("NODE_AUTH_TOKEN").ok().map(|t| t.len()),
            home_dir: dirs::home_dir(),
        }
    }
}

/// `npm publish` arguments for this environment. Provenance attestation
/// is requested only under GitHub Actions, where npm can mint it.
pub fn publish_args(ci: &CiEnv) -> Vec<String> {
    let mut args = vec![
        "publish".to_string(),
        "--access".to_string(),
        "public".to_string(),
    ];
    if ci.github_actions {
        args.push("--provenance".to_string());
    }
    args
}

/// Publish every platform package, then the main package.
///
/// Platform directories missing from the output tree are skipped with a
/// warning; the main package always publishes.
///
/// # Errors
///
/// Fails when `npm` is missing, the output of `ndist build` is absent,
/// the credential preflight fails, or any publish exits non-zero (the
/// registry's exit code is carried in the error).
pub fn publish_all(layout: &DistLayout, ci: &CiEnv) -> Result<()> {
    let packages_root = layout.packages_root();
    if !packages_root.is_dir() {
        return Err(PipelineError::Precondition(format!(
            "{} not found; run `ndist build` first",
            packages_root.display()
        ))
        .into());
    }
    let manifest_path = layout.main_manifest();
    if !manifest_path.is_file() {
        return Err(PipelineError::Precondition(format!(
            "{} not found; run `ndist build` first",
            manifest_path.display()
        ))
        .into());
    }
    which::which("npm")
        .map_err(|_| PipelineError::Precondition("`npm` not found on PATH".to_string()))?;
    let main_package = read_manifest_field(&manifest_path, "name")?;
    let version = read_manifest_field(&manifest_path, "version")?;
    println!("publishing {main_package}@{version}");

    if ci.github_actions {
        match ci.node_auth_token_len {
            Some(len) => {
                println!("  NODE_AUTH_TOKEN is set ({len} chars); npm authenticates per publish");
            }
            None => {
                return Err(PipelineError::Auth(
                    "NODE_AUTH_TOKEN is not set; publishing from GitHub Actions cannot authenticate"
                        .to_string(),
                )
                .into());
            }
        }
        println!("  provenance: enabled (GitHub Actions)");
    }
    check_login(layout, ci)?;

    let args = publish_args(ci);
    let mut published = 0usize;
    for target in &PLATFORM_CATALOG {
        let key = target.platform_key();
        let dir = layout.platform_dir(&key);
        if !dir.is_dir() {
            println!("  warning: skipping {key}: {} not found", dir.display());
            continue;
        }
        let name = read_manifest_field(&dir.join(MANIFEST_FILE), "name")?;
        println!("\n  publishing {name}@{version}");
        run_npm(&args, &dir)?;
        published += 1;
    }

    println!("\n  publishing {main_package}@{version}");
    run_npm(&args, layout.root())?;
    published += 1;

    println!("\npublished {published} packages");
    println!("verify with: npm install -g {main_package}");
    println!("registry page: https://www.npmjs.com/package/{main_package}");
    Ok(())
}

/// Pre-flight identity check. A failed `npm whoami` outside CI is only a
/// warning, since per-publish credentials may still be configured.
fn check_login(layout: &DistLayout, ci: &CiEnv) -> Result<()> {
    let spec = ExecSpec::new("npm").arg("whoami").current_dir(layout.root());
    println!("  $ {}", spec.render());
    let status = spec.status()?;
    if status.success() {
        return Ok(());
    }
    println!("  warning: `npm whoami` failed; you may not be logged in");
    match ci.home_dir.as_ref().map(|home| home.join(".npmrc")) {
        Some(npmrc) if npmrc.is_file() => println!("  found {}", npmrc.display()),
        Some(npmrc) => println!("  no npmrc at {}", npmrc.display()),
        None => println!("  home directory unknown; cannot look for an npmrc"),
    }
    Ok(())
}

fn run_npm(args: &[String], dir: &Path) -> Result<()> {
    let spec = ExecSpec::new("npm").args(args).current_dir(dir);
    println!("  $ {}", spec.render());
    spec.run()
}

fn read_manifest_field(path: &Path, field: &str) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let manifest: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    manifest[field]
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("{} has no '{field}' field", path.display()))
}
