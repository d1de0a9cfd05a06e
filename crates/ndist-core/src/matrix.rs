//! Cross-compilation of the Go binary for every catalog platform.
//!
//! Targets build one at a time, each with a per-invocation `GOOS` /
//! `GOARCH` / `CGO_ENABLED` overlay, and the first non-zero toolchain
//! exit aborts the rest of the matrix.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ndist_schema::platform::{PLATFORM_CATALOG, PlatformTarget, command_name};
use ndist_schema::version::VersionInfo;

use crate::error::PipelineError;
use crate::layout::DistLayout;
use crate::process::ExecSpec;

/// The Go toolchain binary.
pub const GO_TOOLCHAIN: &str = "go";

/// One compiled binary, ready for the package generator.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Catalog row this binary was built for
    pub target: &'static PlatformTarget,
    /// Where the toolchain wrote the binary
    pub binary_path: PathBuf,
    /// Binary size on disk
    pub size_bytes: u64,
}

/// Compose the `-ldflags` value for one run.
///
/// `-s -w` always strips symbols. `main.VERSION_PRERELEASE` is always
/// injected so that an empty value erases
/// [`ndist_schema::COMPILED_IN_PRERELEASE`]; the other three overrides
/// are only injected when non-empty. The single quotes are consumed by
/// the Go linker's own flag splitting, not by a shell.
pub fn compose_ldflags(version: &VersionInfo) -> String {
    let mut flags = vec!["-s".to_string(), "-w".to_string()];
    if !version.injected_main.is_empty() {
        flags.push(format!("-X 'main.VERSION_MAIN={}'", version.injected_main));
    }
    flags.push(format!(
        "-X 'main.VERSION_PRERELEASE={}'",
        version.injected_prerelease
    ));
    if !version.injected_build_metadata.is_empty() {
        flags.push(format!(
            "-X 'main.VERSION_BUILD_METADATA={}'",
            version.injected_build_metadata
        ));
    }
    if !version.injected_channel.is_empty() {
        flags.push(format!("-X 'main.APP_CHANNEL={}'", version.injected_channel));
    }
    flags.join(" ")
}

/// Cross-compile the module at the layout root for every catalog row.
///
/// Binaries land directly in their platform package directories, which
/// are created as needed. Returns one artifact per row, in catalog
/// order.
///
/// # Errors
///
/// Fails when the toolchain is missing, a directory cannot be created,
/// or any single build exits non-zero (the remaining targets are then
/// skipped and the toolchain's exit code is carried in the error).
pub fn build_matrix(
    layout: &DistLayout,
    version: &VersionInfo,
    main_package: &str,
) -> Result<Vec<BuildArtifact>> {
    which::which(GO_TOOLCHAIN).map_err(|_| {
        PipelineError::Precondition(format!("`{GO_TOOLCHAIN}` not found on PATH"))
    })?;
    if !layout.root().is_dir() {
        return Err(PipelineError::Precondition(format!(
            "project root not found: {}",
            layout.root().display()
        ))
        .into());
    }

    let command = command_name(main_package);
    let ldflags = compose_ldflags(version);
    tracing::debug!(ldflags = %ldflags, "composed linker flags");

    let mut artifacts = Vec::with_capacity(PLATFORM_CATALOG.len());
    let mut total_bytes = 0u64;
    for target in &PLATFORM_CATALOG {
        let key = target.platform_key();
        let dir = layout.platform_dir(&key);
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
        let binary_path = dir.join(target.binary_file_name(command));

        println!("  {}/{} -> {key}", target.toolchain_os, target.toolchain_arch);
        let status = ExecSpec::new(GO_TOOLCHAIN)
            .args(["build", "-trimpath"])
            .arg(format!("-ldflags={ldflags}"))
            .arg("-o")
            .arg(&binary_path)
            .arg(".")
            .current_dir(layout.root())
            .env("GOOS", target.toolchain_os)
            .env("GOARCH", target.toolchain_arch)
            .env("CGO_ENABLED", "0")
            .status()?;
        if !status.success() {
            return Err(PipelineError::Toolchain {
                platform_key: key,
                code: status.code(),
            }
            .into());
        }

        let size_bytes = fs::metadata(&binary_path)
            .with_context(|| format!("missing build output: {}", binary_path.display()))?
            .len();
        total_bytes += size_bytes;
        println!(
            "    ok: {} ({:.2} MB)",
            binary_path.display(),
            size_bytes as f64 / 1_048_576.0
        );
        artifacts.push(BuildArtifact {
            target,
            binary_path,
            size_bytes,
        });
    }
    println!(
        "  {}/{} targets built, {:.2} MB total",
        artifacts.len(),
        PLATFORM_CATALOG.len(),
        total_bytes as f64 / 1_048_576.0
    );
    Ok(artifacts)
}
