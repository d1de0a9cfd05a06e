//! Platform package generation.
//!
//! Each platform package is three files: the manifest, a zero-byte
//! `.npm-global` marker, and the compiled binary. The output root is
//! wiped wholesale at the start of every run, so anything found inside
//! it afterwards was produced by that run.

use std::fs;

use anyhow::{Context, Result};
use ndist_schema::manifest::PackageDescriptor;
use ndist_schema::platform::command_name;
use ndist_schema::version::VersionInfo;

use crate::error::PipelineError;
use crate::layout::{DistLayout, MANIFEST_FILE, MARKER_FILE};
use crate::matrix::BuildArtifact;

/// Delete and recreate the output root.
///
/// # Errors
///
/// Fails when the old tree cannot be removed or the new root created.
pub fn reset_packages_root(layout: &DistLayout) -> Result<()> {
    let root = layout.packages_root();
    if root.exists() {
        fs::remove_dir_all(&root).with_context(|| format!("failed to remove {}", root.display()))?;
    }
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(())
}

/// Write the manifest and marker for one compiled binary, copying the
/// binary into place when it was built somewhere else.
///
/// # Errors
///
/// Fails when the binary is missing or any of the three files cannot be
/// written.
pub fn write_platform_package(
    layout: &DistLayout,
    artifact: &BuildArtifact,
    version: &VersionInfo,
    main_package: &str,
) -> Result<PackageDescriptor> {
    let key = artifact.target.platform_key();
    let dir = layout.platform_dir(&key);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let payload = dir.join(artifact.target.binary_file_name(command_name(main_package)));
    if artifact.binary_path == payload {
        if !payload.is_file() {
            return Err(PipelineError::Precondition(format!(
                "no binary for {key} at {}",
                payload.display()
            ))
            .into());
        }
    } else {
        fs::copy(&artifact.binary_path, &payload).with_context(|| {
            format!(
                "failed to copy {} to {}",
                artifact.binary_path.display(),
                payload.display()
            )
        })?;
    }

    let descriptor =
        PackageDescriptor::platform(artifact.target, &version.public_version, main_package);
    descriptor.validate()?;
    let manifest_path = dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, descriptor.to_json()?)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    let marker_path = dir.join(MARKER_FILE);
    fs::write(&marker_path, "")
        .with_context(|| format!("failed to write {}", marker_path.display()))?;
    Ok(descriptor)
}
