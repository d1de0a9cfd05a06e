//! Frontend asset bundling and the static directory sync.
//!
//! The Go binary embeds `static/`, so the frontend must be bundled and
//! synced in before the build matrix runs. The sync wipes everything in
//! `static/` except its README, then copies the bundler output in.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fs_extra::dir::CopyOptions;

use crate::error::PipelineError;
use crate::layout::DistLayout;
use crate::process::ExecSpec;

/// File kept in `static/` across syncs.
const STATIC_KEEP: &str = "README.md";

/// Run the frontend bundler in `ui/`.
///
/// # Errors
///
/// Fails when `ui/` is missing or the bundler exits non-zero.
pub fn build_frontend(layout: &DistLayout) -> Result<()> {
    let ui = layout.ui_dir();
    if !ui.is_dir() {
        return Err(
            PipelineError::Precondition(format!("frontend directory not found: {}", ui.display()))
                .into(),
        );
    }
    let spec = ExecSpec::new("pnpm").arg("build").current_dir(&ui);
    println!("  $ {} (in {})", spec.render(), ui.display());
    spec.run()
}

/// Replace the contents of `static/` with the bundler output, keeping
/// only the README.
///
/// # Errors
///
/// Fails when `ui/dist/` is missing or a copy fails.
pub fn sync_static(layout: &DistLayout) -> Result<()> {
    let dist = layout.ui_dist_dir();
    if !dist.is_dir() {
        return Err(PipelineError::Precondition(format!(
            "frontend build produced no output: {}",
            dist.display()
        ))
        .into());
    }
    let static_dir = layout.static_dir();
    clean_static(&static_dir)?;
    let options = CopyOptions::new().content_only(true).overwrite(true);
    fs_extra::dir::copy(&dist, &static_dir, &options)
        .with_context(|| format!("failed to copy {} into {}", dist.display(), static_dir.display()))?;
    println!("  synced {} -> {}", dist.display(), static_dir.display());
    Ok(())
}

fn clean_static(static_dir: &Path) -> Result<()> {
    if !static_dir.exists() {
        fs::create_dir_all(static_dir)
            .with_context(|| format!("failed to create {}", static_dir.display()))?;
        return Ok(());
    }
    for entry in fs::read_dir(static_dir)
        .with_context(|| format!("failed to read {}", static_dir.display()))?
    {
        let entry = entry?;
        if entry.file_name() == STATIC_KEEP {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        } else {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}
