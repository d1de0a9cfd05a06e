//! Main package assembly.
//!
//! Writes the launcher script into `npm-bin/` and the main manifest at
//! the project root. Both are derived from the same catalog the build
//! matrix used, so the launcher's table and the manifest's
//! `optionalDependencies` can never disagree.

use std::fs;

use anyhow::{Context, Result};
use ndist_schema::manifest::PackageDescriptor;
use ndist_schema::platform::command_name;
use ndist_schema::version::VersionInfo;

use crate::launcher::{ResolutionTable, render_launcher};
use crate::layout::{BIN_DIR, DistLayout};

/// Write the launcher and the main manifest, returning the descriptor.
///
/// # Errors
///
/// Fails when either file cannot be written.
pub fn assemble_main_package(
    layout: &DistLayout,
    version: &VersionInfo,
    main_package: &str,
) -> Result<PackageDescriptor> {
    let command = command_name(main_package);

    let bin_dir = layout.bin_dir();
    fs::create_dir_all(&bin_dir)
        .with_context(|| format!("failed to create {}", bin_dir.display()))?;
    let table = ResolutionTable::from_catalog(main_package);
    let script = render_launcher(&table, main_package, command);
    let launcher_path = layout.launcher_path(command);
    fs::write(&launcher_path, script)
        .with_context(|| format!("failed to write {}", launcher_path.display()))?;

    // Manifest paths always use forward slashes, whatever the host.
    let launcher_rel_path = format!("{BIN_DIR}/{command}.js");
    let descriptor =
        PackageDescriptor::main(main_package, &version.public_version, &launcher_rel_path);
    descriptor.validate()?;
    let manifest_path = layout.main_manifest();
    fs::write(&manifest_path, descriptor.to_json()?)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;
    Ok(descriptor)
}
