//! Build command - run the whole packaging pipeline

use std::path::Path;

use anyhow::Result;
use ndist_core::{DistLayout, assemble, assets, matrix, package};
use ndist_schema::platform::{PLATFORM_CATALOG, command_name};
use ndist_schema::version::VersionInfo;

/// Run the five pipeline stages in order: wipe the output root, bundle
/// the frontend, cross-compile the matrix, generate the platform
/// packages, assemble the main package.
pub fn build(root: &Path, version: &VersionInfo, main_package: &str) -> Result<()> {
    version.validate()?;
    let layout = DistLayout::new(root);
    let command = command_name(main_package);

    println!(
        "building {main_package}@{} for {} platforms",
        version.public_version,
        PLATFORM_CATALOG.len()
    );

    println!("\n[1/5] resetting {}", layout.packages_root().display());
    package::reset_packages_root(&layout)?;

    println!("\n[2/5] bundling frontend assets");
    assets::build_frontend(&layout)?;
    assets::sync_static(&layout)?;

    println!("\n[3/5] cross-compiling {command}");
    let artifacts = matrix::build_matrix(&layout, version, main_package)?;

    println!("\n[4/5] generating platform packages");
    for artifact in &artifacts {
        let descriptor = package::write_platform_package(&layout, artifact, version, main_package)?;
        println!("  {}", descriptor.name);
    }

    println!("\n[5/5] assembling the main package");
    let main_descriptor = assemble::assemble_main_package(&layout, version, main_package)?;
    println!("  {} -> {}", main_descriptor.name, layout.main_manifest().display());

    println!(
        "\ndone: {} platform packages + 1 main package in {}",
        artifacts.len(),
        layout.packages_root().display()
    );
    println!("publish with: ndist publish");
    Ok(())
}
