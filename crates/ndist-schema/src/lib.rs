//! Shared types for ndist.
//!
//! Everything both the build pipeline and the publish flow need to agree
//! on lives here: the platform catalog, the package naming rules, the
//! version-injection model, and the npm manifest schema. Higher layers
//! (`ndist-core`, `ndist-cli`) never restate any of this.

pub mod manifest;
pub mod platform;
pub mod version;

// Re-exports
pub use manifest::{Engines, ManifestError, PackageDescriptor, Repository};
pub use platform::{PLATFORM_CATALOG, PlatformTarget, command_name, platform_package_name};
pub use version::{COMPILED_IN_PRERELEASE, VersionError, VersionInfo};
