//! Version strings stamped into the compiled binary and the manifests.

use thiserror::Error;

/// Prerelease identifier the binary's source compiles in as its default.
///
/// The build matrix always injects `main.VERSION_PRERELEASE` at link time,
/// even when the requested value is empty: an empty injection is how a
/// release build erases this default, and a dev build that skips the
/// pipeline keeps it.
pub const COMPILED_IN_PRERELEASE: &str = "-alpha";

/// Validation failures for [`VersionInfo`].
#[derive(Debug, Error)]
pub enum VersionError {
    /// The public package version is not a valid semantic version.
    #[error("invalid semantic version '{version}': {source}")]
    InvalidSemver {
        /// The rejected version string
        version: String,
        /// Parse error from the semver grammar
        #[source]
        source: semver::Error,
    },
}

/// The public package version plus the four link-time injection values.
///
/// Injection values model the Go `-ldflags -X` overrides: `main`,
/// `build_metadata`, and `channel` are only injected when non-empty,
/// while `prerelease` is always injected (see [`COMPILED_IN_PRERELEASE`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    /// Version written into every generated `package.json`
    pub public_version: String,
    /// Link-time override for `main.VERSION_MAIN`
    pub injected_main: String,
    /// Link-time override for `main.VERSION_PRERELEASE`
    pub injected_prerelease: String,
    /// Link-time override for `main.VERSION_BUILD_METADATA`
    pub injected_build_metadata: String,
    /// Link-time override for `main.APP_CHANNEL`
    pub injected_channel: String,
}

impl VersionInfo {
    /// Check that the public version is a well-formed semantic version.
    ///
    /// The injection values are free-form and never validated; npm is the
    /// authority only for `public_version`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidSemver`] when `public_version` does
    /// not parse.
    pub fn validate(&self) -> Result<(), VersionError> {
        semver::Version::parse(&self.public_version).map_err(|source| VersionError::InvalidSemver {
            version: self.public_version.clone(),
            source,
        })?;
        Ok(())
    }
}
