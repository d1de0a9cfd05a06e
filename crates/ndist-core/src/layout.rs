//! Centralized path handling for the distribution tree.
//!
//! All on-disk names live here so no stage hard-codes a path. The tree
//! rooted at the project directory looks like:
//!
//! ```text
//! <root>/
//! ├── ui/dist/          # frontend bundler output (input)
//! ├── static/           # embedded assets, synced from ui/dist
//! ├── npm-packages/     # one directory per platform key (output)
//! │   └── win32-x64/    #   package.json + .npm-global + binary
//! ├── npm-bin/          # generated launcher script
//! └── package.json      # main package manifest
//! ```

use std::path::{Path, PathBuf};

/// Directory holding one subdirectory per platform package.
pub const PACKAGES_DIR: &str = "npm-packages";

/// Directory holding the generated launcher script.
pub const BIN_DIR: &str = "npm-bin";

/// npm manifest file name.
pub const MANIFEST_FILE: &str = "package.json";

/// Zero-byte marker written into every platform package.
pub const MARKER_FILE: &str = ".npm-global";

/// Frontend source directory.
pub const UI_DIR: &str = "ui";

/// Bundler output directory inside [`UI_DIR`].
pub const DIST_DIR: &str = "dist";

/// Directory of assets embedded into the Go binary.
pub const STATIC_DIR: &str = "static";

/// Resolves every pipeline path from the project root.
#[derive(Debug, Clone)]
pub struct DistLayout {
    root: PathBuf,
}

impl DistLayout {
    /// Layout rooted at `root`, the directory holding the Go module.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `npm-packages/`, wiped and rebuilt by every run.
    pub fn packages_root(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }

    /// Platform package directory for a catalog key.
    pub fn platform_dir(&self, platform_key: &str) -> PathBuf {
        self.packages_root().join(platform_key)
    }

    /// `npm-bin/`, holding the launcher script.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(BIN_DIR)
    }

    /// The launcher script for `command`.
    pub fn launcher_path(&self, command: &str) -> PathBuf {
        self.bin_dir().join(format!("{command}.js"))
    }

    /// The main package manifest at the project root.
    pub fn main_manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Frontend source directory.
    pub fn ui_dir(&self) -> PathBuf {
        self.root.join(UI_DIR)
    }

    /// Frontend bundler output directory.
    pub fn ui_dist_dir(&self) -> PathBuf {
        self.ui_dir().join(DIST_DIR)
    }

    /// Embedded asset directory.
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_root() {
        let layout = DistLayout::new("/work/codekanban");
        assert_eq!(layout.packages_root(), Path::new("/work/codekanban/npm-packages"));
        assert_eq!(
            layout.platform_dir("darwin-arm64"),
            Path::new("/work/codekanban/npm-packages/darwin-arm64")
        );
        assert_eq!(
            layout.launcher_path("codekanban"),
            Path::new("/work/codekanban/npm-bin/codekanban.js")
        );
        assert_eq!(layout.main_manifest(), Path::new("/work/codekanban/package.json"));
        assert_eq!(layout.ui_dist_dir(), Path::new("/work/codekanban/ui/dist"));
    }
}
