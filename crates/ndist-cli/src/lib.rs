//! ndist - npm distribution packaging for a cross-compiled binary
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! # Overview
//!
//! ndist turns one Go module into an npm-installable tool using the
//! per-platform optional-dependency pattern: a thin main package whose
//! `bin` entry is a Node launcher, plus one binary-carrying package per
//! supported platform that npm selects through `os`/`cpu` constraints.
//!
//! # Output Layout
//!
//! ```text
//! <root>/
//! ├── npm-packages/
//! │   ├── win32-x64/      # package.json + .npm-global + codekanban.exe
//! │   ├── darwin-x64/
//! │   ├── darwin-arm64/
//! │   ├── linux-x64/
//! │   └── linux-arm64/
//! ├── npm-bin/
//! │   └── codekanban.js   # generated launcher
//! └── package.json        # main package manifest
//! ```

pub mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ndist")]
#[command(author, version = env!("NDIST_VERSION"), about = "ndist - package and publish a Go binary through npm")]
pub struct Cli {
    /// Project root holding the Go module and ui/ sources (default: cwd)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cross-compile every platform and generate the npm packages
    Build {
        /// Version written into every generated package.json
        #[arg(long, value_name = "SEMVER")]
        version: String,
        /// npm name of the main package (platform names derive from it)
        #[arg(long, value_name = "NAME", default_value = "codekanban")]
        package_name: String,
        /// Link-time value for main.VERSION_MAIN (skipped when empty)
        #[arg(long, value_name = "STRING", default_value = "")]
        version_main: String,
        /// Link-time value for main.VERSION_PRERELEASE; always injected,
        /// so an empty value erases the compiled-in default
        #[arg(long, value_name = "STRING", default_value = "")]
        version_prerelease: String,
        /// Link-time value for main.VERSION_BUILD_METADATA (skipped when empty)
        #[arg(long, value_name = "STRING", default_value = "")]
        version_build_metadata: String,
        /// Link-time value for main.APP_CHANNEL (skipped when empty)
        #[arg(long, value_name = "STRING", default_value = "")]
        app_channel: String,
    },
    /// Publish the generated packages to the npm registry
    Publish,
    /// Print the platform catalog
    Catalog,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
