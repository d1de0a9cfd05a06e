//! ndist - build and publish npm distribution packages

use anyhow::{Context, Result};
use clap::Parser;
use ndist_schema::version::VersionInfo;
use tracing_subscriber::EnvFilter;

use ndist_cli::cmd;
use ndist_cli::{Cli, Commands};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(ndist_core::exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to resolve the current directory")?,
    };

    match cli.command {
        Commands::Build {
            version,
            package_name,
            version_main,
            version_prerelease,
            version_build_metadata,
            app_channel,
        } => {
            let version = VersionInfo {
                public_version: version,
                injected_main: version_main,
                injected_prerelease: version_prerelease,
                injected_build_metadata: version_build_metadata,
                injected_channel: app_channel,
            };
            cmd::build::build(&root, &version, &package_name)
        }
        Commands::Publish => cmd::publish::publish(&root),
        Commands::Catalog => {
            cmd::catalog::catalog();
            Ok(())
        }
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
