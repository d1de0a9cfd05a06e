//! The generated Node.js launcher.
//!
//! The main package installs a tiny portable script as its `bin` entry.
//! At run time it maps the host's `process.platform`/`process.arch` pair
//! to a platform package, resolves the binary inside it, and execs it
//! with inherited stdio. The resolution table is rendered from
//! [`PLATFORM_CATALOG`], never written by hand.
//!
//! Exit handling distinguishes the three child outcomes: a spawn failure
//! exits 1, a signal death re-raises the same signal, and a code-less
//! exit without a signal exits 1 rather than masquerading as success.

use ndist_schema::platform::{PLATFORM_CATALOG, PlatformTarget, platform_package_name};

const LAUNCHER_TEMPLATE: &str = r#"#!/usr/bin/env node
const { spawn } = require('child_process');
const path = require('path');

// Generated platform resolution table. Regenerated on every build;
// do not edit by hand.
const PLATFORMS = {
{PLATFORM_TABLE}
};

const platform = process.platform;
const arch = process.arch;
const platformKey = `${platform}-${arch}`;
const packageName = PLATFORMS[platformKey];

if (!packageName) {
  console.error(`Unsupported platform: ${platformKey}`);
  console.error('Supported platforms:', Object.keys(PLATFORMS).join(', '));
  process.exit(1);
}

let binPath;
try {
  const packagePath = require.resolve(packageName + '/package.json');
  const packageDir = path.dirname(packagePath);
  const binName = platform === 'win32' ? '{COMMAND}.exe' : '{COMMAND}';
  binPath = path.join(packageDir, binName);
} catch (e) {
  console.error(`Failed to find binary for ${platformKey}`);
  console.error(`Make sure ${packageName} is installed`);
  console.error('');
  console.error('Try one of the following:');
  console.error('  1. Uninstall and reinstall with npm:');
  console.error('     npm uninstall -g {MAIN_PACKAGE}');
  console.error('     npm install -g {MAIN_PACKAGE}');
  console.error('  2. Or uninstall and reinstall with pnpm:');
  console.error('     pnpm uninstall -g {MAIN_PACKAGE}');
  console.error('     pnpm install -g {MAIN_PACKAGE}');
  process.exit(1);
}

const child = spawn(binPath, process.argv.slice(2), {
  stdio: 'inherit',
  windowsHide: false
});

child.on('error', (err) => {
  console.error(`Failed to start ${binPath}: ${err.message}`);
  process.exit(1);
});

child.on('exit', (code, signal) => {
  if (signal) {
    process.kill(process.pid, signal);
    return;
  }
  process.exit(code === null ? 1 : code);
});
"#;

/// The platform-key to package-name table embedded in the launcher.
#[derive(Debug, Clone)]
pub struct ResolutionTable {
    entries: Vec<(String, String)>,
}

impl ResolutionTable {
    /// Build the table from the catalog for a given main package name.
    pub fn from_catalog(main_package: &str) -> Self {
        let entries = PLATFORM_CATALOG
            .iter()
            .map(PlatformTarget::platform_key)
            .map(|key| {
                let name = platform_package_name(main_package, &key);
                (key, name)
            })
            .collect();
        Self { entries }
    }

    /// `(platform key, package name)` pairs in catalog order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    fn render_js_object(&self) -> String {
        self.entries
            .iter()
            .map(|(key, name)| format!("  '{key}': '{name}',"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render the launcher script for `main_package`, installed as `command`.
pub fn render_launcher(table: &ResolutionTable, main_package: &str, command: &str) -> String {
    LAUNCHER_TEMPLATE
        .replace("{PLATFORM_TABLE}", &table.render_js_object())
        .replace("{MAIN_PACKAGE}", main_package)
        .replace("{COMMAND}", command)
}
