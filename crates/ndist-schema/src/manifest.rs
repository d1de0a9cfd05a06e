//! The generated npm `package.json` model.
//!
//! Two shapes share one struct: platform packages (binary payload, `os`/
//! `cpu` gated) and the main package (launcher, `bin` plus
//! `optionalDependencies`). [`PackageDescriptor::validate`] enforces the
//! shape invariants before anything is written to disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{PLATFORM_CATALOG, PlatformTarget, command_name, platform_package_name};

/// License every generated package is published under.
pub const PACKAGE_LICENSE: &str = "Apache-2.0";

/// Author recorded in every generated package.
pub const PACKAGE_AUTHOR: &str = "fy0";

/// Source repository recorded in every generated package.
pub const REPOSITORY_URL: &str = "https://github.com/fy0/CodeKanban";

/// Description of the main package.
pub const MAIN_DESCRIPTION: &str =
    "An auxiliary programming tool for the AI era, helping you speed up 10x.";

/// Keywords of the main package.
pub const MAIN_KEYWORDS: [&str; 8] = [
    "ai",
    "coding",
    "kanban",
    "terminal",
    "productivity",
    "developer-tools",
    "worktree",
    "git",
];

/// Node range the generated launcher is known to run on.
pub const NODE_ENGINE_RANGE: &str = ">=14.0.0";

/// `repository` object inside a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository kind, always `git`
    #[serde(rename = "type")]
    pub kind: String,
    /// Clone URL
    pub url: String,
}

impl Repository {
    fn project() -> Self {
        Self {
            kind: "git".to_string(),
            url: REPOSITORY_URL.to_string(),
        }
    }
}

/// `engines` object inside a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engines {
    /// Supported Node version range
    pub node: String,
}

/// Shape violations caught by [`PackageDescriptor::validate`].
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The package name is empty.
    #[error("package name must not be empty")]
    EmptyName,
    /// The package version is empty.
    #[error("package '{0}' has an empty version")]
    EmptyVersion(String),
    /// A platform package must pin exactly one `os` and one `cpu`.
    #[error("platform package '{0}' must pin exactly one os and one cpu")]
    BadPlatformConstraint(String),
    /// A field only the main package may carry appeared on a platform one.
    #[error("platform package '{name}' must not declare '{field}'")]
    UnexpectedField {
        /// Offending package name
        name: String,
        /// Field that does not belong on a platform package
        field: &'static str,
    },
    /// A field the main package requires is missing or empty.
    #[error("main package '{name}' is missing '{field}'")]
    MissingField {
        /// Offending package name
        name: String,
        /// Required main-package field
        field: &'static str,
    },
}

/// One generated `package.json`, for either a platform package or the
/// main package. Optional fields are omitted from the serialized output
/// when absent, matching what npm expects of each shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// npm package name
    pub name: String,
    /// Published version
    pub version: String,
    /// Human-readable description
    pub description: String,
    /// Executables the package installs (main package only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<BTreeMap<String, String>>,
    /// Platform packages keyed by name (main package only)
    #[serde(
        rename = "optionalDependencies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub optional_dependencies: Option<BTreeMap<String, String>>,
    /// Registry search keywords (main package only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Installable operating systems (platform packages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Vec<String>>,
    /// Installable CPU architectures (platform packages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Vec<String>>,
    /// Project home page
    pub homepage: String,
    /// Source repository
    pub repository: Repository,
    /// Package author
    pub author: String,
    /// SPDX license identifier
    pub license: String,
    /// Supported runtime versions (main package only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Engines>,
}

impl PackageDescriptor {
    /// Descriptor for the platform package carrying `target`'s binary.
    ///
    /// The description steers anyone who lands on the package page back to
    /// the main package, which is the only thing meant to be installed
    /// directly.
    pub fn platform(target: &PlatformTarget, version: &str, main_package: &str) -> Self {
        let key = target.platform_key();
        Self {
            name: platform_package_name(main_package, &key),
            version: version.to_string(),
            description: format!(
                "Platform-specific binary for {key}. Install '{main_package}' instead: https://www.npmjs.com/package/{main_package}"
            ),
            bin: None,
            optional_dependencies: None,
            keywords: None,
            os: Some(vec![target.package_os.to_string()]),
            cpu: Some(vec![target.package_arch.to_string()]),
            homepage: REPOSITORY_URL.to_string(),
            repository: Repository::project(),
            author: PACKAGE_AUTHOR.to_string(),
            license: PACKAGE_LICENSE.to_string(),
            engines: None,
        }
    }

    /// Descriptor for the main package: the launcher `bin` entry plus one
    /// `optionalDependencies` entry per catalog row, every one pinned to
    /// `version` so npm can never mix launcher and binary versions.
    pub fn main(main_package: &str, version: &str, launcher_rel_path: &str) -> Self {
        let command = command_name(main_package);
        let bin = BTreeMap::from([(command.to_string(), launcher_rel_path.to_string())]);
        let optional_dependencies = PLATFORM_CATALOG
            .iter()
            .map(|target| {
                (
                    platform_package_name(main_package, &target.platform_key()),
                    version.to_string(),
                )
            })
            .collect();
        Self {
            name: main_package.to_string(),
            version: version.to_string(),
            description: MAIN_DESCRIPTION.to_string(),
            bin: Some(bin),
            optional_dependencies: Some(optional_dependencies),
            keywords: Some(MAIN_KEYWORDS.iter().map(ToString::to_string).collect()),
            os: None,
            cpu: None,
            homepage: format!("{REPOSITORY_URL}#readme"),
            repository: Repository::project(),
            author: PACKAGE_AUTHOR.to_string(),
            license: PACKAGE_LICENSE.to_string(),
            engines: Some(Engines {
                node: NODE_ENGINE_RANGE.to_string(),
            }),
        }
    }

    /// Check the shape invariants for whichever kind this descriptor is.
    ///
    /// A descriptor with `os` or `cpu` set is checked as a platform
    /// package, anything else as the main package.
    ///
    /// # Errors
    ///
    /// Returns the first [`ManifestError`] violated.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.is_empty() {
            return Err(ManifestError::EmptyName);
        }
        if self.version.is_empty() {
            return Err(ManifestError::EmptyVersion(self.name.clone()));
        }
        if self.os.is_some() || self.cpu.is_some() {
            let one = |field: &Option<Vec<String>>| field.as_deref().is_some_and(|v| v.len() == 1);
            if !one(&self.os) || !one(&self.cpu) {
                return Err(ManifestError::BadPlatformConstraint(self.name.clone()));
            }
            if self.bin.is_some() {
                return Err(ManifestError::UnexpectedField {
                    name: self.name.clone(),
                    field: "bin",
                });
            }
            if self.optional_dependencies.is_some() {
                return Err(ManifestError::UnexpectedField {
                    name: self.name.clone(),
                    field: "optionalDependencies",
                });
            }
            return Ok(());
        }
        if self.bin.as_ref().is_none_or(BTreeMap::is_empty) {
            return Err(ManifestError::MissingField {
                name: self.name.clone(),
                field: "bin",
            });
        }
        if self.optional_dependencies.as_ref().is_none_or(BTreeMap::is_empty) {
            return Err(ManifestError::MissingField {
                name: self.name.clone(),
                field: "optionalDependencies",
            });
        }
        Ok(())
    }

    /// Serialize with the two-space indentation npm itself writes, plus a
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error, which cannot occur for
    /// descriptors built by this crate's constructors.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_descriptor_pins_one_os_and_cpu() {
        let target = &PLATFORM_CATALOG[0];
        let descriptor = PackageDescriptor::platform(target, "1.2.3", "codekanban");
        descriptor.validate().unwrap();
        assert_eq!(descriptor.name, "@codekanban/win32-x64");
        assert_eq!(descriptor.os.as_deref(), Some(["win32".to_string()].as_slice()));
        assert_eq!(descriptor.cpu.as_deref(), Some(["x64".to_string()].as_slice()));
        assert!(descriptor.bin.is_none());
        assert!(descriptor.optional_dependencies.is_none());
        assert!(descriptor.description.contains("Install 'codekanban' instead"));
    }

    #[test]
    fn platform_descriptor_serializes_without_main_fields() {
        let target = &PLATFORM_CATALOG[2];
        let descriptor = PackageDescriptor::platform(target, "1.2.3", "codekanban");
        let json: serde_json::Value =
            serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "@codekanban/darwin-arm64");
        assert_eq!(json["os"][0], "darwin");
        assert_eq!(json["cpu"][0], "arm64");
        assert_eq!(json["repository"]["type"], "git");
        assert_eq!(json["license"], "Apache-2.0");
        assert!(json.get("bin").is_none());
        assert!(json.get("optionalDependencies").is_none());
        assert!(json.get("engines").is_none());
    }

    #[test]
    fn main_descriptor_covers_the_whole_catalog() {
        let descriptor = PackageDescriptor::main("codekanban", "1.2.3", "npm-bin/codekanban.js");
        descriptor.validate().unwrap();
        let deps = descriptor.optional_dependencies.as_ref().unwrap();
        assert_eq!(deps.len(), PLATFORM_CATALOG.len());
        for target in &PLATFORM_CATALOG {
            let name = platform_package_name("codekanban", &target.platform_key());
            assert_eq!(deps.get(&name).map(String::as_str), Some("1.2.3"));
        }
        let bin = descriptor.bin.as_ref().unwrap();
        assert_eq!(bin.get("codekanban").map(String::as_str), Some("npm-bin/codekanban.js"));
    }

    #[test]
    fn main_descriptor_serializes_metadata() {
        let descriptor = PackageDescriptor::main("codekanban", "0.0.3", "npm-bin/codekanban.js");
        let json: serde_json::Value =
            serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();
        assert_eq!(json["engines"]["node"], ">=14.0.0");
        assert_eq!(json["homepage"], "https://github.com/fy0/CodeKanban#readme");
        assert_eq!(json["keywords"].as_array().unwrap().len(), 8);
        assert!(json.get("os").is_none());
        assert!(json.get("cpu").is_none());
    }

    #[test]
    fn scoped_main_package_keeps_its_scope_in_bin() {
        let descriptor = PackageDescriptor::main("@acme/tool", "2.0.0", "npm-bin/tool.js");
        descriptor.validate().unwrap();
        let bin = descriptor.bin.as_ref().unwrap();
        assert_eq!(bin.get("tool").map(String::as_str), Some("npm-bin/tool.js"));
        let deps = descriptor.optional_dependencies.as_ref().unwrap();
        assert!(deps.contains_key("@acme/tool-linux-x64"));
    }

    #[test]
    fn platform_shape_rejects_multiple_cpus() {
        let mut descriptor =
            PackageDescriptor::platform(&PLATFORM_CATALOG[1], "1.0.0", "codekanban");
        descriptor.cpu = Some(vec!["x64".to_string(), "arm64".to_string()]);
        assert!(matches!(
            descriptor.validate(),
            Err(ManifestError::BadPlatformConstraint(_))
        ));
    }

    #[test]
    fn main_shape_requires_optional_dependencies() {
        let mut descriptor = PackageDescriptor::main("codekanban", "1.0.0", "npm-bin/codekanban.js");
        descriptor.optional_dependencies = None;
        assert!(matches!(
            descriptor.validate(),
            Err(ManifestError::MissingField { field: "optionalDependencies", .. })
        ));
    }

    #[test]
    fn rendered_json_uses_two_space_indent_and_ends_with_newline() {
        let descriptor =
            PackageDescriptor::platform(&PLATFORM_CATALOG[0], "1.2.3", "codekanban");
        let rendered = descriptor.to_json().unwrap();
        assert!(rendered.starts_with("{\n  \"name\""));
        assert!(rendered.ends_with("}\n"));
    }
}
