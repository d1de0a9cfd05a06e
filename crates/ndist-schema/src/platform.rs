//! The platform catalog and the package naming rules.
//!
//! Every stage of the pipeline (build matrix, manifest generation, the
//! generated launcher, publishing) iterates [`PLATFORM_CATALOG`]. Adding
//! a platform is a one-row change here and nowhere else.

/// One supported platform, described in both vocabularies it is known by:
/// the Go toolchain's (`GOOS`/`GOARCH`) and npm's (`os`/`cpu`).
///
/// # Example
///
/// ```
/// use ndist_schema::PLATFORM_CATALOG;
///
/// let windows = &PLATFORM_CATALOG[0];
/// assert_eq!(windows.platform_key(), "win32-x64");
/// assert_eq!(windows.binary_file_name("codekanban"), "codekanban.exe");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformTarget {
    /// `GOOS` value used when cross-compiling for this platform
    pub toolchain_os: &'static str,
    /// `GOARCH` value used when cross-compiling for this platform
    pub toolchain_arch: &'static str,
    /// npm `os` value (`process.platform` vocabulary)
    pub package_os: &'static str,
    /// npm `cpu` value (`process.arch` vocabulary)
    pub package_arch: &'static str,
    /// Suffix appended to the binary file name (empty everywhere but Windows)
    pub exe_suffix: &'static str,
}

impl PlatformTarget {
    /// The `<packageOS>-<packageArch>` key naming this platform's package
    /// directory and its entry in the launcher's resolution table.
    pub fn platform_key(&self) -> String {
        format!("{}-{}", self.package_os, self.package_arch)
    }

    /// File name of the compiled binary inside this platform's package.
    pub fn binary_file_name(&self, command: &str) -> String {
        format!("{command}{}", self.exe_suffix)
    }
}

impl std::fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.package_os, self.package_arch)
    }
}

/// Every platform the distribution supports, in the order packages are
/// built and published.
pub const PLATFORM_CATALOG: [PlatformTarget; 5] = [
    PlatformTarget {
        toolchain_os: "windows",
        toolchain_arch: "amd64",
        package_os: "win32",
        package_arch: "x64",
        exe_suffix: ".exe",
    },
    PlatformTarget {
        toolchain_os: "darwin",
        toolchain_arch: "amd64",
        package_os: "darwin",
        package_arch: "x64",
        exe_suffix: "",
    },
    PlatformTarget {
        toolchain_os: "darwin",
        toolchain_arch: "arm64",
        package_os: "darwin",
        package_arch: "arm64",
        exe_suffix: "",
    },
    PlatformTarget {
        toolchain_os: "linux",
        toolchain_arch: "amd64",
        package_os: "linux",
        package_arch: "x64",
        exe_suffix: "",
    },
    PlatformTarget {
        toolchain_os: "linux",
        toolchain_arch: "arm64",
        package_os: "linux",
        package_arch: "arm64",
        exe_suffix: "",
    },
];

/// npm name of the platform package carrying one compiled binary.
///
/// A scoped main name keeps its scope and gains a key suffix; an unscoped
/// main name becomes the scope itself.
///
/// # Example
///
/// ```
/// use ndist_schema::platform_package_name;
///
/// assert_eq!(platform_package_name("codekanban", "win32-x64"), "@codekanban/win32-x64");
/// assert_eq!(platform_package_name("@acme/tool", "win32-x64"), "@acme/tool-win32-x64");
/// ```
pub fn platform_package_name(main_package: &str, platform_key: &str) -> String {
    if main_package.starts_with('@') {
        format!("{main_package}-{platform_key}")
    } else {
        format!("@{main_package}/{platform_key}")
    }
}

/// Executable name end users type, derived from the main package name.
///
/// For scoped names this is the part after the scope (`@acme/tool` runs
/// as `tool`); unscoped names are used as-is.
pub fn command_name(main_package: &str) -> &str {
    main_package.rsplit('/').next().unwrap_or(main_package)
}
