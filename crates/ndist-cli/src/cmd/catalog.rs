//! Catalog command - show the supported platforms

use ndist_schema::platform::PLATFORM_CATALOG;

/// Print one line per catalog row: the platform key, the toolchain pair
/// it is built with, and the npm package gates.
pub fn catalog() {
    println!("supported platforms:");
    for target in &PLATFORM_CATALOG {
        println!(
            "  {:<14} GOOS={:<8} GOARCH={:<6} os={:<7} cpu={}",
            target.platform_key(),
            target.toolchain_os,
            target.toolchain_arch,
            target.package_os,
            target.package_arch
        );
    }
}
