//! Publish command - push every generated package to the registry

use std::path::Path;

use anyhow::Result;
use ndist_core::DistLayout;
use ndist_core::publish::{CiEnv, publish_all};

/// Publish the output of `ndist build`, platform packages first.
pub fn publish(root: &Path) -> Result<()> {
    let layout = DistLayout::new(root);
    let ci = CiEnv::capture();
    publish_all(&layout, &ci)
}
