//! Command modules - one file per CLI command

pub mod build;
pub mod catalog;
pub mod completions;
pub mod publish;
