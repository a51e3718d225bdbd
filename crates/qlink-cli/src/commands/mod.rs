//! CLI command implementations.

pub mod common;
pub mod plan;
pub mod run;
pub mod version;
