//! CLI command implementations

pub mod completions;
pub mod design;
pub mod frames;
pub mod template;
