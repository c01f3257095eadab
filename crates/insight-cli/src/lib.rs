//! CLI library components for the insight reporter.

pub mod logging;
pub mod render;
