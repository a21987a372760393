//! CLI library components for PickLane.

pub mod logging;
pub mod source;
