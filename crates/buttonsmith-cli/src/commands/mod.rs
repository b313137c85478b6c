//! CLI command implementations

pub mod button;
pub mod fmt;
pub mod noise;
pub mod render;
pub mod tokens;
