//! Buttonsmith CLI library.
//!
//! This crate provides the command implementations behind the `buttonsmith`
//! binary, plus the shared plumbing they need: configuration loading, font
//! loader construction and logging setup.

pub mod commands;
pub mod input;
