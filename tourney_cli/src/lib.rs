//! Internal modules for the tourney command-line front end.
//!
//! This library provides command parsing, rendering, configuration and the
//! snapshot store used by the tourney_cli binary.

pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod store;
