//! Resolve worker bindings into the environment of the moltbot container.

pub mod cli;
pub mod config;
pub mod env;
pub mod infra;
pub mod logging;
