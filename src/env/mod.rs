//! Container environment resolution.
//!
//! [`build_env_vars`] turns the worker's bindings into the variable set the
//! moltbot container reads at start-up: it picks the provider credential
//! (AI gateway first, direct provider keys as fallback), derives the
//! provider-specific base URL from the gateway endpoint, and renames the
//! variables whose container-side names differ.

mod builder;
mod gateway;
pub mod keys;
mod render;

pub use builder::*;
pub use gateway::*;
pub use render::*;
