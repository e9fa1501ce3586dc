//! Configuration for an action run
//!
//! Inputs come from the workflow step, settings from defaults plus optional
//! environment overrides. Both are plain values handed to the components that
//! need them; nothing in the crate reads the environment after startup.

pub mod types;
pub mod loader;

pub use types::*;
pub use loader::*;

#[cfg(test)]
mod tests;
