//! Core of the ejson CI action.
//!
//! Encrypts or decrypts an ejson secrets file by installing the upstream
//! `ejson` release and running it. The crate is a thin orchestration layer:
//!
//! - **Configuration**: workflow inputs and overridable release/install settings
//! - **Installation**: release version resolution and binary provisioning
//! - **Keys**: private key placement for decryption
//! - **Executors**: subprocess invocation with the stderr-wins success rule
//! - **Workflow**: step outputs and annotations for the Actions runner
//! - **Action**: the sequence tying the above together

pub mod action;
pub mod config;
pub mod errors;
pub mod executors;
pub mod installation;
pub mod keys;
pub mod workflow;

pub use action::{ActionRequest, EjsonAction, DECRYPTED_OUTPUT};
pub use config::*;
pub use errors::ActionError;
pub use executors::{ActionKind, CommandRunner, EjsonRunner, ExecutionResult};
pub use installation::{BinaryProvisioner, VersionResolver};
pub use keys::KeyInstaller;

#[cfg(test)]
pub mod test_utils;
