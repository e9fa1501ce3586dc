//! Input and settings resolution from the process environment
//!
//! Workflow inputs follow the runner convention: input `file_path` arrives as
//! `INPUT_FILE_PATH`. Settings overrides use an `EJSON_ACTION_` prefix and exist
//! so self-hosted mirrors and tests can redirect network and filesystem access.

use crate::config::types::*;
use crate::errors::ActionError;
use std::env;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "EJSON_ACTION_API_URL";
pub const ENV_WEB_URL: &str = "EJSON_ACTION_WEB_URL";
pub const ENV_REPOSITORY: &str = "EJSON_ACTION_REPOSITORY";
pub const ENV_INSTALL_DIR: &str = "EJSON_ACTION_INSTALL_DIR";
pub const ENV_KEY_DIR: &str = "EJSON_ACTION_KEY_DIR";
pub const ENV_STEP_DEBUG: &str = "ACTIONS_STEP_DEBUG";

/// Reads workflow step inputs
pub struct InputLoader;

impl InputLoader {
    /// Name of the environment variable carrying input `name`
    pub fn env_key(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }

    /// Value of input `name`, trimmed; empty when unset
    pub fn get_input(name: &str) -> String {
        env::var(Self::env_key(name))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

impl ActionInputs {
    pub fn from_env() -> Self {
        Self {
            action: InputLoader::get_input("action"),
            file_path: InputLoader::get_input("file_path"),
            private_key: InputLoader::get_input("private_key"),
            out_file: InputLoader::get_input("out_file"),
            ejson_version: InputLoader::get_input("ejson_version"),
        }
    }
}

impl ActionSettings {
    /// Defaults overlaid with any `EJSON_ACTION_*` overrides, then validated
    pub fn from_env() -> Result<Self, ActionError> {
        let mut settings = Self::default();

        if let Some(api) = non_empty_var(ENV_API_URL) {
            settings.source.api_base = api;
        }
        if let Some(web) = non_empty_var(ENV_WEB_URL) {
            settings.source.web_base = web;
        }
        if let Some(repository) = non_empty_var(ENV_REPOSITORY) {
            let (owner, repo) = parse_repository(&repository)?;
            settings.source.owner = owner;
            settings.source.repo = repo;
        }
        if let Some(dir) = non_empty_var(ENV_INSTALL_DIR) {
            settings.paths.install_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty_var(ENV_KEY_DIR) {
            settings.paths.key_dir = PathBuf::from(dir);
        }
        settings.debug = is_step_debug();

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ActionError> {
        for (label, url) in [
            ("API base URL", &self.source.api_base),
            ("web base URL", &self.source.web_base),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ActionError::ConfigError(format!(
                    "{} must be an http(s) URL, got '{}'",
                    label, url
                )));
            }
        }
        if self.source.owner.is_empty() || self.source.repo.is_empty() {
            return Err(ActionError::ConfigError(
                "Release repository owner and name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Step debug logging is only on for the exact string `true`
pub fn is_step_debug() -> bool {
    env::var(ENV_STEP_DEBUG).map(|v| v == "true").unwrap_or(false)
}

fn parse_repository(input: &str) -> Result<(String, String), ActionError> {
    match input.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ActionError::ConfigError(format!(
            "Invalid repository '{}', expected owner/repo",
            input
        ))),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
