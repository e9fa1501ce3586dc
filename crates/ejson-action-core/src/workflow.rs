//! GitHub Actions workflow-command surface
//!
//! Step outputs go to the file named by `GITHUB_OUTPUT` when the runner provides
//! one, otherwise through the legacy `::set-output` command on stdout.
//! Annotations (`::error::`, `::debug::`) are always written to stdout.

use crate::errors::ActionError;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Destination for named step outputs
pub trait OutputSink: Send + Sync {
    fn set_output(&self, name: &str, value: &str) -> Result<(), ActionError>;
}

/// Output sink speaking the runner's file and command protocols
#[derive(Debug, Clone, Default)]
pub struct GitHubOutputs {
    output_file: Option<PathBuf>,
}

impl GitHubOutputs {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    pub fn from_env() -> Self {
        let output_file = env::var(ENV_GITHUB_OUTPUT)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(output_file)
    }
}

impl OutputSink for GitHubOutputs {
    fn set_output(&self, name: &str, value: &str) -> Result<(), ActionError> {
        match &self.output_file {
            Some(path) => {
                let entry = file_command_entry(name, value)?;
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(entry.as_bytes())?;
                Ok(())
            }
            None => {
                println!("{}", command("set-output", &[("name", name)], value));
                Ok(())
            }
        }
    }
}

/// Keeps outputs in memory; used when the caller only wants the return value
#[derive(Debug, Default)]
pub struct MemoryOutputs {
    values: Mutex<Vec<(String, String)>>,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.values
            .lock()
            .ok()?
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl OutputSink for MemoryOutputs {
    fn set_output(&self, name: &str, value: &str) -> Result<(), ActionError> {
        self.values
            .lock()
            .map_err(|e| ActionError::IoError(e.to_string()))?
            .push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// `name<<delimiter` heredoc block appended to the output file
pub fn file_command_entry(name: &str, value: &str) -> Result<String, ActionError> {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(ActionError::IoError(format!(
            "Unexpected input: name or value contains the delimiter {}",
            delimiter
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Formats `::command key=value::message` with the runner's escaping rules
pub fn command(name: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", name);
    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape_property(v)))
            .collect();
        line.push(' ');
        line.push_str(&props.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

pub fn error(message: &str) {
    println!("{}", command("error", &[], message));
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
