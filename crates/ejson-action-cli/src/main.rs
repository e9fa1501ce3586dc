use anyhow::Result;
use clap::Parser;
use ejson_action_core::config::{is_step_debug, ActionInputs, ActionSettings};
use ejson_action_core::workflow::{self, GitHubOutputs};
use ejson_action_core::EjsonAction;
use log::LevelFilter;
use std::sync::Arc;

/// Step inputs are read from `INPUT_*` variables; flags take precedence.
#[derive(Parser, Debug)]
#[clap(
    name = "ejson-action",
    author,
    version,
    about = "Encrypt or decrypt ejson secrets files in CI"
)]
struct Cli {
    #[clap(long, help = "Action to run: encrypt or decrypt")]
    action: Option<String>,

    #[clap(long, help = "Path to the ejson secrets file")]
    file_path: Option<String>,

    #[clap(long, help = "Private key used for decryption")]
    private_key: Option<String>,

    #[clap(long, help = "Also write decrypted output to this file")]
    out_file: Option<String>,

    #[clap(long, help = "ejson release to install: empty, latest, or a version")]
    ejson_version: Option<String>,

    #[clap(long, short, env = "EJSON_ACTION_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn inputs(&self, mut inputs: ActionInputs) -> ActionInputs {
        let overrides = [
            (&self.action, &mut inputs.action),
            (&self.file_path, &mut inputs.file_path),
            (&self.private_key, &mut inputs.private_key),
            (&self.out_file, &mut inputs.out_file),
            (&self.ejson_version, &mut inputs.ejson_version),
        ];
        for (flag, input) in overrides {
            if let Some(value) = flag {
                *input = value.trim().to_string();
            }
        }
        inputs
    }

    fn log_level(&self, step_debug: bool) -> LevelFilter {
        if step_debug {
            LevelFilter::Debug
        } else {
            self.log_level.parse().unwrap_or(LevelFilter::Info)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so workflow commands on stdout stay parseable
    env_logger::Builder::new()
        .filter_level(cli.log_level(is_step_debug()))
        .target(env_logger::Target::Stderr)
        .init();

    let inputs = cli.inputs(ActionInputs::from_env());

    if let Err(e) = run(&inputs).await {
        workflow::error(&format!(
            "[ERROR] Failure on ejson {}: {}",
            inputs.action, e
        ));
        std::process::exit(1);
    }
}

async fn run(inputs: &ActionInputs) -> Result<()> {
    let settings = ActionSettings::from_env()?;
    let action = EjsonAction::new(inputs, settings)?
        .with_outputs(Arc::new(GitHubOutputs::from_env()));

    let output = action.run().await?;
    log::info!("ejson {} finished", inputs.action);
    log::debug!("ejson {} output:\n{}", inputs.action, output);
    Ok(())
}
