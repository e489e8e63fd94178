//! Join command - runs the signup workflow from the terminal

use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;

use crate::config::{AppConfig, LoggingConfig, RegistrationBackend, StorageBackend};
use crate::domain::signup::{SignupWorkflow, SubmitOutcome};
use crate::domain::waitlist::{RegistrationService, TargetLanguage};
use crate::infrastructure::logging;
use crate::infrastructure::notification::ConsoleNotifier;
use crate::infrastructure::registration::RemoteRegistrationClient;

#[derive(Args, Clone, Debug)]
pub struct JoinArgs {
    /// Email address to put on the waitlist
    #[arg(long)]
    pub email: String,

    /// Language you want to learn (spanish, french, japanese, ...)
    #[arg(long)]
    pub language: Option<String>,

    /// Register against a running server instead of the configured backend
    #[arg(long)]
    pub api_url: Option<String>,
}

pub async fn run(args: JoinArgs) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&LoggingConfig {
        level: "warn".to_string(),
        format: config.logging.format,
    });

    let target_language = TargetLanguage::parse_optional(args.language.as_deref())?;
    let registration = registration_for(&args, &config).await?;

    let workflow = SignupWorkflow::new(registration, Arc::new(ConsoleNotifier::new()))
        .with_submit_timeout(config.registration.submit_timeout());
    workflow.set_email(args.email);
    workflow.set_target_language(target_language);

    Ok(exit_code(&workflow.submit().await))
}

async fn registration_for(
    args: &JoinArgs,
    config: &AppConfig,
) -> anyhow::Result<Arc<dyn RegistrationService>> {
    match &args.api_url {
        Some(url) => Ok(Arc::new(RemoteRegistrationClient::new(
            url,
            config.registration.remote_timeout(),
        )?)),
        None if is_ephemeral(config) => anyhow::bail!(
            "the local backend keeps entries in memory and would lose this signup on exit; \
             pass --api-url or configure postgres storage"
        ),
        None => Ok(crate::create_app_state_with_config(config).await?.registration),
    }
}

/// Local registration over in-memory storage dies with the process
fn is_ephemeral(config: &AppConfig) -> bool {
    config.registration.backend == RegistrationBackend::Local
        && config.storage.backend == StorageBackend::Memory
}

fn exit_code(outcome: &SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Registered(record) => {
            if !record.newly_created {
                println!("{} was already on the waitlist.", record.email);
            }
            ExitCode::SUCCESS
        }
        SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => {
            ExitCode::FAILURE
        }
    }
}
