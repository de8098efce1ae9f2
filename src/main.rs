//! Sirius user management command line
//!
//! Runs the change-password flow against the configured Sirius API:
//! reads the three password fields from stdin, submits them once and prints
//! either the success banner or the error summary.

use anyhow::{bail, Context, Result};
use sirius_user_management::{
    AppConfig, FormController, FormDefinition, SiriusClient, SubmissionCoordinator,
    SubmissionOutcome,
};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sirius_user_management=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match std::env::args().nth(1).as_deref() {
        Some("change-password") => {}
        Some(other) => bail!("unknown command `{other}`, expected `change-password`"),
        None => bail!("usage: sirius-user-management change-password"),
    }

    let config = AppConfig::load().context("failed to load configuration")?;
    let client = SiriusClient::from_config(&config)?;
    tracing::info!(sirius_url = client.base_url(), "using Sirius API");

    let mut form = FormController::new(FormDefinition::change_password());
    read_fields(&mut form).await?;

    let coordinator = SubmissionCoordinator::new(Arc::new(client));
    let presenter = tokio::spawn(present(coordinator.subscribe()));

    let outcome = coordinator.submit(&mut form).await?;

    // Closing the channel lets the presenter finish
    drop(coordinator);
    presenter.await?;

    if !outcome.is_success() {
        bail!("password was not changed");
    }

    Ok(())
}

async fn read_fields(form: &mut FormController) -> Result<()> {
    let specs = form.definition().fields.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for spec in specs.iter().filter(|s| !s.is_hidden) {
        eprint!("{}: ", spec.label);
        let value = lines.next_line().await?.unwrap_or_default();
        form.set_field(&spec.name, value)?;
    }

    Ok(())
}

/// Render every published outcome until the coordinator goes away
async fn present(mut outcomes: watch::Receiver<SubmissionOutcome>) {
    while outcomes.changed().await.is_ok() {
        match &*outcomes.borrow_and_update() {
            SubmissionOutcome::NotSubmitted => {}
            SubmissionOutcome::Succeeded => println!("Success: password changed"),
            SubmissionOutcome::Failed(message) => {
                println!("There is a problem");
                for line in message.lines() {
                    println!("  - {line}");
                }
            }
        }
    }
}
