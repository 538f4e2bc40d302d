//! certbot manual hook for Alibaba Cloud DNS
//!
//! `acme-alidns publish` creates `_acme-challenge.<domain>` and waits for it to
//! propagate; `acme-alidns cleanup` removes it again. Both read `CERTBOT_DOMAIN`
//! and `CERTBOT_VALIDATION` when the flags are omitted.

mod cli;

use std::process::ExitCode;
use std::time::Duration;

use acme_alidns_core::{AliyunGatewayFactory, Challenge, DnsAuthenticator};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.command.challenge().verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

// stdout stays clean for certbot; everything goes to stderr
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(default_filter(level))
        .init();
}

// RUST_LOG wins when set; `level` only fills in the default.
fn default_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let args = cli.command.challenge();

    let factory = AliyunGatewayFactory::new(args.max_retries);
    let mut authenticator = DnsAuthenticator::new(factory);
    if let Some(endpoint) = &args.endpoint {
        authenticator = authenticator.with_endpoint(endpoint);
    }
    authenticator
        .setup_credentials(&args.credentials)
        .with_context(|| {
            format!(
                "failed to load credentials from {}",
                args.credentials.display()
            )
        })?;

    let challenge = Challenge::new(&args.domain, &args.validation);

    match &cli.command {
        Command::Publish(publish) => {
            let authenticator = authenticator
                .with_propagation_delay(Duration::from_secs(publish.propagation_seconds));
            tracing::info!("Publishing {}", challenge.validation_name);
            // failures are already logged by the authenticator
            match authenticator.perform_all(std::slice::from_ref(&challenge)).await {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Command::Cleanup(_) => {
            tracing::info!("Cleaning up {}", challenge.validation_name);
            authenticator.cleanup_all(std::slice::from_ref(&challenge)).await;
            Ok(ExitCode::SUCCESS)
        }
    }
}
