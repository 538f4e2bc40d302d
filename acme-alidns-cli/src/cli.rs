//! Command-line arguments

use std::path::PathBuf;

use acme_alidns_core::DEFAULT_PROPAGATION_SECONDS;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "acme-alidns", version)]
#[command(
    about = "Publish and remove ACME DNS-01 TXT records on Alibaba Cloud DNS",
    long_about = "Publish and remove ACME DNS-01 TXT records on Alibaba Cloud DNS.\n\n\
                  Usable directly as certbot hooks:\n  \
                  certbot certonly --manual --preferred-challenges dns \\\n    \
                  --manual-auth-hook 'acme-alidns publish' \\\n    \
                  --manual-cleanup-hook 'acme-alidns cleanup'"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the challenge TXT record and wait for propagation
    Publish(PublishArgs),
    /// Delete the challenge TXT record (never fails)
    Cleanup(ChallengeArgs),
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    #[command(flatten)]
    pub challenge: ChallengeArgs,

    /// Seconds to wait for DNS propagation after the record is created
    #[arg(long, default_value_t = DEFAULT_PROPAGATION_SECONDS)]
    pub propagation_seconds: u64,
}

#[derive(Args, Debug)]
pub struct ChallengeArgs {
    /// Domain being validated
    #[arg(long, env = "CERTBOT_DOMAIN")]
    pub domain: String,

    /// Validation token to publish
    #[arg(long, env = "CERTBOT_VALIDATION")]
    pub validation: String,

    /// AliCloud credentials INI file
    #[arg(short, long, env = "ALIDNS_CREDENTIALS")]
    pub credentials: PathBuf,

    /// Retries for transient API failures (0 disables)
    #[arg(long, default_value_t = 2)]
    pub max_retries: u32,

    /// Override the Alidns API endpoint
    #[arg(long, env = "ALIDNS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Command {
    pub fn challenge(&self) -> &ChallengeArgs {
        match self {
            Self::Publish(args) => &args.challenge,
            Self::Cleanup(args) => args,
        }
    }
}
