use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use metadata_core::Transport;
use std::io;

mod auth;
mod client;
mod commands;
mod utils;

use auth::CfConfig;
use client::{ApiClient, CfCurl};
use commands::Command;

#[derive(Parser)]
#[command(
    name = "cf-metadata",
    version,
    about = "View and modify labels and annotations on platform resources",
    long_about = "View and modify labels and annotations on v3 platform resources\n\n\
                  Examples:\n  \
                  cf-metadata labels app myapp\n  \
                  cf-metadata labels app myapp env=prod tier-\n  \
                  cf-metadata annotations space dev contact=ops@example.com\n  \
                  cf-metadata metadata org acme",
    after_help = "Use 'cf-metadata <command> --help' for more information about a command."
)]
struct Cli {
    /// How API requests are sent
    #[arg(
        long,
        global = true,
        value_enum,
        env = "CF_METADATA_TRANSPORT",
        default_value = "cf"
    )]
    transport: TransportKind,

    /// Host CLI binary used by the cf transport
    #[arg(long, global = true, env = "CF_METADATA_CF_BINARY", default_value = "cf")]
    cf_binary: String,

    /// API endpoint for the http transport (defaults to the host CLI target)
    #[arg(long, global = true, env = "CF_METADATA_API")]
    api: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "plain")]
    output: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TransportKind {
    /// Run `cf curl` and let the host CLI authenticate
    Cf,
    /// Call the API directly with the host CLI's stored token
    Http,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// View or modify annotations for an API resource
    Annotations(TargetArgs),

    /// View or modify labels for an API resource
    Labels(TargetArgs),

    /// View labels and annotations for an API resource
    Metadata(TargetArgs),
}

#[derive(Args)]
struct TargetArgs {
    /// RESOURCE RESOURCE_NAME, then any KEY=VAL or KEY- changes
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
}

impl Commands {
    fn into_invocation(self) -> (Command, Vec<String>) {
        match self {
            Commands::Annotations(target) => (Command::Annotations, target.args),
            Commands::Labels(target) => (Command::Labels, target.args),
            Commands::Metadata(target) => (Command::Metadata, target.args),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::init_logging(cli.verbose);

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        transport,
        cf_binary,
        api,
        output,
        command,
        ..
    } = cli;

    let (command, args) = command.into_invocation();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    commands::run(command, &args, output, &mut out, || {
        connect(transport, &cf_binary, api.as_deref())
    })
}

/// Build the transport. Only called once a command actually needs the API.
fn connect(kind: TransportKind, cf_binary: &str, api: Option<&str>) -> Result<Box<dyn Transport>> {
    match kind {
        TransportKind::Cf => {
            tracing::debug!(binary = cf_binary, "Using cf curl transport");
            Ok(Box::new(CfCurl::new(cf_binary)))
        }
        TransportKind::Http => {
            let config = CfConfig::load()?.ensure_logged_in()?;
            let base_url = api.unwrap_or(&config.target);
            tracing::debug!(%base_url, "Using direct http transport");

            let client = ApiClient::new(base_url, config.ssl_disabled)?
                .with_token(config.access_token.clone());
            Ok(Box::new(client))
        }
    }
}
