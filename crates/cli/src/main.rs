//! prkey CLI - pull request component keys

use anyhow::Result;
use clap::Parser;
use prkey_cli::commands::{self, ExitStatus};
use prkey_cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let status = match cli.command {
        Some(Commands::Init { ref path }) => {
            commands::init::run(path.as_deref())?;
            ExitStatus::Success
        }
        Some(Commands::Map { ref path }) => commands::map::run(path.as_deref(), &cli)?,
        Some(Commands::Resolve { ref query }) => commands::resolve::run(query, &cli)?,
        Some(Commands::Annotate {
            ref findings,
            post,
            ref fail_on,
        }) => commands::annotate::run(findings, post, fail_on.as_deref(), &cli)?,
        None => commands::map::run(None, &cli)?,
    };

    std::process::exit(status.code());
}
