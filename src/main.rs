use clap::Parser;
use signpost::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signpost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, name }) => {
            signpost::cli::init::run(path, name)?;
        }
        Some(Commands::Migrate) => {
            signpost::cli::migrate::run(&cli.config)?;
        }
        Some(Commands::Slug { command }) => {
            signpost::cli::slug::run(command)?;
        }
        Some(Commands::Visitors { command }) => {
            signpost::cli::visitors::run(&cli.config, command)?;
        }
        None => {
            // No subcommand provided, print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
