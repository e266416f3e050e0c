//! banco-load entry point.

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use banco_load::cli::{Cli, Command};
use banco_load::{config, run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(if args.verbose {
                    Level::DEBUG
                } else {
                    Level::INFO
                })
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;

            let passed = run::execute(args).await?;
            if !passed {
                std::process::exit(1);
            }
        }
        Command::Profiles => {
            config::print_profiles();
        }
    }

    Ok(())
}
