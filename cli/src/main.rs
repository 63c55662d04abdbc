mod cli;
mod commands;
mod config;
mod error;
mod util;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse_from(wild::args_os());

    match cli.command {
        Commands::Anonymise(args) => commands::anonymise(args)?,
        Commands::Dataset(args) => commands::dataset(args)?,
        Commands::Convert(args) => commands::convert(args)?,
        Commands::Fields(args) => commands::fields(args)?,
    };

    Ok(())
}
