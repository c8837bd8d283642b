//! `carconfig` command-line entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use carconfig_core::PriceUnit;
use carconfig_infra::{Configurator, Settings};

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_browse, run_build, run_catalog, run_categories};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    carconfig_observability::init(cli.log_format.into());

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = settings_from_cli(cli)?;
    tracing::debug!(
        catalog_dir = %settings.catalog_dir.display(),
        price_unit = settings.price_unit.multiplier(),
        "settings resolved"
    );
    let service = Configurator::from_settings(&settings);

    match &cli.command {
        Command::Categories => run_categories(&service),
        Command::Browse(args) => run_browse(&service, args).await,
        Command::Build(args) => run_build(&service, args).await,
        Command::Catalog(args) => run_catalog(&service, args).await,
    }
}

/// Environment first, then CLI flags on top.
fn settings_from_cli(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::from_env().context("read settings from environment")?;
    if let Some(dir) = &cli.catalog_dir {
        settings.catalog_dir = dir.clone();
    }
    if let Some(unit) = cli.price_unit {
        settings.price_unit = PriceUnit::new(unit).context("--price-unit must be positive")?;
    }
    Ok(settings)
}
