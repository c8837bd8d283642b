//! CLI argument definitions for `carconfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use carconfig_observability::LogFormat;

#[derive(Parser)]
#[command(
    name = "carconfig",
    version,
    about = "Browse vehicle catalogs and price configurations",
    long_about = "Browse vehicle catalogs and price configurations.\n\n\
                  Catalogs are read from <CATALOG_DIR>/<category>.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding one JSON catalog per category.
    #[arg(long = "catalog-dir", value_name = "DIR", global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Multiplier applied to catalog amounts (overrides CARCONFIG_PRICE_UNIT).
    #[arg(
        long = "price-unit",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    pub price_unit: Option<u32>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        env = "CARCONFIG_LOG_FORMAT",
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// List vehicle categories.
    Categories,

    /// Walk a category's catalog one level at a time.
    Browse(BrowseArgs),

    /// Price a full configuration and export it.
    Build(BuildArgs),

    /// Print a category's catalog document, optionally replacing it first.
    Catalog(CatalogArgs),
}

#[derive(Parser)]
pub struct CatalogArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Edited catalog document to validate and apply for this run.
    #[arg(long, value_name = "FILE")]
    pub apply: Option<PathBuf>,

    /// Write the document here instead of stdout. A directory receives
    /// car-data-input.json.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct BrowseArgs {
    /// Vehicle category, e.g. RV.
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, requires = "model")]
    pub powertrain: Option<String>,

    /// Show colors and options of this trim.
    #[arg(long, requires = "powertrain")]
    pub trim: Option<String>,
}

#[derive(Parser)]
pub struct BuildArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(long)]
    pub model: String,

    #[arg(long)]
    pub powertrain: String,

    #[arg(long)]
    pub trim: String,

    #[arg(long)]
    pub color: Option<String>,

    /// Option to check; repeat for several. Applied in the given order.
    #[arg(long = "option", value_name = "NAME")]
    pub options: Vec<String>,

    /// Write the export JSON here instead of stdout. A directory receives
    /// the default export file name.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
