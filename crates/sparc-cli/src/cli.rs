use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use uuid::Uuid;

use sparc_core::models::task::TaskCode;
use sparc_export::file::ExportFormat;
use sparc_export::range::ExportRange;

#[derive(Debug, Parser)]
#[command(
    name = "sparc",
    version,
    about = "Log stewardship time, total it by task, export it, and score the burnout survey"
)]
pub struct Cli {
    /// Config file to use instead of the per-user default.
    #[arg(long, global = true, env = "SPARC_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a JSON array of 12 survey responses.
    Score {
        #[arg(value_name = "FILE")]
        responses: PathBuf,
        /// Print a per-domain text report instead of JSON.
        #[arg(long)]
        summary: bool,
    },

    /// Minutes per task for one day.
    Totals {
        #[arg(value_name = "FILE")]
        entries: PathBuf,
        /// Day to total. Defaults to today.
        #[arg(long)]
        date: Option<Date>,
        /// Print totals for every day that has entries instead.
        #[arg(long, conflicts_with = "date")]
        history: bool,
    },

    /// Write entries to a CSV or XLSX file.
    Export {
        #[arg(value_name = "FILE")]
        entries: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[arg(long, value_enum, default_value_t = RangeArg::All)]
        range: RangeArg,
        /// Output directory. Defaults to `export_dir` from the config.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Treat the input as loosely-typed records and keep unparseable
        /// values as text.
        #[arg(long)]
        raw: bool,
        /// Reference date for the range and filename. Defaults to today.
        #[arg(long)]
        today: Option<Date>,
    },

    /// Append a new entry to an entries file, creating it if needed.
    Log {
        #[arg(value_name = "FILE")]
        entries: PathBuf,
        /// Task code, e.g. PAF or OTHER.
        #[arg(long)]
        task: TaskCode,
        /// Label for OTHER tasks.
        #[arg(long)]
        other: Option<String>,
        #[arg(long)]
        minutes: u32,
        /// Defaults to today.
        #[arg(long)]
        date: Option<Date>,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Copy entries under new ids, optionally onto another day.
    Duplicate {
        #[arg(value_name = "FILE")]
        entries: PathBuf,
        #[arg(required = true)]
        ids: Vec<Uuid>,
        #[arg(long)]
        onto: Option<Date>,
    },

    /// Remove entries by id.
    Delete {
        #[arg(value_name = "FILE")]
        entries: PathBuf,
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },

    /// Inspect or manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective config and where it was loaded from.
    Show,
    /// Write the default config.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Delete the config file.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    Today,
    Week,
    All,
}

impl From<RangeArg> for ExportRange {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::Today => ExportRange::Today,
            RangeArg::Week => ExportRange::Week,
            RangeArg::All => ExportRange::All,
        }
    }
}
