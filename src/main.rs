use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use ventalytics::commands::{config, demo, push, report};
use ventalytics::display;
use ventalytics::loader;
use ventalytics::reports::ReportKind;

/// Ventalytics (vl) CLI - sales analytics and reminders
#[derive(Parser)]
#[clap(name = "vl", about = "Ventalytics - sales analytics and reminders engine", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a report over a sales CSV
    Report {
        /// Path to the sales CSV (defaults to the configured data path, or
        /// the newest CSV under it when it is a directory)
        #[clap(short, long)]
        path: Option<PathBuf>,

        /// Which report to compute
        #[clap(short, long, value_enum, default_value = "overview")]
        kind: ReportKind,

        /// Output format (text, json)
        #[clap(short, long, default_value = "text")]
        format: String,

        /// Date-range preset, resolved against the data's own last date
        #[clap(long, value_enum, default_value = "todos")]
        preset: report::PresetArg,

        /// Range start for the personalizado preset (dd/mm/yyyy)
        #[clap(long)]
        desde: Option<String>,

        /// Range end for the personalizado preset (dd/mm/yyyy)
        #[clap(long)]
        hasta: Option<String>,

        /// Drop any cached copy of this dataset before loading
        #[clap(long)]
        refresh: bool,

        /// Path to the configuration file
        #[clap(short, long)]
        config: Option<PathBuf>,
    },

    /// Build the full reminders bundle and push it to the configured webhook
    Push {
        /// Path to the sales CSV (defaults to the configured data path)
        #[clap(short, long)]
        path: Option<PathBuf>,

        /// Path to the configuration file
        #[clap(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a synthetic sales CSV for trying the pipeline out
    Generate {
        /// Output file
        #[clap(short, long, default_value = "data/source.csv")]
        out: PathBuf,

        /// Number of customers
        #[clap(long, default_value_t = 25)]
        customers: usize,

        /// Number of invoices
        #[clap(long, default_value_t = 400)]
        invoices: usize,

        /// Days of history
        #[clap(long, default_value_t = 540)]
        days: i64,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Report {
            path,
            kind,
            format,
            preset,
            desde,
            hasta,
            refresh,
            config,
        } => {
            let result = config::read_config(config).and_then(|cfg| {
                let data_path = resolve_data_path(path, &cfg);
                let preset = report::resolve_preset(preset, desde.as_deref(), hasta.as_deref())?;
                report::report_command(&data_path, kind, &format, preset, refresh)
            });
            if let Err(err) = result {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
        Command::Push { path, config } => {
            let result = config::read_config(config).and_then(|cfg| {
                let data_path = resolve_data_path(path, &cfg);
                push::push_command(&data_path, &cfg)
            });
            if let Err(err) = result {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
        Command::Generate {
            out,
            customers,
            invoices,
            days,
        } => {
            if let Err(err) = demo::generate_command(&out, customers, invoices, days) {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
        Command::Version => {
            display::display_version();
        }
    }
}

/// Explicit path wins; otherwise the configured data path, and when that
/// points at a directory, the newest CSV inside it.
fn resolve_data_path(explicit: Option<PathBuf>, cfg: &config::AppConfig) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let configured = PathBuf::from(&cfg.data_path);
    if configured.is_dir() {
        if let Some(newest) = loader::discover_latest_csv(&configured) {
            return newest;
        }
    }
    configured
}
