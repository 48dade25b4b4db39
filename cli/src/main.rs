//! CLI entry point for the intraday P&L report.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use intraday_pnl_cli::config::Config;
use intraday_pnl_cli::error::{Error, Result};
use intraday_pnl_cli::locate;
use intraday_pnl_cli::run::{self, RunOptions};

#[derive(Parser)]
#[command(name = "intraday-pnl")]
#[command(about = "Realized intraday P&L after charges, from a broker order log")]
#[command(version)]
struct Cli {
    /// Order log CSV (default: orders.csv next to this binary, then in ~/Downloads)
    orders: Option<PathBuf>,

    /// Path to a TOML config overriding the file name, row filter or charge rates
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Disable colour in the text report
    #[arg(long)]
    plain: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = report(&cli) {
        match &e {
            Error::Report(intraday_pnl::Error::Validation(_)) => {
                eprintln!("\nAborted: {e}. Check the order log for a missing or partial exit.");
            }
            _ => eprintln!("Error: {e}"),
        }
        process::exit(e.exit_code());
    }
}

fn report(cli: &Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;

    let explicit = cli.orders.as_deref().or(config.input.path.as_deref());
    let orders = locate::resolve(explicit, &config.input.file_name)?;

    let opts = RunOptions {
        json: cli.json,
        plain: cli.plain,
    };
    let stdout = io::stdout();
    run::run(&config, &orders, &opts, &mut stdout.lock())?;
    Ok(())
}
