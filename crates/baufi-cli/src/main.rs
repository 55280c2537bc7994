mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::{CalculateArgs, ValidateArgs};
use commands::invest::InvestArgs;
use commands::offers::OffersArgs;
use commands::scenario::ScenarioCommand;

/// Property financing calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "baufi",
    version,
    about = "Property financing calculations with decimal precision",
    long_about = "A CLI for property financing analysis: amortization schedules, \
                  derived metrics (effective rate, LTV, Tilgung), deterministic \
                  bank offer comparison, rental investment metrics, and named \
                  scenario management."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a parameter set for errors and warnings
    Validate(ValidateArgs),
    /// Run the full financing calculation
    Calculate(CalculateArgs),
    /// Compare deterministic competitor bank offers
    Offers(OffersArgs),
    /// Rental investment metrics for a financing case
    Invest(InvestArgs),
    /// Manage saved financing scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Validate(args) => commands::calculate::run_validate(args),
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Offers(args) => commands::offers::run_offers(args),
        Commands::Invest(args) => commands::invest::run_invest(args),
        Commands::Scenario(cmd) => commands::scenario::run_scenario(cmd),
        Commands::Version => {
            println!("baufi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
