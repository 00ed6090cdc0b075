mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{CalculateArgs, CalculateEmiArgs, ExportArgs, ScheduleArgs};

/// Loan EMI and amortization schedule calculations
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and amortization schedule calculations",
    long_about = "Computes the equated monthly installment of a fixed-rate loan \
                  with decimal precision, prints the monthly or yearly amortization \
                  schedule and exports it as CSV. Set RUST_LOG=debug for diagnostics."
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
    /// Installment, totals and full schedule
    Calculate(CalculateArgs),
    /// Print the monthly or yearly schedule
    Schedule(ScheduleArgs),
    /// Export the monthly schedule as CSV
    Export(ExportArgs),
    /// Answer a calculate_emi request body with the response envelope
    CalculateEmi(CalculateEmiArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::loan::run_calculate(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Export(args) => commands::loan::run_export(args),
        Commands::CalculateEmi(args) => commands::loan::run_calculate_emi(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
