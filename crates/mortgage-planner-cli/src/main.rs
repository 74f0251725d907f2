mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use mortgage_planner_core::PlannerConfig;

use commands::affordability::AffordabilityArgs;
use commands::comparison::{BanksArgs, CompareArgs};
use commands::mortgage::{AmortizeArgs, CostsArgs, MortgageArgs};

/// Malaysian mortgage planning calculations
#[derive(Parser)]
#[command(
    name = "mplan",
    version,
    about = "Malaysian mortgage planning calculations",
    long_about = "Plan a Malaysian home loan with decimal precision: monthly instalments, \
                  stamp duty and other upfront costs, DSR-based affordability, and \
                  side-by-side bank package comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML or JSON file overriding fee schedules, lending policy or the bank catalog
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Instalment, upfront costs and cash required for a property purchase
    Mortgage(MortgageArgs),
    /// Level monthly instalment for a loan
    Amortize(AmortizeArgs),
    /// Stamp duty, legal fees, valuation fee and MRTA premium
    Costs(CostsArgs),
    /// Maximum loan and property price under the DSR cap
    Affordability(AffordabilityArgs),
    /// Compare up to three bank packages on the same loan
    Compare(CompareArgs),
    /// List the bank packages available for comparison
    Banks(BanksArgs),
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

fn init_tracing(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("mplan={level},mortgage_planner_core={level}").into()
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(
    command: Commands,
    config: &PlannerConfig,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    match command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args, config),
        Commands::Amortize(args) => commands::mortgage::run_amortize(args),
        Commands::Costs(args) => commands::mortgage::run_costs(args, config),
        Commands::Affordability(args) => commands::affordability::run_affordability(args, config),
        Commands::Compare(args) => commands::comparison::run_compare(args, config),
        Commands::Banks(args) => commands::comparison::run_banks(args, config),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Version => {
            println!("mplan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        command => input::config::load_config(cli.config.as_deref())
            .and_then(|config| dispatch(command, &config)),
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
