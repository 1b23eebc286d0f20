mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::breakeven::BreakevenArgs;
use commands::customers::CustomersArgs;
use commands::metrics::MetricsArgs;
use commands::sample::SampleArgs;
use commands::transactions::TransactionsArgs;

/// Small-business dashboard metrics and break-even analysis
#[derive(Parser)]
#[command(
    name = "bizdash",
    version,
    about = "Small-business dashboard metrics and break-even analysis",
    long_about = "Rolls transaction records up into month-over-month revenue, expense, \
                  customer and marketing metrics, and runs break-even analysis with \
                  contribution margin and margin of safety."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Current vs prior month metrics from transaction records
    Metrics(MetricsArgs),
    /// Break-even point, contribution margin and margin of safety
    Breakeven(BreakevenArgs),
    /// Per-client spend, visits and activity status
    Customers(CustomersArgs),
    /// Filtered transaction list with the same-day summary
    Transactions(TransactionsArgs),
    /// Print the sample transaction set
    Sample(SampleArgs),
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

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bizdash_core=debug,bizdash_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Metrics(args) => commands::metrics::run_metrics(args),
        Commands::Breakeven(args) => commands::breakeven::run_breakeven(args),
        Commands::Customers(args) => commands::customers::run_customers(args),
        Commands::Transactions(args) => commands::transactions::run_transactions(args),
        Commands::Sample(args) => commands::sample::run_sample(args),
        Commands::Version => {
            println!("bizdash {}", env!("CARGO_PKG_VERSION"));
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
