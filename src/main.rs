use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use eurofx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Override the configured base currency
    #[arg(short, long, global = true, value_parser = parse_currency)]
    base: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List all currencies with rates against the base currency
    Currencies,
    /// Show the configured base currency
    Base,
    /// Convert an amount between two currencies
    Convert {
        #[arg(value_parser = parse_currency)]
        from: String,
        #[arg(value_parser = parse_currency)]
        to: String,
        amount: f64,
        /// Decimal digits to round to (default 4)
        #[arg(short, long)]
        accuracy: Option<u32>,
    },
    /// Show the exchange rate between two currencies
    Rate {
        #[arg(value_parser = parse_currency)]
        from: String,
        #[arg(value_parser = parse_currency)]
        to: String,
        /// Decimal digits to round to (default 4)
        #[arg(short, long)]
        accuracy: Option<u32>,
    },
    /// Show currency metadata, for one currency or all of them
    Metadata {
        #[arg(value_parser = parse_currency)]
        currency: Option<String>,
    },
}

impl From<Commands> for eurofx::AppCommand {
    fn from(cmd: Commands) -> eurofx::AppCommand {
        match cmd {
            Commands::Currencies => eurofx::AppCommand::Currencies,
            Commands::Base => eurofx::AppCommand::Base,
            Commands::Convert {
                from,
                to,
                amount,
                accuracy,
            } => eurofx::AppCommand::Convert {
                from,
                to,
                amount,
                accuracy,
            },
            Commands::Rate { from, to, accuracy } => {
                eurofx::AppCommand::Rate { from, to, accuracy }
            }
            Commands::Metadata { currency } => eurofx::AppCommand::Metadata { currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn parse_currency(value: &str) -> Result<String, String> {
    let code = value.trim().to_ascii_uppercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("invalid currency code: {value}"));
    }
    Ok(code)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = eurofx::RunOptions {
        base_currency: cli.base,
        json: cli.json,
    };

    let result = match cli.command {
        Some(Commands::Setup) => eurofx::cli::setup::setup(),
        Some(cmd) => {
            eurofx::run_command(cmd.into(), cli.config_path.as_deref(), &options).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
