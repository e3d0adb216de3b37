//! Command-line host for the person registry
//!
//! Runs single contract invocations against a ledger snapshot kept on disk.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use registry_cli::commands::{common, config, history, invoke};
use registry_cli::CliContext;

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Person registry with organization-private PAN card details", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "registry.toml")]
    config: PathBuf,

    /// Ledger snapshot file
    #[arg(short, long, global = true, default_value = "registry-state.json")]
    state: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a contract function
    Invoke {
        /// Calling principal, resolved through `[identity.members]`
        #[arg(short, long, default_value = "admin")]
        principal: String,

        /// Function name, e.g. createPerson
        function: String,

        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the history of a person
    History {
        /// Calling principal
        #[arg(short, long, default_value = "admin")]
        principal: String,

        /// Person key
        key: String,
    },

    /// Print the effective configuration
    Config,
}

fn init_logging(verbose: bool, level: &str) {
    let default = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = common::load_config(&cli.config)?;
    init_logging(cli.verbose, &settings.logging.level);
    let ctx = CliContext::new(settings, cli.state);

    match cli.command {
        Commands::Invoke {
            principal,
            function,
            args,
        } => {
            let payload = invoke::run(&ctx, &principal, &function, &args)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&payload)?;
            if !payload.is_empty() {
                writeln!(stdout)?;
            }
        }

        Commands::History { principal, key } => {
            println!("{}", history::run(&ctx, &principal, &key)?);
        }

        Commands::Config => {
            print!("{}", config::run(&ctx)?);
        }
    }

    Ok(())
}
