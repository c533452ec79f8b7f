//! # aerosure CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

use aerosure_cli::{commands, store};
use aerosure_core::Principal;

/// AeroSure Stack CLI — airline-insurance governance and escrow engine.
///
/// Manages airline membership and consensus voting, flight records,
/// insurance policies, and passenger balances against a JSON state file.
#[derive(Parser, Debug)]
#[command(name = "aerosure", version, about)]
struct Cli {
    /// Path to the engine state file.
    #[arg(long, global = true, default_value = "aerosure.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create a new engine state file.
    Init {
        /// The owner principal.
        #[arg(long)]
        owner: Principal,
        /// The seeded first airline.
        #[arg(long)]
        first_airline: Principal,
        /// Optional JSON config overriding default engine parameters.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize the engine state.
    Status,
    /// Operational switch and authorized-caller management.
    Ops(commands::OpsArgs),
    /// Airline registration, funding, and voting.
    Airline(commands::AirlineArgs),
    /// Flight registration and status reads.
    Flight(commands::FlightArgs),
    /// Oracle status reports.
    Oracle(commands::OracleArgs),
    /// Insurance purchase, payout, and withdrawal.
    Insurance(commands::InsuranceArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            owner,
            first_airline,
            config,
        } => {
            store::init(&cli.state, owner, first_airline, config.as_deref())?;
            println!("initialized {} (owner {owner})", cli.state.display());
            Ok(())
        }
        Commands::Status => commands::run_status(&cli.state),
        Commands::Ops(args) => commands::run_ops(&cli.state, args),
        Commands::Airline(args) => commands::run_airline(&cli.state, args),
        Commands::Flight(args) => commands::run_flight(&cli.state, args),
        Commands::Oracle(args) => commands::run_oracle(&cli.state, args),
        Commands::Insurance(args) => commands::run_insurance(&cli.state, args),
    }
}
