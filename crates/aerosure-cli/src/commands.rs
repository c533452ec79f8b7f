//! # Subcommand Arguments and Handlers
//!
//! One argument struct per subcommand group, one handler per operation.
//! Handlers load the state file, apply a single engine operation, save,
//! and print the outcome.

use std::path::Path;

use clap::{Args, Subcommand};

use aerosure_core::{Amount, FlightStatus, Principal};
use aerosure_insurance::RecordingTransfer;

use crate::store;

// ─── Operations & gateway ────────────────────────────────────────────

/// Operational switch and authorized-caller management.
#[derive(Args, Debug)]
pub struct OpsArgs {
    #[command(subcommand)]
    pub command: OpsCommand,
}

#[derive(Subcommand, Debug)]
pub enum OpsCommand {
    /// Turn the operational gate on or off.
    Set {
        /// The owner principal.
        #[arg(long)]
        caller: Principal,
        /// `true` resumes the engine, `false` pauses it.
        #[arg(long, action = clap::ArgAction::Set)]
        operational: bool,
    },
    /// Add a principal to the authorized-caller list.
    Authorize {
        /// The owner principal.
        #[arg(long)]
        caller: Principal,
        /// The principal to authorize (e.g. the oracle gateway).
        #[arg(long)]
        who: Principal,
    },
    /// Remove a principal from the authorized-caller list.
    Deauthorize {
        /// The owner principal.
        #[arg(long)]
        caller: Principal,
        /// The principal to remove.
        #[arg(long)]
        who: Principal,
    },
}

pub fn run_ops(state: &Path, args: OpsArgs) -> anyhow::Result<()> {
    let mut engine = store::load(state)?;
    match args.command {
        OpsCommand::Set {
            caller,
            operational,
        } => {
            engine.set_operating_status(&caller, operational)?;
            println!("operational: {operational}");
        }
        OpsCommand::Authorize { caller, who } => {
            engine.authorize_caller(&caller, who)?;
            println!("authorized: {who}");
        }
        OpsCommand::Deauthorize { caller, who } => {
            engine.deauthorize_caller(&caller, &who)?;
            println!("deauthorized: {who}");
        }
    }
    store::save(state, &engine)
}

// ─── Airlines ────────────────────────────────────────────────────────

/// Airline registration, funding, and consensus voting.
#[derive(Args, Debug)]
pub struct AirlineArgs {
    #[command(subcommand)]
    pub command: AirlineCommand,
}

#[derive(Subcommand, Debug)]
pub enum AirlineCommand {
    /// Register a new airline.
    Register {
        /// The sponsoring airline.
        #[arg(long)]
        caller: Principal,
        /// The airline to register.
        #[arg(long)]
        airline: Principal,
    },
    /// Stake the funding deposit.
    Fund {
        /// The airline staking its deposit.
        #[arg(long)]
        caller: Principal,
        /// Deposit in display units, e.g. `10`.
        #[arg(long)]
        amount: Amount,
    },
    /// Vote on a candidate airline's approval.
    Approve {
        /// The voting airline.
        #[arg(long)]
        caller: Principal,
        /// The candidate airline.
        #[arg(long)]
        target: Principal,
        /// `true` for affirmative, `false` for negative.
        #[arg(long, action = clap::ArgAction::Set)]
        vote: bool,
    },
    /// Show an airline's lifecycle flags and vote tally.
    Status {
        /// The airline to inspect.
        #[arg(long)]
        airline: Principal,
    },
}

pub fn run_airline(state: &Path, args: AirlineArgs) -> anyhow::Result<()> {
    let mut engine = store::load(state)?;
    match args.command {
        AirlineCommand::Register { caller, airline } => {
            let outcome = engine.register_airline(&caller, airline)?;
            if outcome.auto_approved {
                println!("registered {airline} (auto-approved under bootstrap)");
            } else {
                println!("registered {airline} (awaiting consensus votes)");
            }
            store::save(state, &engine)
        }
        AirlineCommand::Fund { caller, amount } => {
            engine.fund_airline(&caller, amount)?;
            println!("funded {caller} with {amount}");
            store::save(state, &engine)
        }
        AirlineCommand::Approve {
            caller,
            target,
            vote,
        } => {
            let info = engine.approve_airline(&caller, &target, vote)?;
            println!(
                "votes for {target}: {}/{} affirmative, approved: {}",
                info.affirmative, info.required, info.approved
            );
            store::save(state, &engine)
        }
        AirlineCommand::Status { airline } => {
            let status = engine.airline_status(&airline);
            println!(
                "{airline}: registered={} approved={} active={}",
                status.registered, status.approved, status.active
            );
            if let Ok(info) = engine.votes_info(&airline) {
                println!(
                    "votes: {}/{} affirmative, approved: {}",
                    info.affirmative, info.required, info.approved
                );
            }
            Ok(())
        }
    }
}

// ─── Flights ─────────────────────────────────────────────────────────

/// Flight registration and status reads.
#[derive(Args, Debug)]
pub struct FlightArgs {
    #[command(subcommand)]
    pub command: FlightCommand,
}

#[derive(Subcommand, Debug)]
pub enum FlightCommand {
    /// Register a flight.
    Register {
        /// The operating airline.
        #[arg(long)]
        caller: Principal,
        /// Flight code, e.g. `ND1309`.
        #[arg(long)]
        code: String,
        /// Scheduled departure, unix seconds.
        #[arg(long)]
        departure: u64,
    },
    /// Show a flight's status.
    Status {
        /// The operating airline.
        #[arg(long)]
        airline: Principal,
        /// Flight code.
        #[arg(long)]
        code: String,
        /// Scheduled departure, unix seconds.
        #[arg(long)]
        departure: u64,
    },
}

pub fn run_flight(state: &Path, args: FlightArgs) -> anyhow::Result<()> {
    match args.command {
        FlightCommand::Register {
            caller,
            code,
            departure,
        } => {
            let mut engine = store::load(state)?;
            let key = engine.register_flight(&caller, &code, departure)?;
            println!("registered {key}");
            store::save(state, &engine)
        }
        FlightCommand::Status {
            airline,
            code,
            departure,
        } => {
            let engine = store::load(state)?;
            let status = engine.flight_status(&airline, &code, departure)?;
            println!("{code} @ {departure}: {status} (code {})", status.as_code());
            Ok(())
        }
    }
}

// ─── Oracle ──────────────────────────────────────────────────────────

/// Oracle status reports.
#[derive(Args, Debug)]
pub struct OracleArgs {
    #[command(subcommand)]
    pub command: OracleCommand,
}

#[derive(Subcommand, Debug)]
pub enum OracleCommand {
    /// Apply a flight status report.
    Report {
        /// The authorized oracle principal.
        #[arg(long)]
        caller: Principal,
        /// The operating airline.
        #[arg(long)]
        airline: Principal,
        /// Flight code.
        #[arg(long)]
        code: String,
        /// Scheduled departure, unix seconds.
        #[arg(long)]
        departure: u64,
        /// Status name, e.g. `on-time` or `late-airline`.
        #[arg(long)]
        status: FlightStatus,
    },
}

pub fn run_oracle(state: &Path, args: OracleArgs) -> anyhow::Result<()> {
    let mut engine = store::load(state)?;
    match args.command {
        OracleCommand::Report {
            caller,
            airline,
            code,
            departure,
            status,
        } => {
            let report = engine.process_flight_status(&caller, &airline, &code, departure, status)?;
            println!(
                "recorded {} on {} ({} policies settled)",
                report.status, report.key, report.newly_settled
            );
        }
    }
    store::save(state, &engine)
}

// ─── Insurance ───────────────────────────────────────────────────────

/// Insurance purchase, payout, and withdrawal.
#[derive(Args, Debug)]
pub struct InsuranceArgs {
    #[command(subcommand)]
    pub command: InsuranceCommand,
}

#[derive(Subcommand, Debug)]
pub enum InsuranceCommand {
    /// Purchase (or top up) insurance on a flight.
    Buy {
        /// The insured passenger.
        #[arg(long)]
        passenger: Principal,
        /// The operating airline.
        #[arg(long)]
        airline: Principal,
        /// Flight code.
        #[arg(long)]
        code: String,
        /// Scheduled departure, unix seconds.
        #[arg(long)]
        departure: u64,
        /// Premium in display units, e.g. `0.5`.
        #[arg(long)]
        amount: Amount,
    },
    /// Credit settled payouts to the passenger's balance.
    Payout {
        /// The passenger to credit.
        #[arg(long)]
        passenger: Principal,
    },
    /// Withdraw from the passenger's balance.
    Withdraw {
        /// The withdrawing passenger.
        #[arg(long)]
        passenger: Principal,
        /// Amount in display units.
        #[arg(long)]
        amount: Amount,
    },
    /// Show the passenger's withdrawable balance.
    Balance {
        /// The passenger to inspect.
        #[arg(long)]
        passenger: Principal,
    },
}

pub fn run_insurance(state: &Path, args: InsuranceArgs) -> anyhow::Result<()> {
    match args.command {
        InsuranceCommand::Buy {
            passenger,
            airline,
            code,
            departure,
            amount,
        } => {
            let mut engine = store::load(state)?;
            let info =
                engine.purchase_insurance(&passenger, &airline, &code, departure, amount)?;
            println!("policy premium now {}", info.premium_paid);
            store::save(state, &engine)
        }
        InsuranceCommand::Payout { passenger } => {
            let mut engine = store::load(state)?;
            let credited = engine.insurance_payout(&passenger)?;
            println!(
                "credited {credited}; balance now {}",
                engine.passenger_balance(&passenger)
            );
            store::save(state, &engine)
        }
        InsuranceCommand::Withdraw { passenger, amount } => {
            let mut engine = store::load(state)?;
            let mut sink = RecordingTransfer::new();
            engine.withdraw_balance(&passenger, amount, &mut sink)?;
            println!(
                "transferred {amount} to {passenger}; balance now {}",
                engine.passenger_balance(&passenger)
            );
            store::save(state, &engine)
        }
        InsuranceCommand::Balance { passenger } => {
            let engine = store::load(state)?;
            println!("{}", engine.passenger_balance(&passenger));
            Ok(())
        }
    }
}

// ─── Status summary ──────────────────────────────────────────────────

pub fn run_status(state: &Path) -> anyhow::Result<()> {
    let engine = store::load(state)?;
    println!("operational: {}", engine.is_operational());
    println!("owner: {}", engine.owner());
    println!(
        "airlines: {} registered, {} active",
        engine.airlines().registered_count(),
        engine.airlines().active_count()
    );
    for airline in engine.airlines().iter_in_order() {
        println!(
            "  {} funded={} approved={}",
            airline.principal, airline.funded, airline.approved
        );
    }
    println!("flights: {}", engine.flights().count());
    Ok(())
}
