//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ecotrace_core::estimator::FootprintForm;

/// EcoTrace - track your footprint and report waste hotspots
#[derive(Parser, Debug)]
#[command(name = "ecotrace", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the session snapshot
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that run against the application state.
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Sign in
    Login {
        /// Email address
        #[arg(long, default_value = "")]
        email: String,
        /// Password
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Given name
        #[arg(long, default_value = "")]
        first_name: String,
        /// Family name
        #[arg(long, default_value = "")]
        last_name: String,
        /// Email address
        #[arg(long, default_value = "")]
        email: String,
        /// Password
        #[arg(long, default_value = "")]
        password: String,
        /// Community to join
        #[arg(long, default_value = "")]
        community: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the dashboard for the signed-in user
    Dashboard {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate your monthly carbon footprint
    Calculate(CalculateArgs),

    /// Report a waste hotspot
    Report {
        /// Waste type: plastic, organic, electronic, paper, other or 1-5
        #[arg(long = "type", default_value = "")]
        waste_type: String,
        /// Address or landmark
        #[arg(long, default_value = "")]
        location: String,
    },

    /// List reported hotspots
    Reports {
        /// Only show one waste type
        #[arg(long = "type")]
        waste_type: Option<String>,
    },

    /// List community challenges
    Challenges,

    /// Join a community challenge
    Join {
        /// Challenge id, as listed by `ecotrace challenges`
        id: u32,
    },
}

/// Calculator inputs, taken as typed.
#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// car, bus, train, bike or walk
    #[arg(long)]
    pub transport_mode: Option<String>,

    /// Distance travelled per week
    #[arg(long, allow_hyphen_values = true)]
    pub transport_distance: Option<String>,

    /// Electricity used per month
    #[arg(long, allow_hyphen_values = true)]
    pub electricity: Option<String>,

    /// Gas used per month
    #[arg(long, allow_hyphen_values = true)]
    pub gas: Option<String>,

    /// Meat meals per week
    #[arg(long, allow_hyphen_values = true)]
    pub meat: Option<String>,

    /// Shopping trips per month
    #[arg(long, allow_hyphen_values = true)]
    pub shopping: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalculateArgs {
    /// Raw form values for the estimator.
    pub fn form(&self) -> FootprintForm {
        FootprintForm {
            transport_mode: self.transport_mode.clone(),
            transport_distance: self.transport_distance.clone(),
            electricity_usage: self.electricity.clone(),
            gas_usage: self.gas.clone(),
            meat_consumption: self.meat.clone(),
            shopping_freq: self.shopping.clone(),
        }
    }
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Where to write; defaults to the resolved config path
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
