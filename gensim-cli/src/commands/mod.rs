//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod catalog;
mod run;

pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start a node and stream its session to the terminal
    Run(RunArgs),
    /// List devices available to contribute
    Devices {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List job templates the network hands out
    Jobs {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run(args).await,
        Commands::Devices { json } => catalog::handle_devices(json),
        Commands::Jobs { json } => catalog::handle_jobs(json),
    }
}
