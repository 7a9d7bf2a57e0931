//! Run command
//!
//! Starts a node, acts as its event sink, and prints the session summary
//! when the run ends. Stops after a fixed number of completed jobs or on
//! Ctrl-C.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use gensim_core::domain::{LogLevel, NodeEvent, NodeEventKind};
use gensim_node::{NodeConfig, NodeController};

/// Arguments for `gensim run`
#[derive(Args)]
pub struct RunArgs {
    /// Device to contribute (catalog name; see `gensim devices`)
    #[arg(long)]
    device: Option<String>,

    /// Stop after this many completed jobs
    #[arg(long, default_value_t = 1)]
    jobs: u32,

    /// Seed for deterministic job selection and metrics
    #[arg(long)]
    seed: Option<u64>,

    /// Emit events as JSON lines instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Runs a node session to completion
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let mut config = NodeConfig::from_env().context("Failed to load configuration")?;
    if let Some(device) = args.device {
        config.device = device;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate().context("Invalid configuration")?;

    let controller = NodeController::new(config).context("Failed to create node")?;
    let mut events = controller.subscribe();
    controller.start()?;

    let mut completed = 0u32;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    render_event(&event, args.json)?;
                    if matches!(event.kind, NodeEventKind::JobCompleted { .. }) {
                        completed += 1;
                        if completed >= args.jobs {
                            break;
                        }
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    debug!(missed, "event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    if controller.snapshot().state.is_active() {
        controller.stop()?;
    }

    let snapshot = controller.snapshot();
    if !args.json {
        println!();
        println!(
            "{} {}",
            "Session earnings:".bold(),
            format!("+{:.2} $SY", snapshot.cumulative_earnings)
                .green()
                .bold()
        );
        println!("{}", controller.share_string().dimmed());
    }

    Ok(())
}

/// Renders one event to stdout
///
/// Text mode shows the session feed the way the original playground does:
/// a green log stream with errors in red. JSON mode prints every event.
fn render_event(event: &NodeEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match &event.kind {
        NodeEventKind::Log(entry) => match entry.level {
            LogLevel::Error => println!("{}", entry.message.red()),
            LogLevel::Warning => println!("{}", entry.message.yellow()),
            _ => println!("{}", entry.message.green()),
        },
        NodeEventKind::StateChanged(state) => {
            println!("{}", format!("-- node {state} --").dimmed());
        }
        // Progress, earnings, and celebration are visible in the log feed
        _ => {}
    }
    Ok(())
}
