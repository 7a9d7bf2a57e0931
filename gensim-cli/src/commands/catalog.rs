//! Catalog listing commands

use anyhow::Result;
use colored::Colorize;

use gensim_core::catalog;

/// Prints the device catalog
pub fn handle_devices(json: bool) -> Result<()> {
    let devices = catalog::devices();

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    println!("{}", "Available devices:".bold());
    for device in devices {
        println!(
            "  {:<14} {}",
            device.name.cyan(),
            format!("x{:.1} speed", device.relative_speed).dimmed()
        );
    }
    Ok(())
}

/// Prints the job template catalog
pub fn handle_jobs(json: bool) -> Result<()> {
    let jobs = catalog::jobs();

    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    println!("{}", "Job templates:".bold());
    for job in jobs {
        println!(
            "  {:<34} {}",
            job.name.cyan(),
            format!("{:.2} $SY base", job.base_reward).dimmed()
        );
    }
    Ok(())
}
