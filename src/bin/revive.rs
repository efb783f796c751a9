//! revive CLI — run the offer-revival loop against a plan file.

use clap::{Parser, Subcommand};
use offer_revive::candidates;
use offer_revive::config::Config;
use offer_revive::driver::LogDriver;
use offer_revive::engine::{ControlConfig, ControlPlane, PlanFile};
use offer_revive::limiter::TokenBucket;
use offer_revive::revive::ReviveManager;
use offer_revive::telemetry::{TelemetryConfig, init_telemetry};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "revive", about = "Rate-limited offer revival for cluster schedulers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the revive control loop (dry-run driver) until Ctrl-C
    Serve {
        /// TOML plan file, re-read every cycle
        #[arg(long)]
        plan: PathBuf,
    },
    /// Print the steps in a plan file that still need offers
    Candidates {
        /// TOML plan file
        #[arg(long)]
        plan: PathBuf,
        /// Emit JSON instead of one item per line
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { plan } => cmd_serve(plan).await,
        Command::Candidates { plan, json } => cmd_candidates(plan, json).await,
    }
}

async fn cmd_serve(plan: PathBuf) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "offer-revive".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let limiter = TokenBucket::new(config.token_bucket.clone())?;
    let manager = ReviveManager::new(LogDriver::new(), limiter);

    let control = ControlPlane::new(
        PlanFile::new(plan),
        manager,
        ControlConfig {
            poll_interval: config.poll_interval,
        },
    );

    let ctrl = control.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        ctrl.shutdown();
    });

    control.run().await?;

    let revives = control.manager().lock().await.driver().revives();
    println!("{} cycle(s), {revives} revive(s)", control.cycles());
    Ok(())
}

async fn cmd_candidates(plan: PathBuf, json: bool) -> anyhow::Result<()> {
    let steps = PlanFile::new(plan).load().await?;
    let current = candidates::extract(&steps);

    if json {
        println!("{}", serde_json::to_string_pretty(&current)?);
        return Ok(());
    }

    if current.is_empty() {
        println!("No steps need offers.");
        return Ok(());
    }

    let mut lines: Vec<String> = current.iter().map(ToString::to_string).collect();
    lines.sort();
    for line in &lines {
        println!("{line}");
    }
    println!("\n{} candidate(s) of {} step(s)", current.len(), steps.len());
    Ok(())
}
