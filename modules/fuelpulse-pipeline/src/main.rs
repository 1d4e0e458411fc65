//! FuelPulse ingest binary.
//!
//! Replays captured signals (one JSON object per line) through the lead
//! pipeline, serially, in file order. Scrapers produce these files; this
//! binary is the scheduling loop's unit of work.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fuelpulse_common::{Config, Signal};
use fuelpulse_pipeline::notify::SendGridMailer;
use fuelpulse_pipeline::{EmailSender, LeadPipeline, MessageSender, NotificationRouter};
use fuelpulse_store::{LeadStore, MemoryStore, PgStore};
use twilio::{TwilioOptions, TwilioService};

#[derive(Parser)]
#[command(name = "fuelpulse", about = "Run captured signals through the lead pipeline")]
struct Args {
    /// Path to a JSONL file of captured signals.
    #[arg(long)]
    signals: PathBuf,

    /// Process in memory without Postgres or transports. For smoke runs.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fuelpulse=info".parse()?))
        .init();

    let args = Args::parse();
    info!("FuelPulse ingest starting...");

    let (store, router): (Arc<dyn LeadStore>, NotificationRouter) = if args.dry_run {
        info!("Dry run: in-memory store, notification channels disabled");
        (Arc::new(MemoryStore::new()), NotificationRouter::new(None, None))
    } else {
        let config = Config::from_env();
        config.log_redacted();

        let store = PgStore::connect(&config.database_url).await?;
        store.migrate().await?;

        let messenger: Option<Arc<dyn MessageSender>> =
            config.twilio().map(|(account_sid, auth_token, from)| {
                Arc::new(TwilioService::new(TwilioOptions {
                    account_sid,
                    auth_token,
                    from,
                })) as Arc<dyn MessageSender>
            });
        let mailer: Option<Arc<dyn EmailSender>> = config
            .sendgrid()
            .map(|(key, from)| Arc::new(SendGridMailer::new(key, from)) as Arc<dyn EmailSender>);

        (Arc::new(store), NotificationRouter::new(messenger, mailer))
    };

    let pipeline = LeadPipeline::new(store, router);

    let file = File::open(&args.signals)
        .with_context(|| format!("cannot open {}", args.signals.display()))?;

    let mut processed = 0usize;
    let mut skipped = 0usize;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let signal: Signal = match serde_json::from_str(&line) {
            Ok(s) => s,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "Unparseable signal; skipping");
                skipped += 1;
                continue;
            }
        };

        // One signal at a time; a storage failure skips the signal, not the run.
        match pipeline.process(&signal).await {
            Ok((lead_id, products)) => {
                info!(
                    line = line_no + 1,
                    lead = %lead_id,
                    products = products.len(),
                    "Signal processed"
                );
                processed += 1;
            }
            Err(e) => {
                error!(line = line_no + 1, company = %signal.company_name, error = %e, "Signal failed; skipping");
                skipped += 1;
            }
        }
    }

    info!(processed, skipped, "Ingest run complete");
    Ok(())
}
