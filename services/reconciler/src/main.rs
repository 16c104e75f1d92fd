//! State reconciler runner
//!
//! Feeds newline-delimited JSON bundles (file or stdin) through the delivery
//! loop and logs every delivered state until input ends or Ctrl-C.

use anyhow::{Context, Result};
use clap::Parser;
use state_reconciler::{
    feed_ndjson, log_error, log_metrics, log_start, log_success, DeliveryLoop, PipelineOptions,
    ReconciliationPipeline, Upstream,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use torq_config::ReconcilerSettings;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// NDJSON bundle file (overrides `bundle_path`; stdin when neither is set)
    #[arg(short, long)]
    bundles: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(settings: &ReconcilerSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));

    if settings.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = ReconcilerSettings::load(args.config.as_deref())
        .context("Failed to load reconciler settings")?;
    if let Some(path) = args.bundles {
        settings.bundle_path = Some(path);
    }

    if args.print_config {
        println!("{}", settings.to_toml()?);
        return Ok(());
    }

    init_tracing(&settings);
    log_start!("Starting State Reconciler v{}", env!("CARGO_PKG_VERSION"));

    let cancel = CancellationToken::new();
    let (handle, upstream) = Upstream::channel(settings.upstream_buffer);

    let options = PipelineOptions::new()
        .with_slow_block_threshold(Duration::from_millis(settings.slow_block_ms));
    let (mut downstream, loop_task) =
        DeliveryLoop::spawn(ReconciliationPipeline::new(options), upstream, cancel.clone());

    let feeder = match &settings.bundle_path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open bundle file {:?}", path))?;
            info!("📂 Reading bundles from {:?}", path);
            tokio::spawn(feed_ndjson(BufReader::new(file), handle, cancel.clone()))
        }
        None => {
            info!("📂 Reading bundles from stdin");
            tokio::spawn(feed_ndjson(
                BufReader::new(tokio::io::stdin()),
                handle,
                cancel.clone(),
            ))
        }
    };

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    let mut failure = None;
    let mut states_open = true;
    let mut errors_open = true;

    while states_open || errors_open {
        tokio::select! {
            state = downstream.states.recv(), if states_open => match state {
                Some(state) => {
                    let graph = state.graph();
                    log_success!(
                        "Block {} ready: {} tokens, {} pools, {} graph edges ({:?} index, {:?} graph)",
                        state.block().number,
                        state.tokens().len(),
                        state.pools().len(),
                        graph.edge_count(),
                        state.timings().index,
                        state.timings().graph
                    );
                }
                None => states_open = false,
            },
            error = downstream.errors.recv(), if errors_open => match error {
                Some(error) => {
                    log_error!("Upstream failure: {}", error);
                    failure = Some(error);
                }
                None => errors_open = false,
            },
        }
    }

    loop_task.await.context("Delivery loop task failed")?;
    let published = feeder.await.context("Bundle feed task failed")?;

    let stats = downstream.stats.snapshot();
    log_metrics!(
        "{} bundles published, {} processed, {} delivered, {} dropped, {} rejected",
        published,
        stats.blocks_processed,
        stats.states_delivered,
        stats.states_dropped,
        stats.blocks_rejected
    );

    match failure {
        Some(error) => Err(anyhow::Error::new(error).context("Upstream transport failed")),
        None => Ok(()),
    }
}
