use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use futures::StreamExt;
use shared::{error::SortError, protocol::StepEvent};
use sort_engine::{RunRequest, SortRunner};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Step through a comparison sort one comparison at a time")]
struct Args {
    /// One of: bubble, selection, insertion, merge, quick
    algorithm: String,
    /// Comma separated integers to sort
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    values: Vec<i64>,
    /// Speed level, 1 (slowest) to 10 (fastest)
    #[arg(long)]
    speed: Option<u32>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print every step event as a JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(speed) = args.speed {
        settings.speed = speed;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let delay = settings.delay();
    info!(
        speed = settings.speed,
        delay_ms = delay.as_millis() as u64,
        "starting sort"
    );

    let runner = SortRunner::new(settings.max_array_size);
    let mut handle = runner.start(RunRequest {
        algorithm: args.algorithm,
        values: args.values,
        delay,
    })?;
    let sequence = handle.sequence().clone();
    let printer = tokio::spawn(print_events(
        BroadcastStream::new(handle.take_events()),
        args.json,
    ));

    let canceller = handle.canceller();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let result = handle.join().await;
    if let Err(err) = printer.await {
        warn!(error = %err, "event printer stopped unexpectedly");
    }

    match result {
        Ok(outcome) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "algorithm": outcome.algorithm, "values": outcome.values })
                );
            } else {
                println!("{}: {:?}", outcome.algorithm, outcome.values);
                println!(
                    "pauses={} comparisons={} swaps={} writes={} partitions={}",
                    outcome.stats.pauses,
                    outcome.stats.comparisons,
                    outcome.stats.swaps,
                    outcome.stats.writes,
                    outcome.stats.partitions
                );
            }
            Ok(())
        }
        Err(SortError::Cancelled) => {
            println!("cancelled; partial sequence {:?}", sequence.values().await);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn print_events(mut events: BroadcastStream<StepEvent>, json: bool) {
    while let Some(item) = events.next().await {
        match item {
            Ok(event) if json => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => warn!(error = %err, "failed to encode step event"),
            },
            Ok(event) => log_event(&event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "step event stream lagged")
            }
        }
    }
}

fn log_event(event: &StepEvent) {
    match event {
        StepEvent::Compared {
            left,
            right,
            greater,
        } => debug!(left, right, greater, "compare"),
        StepEvent::Swapped { left, right } => debug!(left, right, "swap"),
        StepEvent::Placed {
            index,
            value,
            source,
        } => debug!(index, value, source, "place"),
        StepEvent::Marked { index, role } => debug!(index, ?role, "mark"),
        StepEvent::Paused { .. }
        | StepEvent::RunStarted { .. }
        | StepEvent::RunFinished { .. }
        | StepEvent::RunAborted { .. } => {}
    }
}
