//! hold — the classic hold-model benchmark over every event-queue strategy.
//!
//! Keeps `population` events pending; every dispatch schedules one successor
//! after an exponential delay.  The same seeded run is repeated for each
//! strategy, so all rows must agree on the final time and differ only in
//! wall-clock cost.
//!
//! Usage: `hold [config.json]`.  Every field of the config is optional:
//!
//! ```json
//! {
//!   "sim":        { "max_steps": 200000, "seed": 42, "queue": { "threshold": 64 } },
//!   "hold":       { "population": 10000, "mean_delay": 1.0 },
//!   "partitions": 4,
//!   "trace":      "output/hold_trace.csv"
//! }
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `hold=info,fes_sim=info`).

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fes_core::{EventId, QueueKind, VirtualTime};
use fes_observe::{CsvTraceListener, QueueChange, QueueListener};
use fes_sim::{HoldConfig, HoldModel, NoopObserver, SimBuilder, SimConfig, hold_partitions, run_hold};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_MAX_STEPS: u64 = 100_000;
const DEFAULT_SEED:      u64 = 42;
/// Steps recorded when a change trace is requested.
const TRACE_STEPS:       u64 = 1_000;

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:        SimConfig,
    hold:       HoldConfig,
    partitions: usize,
    trace:      Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                max_steps: Some(DEFAULT_MAX_STEPS),
                seed:      DEFAULT_SEED,
                ..SimConfig::default()
            },
            hold:       HoldConfig::default(),
            partitions: 0,
            trace:      None,
        }
    }
}

fn load_config() -> Result<DemoConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── Shared trace listener ─────────────────────────────────────────────────────

/// Lets `main` keep a handle on a listener the sim owns.
struct Shared<L>(Rc<RefCell<L>>);

impl<L: QueueListener<EventId, VirtualTime>> QueueListener<EventId, VirtualTime> for Shared<L> {
    fn on_change(&mut self, change: &QueueChange<EventId, VirtualTime>) {
        self.0.borrow_mut().on_change(change);
    }
}

fn write_trace(config: &DemoConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let trace = Rc::new(RefCell::new(CsvTraceListener::from_path(path)?));

    let sim_config = SimConfig { max_steps: Some(TRACE_STEPS), ..config.sim.clone() };
    let model = HoldModel::new(sim_config.seed, config.hold.mean_delay);
    let mut sim = SimBuilder::new(sim_config, model)
        .listener(Box::new(Shared(Rc::clone(&trace))))
        .build()?;
    for _ in 0..config.hold.population {
        let delay = sim.handler.next_delay();
        sim.schedule_at(VirtualTime::ZERO + delay)?;
    }
    sim.run(&mut NoopObserver)?;

    let mut trace = trace.borrow_mut();
    if let Some(e) = trace.take_error() {
        anyhow::bail!("trace write failed: {e}");
    }
    trace.flush()?;
    tracing::info!(path = %path.display(), changes = trace.changes_written(), "wrote change trace");
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hold=info,fes_sim=info")))
        .with(fmt::layer())
        .init();

    let config = load_config()?;
    println!("=== hold — future-event-set benchmark ===");
    println!(
        "Population: {}  |  Mean delay: {}  |  Steps: {}  |  Seed: {}",
        config.hold.population,
        config.hold.mean_delay,
        config.sim.max_steps.map_or_else(|| "unbounded".to_owned(), |s| s.to_string()),
        config.sim.seed,
    );
    println!();

    // 1. Every strategy on the same seeded workload.
    println!("{:<12} {:>12} {:>14} {:>10}", "Strategy", "Dispatched", "Final time", "Secs");
    println!("{}", "-".repeat(51));
    let mut reports = Vec::new();
    for kind in QueueKind::ALL {
        let mut sim_config = config.sim.clone();
        sim_config.queue.kind = Some(kind);

        let t0 = Instant::now();
        let report = run_hold(sim_config, &config.hold)?;
        let elapsed = t0.elapsed();

        println!(
            "{:<12} {:>12} {:>14.4} {:>10.3}",
            report.strategy,
            report.dispatched,
            report.final_time.as_f64(),
            elapsed.as_secs_f64(),
        );
        tracing::info!(strategy = %kind, secs = elapsed.as_secs_f64(), "strategy finished");
        reports.push(report);
    }
    if reports.windows(2).any(|w| w[0].final_time != w[1].final_time) {
        tracing::warn!("strategies disagree on the final time");
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&reports)?);

    // 2. Independent partitions.
    if config.partitions > 0 {
        let t0 = Instant::now();
        let results = hold_partitions(&config.sim, &config.hold, config.partitions);
        let elapsed = t0.elapsed();
        let dispatched: u64 = results
            .into_iter()
            .map(|r| r.map(|report| report.dispatched))
            .sum::<Result<u64, _>>()?;
        println!();
        println!(
            "{} partitions: {} events dispatched in {:.3} s",
            config.partitions,
            dispatched,
            elapsed.as_secs_f64()
        );
    }

    // 3. Optional change trace of a short run.
    if let Some(path) = &config.trace {
        write_trace(&config, path)?;
    }

    Ok(())
}
