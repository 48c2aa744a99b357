//! Heart-rate monitor simulator for the desktop.
//!
//! Runs the same main loop as the firmware against a virtual board: the
//! synthetic waveform stands in for the pulse sensor, virtual time drives
//! the tick handler, and the display lines are rendered in the terminal once
//! per simulated second.
//!
//! ```text
//! simulator [BPM] [SECONDS] [--fast] [--sliding] [--gated]
//! ```
//!
//! BPM must be within 20-250 and SECONDS within 1-86400.
//!
//! - `--fast`: Do not pace the simulation to wall-clock time
//! - `--sliding`: Use the sliding-window estimator
//! - `--gated`: Enable hysteresis and the refractory window

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod board;
mod render;
mod timing;

use std::thread;
use std::time::Instant;

use clap::Parser;
use pulse_common::profiling::LatencyStats;
use pulse_common::{
    BpmEstimate,
    DisplayConfig,
    ElapsedTime,
    EstimatorMode,
    MonitorConfig,
    MultiplexedDisplay,
    PulseMonitor,
    REFRESH_CYCLE_BOUND_US,
    STATUS_INTERVAL_MS,
    SharedSignals,
    SyntheticPulse,
    TICK_QUANTUM_US,
};

use crate::board::{VirtualTime, display_pins};
use crate::render::digit_rows;
use crate::timing::{BPM_RANGE, DEFAULT_BPM, DEFAULT_RUN_SECS, LOOP_OVERHEAD_US, MAX_RUN_SECS, STATUS_WALL_TIME};

/// Command-line options.
#[derive(Parser, Debug)]
#[command(name = "simulator", about = "Heart-rate monitor simulator")]
struct Args {
    /// Synthetic heart rate in beats per minute
    #[arg(default_value_t = DEFAULT_BPM, value_parser = clap::value_parser!(u32).range(BPM_RANGE))]
    bpm: u32,

    /// Simulated run length in seconds
    #[arg(default_value_t = DEFAULT_RUN_SECS, value_parser = clap::value_parser!(u64).range(1..=MAX_RUN_SECS))]
    seconds: u64,

    /// Do not pace the simulation to wall-clock time
    #[arg(long)]
    fast: bool,

    /// Use the sliding-window estimator
    #[arg(long)]
    sliding: bool,

    /// Enable hysteresis and the refractory window
    #[arg(long)]
    gated: bool,
}

impl Args {
    fn monitor_config(&self) -> MonitorConfig {
        let config = if self.gated { MonitorConfig::gated() } else { MonitorConfig::reference() };
        if self.sliding { config.with_estimator(EstimatorMode::SlidingWindow) } else { config }
    }
}

fn main() {
    let args = Args::parse();
    let config = args.monitor_config();
    let source = SyntheticPulse::new(args.bpm);
    println!(
        "Simulating {} BPM (period {} ms) for {} s (threshold {}, {:?} estimator)",
        args.bpm,
        source.period().as_millis(),
        args.seconds,
        config.threshold,
        config.estimator,
    );

    let signals = SharedSignals::new(TICK_QUANTUM_US);
    let mut time = VirtualTime::new(&signals, source);

    let display_config = DisplayConfig::new();
    let (segments, selects, lines) = display_pins(display_config);
    let mut display = MultiplexedDisplay::new(segments, selects, display_config);
    display.init().ok();

    let mut monitor = PulseMonitor::new(config);
    let mut latency = LatencyStats::new(REFRESH_CYCLE_BOUND_US);
    let status_interval = ElapsedTime::from_millis(STATUS_INTERVAL_MS);
    let mut next_status = status_interval;
    let run_until = ElapsedTime::from_millis(args.seconds * 1_000);
    let wall_start = Instant::now();
    let mut intervals = 0u32;
    let mut status_sample = signals.sample.latest();

    while signals.is_running() {
        let outcome = monitor.poll(&signals);
        if outcome.beat_counted {
            println!("  beat @ {:>6} ms", outcome.now.as_millis());
        }
        time.advance(LOOP_OVERHEAD_US);

        let refresh_start = time.now();
        display.refresh(outcome.estimate, &mut time).ok();
        let refresh_us = time.now().since(refresh_start).as_micros() as u32;
        if latency.record(refresh_us) {
            println!("  refresh cycle took {refresh_us} us (bound {} us)", latency.bound_us());
        }

        let now = signals.clock.read();
        if now >= next_status {
            let published = monitor.last_sample().published_since(status_sample);
            status_sample = monitor.last_sample();
            print_status(&monitor, &latency, &lines, published, now);
            latency.reset();
            next_status = now.saturating_add(status_interval);
            intervals += 1;

            // Sleep to keep one simulated interval per wall-clock interval
            if !args.fast
                && let Some(remaining) = (STATUS_WALL_TIME * intervals).checked_sub(wall_start.elapsed())
            {
                thread::sleep(remaining);
            }
        }

        if time.now() >= run_until {
            signals.request_stop();
        }
    }

    display.blank().ok();
    println!(
        "Stopped at {} ms: {} ticks, {} samples, {} evaluations, {} refresh cycles",
        time.now().as_millis(),
        time.ticks(),
        time.samples(),
        monitor.evaluations(),
        display.cycles(),
    );
    println!(
        "Lines lit after stop: {}; most selects on at once: {}",
        lines.lit_lines(),
        lines.max_selected(),
    );
}

fn print_status(
    monitor: &PulseMonitor,
    latency: &LatencyStats,
    lines: &board::DisplayLines,
    published: u16,
    now: ElapsedTime,
) {
    let rate = match monitor.estimate() {
        BpmEstimate::Unknown => "---".to_string(),
        BpmEstimate::Rate(bpm) => format!("{bpm:.1}"),
    };
    let rows = digit_rows(lines.latched());

    println!(
        "t={:>6.2} s  sample={:>4} ({published} new)  beats={:>3}  bpm={:>6}  refresh max={} us, {}/{} over",
        now.as_millis_f32() / 1_000.0,
        monitor.last_sample().value,
        monitor.beat_count(),
        rate,
        latency.max_us(),
        latency.overruns(),
        latency.samples(),
    );
    for row in rows {
        println!("    {row}");
    }
}
