//! Heart-rate monitor firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Reads a pulse sensor on ADC0, detects beats with a threshold detector and
//! shows the rate on a 3-digit multiplexed 7-segment display.
//!
//! # Architecture
//!
//! Two execution contexts share state only through `SIGNALS`:
//! - High-priority interrupt executor: tick task (elapsed clock) and sampler
//!   task (ADC). These preempt the main loop at any point.
//! - Thread mode main loop: snapshot sample and time, run the detector and
//!   estimator, then one blocking display refresh cycle.
//!
//! # Button Controls
//!
//! - **GPIO12**: Restart the measurement (warm-up starts over)
//! - **GPIO13**: Stop (blank the display, park the core)

#![no_std]
#![no_main]
// Crate-level lints (match the common crate for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod board;
mod tasks;

use cortex_m_rt::entry;
use defmt::{debug, info, warn};
use embassy_executor::InterruptExecutor;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use pulse_common::profiling::{LatencyStats, cpu_cycles};
use pulse_common::{
    BpmEstimate,
    ButtonState,
    DisplayConfig,
    ElapsedTime,
    EstimatorMode,
    MonitorConfig,
    PulseMonitor,
    REFRESH_CYCLE_BOUND_US,
    STATUS_INTERVAL_MS,
    SharedSignals,
    TICK_QUANTUM_US,
};
use {defmt_rtt as _, panic_probe as _};

use crate::board::Board;

// =============================================================================
// Interrupt-Shared State
// =============================================================================

/// Clock, latest sample and run flag shared with the interrupt executor.
pub static SIGNALS: SharedSignals = SharedSignals::new(TICK_QUANTUM_US);

/// Executor for the tick and sampler tasks (runs from SWI_IRQ_1).
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: EXECUTOR_HIGH was started on this interrupt
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

// =============================================================================
// Build-Time Configuration
// =============================================================================

const fn monitor_config() -> MonitorConfig {
    #[cfg(feature = "refractory")]
    let config = MonitorConfig::gated();
    #[cfg(not(feature = "refractory"))]
    let config = MonitorConfig::reference();

    #[cfg(feature = "sliding-window")]
    let config = config.with_estimator(EstimatorMode::SlidingWindow);
    #[cfg(not(feature = "sliding-window"))]
    let config = config.with_estimator(EstimatorMode::Cumulative);

    config
}

const fn display_config() -> DisplayConfig {
    #[cfg(feature = "common-anode")]
    let config = DisplayConfig::common_anode();
    #[cfg(not(feature = "common-anode"))]
    let config = DisplayConfig::new();

    config
}

// =============================================================================
// Main Loop
// =============================================================================

#[entry]
fn main() -> ! {
    info!("Heart-rate monitor starting...");

    let p = embassy_rp::init(Default::default());

    let cpu_freq_hz = embassy_rp::clocks::clk_sys_freq();
    cpu_cycles::init(cpu_freq_hz);
    info!("DWT cycle counter initialized at {} MHz", cpu_freq_hz / 1_000_000);

    let config = monitor_config();
    info!(
        "Threshold {} (hysteresis {}), warm-up {} ms, stabilization {} ms",
        config.threshold,
        config.hysteresis,
        config.warmup_floor_ms,
        config.stabilization_floor_ms,
    );

    let Board {
        mut display,
        restart,
        stop,
        sensor,
    } = Board::split(p, display_config());
    display.init().ok();
    info!("Display initialized (dwell {} us)", display.config().dwell_us);

    // Tick and sampler preempt the main loop, including its blocking dwell
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner.spawn(tasks::tick_task()).unwrap();

    #[cfg(feature = "demo-signal")]
    spawner.spawn(tasks::demo_signal_task(sensor.adc, sensor.pin)).unwrap();
    #[cfg(not(feature = "demo-signal"))]
    spawner.spawn(tasks::sampler_task(sensor.adc, sensor.pin)).unwrap();
    info!("Interrupt tasks spawned");

    let mut monitor = PulseMonitor::new(config);
    let mut latency = LatencyStats::new(REFRESH_CYCLE_BOUND_US);
    let mut restart_button = ButtonState::new();
    let mut stop_button = ButtonState::new();
    let mut delay = Delay;
    let status_interval = ElapsedTime::from_millis(STATUS_INTERVAL_MS);
    let mut next_status = status_interval;
    let mut status_sample = SIGNALS.sample.latest();

    info!("Main loop starting");

    while SIGNALS.is_running() {
        let outcome = monitor.poll(&SIGNALS);
        if outcome.beat_counted {
            debug!("Beat at {} ms", outcome.now.as_millis());
        }

        // Detector is paused for this whole cycle
        let refresh_start = cpu_cycles::read();
        display.refresh(outcome.estimate, &mut delay).ok();
        let refresh_us = cpu_cycles::cycles_to_us(cpu_cycles::elapsed(refresh_start, cpu_cycles::read()));
        if latency.record(refresh_us) {
            warn!("Refresh cycle took {} us (bound {} us)", refresh_us, latency.bound_us());
        }

        let now = SIGNALS.clock.read();

        if restart_button.just_pressed(restart.is_low(), now) {
            monitor.restart(now);
            info!("Measurement restarted at {} ms", now.as_millis());
        }

        if stop_button.just_pressed(stop.is_low(), now) {
            info!("Stop requested");
            SIGNALS.request_stop();
        }

        if now >= next_status {
            let published = monitor.last_sample().published_since(status_sample);
            status_sample = monitor.last_sample();
            log_status(&monitor, &latency, published, now);
            latency.reset();
            next_status = now.saturating_add(status_interval);
        }
    }

    display.blank().ok();
    info!("Stopped after {} refresh cycles", display.cycles());

    loop {
        cortex_m::asm::wfi();
    }
}

/// One status line per interval.
fn log_status(
    monitor: &PulseMonitor,
    latency: &LatencyStats,
    published: u16,
    now: ElapsedTime,
) {
    let sample = monitor.last_sample().value;
    match monitor.estimate() {
        BpmEstimate::Unknown => info!(
            "t={} ms sample={} ({} new) beats={} bpm=--- refresh max={} us, {}/{} over",
            now.as_millis(),
            sample,
            published,
            monitor.beat_count(),
            latency.max_us(),
            latency.overruns(),
            latency.samples(),
        ),
        BpmEstimate::Rate(bpm) => info!(
            "t={} ms sample={} ({} new) beats={} bpm={} refresh max={} us, {}/{} over",
            now.as_millis(),
            sample,
            published,
            monitor.beat_count(),
            bpm,
            latency.max_us(),
            latency.overruns(),
            latency.samples(),
        ),
    }
}
