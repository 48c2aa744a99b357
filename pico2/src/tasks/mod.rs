//! Async tasks for the monitor firmware.
//!
//! These run on the high-priority interrupt executor so they preempt the
//! blocking main loop, including during display dwell:
//! - `tick`: Periodic elapsed-time tick
//! - `sampler`: ADC conversions into the sample cell
//! - `demo`: Synthetic waveform in place of the sampler

#[cfg(feature = "demo-signal")]
pub mod demo;
#[cfg(not(feature = "demo-signal"))]
pub mod sampler;
pub mod tick;

#[cfg(feature = "demo-signal")]
pub use demo::demo_signal_task;
#[cfg(not(feature = "demo-signal"))]
pub use sampler::sampler_task;
pub use tick::tick_task;
