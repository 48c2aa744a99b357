//! Shared pulse-to-BPM pipeline for the heart-rate monitor.
//!
//! This crate contains platform-agnostic code shared between the simulator
//! and the Pico 2 firmware:
//!
//! - [`config`]: Timing, detector and display configuration
//! - [`shared`]: Interrupt-shared clock and sample cells
//! - [`pulse`]: Beat detector, BPM estimator and the monitor context
//! - [`display`]: Digit encoding and the multiplexed display driver
//! - [`synthetic`]: Synthetic pulse waveform for demo and tests
//! - [`button`]: Debounced push-button edge detection
//! - [`profiling`]: Cycle counter and refresh latency statistics
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Hardware is reached only through `embedded-hal` traits and time only
//! through the tick-driven [`shared::ElapsedClock`].

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod button;
pub mod config;
pub mod display;
pub mod profiling;
pub mod pulse;
pub mod shared;
pub mod synthetic;

// Re-export commonly used items
pub use button::ButtonState;
pub use config::*;
pub use display::{DisplayDigits, Frame, MultiplexedDisplay, SegmentMask};
pub use pulse::{BeatDetector, BpmEstimate, BpmEstimator, PulseMonitor, StepOutcome, Transition};
pub use shared::{ElapsedClock, ElapsedTime, SampleSnapshot, SharedSignals};
pub use synthetic::SyntheticPulse;
