//! Profiling utilities.
//!
//! - `cpu_cycles`: CPU cycle counter via DWT
//! - `latency`: Refresh-cycle duration statistics

pub mod cpu_cycles;
mod latency;

pub use latency::LatencyStats;
