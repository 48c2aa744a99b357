//! Tick source for the elapsed-time clock.

use defmt::info;
use embassy_time::{Duration, Ticker};
use pulse_common::TICK_QUANTUM_US;

use crate::SIGNALS;

/// Adds one quantum to the shared clock per tick until a stop is requested.
///
/// `Ticker` schedules against absolute deadlines, so a late wake-up does not
/// shift later ticks.
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started ({} us quantum)", TICK_QUANTUM_US);

    let mut ticker = Ticker::every(Duration::from_micros(TICK_QUANTUM_US));
    while SIGNALS.is_running() {
        ticker.next().await;
        SIGNALS.clock.on_tick();
    }

    info!("Tick task stopped");
}
