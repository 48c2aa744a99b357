//! Demo signal generation task.
//!
//! Publishes a synthetic pulse waveform into the sample cell at the ADC rate,
//! so the whole pipeline and the display can be exercised without a sensor.

use defmt::info;
use embassy_rp::Peri;
use embassy_rp::peripherals::{ADC, PIN_26};
use embassy_time::{Duration, Instant, Ticker};
use pulse_common::{ElapsedTime, SAMPLE_INTERVAL_US, SyntheticPulse};

use crate::SIGNALS;

/// Rate of the generated waveform.
pub const DEMO_BPM: u32 = 72;

/// The ADC parts are taken so the sensor pin stays unused while the demo runs.
#[embassy_executor::task]
pub async fn demo_signal_task(
    _adc: Peri<'static, ADC>,
    _pin: Peri<'static, PIN_26>,
) {
    info!("Demo signal task started ({} BPM)", DEMO_BPM);

    let mut pulse = SyntheticPulse::new(DEMO_BPM);
    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_micros(SAMPLE_INTERVAL_US));
    while SIGNALS.is_running() {
        // Time-based waveform (independent of the tick quantum)
        let t = ElapsedTime::from_micros(start.elapsed().as_micros());
        SIGNALS.sample.publish(pulse.sample_at(t));
        ticker.next().await;
    }

    info!("Demo signal task stopped");
}
