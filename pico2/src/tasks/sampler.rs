//! Pulse sensor sampling.
//!
//! Free-running conversions on ADC0; every completed conversion overwrites
//! the shared sample cell. A failed conversion is logged and skipped, the
//! previous sample stays visible to the main loop.

use defmt::{info, warn};
use embassy_rp::Peri;
use embassy_rp::adc::{Adc, Channel, Config, InterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{ADC, PIN_26};
use embassy_time::{Duration, Ticker};
use pulse_common::SAMPLE_INTERVAL_US;

use crate::SIGNALS;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => InterruptHandler;
});

#[embassy_executor::task]
pub async fn sampler_task(
    adc: Peri<'static, ADC>,
    pin: Peri<'static, PIN_26>,
) {
    let mut adc = Adc::new(adc, Irqs, Config::default());
    let mut channel = Channel::new_pin(pin, Pull::None);
    info!("Sampler task started");

    let mut ticker = Ticker::every(Duration::from_micros(SAMPLE_INTERVAL_US));
    let mut failures: u32 = 0;
    while SIGNALS.is_running() {
        match adc.read(&mut channel).await {
            Ok(value) => SIGNALS.sample.publish(value),
            Err(e) => {
                failures = failures.wrapping_add(1);
                warn!("ADC conversion failed ({} total): {}", failures, e);
            }
        }
        ticker.next().await;
    }

    info!("Sampler task stopped");
}
