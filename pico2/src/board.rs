//! Pin assignment for the monitor board.
//!
//! | Function          | GPIO        |
//! |-------------------|-------------|
//! | Segments A-G      | GPIO2-GPIO8 |
//! | Select units      | GPIO9       |
//! | Select tens       | GPIO10      |
//! | Select hundreds   | GPIO11      |
//! | Restart button    | GPIO12      |
//! | Stop button       | GPIO13      |
//! | Pulse sensor (ADC)| GPIO26      |
//!
//! Buttons are active-low with internal pull-ups.

use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{ADC, PIN_26};
use pulse_common::{DisplayConfig, MultiplexedDisplay, Polarity};

/// Display type used by the main loop.
pub type Display = MultiplexedDisplay<Output<'static>>;

/// Analog front end handed to the sampler task.
pub struct SensorParts {
    pub adc: Peri<'static, ADC>,
    pub pin: Peri<'static, PIN_26>,
}

/// Board peripherals after the split.
pub struct Board {
    pub display: Display,
    pub restart: Input<'static>,
    pub stop: Input<'static>,
    pub sensor: SensorParts,
}

impl Board {
    /// Take the pins this board uses; every output starts in its off state.
    pub fn split(
        p: embassy_rp::Peripherals,
        config: DisplayConfig,
    ) -> Self {
        let seg = initial(config.segment_polarity);
        let sel = initial(config.select_polarity);

        let segments = [
            Output::new(p.PIN_2, seg),
            Output::new(p.PIN_3, seg),
            Output::new(p.PIN_4, seg),
            Output::new(p.PIN_5, seg),
            Output::new(p.PIN_6, seg),
            Output::new(p.PIN_7, seg),
            Output::new(p.PIN_8, seg),
        ];
        // Units, tens, hundreds
        let selects = [
            Output::new(p.PIN_9, sel),
            Output::new(p.PIN_10, sel),
            Output::new(p.PIN_11, sel),
        ];

        Self {
            display: MultiplexedDisplay::new(segments, selects, config),
            restart: Input::new(p.PIN_12, Pull::Up),
            stop: Input::new(p.PIN_13, Pull::Up),
            sensor: SensorParts {
                adc: p.ADC,
                pin: p.PIN_26,
            },
        }
    }
}

/// Pin level that leaves a line of this polarity switched off.
fn initial(polarity: Polarity) -> Level {
    if polarity.level(false) { Level::High } else { Level::Low }
}
