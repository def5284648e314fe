//! Lamp GPIO adapter.
//!
//! Implements [`LampPin`] for the lamp output.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: claims the pin as a push-pull output through esp-idf-hal's
//! `PinDriver` and drives levels via the [`HalLampPin`] bridge.
//! On host/test: mirrors the level into a static atomic so tests can
//! observe the pin without hardware.

use log::info;

use crate::app::ports::LampPin;
use crate::error::Error;

#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_LEVEL: AtomicBool = AtomicBool::new(false);

/// Current simulated pin level (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_level() -> bool {
    SIM_LEVEL.load(Ordering::SeqCst)
}

/// Bridge for any lamp output behind an `embedded-hal` driver — an I/O
/// expander, or esp-idf-hal's `PinDriver` on the device itself.
pub struct HalLampPin<P> {
    pin: P,
}

impl<P> HalLampPin<P>
where
    P: embedded_hal::digital::OutputPin + Send,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> LampPin for HalLampPin<P>
where
    P: embedded_hal::digital::OutputPin + Send,
{
    fn write(&mut self, on: bool) {
        // OutputPin errors are infallible on every driver this firmware
        // targets; a failed level write has no recovery path anyway.
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            log::error!("gpio: lamp level write failed");
        }
    }
}

pub struct LampGpio {
    gpio: i32,
    #[cfg(target_os = "espidf")]
    pin: HalLampPin<PinDriver<'static, AnyOutputPin, Output>>,
}

impl LampGpio {
    /// Claim the pin as a push-pull output. The caller drives the initial
    /// level.
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        // SAFETY: the lamp pin is claimed exactly once, at bootstrap.
        let pin = unsafe { AnyOutputPin::new(gpio) };
        let pin = PinDriver::output(pin).map_err(|_| Error::Init("lamp pin claim failed"))?;
        info!("gpio: lamp output on GPIO {gpio}");
        Ok(Self {
            gpio,
            pin: HalLampPin::new(pin),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        info!("gpio: lamp output on GPIO {gpio}");
        Ok(Self { gpio })
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl LampPin for LampGpio {
    #[cfg(target_os = "espidf")]
    fn write(&mut self, on: bool) {
        self.pin.write(on);
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, on: bool) {
        SIM_LEVEL.store(on, Ordering::SeqCst);
    }
}
