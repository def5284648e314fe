//! DHT11 climate sensor adapter.
//!
//! Implements [`SensorSource`] for the single-wire DHT11 bus. The
//! bit-timing protocol itself belongs to the `dht-sensor` driver; this
//! adapter owns the pin, the call into it, and plausibility checks on
//! the decoded values.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the bus pin is claimed as an open-drain input/output with
//! pull-up and the 40-bit transfer runs through `dht_sensor::dht11`.
//! On host/test: readings and failures are injected through static
//! atomics, keeping the polling task fully testable.

use log::info;

use crate::app::climate::ClimateReading;
use crate::app::ports::SensorSource;
use crate::error::{Error, SensorError};

#[cfg(target_os = "espidf")]
use dht_sensor::{DhtError, dht11};
#[cfg(target_os = "espidf")]
use esp_idf_hal::{
    delay::Ets,
    gpio::{AnyIOPin, InputOutput, PinDriver, Pull},
};

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

// DHT11 datasheet operating range.
const TEMP_MIN_C: f32 = 0.0;
const TEMP_MAX_C: f32 = 50.0;
const HUMIDITY_MIN_PCT: f32 = 20.0;
const HUMIDITY_MAX_PCT: f32 = 90.0;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_DECI_C: AtomicI32 = AtomicI32::new(215);
#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_DECI_PCT: AtomicI32 = AtomicI32::new(480);
#[cfg(not(target_os = "espidf"))]
static SIM_FAILING: AtomicBool = AtomicBool::new(false);

/// Inject the reading returned by subsequent simulated bus reads
/// (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_reading(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_DECI_C.store((temperature_c * 10.0) as i32, Ordering::SeqCst);
    SIM_HUMIDITY_DECI_PCT.store((humidity_pct * 10.0) as i32, Ordering::SeqCst);
}

/// Make subsequent simulated bus reads fail with a timeout (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failing(failing: bool) {
    SIM_FAILING.store(failing, Ordering::SeqCst);
}

pub struct Dht11Sensor {
    gpio: i32,
    #[cfg(target_os = "espidf")]
    pin: PinDriver<'static, AnyIOPin, InputOutput>,
    #[cfg(target_os = "espidf")]
    delay: Ets,
}

impl Dht11Sensor {
    /// Claim the bus pin: open drain, pulled up, idle high.
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        // SAFETY: the DHT bus pin is claimed exactly once, at bootstrap.
        let pin = unsafe { AnyIOPin::new(gpio) };
        let mut pin = PinDriver::input_output_od(pin)
            .map_err(|_| Error::Init("DHT bus pin claim failed"))?;
        pin.set_pull(Pull::Up)
            .map_err(|_| Error::Init("DHT bus pull-up configuration failed"))?;
        pin.set_high()
            .map_err(|_| Error::Init("DHT bus idle level failed"))?;
        info!("dht: sensor bus on GPIO {gpio}");
        Ok(Self {
            gpio,
            pin,
            delay: Ets,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        info!("dht(sim): sensor bus on GPIO {gpio}");
        Ok(Self { gpio })
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    #[cfg(target_os = "espidf")]
    fn read_bus(&mut self) -> Result<ClimateReading, SensorError> {
        // The line must be released before the start signal.
        self.pin.set_high().map_err(|_| SensorError::NotResponding)?;
        let reading =
            dht11::blocking::read(&mut self.delay, &mut self.pin).map_err(|e| match e {
                DhtError::Timeout => SensorError::Timeout,
                DhtError::ChecksumMismatch => SensorError::ChecksumMismatch,
                DhtError::PinError(_) => SensorError::NotResponding,
            })?;
        Ok(ClimateReading {
            temperature_c: f32::from(reading.temperature),
            humidity_pct: f32::from(reading.relative_humidity),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_bus(&mut self) -> Result<ClimateReading, SensorError> {
        if SIM_FAILING.load(Ordering::SeqCst) {
            return Err(SensorError::Timeout);
        }
        Ok(ClimateReading {
            temperature_c: SIM_TEMP_DECI_C.load(Ordering::SeqCst) as f32 / 10.0,
            humidity_pct: SIM_HUMIDITY_DECI_PCT.load(Ordering::SeqCst) as f32 / 10.0,
        })
    }

    fn validate(reading: ClimateReading) -> Result<ClimateReading, SensorError> {
        let t_ok = (TEMP_MIN_C..=TEMP_MAX_C).contains(&reading.temperature_c);
        let h_ok = (HUMIDITY_MIN_PCT..=HUMIDITY_MAX_PCT).contains(&reading.humidity_pct);
        if t_ok && h_ok {
            Ok(reading)
        } else {
            Err(SensorError::OutOfRange)
        }
    }
}

impl SensorSource for Dht11Sensor {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        self.read_bus().and_then(Self::validate)
    }
}
