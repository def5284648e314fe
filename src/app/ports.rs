//! Port traits — the boundary between the device core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ core (lamp / climate / identify)
//! ```
//!
//! Driven adapters (GPIO pin, DHT bus, accessory server, timers) implement
//! these traits. The core consumes them via generics or trait objects, so
//! the domain logic never touches hardware directly and every task is
//! testable with mocks on the host.

use crate::accessory::characteristic::Value;
use crate::app::climate::ClimateReading;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Lamp output (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// One digital output driving the lamp.
///
/// Assumed infallible at this layer — a real GPIO fault is handled by the
/// external watchdog, not by this core.
pub trait LampPin: Send {
    /// Drive the pin to the given level.
    fn write(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Sensor source (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Blocking climate read. Bus-timing sensitive; may fail transiently.
pub trait SensorSource: Send {
    /// Perform one blocking read of temperature and humidity.
    fn read(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Notification sink (driven adapter: domain → accessory server)
// ───────────────────────────────────────────────────────────────

/// Best-effort push of a changed characteristic value to the accessory
/// server. Delivery guarantees are the server's problem, not ours.
pub trait NotifySink: Send + Sync {
    fn notify(&self, characteristic_iid: u64, value: Value);
}

// ───────────────────────────────────────────────────────────────
// Delay (driven adapter: domain → scheduler timer)
// ───────────────────────────────────────────────────────────────

/// Timer suspension point. The polling loop and the identify animation
/// block through this, never by spinning.
pub trait Delay: Send + Sync {
    fn sleep_ms(&self, ms: u32);
}

/// Production delay backed by the OS scheduler (ESP-IDF std or host).
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn sleep_ms(&self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
