//! Climate store + periodic sensor polling task.
//!
//! [`ClimateStore`] owns the published temperature/humidity pair; the
//! accessory server reads it through the characteristic handlers while
//! [`SensorPoller`] replaces it from its own thread. A mutex guards the
//! pair so a concurrent get never observes half of an update.
//!
//! Failure policy (per cycle): log, keep the previous reading, emit no
//! notification, try again on the next scheduled cycle. Failures never
//! back off and never terminate the loop.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::accessory::characteristic::Value;
use crate::app::ports::{Delay, NotifySink, SensorSource};

/// One temperature/humidity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    /// Temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent.
    pub humidity_pct: f32,
}

impl Default for ClimateReading {
    fn default() -> Self {
        Self {
            temperature_c: 0.0,
            humidity_pct: 0.0,
        }
    }
}

struct StoreInner {
    reading: ClimateReading,
    samples: u32,
}

/// Published climate readings. Written solely by the polling task, read by
/// the remote-get path.
pub struct ClimateStore {
    inner: Mutex<StoreInner>,
}

impl ClimateStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                reading: ClimateReading::default(),
                samples: 0,
            }),
        }
    }

    fn locked(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latest successfully published reading (zeros until the first
    /// successful cycle).
    pub fn latest(&self) -> ClimateReading {
        self.locked().reading
    }

    /// Number of successful samples published since boot.
    pub fn sample_count(&self) -> u32 {
        self.locked().samples
    }

    /// Atomically replace the published pair.
    pub fn publish(&self, reading: ClimateReading) {
        let mut inner = self.locked();
        inner.reading = reading;
        inner.samples = inner.samples.wrapping_add(1);
    }
}

impl Default for ClimateStore {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Polling task
// ───────────────────────────────────────────────────────────────

/// Long-lived periodic sampling task. Runs on its own thread for the
/// process lifetime; there is no cancellation path.
pub struct SensorPoller {
    store: Arc<ClimateStore>,
    temperature_iid: u64,
    humidity_iid: u64,
    interval_ms: u32,
}

impl SensorPoller {
    /// `temperature_iid`/`humidity_iid` are the topology instance ids the
    /// notifications are addressed to.
    pub fn new(
        store: Arc<ClimateStore>,
        temperature_iid: u64,
        humidity_iid: u64,
        interval_ms: u32,
    ) -> Self {
        Self {
            store,
            temperature_iid,
            humidity_iid,
            interval_ms,
        }
    }

    /// One polling cycle. Returns `true` when a fresh reading was
    /// published (and notified), `false` when the cycle was skipped.
    pub fn poll_once(&self, source: &mut dyn SensorSource, notifier: &dyn NotifySink) -> bool {
        match source.read() {
            Ok(reading) => {
                self.store.publish(reading);
                debug!(
                    "climate: {:.1} degC, {:.1}% RH",
                    reading.temperature_c, reading.humidity_pct
                );
                // Temperature first, then humidity — subscribers rely on
                // this order.
                notifier.notify(self.temperature_iid, Value::Float(reading.temperature_c));
                notifier.notify(self.humidity_iid, Value::Float(reading.humidity_pct));
                true
            }
            Err(e) => {
                warn!("climate: sensor read failed: {e}");
                false
            }
        }
    }

    /// Poll forever. The interval is measured from the end of one read
    /// attempt to the start of the next, not wall-clock aligned.
    pub fn run(
        self,
        mut source: impl SensorSource,
        notifier: impl NotifySink,
        delay: impl Delay,
    ) -> ! {
        loop {
            self.poll_once(&mut source, &notifier);
            delay.sleep_ms(self.interval_ms);
        }
    }
}
