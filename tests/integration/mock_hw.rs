//! Mock hardware adapters for integration tests.
//!
//! Records every pin write and notification so tests can assert on the
//! full command history without touching real GPIO or the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lumisense::accessory::characteristic::Value;
use lumisense::app::climate::ClimateReading;
use lumisense::app::ports::{Delay, LampPin, NotifySink, SensorSource};
use lumisense::error::SensorError;

// ── Recording lamp pin ────────────────────────────────────────

/// Observable pin state, shared with the test after the pin itself moves
/// into the lamp controller.
#[derive(Default)]
pub struct PinState {
    level: AtomicBool,
    writes: Mutex<Vec<bool>>,
}

#[allow(dead_code)]
impl PinState {
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

pub struct RecordingPin {
    state: Arc<PinState>,
}

impl LampPin for RecordingPin {
    fn write(&mut self, on: bool) {
        self.state.level.store(on, Ordering::SeqCst);
        self.state.writes.lock().unwrap().push(on);
    }
}

/// Build a recording pin plus the handle the test keeps.
pub fn recording_pin() -> (RecordingPin, Arc<PinState>) {
    let state = Arc::new(PinState::default());
    (
        RecordingPin {
            state: Arc::clone(&state),
        },
        state,
    )
}

// ── Scripted sensor ───────────────────────────────────────────

/// Sensor source that replays a fixed script of results.
pub struct ScriptedSensor {
    script: VecDeque<Result<ClimateReading, SensorError>>,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new(script: Vec<Result<ClimateReading, SensorError>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn reading(temperature_c: f32, humidity_pct: f32) -> Result<ClimateReading, SensorError> {
        Ok(ClimateReading {
            temperature_c,
            humidity_pct,
        })
    }
}

impl SensorSource for ScriptedSensor {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        self.script
            .pop_front()
            .unwrap_or(Err(SensorError::NotResponding))
    }
}

// ── Recording notifier ────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(u64, Value)>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(u64, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotifySink for RecordingNotifier {
    fn notify(&self, characteristic_iid: u64, value: Value) {
        self.sent.lock().unwrap().push((characteristic_iid, value));
    }
}

// ── Delays ────────────────────────────────────────────────────

/// Delay that returns immediately — animations and poll cycles run at
/// full speed.
pub struct InstantDelay;

impl Delay for InstantDelay {
    fn sleep_ms(&self, _ms: u32) {}
}

/// Delay that blocks every sleeper until the test opens the gate. Lets a
/// test freeze an animation mid-blink at a deterministic point.
pub struct GateDelay {
    open: Mutex<bool>,
    cv: std::sync::Condvar,
}

#[allow(dead_code)]
impl GateDelay {
    pub fn new() -> Self {
        Self {
            open: Mutex::new(false),
            cv: std::sync::Condvar::new(),
        }
    }

    pub fn release(&self) {
        *self.open.lock().unwrap() = true;
        self.cv.notify_all();
    }
}

impl Default for GateDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for GateDelay {
    fn sleep_ms(&self, _ms: u32) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.cv.wait(open).unwrap();
        }
    }
}
