//! Characteristic values and handlers.
//!
//! A characteristic is the addressable leaf of the accessory topology: a
//! typed slot the server reads, writes, and notifies. Instead of raw
//! getter/setter function pointers, each characteristic kind implements
//! [`CharacteristicHandler`] once, and the topology holds the handler
//! instances. The handlers alias the live device state (`LampController`,
//! `ClimateStore`) — reading a characteristic reads the owner's state,
//! never a cached copy.

use std::sync::Arc;

use log::info;

use crate::app::climate::ClimateStore;
use crate::app::lamp::LampController;
use crate::app::supervisor::IdentifySupervisor;
use crate::error::ValueError;

/// Declared characteristic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bool,
    Float,
    Str,
}

/// A typed characteristic value as it crosses the server boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f32),
    Str(heapless::String<64>),
}

impl Value {
    /// Runtime type of this value.
    pub fn format(&self) -> Format {
        match self {
            Self::Bool(_) => Format::Bool,
            Self::Float(_) => Format::Float,
            Self::Str(_) => Format::Str,
        }
    }

    /// Build a string value, truncating past 64 bytes.
    pub fn text(s: &str) -> Self {
        Self::Str(truncated(s))
    }
}

fn truncated(s: &str) -> heapless::String<64> {
    let mut out = heapless::String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// One remotely addressable characteristic kind.
///
/// The invariant every implementation upholds: a write whose value format
/// does not match [`format`](Self::format) is rejected without mutating
/// any state.
pub trait CharacteristicHandler: Send + Sync {
    fn format(&self) -> Format;

    /// Read the current value. Pure; bounded by a register read.
    fn read(&self) -> Value;

    /// Apply a remote write. Read-only characteristics keep the default.
    fn write(&self, value: Value) -> Result<(), ValueError> {
        let _ = value;
        Err(ValueError::NotWritable)
    }
}

// ───────────────────────────────────────────────────────────────
// Static informational characteristics (name, manufacturer, ...)
// ───────────────────────────────────────────────────────────────

pub struct StaticInfo {
    value: heapless::String<64>,
}

impl StaticInfo {
    pub fn new(value: &str) -> Self {
        Self {
            value: truncated(value),
        }
    }
}

impl CharacteristicHandler for StaticInfo {
    fn format(&self) -> Format {
        Format::Str
    }

    fn read(&self) -> Value {
        Value::Str(self.value.clone())
    }
}

// ───────────────────────────────────────────────────────────────
// Lamp on/off
// ───────────────────────────────────────────────────────────────

pub struct LampOnCharacteristic {
    lamp: Arc<LampController>,
}

impl LampOnCharacteristic {
    pub fn new(lamp: Arc<LampController>) -> Self {
        Self { lamp }
    }
}

impl CharacteristicHandler for LampOnCharacteristic {
    fn format(&self) -> Format {
        Format::Bool
    }

    fn read(&self) -> Value {
        Value::Bool(self.lamp.is_on())
    }

    fn write(&self, value: Value) -> Result<(), ValueError> {
        self.lamp.apply(&value)
    }
}

// ───────────────────────────────────────────────────────────────
// Climate readings
// ───────────────────────────────────────────────────────────────

pub struct TemperatureCharacteristic {
    store: Arc<ClimateStore>,
}

impl TemperatureCharacteristic {
    pub fn new(store: Arc<ClimateStore>) -> Self {
        Self { store }
    }
}

impl CharacteristicHandler for TemperatureCharacteristic {
    fn format(&self) -> Format {
        Format::Float
    }

    fn read(&self) -> Value {
        Value::Float(self.store.latest().temperature_c)
    }
}

pub struct HumidityCharacteristic {
    store: Arc<ClimateStore>,
}

impl HumidityCharacteristic {
    pub fn new(store: Arc<ClimateStore>) -> Self {
        Self { store }
    }
}

impl CharacteristicHandler for HumidityCharacteristic {
    fn format(&self) -> Format {
        Format::Float
    }

    fn read(&self) -> Value {
        Value::Float(self.store.latest().humidity_pct)
    }
}

// ───────────────────────────────────────────────────────────────
// Identify
// ───────────────────────────────────────────────────────────────

/// Lamp identify: spawns the blink animation and returns immediately.
pub struct LampIdentify {
    lamp: Arc<LampController>,
    supervisor: Arc<IdentifySupervisor>,
}

impl LampIdentify {
    pub fn new(lamp: Arc<LampController>, supervisor: Arc<IdentifySupervisor>) -> Self {
        Self { lamp, supervisor }
    }
}

impl CharacteristicHandler for LampIdentify {
    fn format(&self) -> Format {
        Format::Bool
    }

    fn read(&self) -> Value {
        // Write-only in practice; the protocol never reads identify.
        Value::Bool(false)
    }

    fn write(&self, value: Value) -> Result<(), ValueError> {
        if value.format() != Format::Bool {
            return Err(ValueError::InvalidFormat {
                expected: Format::Bool,
                actual: value.format(),
            });
        }
        info!("identify: lamp blink requested");
        // Fire-and-forget: the handle is dropped, the supervisor tracks
        // the instance.
        let _ = self.supervisor.request(Arc::clone(&self.lamp));
        Ok(())
    }
}

/// Sensor identify: there is nothing to blink on the sensor side, so the
/// request is acknowledged in the log only.
pub struct SensorIdentify;

impl CharacteristicHandler for SensorIdentify {
    fn format(&self) -> Format {
        Format::Bool
    }

    fn read(&self) -> Value {
        Value::Bool(false)
    }

    fn write(&self, value: Value) -> Result<(), ValueError> {
        if value.format() != Format::Bool {
            return Err(ValueError::InvalidFormat {
                expected: Format::Bool,
                actual: value.format(),
            });
        }
        info!("identify: climate sensor");
        Ok(())
    }
}
