//! Unified error types for the LumiSense firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level bootstrap's error handling uniform. All variants are
//! `Copy`-cheap and allocation-free. Nothing in this module
//! represents a fatal condition — a failed sensor cycle is skipped, a
//! malformed remote write is rejected, and the device keeps running.

use core::fmt;

use crate::accessory::characteristic::Format;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The climate sensor could not be read this cycle.
    Sensor(SensorError),
    /// A remote write carried a value of the wrong type.
    Value(ValueError),
    /// WiFi bootstrap failed.
    Comms(ConnectivityError),
    /// One-shot initialisation failed.
    Init(&'static str),
    /// A remote request addressed a characteristic instance id that the
    /// topology does not contain.
    UnknownCharacteristic(u64),
    /// A remote identify request addressed an accessory id that the
    /// topology does not contain.
    UnknownAccessory(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Value(e) => write!(f, "value: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::UnknownCharacteristic(iid) => write!(f, "unknown characteristic iid={iid}"),
            Self::UnknownAccessory(aid) => write!(f, "unknown accessory id={aid}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Transient climate-sensor read failures.
///
/// Recovered locally by the polling task: the cycle is logged and skipped,
/// the previous published reading is retained, and the next attempt happens
/// on the regular schedule — no backoff, no escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not pull the bus within the protocol window.
    Timeout,
    /// The transfer completed but the checksum byte did not match.
    ChecksumMismatch,
    /// The sensor did not respond to the start signal at all.
    NotResponding,
    /// The decoded reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "bus timeout"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::NotResponding => write!(f, "sensor not responding"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Characteristic value errors
// ---------------------------------------------------------------------------

/// A remote write was rejected before any state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// The value's runtime type does not match the characteristic's
    /// declared format.
    InvalidFormat { expected: Format, actual: Format },
    /// The characteristic is read-only.
    NotWritable,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { expected, actual } => {
                write!(f, "invalid format: expected {expected:?}, got {actual:?}")
            }
            Self::NotWritable => write!(f, "characteristic is not writable"),
        }
    }
}

impl From<ValueError> for Error {
    fn from(e: ValueError) -> Self {
        Self::Value(e)
    }
}

// ---------------------------------------------------------------------------
// Connectivity errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    AlreadyConnected,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::AlreadyConnected => write!(f, "already connected to AP"),
        }
    }
}

impl From<ConnectivityError> for Error {
    fn from(e: ConnectivityError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
