//! Device configuration.
//!
//! Identity strings published through the accessory-information services,
//! WiFi credentials, the pairing setup code, and the sensor poll interval.
//! The identify blink pattern is deliberately *not* here — it is a fixed
//! protocol behaviour, defined as constants in [`crate::app::identify`].
//!
//! Device state (lamp on/off, climate readings) is never persisted; every
//! boot starts from defaults.

use serde::{Deserialize, Serialize};

fn ident<const N: usize>(s: &str) -> heapless::String<N> {
    heapless::String::try_from(s).unwrap_or_default()
}

/// Core device configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    // --- Climate sensor identity ---
    pub sensor_name: heapless::String<32>,
    pub sensor_manufacturer: heapless::String<32>,
    pub sensor_serial: heapless::String<32>,
    pub sensor_model: heapless::String<32>,

    // --- Lamp identity ---
    pub lamp_name: heapless::String<32>,
    pub lamp_manufacturer: heapless::String<32>,
    pub lamp_serial: heapless::String<32>,
    pub lamp_model: heapless::String<32>,

    /// Firmware revision published for both identities.
    pub firmware_revision: heapless::String<16>,

    // --- Network ---
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,

    /// Pairing setup code handed to the accessory server ("XXX-XX-XXX").
    pub setup_code: heapless::String<16>,

    // --- Timing ---
    /// Delay between the end of one sensor read attempt and the start of
    /// the next (milliseconds).
    pub sensor_poll_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sensor_name: ident("Temperature Sensor"),
            sensor_manufacturer: ident("HaPK"),
            sensor_serial: ident("0012345"),
            sensor_model: ident("MyTemperatureSensor"),

            lamp_name: ident("Smart LED"),
            lamp_manufacturer: ident("Cowcowwow"),
            lamp_serial: ident("037A2BABF19D"),
            lamp_model: ident("TBGSLED"),

            firmware_revision: ident("0.1"),

            wifi_ssid: ident("HomeNetwork"),
            wifi_password: ident("changeme123"),

            setup_code: ident("540-61-107"),

            sensor_poll_interval_ms: 3000,
        }
    }
}
