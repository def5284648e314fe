//! LumiSense firmware — main entry point.
//!
//! Bootstrap order matches the device's dependency chain: logging first,
//! then WiFi association, then the lamp and climate owners, then the
//! static topology (built completely before the server sees it), then the
//! polling task, and finally the accessory server.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │  LampGpio      Dht11Sensor    WifiBootstrap              │
//! │  (LampPin)     (SensorSource) (one-shot connect)         │
//! │  LogNotifier   AccessoryServerAdapter                    │
//! │                                                          │
//! │  ───────────────── Port trait boundary ───────────────   │
//! │                                                          │
//! │  LampController · ClimateStore/SensorPoller              │
//! │  IdentifySupervisor · AccessoryTopology                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use lumisense::accessory::topology::{CharacteristicKind, build_topology};
use lumisense::adapters::dht::Dht11Sensor;
use lumisense::adapters::gpio::LampGpio;
use lumisense::adapters::server::{AccessoryServerAdapter, LogNotifier};
use lumisense::adapters::wifi::WifiBootstrap;
use lumisense::app::climate::{ClimateStore, SensorPoller};
use lumisense::app::lamp::LampController;
use lumisense::app::ports::{Delay, ThreadDelay};
use lumisense::app::supervisor::IdentifySupervisor;
use lumisense::config::DeviceConfig;
use lumisense::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LumiSense v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DeviceConfig::default();

    // ── 2. WiFi association (one-shot) ────────────────────────
    let mut wifi = WifiBootstrap::new();
    if let Err(e) = wifi.connect(config.wifi_ssid.as_str(), config.wifi_password.as_str()) {
        // Recovery is out of scope here: the external watchdog resets the
        // device if the network never comes up.
        warn!("wifi bootstrap failed ({e}), continuing unconnected");
    }

    // ── 3. Device state owners ────────────────────────────────
    let lamp_pin = LampGpio::new(pins::LAMP_GPIO).context("failed to claim the lamp pin")?;
    let lamp = Arc::new(LampController::new(Box::new(lamp_pin)));
    let climate = Arc::new(ClimateStore::new());
    let delay: Arc<dyn Delay> = Arc::new(ThreadDelay);
    let supervisor = Arc::new(IdentifySupervisor::new(Arc::clone(&delay)));

    // ── 4. Topology (complete before the server starts) ───────
    let topology = build_topology(&config, &lamp, &climate, &supervisor);
    let temperature_iid = topology
        .find_characteristic(CharacteristicKind::CurrentTemperature)
        .context("topology is missing the temperature characteristic")?
        .iid;
    let humidity_iid = topology
        .find_characteristic(CharacteristicKind::CurrentRelativeHumidity)
        .context("topology is missing the humidity characteristic")?
        .iid;

    let server = AccessoryServerAdapter::init(topology, config.setup_code.as_str())?;

    // ── 5. Sensor polling task ────────────────────────────────
    let poller = SensorPoller::new(
        Arc::clone(&climate),
        temperature_iid,
        humidity_iid,
        config.sensor_poll_interval_ms,
    );
    let sensor = Dht11Sensor::new(pins::DHT_GPIO).context("failed to claim the DHT bus pin")?;
    std::thread::Builder::new()
        .name("climate-poll".into())
        .spawn(move || poller.run(sensor, LogNotifier, ThreadDelay))
        .context("failed to spawn the climate polling task")?;

    // ── 6. Serve for the process lifetime ─────────────────────
    server.serve(delay.as_ref())
}
