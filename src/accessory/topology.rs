//! Static accessory topology.
//!
//! The Accessory → Service → Characteristic tree the device publishes.
//! Built once at startup, before the accessory server is handed to the
//! network layer, and immutable afterwards — only the value slots behind
//! the characteristic handlers change (they alias the live lamp/climate
//! state). Construction is infallible and complete: no partial topology
//! is ever exposed.

use std::sync::Arc;

use crate::accessory::characteristic::{
    CharacteristicHandler, HumidityCharacteristic, LampIdentify, LampOnCharacteristic,
    SensorIdentify, StaticInfo, TemperatureCharacteristic,
};
use crate::app::climate::ClimateStore;
use crate::app::lamp::LampController;
use crate::app::supervisor::IdentifySupervisor;
use crate::config::DeviceConfig;

/// Accessory category advertised during pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryCategory {
    Lightbulb,
    Sensor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    AccessoryInformation,
    TemperatureSensor,
    HumiditySensor,
    Lightbulb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicKind {
    Name,
    Manufacturer,
    SerialNumber,
    Model,
    FirmwareRevision,
    Identify,
    On,
    CurrentTemperature,
    CurrentRelativeHumidity,
}

/// Addressable leaf: a kind, a unique instance id, and the handler that
/// binds it to device state.
pub struct Characteristic {
    pub iid: u64,
    pub kind: CharacteristicKind,
    pub handler: Arc<dyn CharacteristicHandler>,
}

pub struct Service {
    pub kind: ServiceKind,
    pub primary: bool,
    pub characteristics: Vec<Characteristic>,
}

pub struct Accessory {
    pub id: u64,
    pub category: AccessoryCategory,
    pub services: Vec<Service>,
}

/// The published capability tree.
pub struct AccessoryTopology {
    accessories: Vec<Accessory>,
}

impl AccessoryTopology {
    pub fn accessories(&self) -> &[Accessory] {
        &self.accessories
    }

    /// Total number of characteristics across the tree.
    pub fn characteristic_count(&self) -> usize {
        self.accessories
            .iter()
            .flat_map(|a| &a.services)
            .map(|s| s.characteristics.len())
            .sum()
    }

    /// Look up a characteristic by instance id.
    pub fn characteristic(&self, iid: u64) -> Option<&Characteristic> {
        self.accessories
            .iter()
            .flat_map(|a| &a.services)
            .flat_map(|s| &s.characteristics)
            .find(|c| c.iid == iid)
    }

    /// First characteristic of the given kind, in tree order.
    pub fn find_characteristic(&self, kind: CharacteristicKind) -> Option<&Characteristic> {
        self.accessories
            .iter()
            .flat_map(|a| &a.services)
            .flat_map(|s| &s.characteristics)
            .find(|c| c.kind == kind)
    }

    /// The accessory containing the given instance id.
    pub fn accessory_of(&self, iid: u64) -> Option<&Accessory> {
        self.accessories.iter().find(|a| {
            a.services
                .iter()
                .flat_map(|s| &s.characteristics)
                .any(|c| c.iid == iid)
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Construction
// ───────────────────────────────────────────────────────────────

struct IidAllocator {
    next: u64,
}

impl IidAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn characteristic(
        &mut self,
        kind: CharacteristicKind,
        handler: Arc<dyn CharacteristicHandler>,
    ) -> Characteristic {
        let iid = self.next;
        self.next += 1;
        Characteristic { iid, kind, handler }
    }
}

/// Build the device's one-accessory tree: climate-sensor identity and
/// reading services alongside the lamp identity and lightbulb services.
/// Must fully succeed before the server starts (it cannot fail — all
/// inputs are already constructed).
pub fn build_topology(
    config: &DeviceConfig,
    lamp: &Arc<LampController>,
    climate: &Arc<ClimateStore>,
    supervisor: &Arc<IdentifySupervisor>,
) -> AccessoryTopology {
    let mut iids = IidAllocator::new();

    let info = |iids: &mut IidAllocator,
                name: &str,
                manufacturer: &str,
                serial: &str,
                model: &str,
                revision: &str,
                identify: Arc<dyn CharacteristicHandler>| Service {
        kind: ServiceKind::AccessoryInformation,
        primary: false,
        characteristics: vec![
            iids.characteristic(CharacteristicKind::Name, Arc::new(StaticInfo::new(name))),
            iids.characteristic(
                CharacteristicKind::Manufacturer,
                Arc::new(StaticInfo::new(manufacturer)),
            ),
            iids.characteristic(
                CharacteristicKind::SerialNumber,
                Arc::new(StaticInfo::new(serial)),
            ),
            iids.characteristic(CharacteristicKind::Model, Arc::new(StaticInfo::new(model))),
            iids.characteristic(
                CharacteristicKind::FirmwareRevision,
                Arc::new(StaticInfo::new(revision)),
            ),
            iids.characteristic(CharacteristicKind::Identify, identify),
        ],
    };

    let sensor_info = info(
        &mut iids,
        config.sensor_name.as_str(),
        config.sensor_manufacturer.as_str(),
        config.sensor_serial.as_str(),
        config.sensor_model.as_str(),
        config.firmware_revision.as_str(),
        Arc::new(SensorIdentify),
    );

    let temperature = Service {
        kind: ServiceKind::TemperatureSensor,
        primary: true,
        characteristics: vec![
            iids.characteristic(
                CharacteristicKind::Name,
                Arc::new(StaticInfo::new(config.sensor_name.as_str())),
            ),
            iids.characteristic(
                CharacteristicKind::CurrentTemperature,
                Arc::new(TemperatureCharacteristic::new(Arc::clone(climate))),
            ),
        ],
    };

    let humidity = Service {
        kind: ServiceKind::HumiditySensor,
        primary: false,
        characteristics: vec![
            iids.characteristic(
                CharacteristicKind::Name,
                Arc::new(StaticInfo::new("Humidity Sensor")),
            ),
            iids.characteristic(
                CharacteristicKind::CurrentRelativeHumidity,
                Arc::new(HumidityCharacteristic::new(Arc::clone(climate))),
            ),
        ],
    };

    let lamp_info = info(
        &mut iids,
        config.lamp_name.as_str(),
        config.lamp_manufacturer.as_str(),
        config.lamp_serial.as_str(),
        config.lamp_model.as_str(),
        config.firmware_revision.as_str(),
        Arc::new(LampIdentify::new(Arc::clone(lamp), Arc::clone(supervisor))),
    );

    let lightbulb = Service {
        kind: ServiceKind::Lightbulb,
        primary: true,
        characteristics: vec![
            iids.characteristic(
                CharacteristicKind::Name,
                Arc::new(StaticInfo::new(config.lamp_name.as_str())),
            ),
            iids.characteristic(
                CharacteristicKind::On,
                Arc::new(LampOnCharacteristic::new(Arc::clone(lamp))),
            ),
        ],
    };

    AccessoryTopology {
        accessories: vec![Accessory {
            id: 1,
            category: AccessoryCategory::Lightbulb,
            services: vec![sensor_info, temperature, humidity, lamp_info, lightbulb],
        }],
    }
}
