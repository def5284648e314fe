//! End-to-end dispatch through the accessory server: the static topology,
//! remote get/set routing, and the identify fan-out.

use std::sync::Arc;

use lumisense::accessory::characteristic::Value;
use lumisense::accessory::topology::{CharacteristicKind, ServiceKind, build_topology};
use lumisense::adapters::server::AccessoryServerAdapter;
use lumisense::app::climate::{ClimateReading, ClimateStore};
use lumisense::app::lamp::LampController;
use lumisense::app::supervisor::IdentifySupervisor;
use lumisense::config::DeviceConfig;
use lumisense::error::Error;

use crate::mock_hw::{InstantDelay, PinState, recording_pin};

struct Harness {
    server: AccessoryServerAdapter,
    lamp: Arc<LampController>,
    climate: Arc<ClimateStore>,
    supervisor: Arc<IdentifySupervisor>,
    pin: Arc<PinState>,
}

fn make_harness() -> Harness {
    let (pin, state) = recording_pin();
    let lamp = Arc::new(LampController::new(Box::new(pin)));
    let climate = Arc::new(ClimateStore::new());
    let supervisor = Arc::new(IdentifySupervisor::new(Arc::new(InstantDelay)));
    let topology = build_topology(&DeviceConfig::default(), &lamp, &climate, &supervisor);
    Harness {
        server: AccessoryServerAdapter::init(topology, "540-61-107").unwrap(),
        lamp,
        climate,
        supervisor,
        pin: state,
    }
}

#[test]
fn topology_shape_matches_the_device() {
    let h = make_harness();
    let accessories = h.server.topology().accessories();
    assert_eq!(accessories.len(), 1);

    let kinds: Vec<ServiceKind> = accessories[0].services.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ServiceKind::AccessoryInformation,
            ServiceKind::TemperatureSensor,
            ServiceKind::HumiditySensor,
            ServiceKind::AccessoryInformation,
            ServiceKind::Lightbulb,
        ]
    );

    // Instance ids are dense and start at 1.
    let count = h.server.topology().characteristic_count() as u64;
    for iid in 1..=count {
        assert!(h.server.topology().characteristic(iid).is_some(), "iid {iid}");
    }
    assert!(h.server.topology().characteristic(count + 1).is_none());
}

#[test]
fn info_characteristics_read_the_configured_identity() {
    let h = make_harness();
    let manufacturer = h
        .server
        .topology()
        .find_characteristic(CharacteristicKind::Manufacturer)
        .unwrap();
    assert_eq!(
        h.server.handle_get(manufacturer.iid).unwrap(),
        Value::text("HaPK")
    );
}

#[test]
fn remote_set_drives_the_lamp_pin() {
    let h = make_harness();
    let on_iid = h
        .server
        .topology()
        .find_characteristic(CharacteristicKind::On)
        .unwrap()
        .iid;

    h.server.handle_set(on_iid, Value::Bool(true)).unwrap();
    assert!(h.lamp.is_on());
    assert!(h.pin.level());

    assert_eq!(h.server.handle_get(on_iid).unwrap(), Value::Bool(true));
}

#[test]
fn remote_get_sees_published_climate() {
    let h = make_harness();
    h.climate.publish(ClimateReading {
        temperature_c: 19.0,
        humidity_pct: 61.5,
    });

    let t = h
        .server
        .topology()
        .find_characteristic(CharacteristicKind::CurrentTemperature)
        .unwrap()
        .iid;
    let rh = h
        .server
        .topology()
        .find_characteristic(CharacteristicKind::CurrentRelativeHumidity)
        .unwrap()
        .iid;

    assert_eq!(h.server.handle_get(t).unwrap(), Value::Float(19.0));
    assert_eq!(h.server.handle_get(rh).unwrap(), Value::Float(61.5));
}

#[test]
fn identify_request_spawns_animations() {
    let h = make_harness();
    assert_eq!(h.supervisor.total_spawned(), 0);

    h.server.handle_identify(1).unwrap();

    // Both information services carry an identify characteristic; only
    // the lamp's spawns an animation task.
    assert_eq!(h.supervisor.total_spawned(), 1);
}

#[test]
fn identify_on_unknown_accessory_is_an_error() {
    let h = make_harness();
    assert_eq!(h.server.handle_identify(7), Err(Error::UnknownAccessory(7)));
}

#[test]
fn info_characteristics_reject_writes() {
    let h = make_harness();
    let name = h
        .server
        .topology()
        .find_characteristic(CharacteristicKind::Name)
        .unwrap()
        .iid;
    assert!(matches!(
        h.server.handle_set(name, Value::text("nope")),
        Err(Error::Value(_))
    ));
}
