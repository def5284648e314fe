//! Lamp controller contract: set/get roundtrip, format rejection, and
//! hardware write accounting.

use std::sync::Arc;

use lumisense::accessory::characteristic::Value;
use lumisense::app::lamp::LampController;
use lumisense::error::ValueError;

use crate::mock_hw::recording_pin;

#[test]
fn set_then_get_returns_value_with_exactly_one_write() {
    let (pin, state) = recording_pin();
    let lamp = Arc::new(LampController::new(Box::new(pin)));

    for &v in &[true, false, true] {
        let before = state.write_count();
        lamp.set_on(v);
        assert_eq!(lamp.is_on(), v);
        assert_eq!(state.level(), v);
        assert_eq!(state.write_count(), before + 1, "exactly one pin write per set");
    }
}

#[test]
fn non_bool_set_is_rejected_without_any_effect() {
    let (pin, state) = recording_pin();
    let lamp = LampController::new(Box::new(pin));
    lamp.set_on(true);
    let writes_before = state.write_count();

    for bad in [Value::Float(42.0), Value::text("on")] {
        let err = lamp.apply(&bad).unwrap_err();
        assert!(matches!(err, ValueError::InvalidFormat { .. }));
        assert!(lamp.is_on(), "state must be untouched");
        assert_eq!(state.write_count(), writes_before, "no hardware write");
    }
}

#[test]
fn get_has_no_side_effects() {
    let (pin, state) = recording_pin();
    let lamp = LampController::new(Box::new(pin));
    let before = state.write_count();
    for _ in 0..10 {
        let _ = lamp.is_on();
    }
    assert_eq!(state.write_count(), before);
}
