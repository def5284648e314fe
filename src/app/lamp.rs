//! Lamp controller — the single owner of the lamp's on/off state.
//!
//! The boolean state and the output pin live together behind one mutex.
//! That makes every operation that touches them — a remote set, a get, a
//! transient blink pulse, or the identify animation's restoration — a
//! serialized critical section, so a restoration can never clobber a set
//! that landed between its read and its write.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::accessory::characteristic::{Format, Value};
use crate::app::ports::LampPin;
use crate::error::ValueError;

struct LampShared {
    on: bool,
    pin: Box<dyn LampPin>,
}

/// Owner of `LampState`. Shared across the server dispatch context and any
/// running identify animations via `Arc`.
pub struct LampController {
    inner: Mutex<LampShared>,
}

impl LampController {
    /// Take ownership of the output pin and drive it to the initial
    /// off state.
    pub fn new(mut pin: Box<dyn LampPin>) -> Self {
        pin.write(false);
        Self {
            inner: Mutex::new(LampShared { on: false, pin }),
        }
    }

    fn shared(&self) -> MutexGuard<'_, LampShared> {
        // A panic while holding the lock must not brick the device; the
        // protected state is a bool and stays coherent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current stored state. No side effects.
    pub fn is_on(&self) -> bool {
        self.shared().on
    }

    /// Store the new state and synchronously drive the pin to match.
    pub fn set_on(&self, on: bool) {
        let mut shared = self.shared();
        shared.on = on;
        shared.pin.write(on);
        info!("lamp: set {}", if on { "on" } else { "off" });
    }

    /// Remote-write entry point: reject non-boolean values without any
    /// state or hardware mutation.
    pub fn apply(&self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::Bool(on) => {
                self.set_on(*on);
                Ok(())
            }
            other => {
                warn!("lamp: invalid value format {:?}", other.format());
                Err(ValueError::InvalidFormat {
                    expected: Format::Bool,
                    actual: other.format(),
                })
            }
        }
    }

    /// Drive the pin without touching the stored state. Used by the
    /// identify animation for its blink toggles.
    pub fn pulse(&self, level: bool) {
        self.shared().pin.write(level);
    }

    /// Drive the pin back to the stored state, reading and writing under
    /// one lock acquisition. This is the identify animation's terminal
    /// step; the value restored is whatever is stored *now*, not a value
    /// captured when the animation was spawned.
    pub fn restore(&self) {
        let mut shared = self.shared();
        let on = shared.on;
        shared.pin.write(on);
    }
}
