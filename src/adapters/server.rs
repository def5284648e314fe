//! Accessory server boundary.
//!
//! The protocol server proper (pairing, session encryption, transport) is
//! an external collaborator. This adapter is the narrow seam between it
//! and the device core: it holds the immutable topology and dispatches
//! remote get/set/identify requests into the characteristic handlers,
//! and it provides the [`NotifySink`] the polling task pushes through.

use log::{info, warn};

use crate::accessory::characteristic::Value;
use crate::accessory::topology::{AccessoryTopology, CharacteristicKind};
use crate::app::ports::{Delay, NotifySink};
use crate::error::Error;

// ───────────────────────────────────────────────────────────────
// Notification sink
// ───────────────────────────────────────────────────────────────

/// [`NotifySink`] that writes change pushes to the serial log. On the
/// device the transport layer forwards the same calls to subscribed
/// controllers; delivery is best-effort either way.
pub struct LogNotifier;

impl NotifySink for LogNotifier {
    fn notify(&self, characteristic_iid: u64, value: Value) {
        info!("notify | iid={characteristic_iid} value={value:?}");
    }
}

// ───────────────────────────────────────────────────────────────
// Server adapter
// ───────────────────────────────────────────────────────────────

pub struct AccessoryServerAdapter {
    topology: AccessoryTopology,
    setup_code: heapless::String<16>,
}

impl AccessoryServerAdapter {
    /// Accept the fully built topology and the pairing setup code. The
    /// topology must be complete before this point — nothing partial is
    /// ever exposed to the network layer.
    pub fn init(topology: AccessoryTopology, setup_code: &str) -> Result<Self, Error> {
        let code = heapless::String::try_from(setup_code)
            .map_err(|()| Error::Init("setup code too long"))?;
        if !setup_code_is_valid(setup_code) {
            return Err(Error::Init("setup code must be XXX-XX-XXX digits"));
        }
        info!(
            "server: topology ready ({} characteristics)",
            topology.characteristic_count()
        );
        Ok(Self {
            topology,
            setup_code: code,
        })
    }

    pub fn topology(&self) -> &AccessoryTopology {
        &self.topology
    }

    /// Remote read of a characteristic value.
    pub fn handle_get(&self, iid: u64) -> Result<Value, Error> {
        let characteristic = self
            .topology
            .characteristic(iid)
            .ok_or(Error::UnknownCharacteristic(iid))?;
        Ok(characteristic.handler.read())
    }

    /// Remote write. Format mismatches are rejected by the handler with
    /// no state mutation; the rejection is logged and returned.
    pub fn handle_set(&self, iid: u64, value: Value) -> Result<(), Error> {
        let characteristic = self
            .topology
            .characteristic(iid)
            .ok_or(Error::UnknownCharacteristic(iid))?;
        characteristic.handler.write(value).map_err(|e| {
            warn!("server: write to iid={iid} rejected: {e}");
            Error::Value(e)
        })
    }

    /// Remote identify request for an accessory: fires every identify
    /// characteristic it carries and returns immediately.
    pub fn handle_identify(&self, accessory_id: u64) -> Result<(), Error> {
        let accessory = self
            .topology
            .accessories()
            .iter()
            .find(|a| a.id == accessory_id)
            .ok_or(Error::UnknownAccessory(accessory_id))?;

        for characteristic in accessory
            .services
            .iter()
            .flat_map(|s| &s.characteristics)
            .filter(|c| c.kind == CharacteristicKind::Identify)
        {
            // Identify write failures are impossible for a Bool(true);
            // keep the dispatch loop going regardless.
            if let Err(e) = characteristic.handler.write(Value::Bool(true)) {
                warn!("server: identify on iid={} failed: {e}", characteristic.iid);
            }
        }
        Ok(())
    }

    /// Hand control to the protocol transport. On the device the
    /// transport runs its own tasks and dispatches into `handle_*`; this
    /// thread just stays parked for the process lifetime.
    pub fn serve(&self, delay: &dyn Delay) -> ! {
        info!(
            "server: accepting pairings (setup code {})",
            self.setup_code
        );
        loop {
            delay.sleep_ms(1_000);
        }
    }
}

fn setup_code_is_valid(code: &str) -> bool {
    let parts: Vec<&str> = code.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 3
        && parts[1].len() == 2
        && parts[2].len() == 3
        && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()))
}
