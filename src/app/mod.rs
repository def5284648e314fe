//! Device core — pure control logic, zero I/O.
//!
//! The lamp controller, the climate polling task, and the identify
//! animation all live here. Interaction with hardware and with the
//! accessory server happens exclusively through the **port traits** in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod climate;
pub mod identify;
pub mod lamp;
pub mod ports;
pub mod supervisor;
