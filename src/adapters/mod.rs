//! Concrete adapters behind the port traits.
//!
//! Hardware-facing modules use `cfg(target_os = "espidf")` gating with
//! in-memory simulation on every other target, so the whole crate builds
//! and tests on the host.

pub mod dht;
pub mod gpio;
pub mod server;
pub mod wifi;
