//! Host-side integration tests.
//!
//! Everything here runs against the mock hardware in [`mock_hw`] — no
//! ESP-IDF toolchain required.

mod identify_tests;
mod lamp_tests;
mod mock_hw;
mod topology_tests;
