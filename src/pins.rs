//! GPIO pin assignments for the LumiSense board.
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers.

/// Lamp output pin (active HIGH). GPIO 2 is the on-module LED on most
/// ESP32 dev boards.
pub const LAMP_GPIO: i32 = 2;

/// DHT11 single-wire data bus (external pull-up, no internal pull).
pub const DHT_GPIO: i32 = 4;
