//! Custom key behaviors for a wireless keyboard firmware
//!
//! Implements the press/release handlers behind special key bindings:
//! clearing Bluetooth bonds on a long hold, cycling RGB underglow
//! brightness/speed and applying RGB underglow presets. The radio stack,
//! the underglow renderer and the timer facility are owned by the embedding
//! firmware and accessed through traits.

#![no_std]

// Use std when running tests, see: https://stackoverflow.com/a/28186509
#[cfg(test)]
#[macro_use]
extern crate std;

/// Press/release behavior handlers and their dispatch
pub mod behaviors;
/// Wireless profile and bond storage control
pub mod ble;
/// RGB underglow control and pure step/speed algorithms
pub mod underglow;
/// Cancellable delayed work scheduling
pub mod work;

#[cfg(test)]
mod mock;

/// Numeric failure code reported by an external subsystem call.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorCode(pub i16);
