//! Input-triggered key behaviors
//!
//! Each behavior instance is bound to one key by the event dispatch layer,
//! which delivers press/release events (and, for the hold behavior, timer
//! expiry) serialized per instance. Behaviors drive the radio and underglow
//! subsystems through the traits in [`crate::ble`] and [`crate::underglow`].

/// Clear Bluetooth bonds when a key is held long enough
mod bt_hold;
/// Advance underglow brightness or speed on each press
mod rgb_cycle;
/// Apply a fixed underglow configuration on press
mod rgb_preset;

pub use bt_hold::{BtHold, HoldConfig};
pub use rgb_cycle::{CycleConfig, CycleMode, RgbCycle};
pub use rgb_preset::{PresetConfig, RgbPreset};

use serde::{Serialize, Deserialize};

use crate::ble::ProfileControl;
use crate::underglow::UnderglowControl;
use crate::work::DelayedWork;
use crate::ErrorCode;

/// External call on which a behavior sequence stopped
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    PowerOn,
    SelectEffect,
    SetColor,
    ChangeBrightness,
    ChangeSpeed,
}

/// Failure reported by a press/release handler
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BehaviorError {
    /// The required subsystem is not present in this firmware
    NotSupported,
    /// An external call failed; the sequence was aborted at `step` with no
    /// rollback of the steps already applied
    External { step: Step, code: ErrorCode },
}

/// Handler status returned to the event dispatch layer.
///
/// `Ok` means the event was consumed and further processing should stop.
/// Errors are surfaced to logs only; there is no user-facing error channel.
pub type BehaviorResult = Result<(), BehaviorError>;

/// Immutable configuration of one behavior instance
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BehaviorConfig {
    BtHold(HoldConfig),
    RgbCycle(CycleConfig),
    RgbPreset(PresetConfig),
}

/// A configured behavior instance bound to one key
pub enum Behavior<T: DelayedWork> {
    BtHold(BtHold<T>),
    RgbCycle(RgbCycle),
    RgbPreset(RgbPreset),
}

impl<T: DelayedWork> Behavior<T> {
    /// Build an instance from its configuration.
    ///
    /// `timer` is consulted only for configurations that need a delayed
    /// action handle.
    pub fn with_config(config: &BehaviorConfig, timer: impl FnOnce() -> T) -> Self {
        match config {
            BehaviorConfig::BtHold(cfg) => Self::BtHold(BtHold::new(cfg.clone(), timer())),
            BehaviorConfig::RgbCycle(cfg) => Self::RgbCycle(RgbCycle::new(cfg.clone())),
            BehaviorConfig::RgbPreset(cfg) => Self::RgbPreset(RgbPreset::new(cfg.clone())),
        }
    }

    /// Key press entry point.
    ///
    /// `underglow` is `None` when the firmware was built without the
    /// underglow subsystem; behaviors that need it then report
    /// [`BehaviorError::NotSupported`].
    pub fn on_press(&mut self, underglow: Option<&mut dyn UnderglowControl>) -> BehaviorResult {
        match self {
            Self::BtHold(hold) => hold.on_press(),
            Self::RgbCycle(cycle) => cycle.on_press(underglow),
            Self::RgbPreset(preset) => preset.on_press(underglow),
        }
    }

    /// Key release entry point
    pub fn on_release(&mut self) -> BehaviorResult {
        match self {
            Self::BtHold(hold) => hold.on_release(),
            Self::RgbCycle(cycle) => cycle.on_release(),
            Self::RgbPreset(preset) => preset.on_release(),
        }
    }

    /// Hold timer expiry, routed here by the platform timer callback on the
    /// same context as press/release
    pub fn on_hold_expired(&mut self, ble: &mut dyn ProfileControl) {
        match self {
            Self::BtHold(hold) => hold.on_hold_expired(ble),
            _ => log::warn!("Timer expiry delivered to a behavior without a timer"),
        }
    }
}
