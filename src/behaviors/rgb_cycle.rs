use serde::{Serialize, Deserialize};

use super::{BehaviorError, BehaviorResult, Step};
use crate::underglow::{
    brightness_step, normalize_speed, BrightnessScale, UnderglowControl, SPEED_MAX, SPEED_MIN,
};

/// What a cycle binding advances on each press
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleMode {
    Brightness,
    Speed,
}

/// Configuration of a single cycle binding
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleConfig {
    pub mode: CycleMode,
    /// Brightness scale of the underglow, used in [`CycleMode::Brightness`]
    pub brightness: BrightnessScale,
    /// Speed level the first press advances from, used in [`CycleMode::Speed`]
    pub speed_default: u8,
}

/// Cycle behavior
///
/// Each press advances one step: brightness walks up the scale and wraps
/// back to its minimum, speed walks up the level range and wraps to
/// [`SPEED_MIN`]. Release does nothing.
pub struct RgbCycle {
    config: CycleConfig,
    /// Speed level applied by the last press, `None` until first use.
    ///
    /// Cached locally because the subsystem only exposes relative speed
    /// adjustment.
    speed_index: Option<u8>,
}

impl RgbCycle {
    pub fn new(config: CycleConfig) -> Self {
        Self { config, speed_index: None }
    }

    pub fn on_press(&mut self, underglow: Option<&mut dyn UnderglowControl>) -> BehaviorResult {
        let Some(underglow) = underglow else {
            log::warn!("RGB cycle invoked without underglow support");
            return Err(BehaviorError::NotSupported);
        };

        let result = match self.config.mode {
            CycleMode::Brightness => self.cycle_brightness(underglow),
            CycleMode::Speed => self.cycle_speed(underglow),
        };
        if let Err(BehaviorError::External { code, .. }) = &result {
            log::error!("RGB cycle failed: {}", code.0);
        }
        result
    }

    pub fn on_release(&mut self) -> BehaviorResult {
        Ok(())
    }

    fn cycle_brightness(&mut self, underglow: &mut dyn UnderglowControl) -> BehaviorResult {
        let steps = brightness_step(underglow.brightness(), &self.config.brightness);
        underglow
            .change_brightness(steps)
            .map_err(|code| BehaviorError::External { step: Step::ChangeBrightness, code })
    }

    fn cycle_speed(&mut self, underglow: &mut dyn UnderglowControl) -> BehaviorResult {
        let index = self
            .speed_index
            .get_or_insert(self.config.speed_default.clamp(SPEED_MIN, SPEED_MAX));
        *index = if *index >= SPEED_MAX { SPEED_MIN } else { *index + 1 };
        normalize_speed(underglow, *index)
            .map_err(|code| BehaviorError::External { step: Step::ChangeSpeed, code })
    }
}
