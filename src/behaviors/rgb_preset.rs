use serde::{Serialize, Deserialize};

use super::{BehaviorError, BehaviorResult, Step};
use crate::underglow::{normalize_speed, Hsb, UnderglowControl, SPEED_MAX, SPEED_MIN};

/// Configuration of a single preset binding
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresetConfig {
    pub color: Hsb,
    pub effect: u8,
    pub speed: u8,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            color: Hsb { h: 0, s: 100, b: 100 },
            effect: 0,
            speed: 3,
        }
    }
}

/// Preset behavior
///
/// Stateless: every press re-applies the full preset from configuration as
/// power-on, effect, color, speed, short-circuiting on the first failing
/// call. Release does nothing.
pub struct RgbPreset {
    config: PresetConfig,
}

impl RgbPreset {
    pub fn new(config: PresetConfig) -> Self {
        Self { config }
    }

    pub fn on_press(&self, underglow: Option<&mut dyn UnderglowControl>) -> BehaviorResult {
        let Some(underglow) = underglow else {
            log::warn!("RGB preset invoked without underglow support");
            return Err(BehaviorError::NotSupported);
        };

        underglow.power_on().map_err(|code| {
            log::error!("Underglow power on failed: {}", code.0);
            BehaviorError::External { step: Step::PowerOn, code }
        })?;

        let effect = self.config.effect;
        underglow.select_effect(effect).map_err(|code| {
            log::error!("Underglow effect {} select failed: {}", effect, code.0);
            BehaviorError::External { step: Step::SelectEffect, code }
        })?;

        underglow.set_color(self.config.color).map_err(|code| {
            log::error!("Underglow color set failed: {}", code.0);
            BehaviorError::External { step: Step::SetColor, code }
        })?;

        let speed = self.config.speed.clamp(SPEED_MIN, SPEED_MAX);
        normalize_speed(underglow, speed).map_err(|code| {
            log::error!("Underglow speed set failed: {}", code.0);
            BehaviorError::External { step: Step::ChangeSpeed, code }
        })?;

        Ok(())
    }

    pub fn on_release(&self) -> BehaviorResult {
        Ok(())
    }
}
