use serde::{Serialize, Deserialize};
use static_assertions::const_assert;

use crate::ErrorCode;

/// Lowest effect speed level.
pub const SPEED_MIN: u8 = 1;
/// Highest effect speed level.
pub const SPEED_MAX: u8 = 5;

const_assert!(SPEED_MIN < SPEED_MAX);

/// Color in the hue/saturation/brightness space used by underglow effects.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsb {
    /// Hue in degrees, 0-359
    pub h: u16,
    /// Saturation in percent
    pub s: u8,
    /// Brightness in percent
    pub b: u8,
}

/// Brightness range and step width of the underglow, in percent.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessScale {
    pub min: u8,
    pub max: u8,
    /// Width of one brightness step, nonzero
    pub step: u8,
}

/// Control over the RGB underglow subsystem.
///
/// Speed and brightness are adjustable only relative to their current
/// value; there is no absolute setter for either.
pub trait UnderglowControl {
    /// Turn the underglow on.
    fn power_on(&mut self) -> Result<(), ErrorCode>;

    /// Activate the animation effect with the given index.
    fn select_effect(&mut self, effect: u8) -> Result<(), ErrorCode>;

    /// Set the effect color.
    fn set_color(&mut self, color: Hsb) -> Result<(), ErrorCode>;

    /// Current global brightness in percent.
    fn brightness(&self) -> u8;

    /// Adjust brightness by the given number of steps (negative goes down).
    fn change_brightness(&mut self, steps: i16) -> Result<(), ErrorCode>;

    /// Adjust effect speed by one level, `delta` being -1 or +1.
    fn change_speed(&mut self, delta: i8) -> Result<(), ErrorCode>;
}

/// Brightness adjustment (in steps) for a single cycle press.
///
/// Walks up one step at a time until the top of the scale, then wraps back
/// down to the bottom in a single call, producing a saw-tooth over repeated
/// presses.
pub fn brightness_step(current: u8, scale: &BrightnessScale) -> i16 {
    if current >= scale.max {
        let steps = current.saturating_sub(scale.min).div_ceil(scale.step).max(1);
        -i16::from(steps)
    } else {
        1
    }
}

/// Drive the effect speed to `target` using only relative steps.
///
/// Sweeps down over the full range width to bottom out at [`SPEED_MIN`]
/// regardless of the unknown current speed, then steps up to `target`. The
/// first failing call aborts the sequence with its code; the speed is left
/// wherever the last successful call put it. Callers clamp `target` into
/// `[SPEED_MIN, SPEED_MAX]`.
pub fn normalize_speed(
    underglow: &mut (impl UnderglowControl + ?Sized),
    target: u8,
) -> Result<(), ErrorCode> {
    for _ in SPEED_MIN..SPEED_MAX {
        underglow.change_speed(-1)?;
    }
    for _ in SPEED_MIN..target {
        underglow.change_speed(1)?;
    }
    Ok(())
}
