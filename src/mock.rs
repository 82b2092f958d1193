//! Test doubles for the external subsystem traits.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::ble::ProfileControl;
use crate::underglow::{Hsb, UnderglowControl, SPEED_MAX, SPEED_MIN};
use crate::work::DelayedWork;
use crate::ErrorCode;

/// Underglow call with its arguments, as recorded by [`MockUnderglow`]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum UnderglowCall {
    PowerOn,
    SelectEffect(u8),
    SetColor(Hsb),
    ChangeBrightness(i16),
    ChangeSpeed(i8),
}

/// Underglow operation kind, for failure injection
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnderglowOp {
    PowerOn,
    SelectEffect,
    SetColor,
    ChangeBrightness,
    ChangeSpeed,
}

/// Underglow subsystem simulator: records every call and keeps the state
/// that successful calls would produce. Speed saturates at the range ends
/// like the real subsystem does.
pub struct MockUnderglow {
    pub on: bool,
    pub brightness: u8,
    pub speed: u8,
    pub effect: u8,
    pub color: Hsb,
    pub calls: Vec<UnderglowCall>,
    /// Fail every call of the given kind with the given code
    pub fail: Option<(UnderglowOp, ErrorCode)>,
}

impl MockUnderglow {
    pub fn new() -> Self {
        Self {
            on: false,
            brightness: 0,
            speed: 3,
            effect: 0,
            color: Hsb { h: 0, s: 0, b: 0 },
            calls: Vec::new(),
            fail: None,
        }
    }

    pub fn state(&self) -> (bool, u8, Hsb, u8) {
        (self.on, self.effect, self.color, self.speed)
    }

    fn result_for(&self, op: UnderglowOp) -> Result<(), ErrorCode> {
        match self.fail {
            Some((failing, code)) if failing == op => Err(code),
            _ => Ok(()),
        }
    }
}

impl UnderglowControl for MockUnderglow {
    fn power_on(&mut self) -> Result<(), ErrorCode> {
        self.calls.push(UnderglowCall::PowerOn);
        self.result_for(UnderglowOp::PowerOn)?;
        self.on = true;
        Ok(())
    }

    fn select_effect(&mut self, effect: u8) -> Result<(), ErrorCode> {
        self.calls.push(UnderglowCall::SelectEffect(effect));
        self.result_for(UnderglowOp::SelectEffect)?;
        self.effect = effect;
        Ok(())
    }

    fn set_color(&mut self, color: Hsb) -> Result<(), ErrorCode> {
        self.calls.push(UnderglowCall::SetColor(color));
        self.result_for(UnderglowOp::SetColor)?;
        self.color = color;
        Ok(())
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn change_brightness(&mut self, steps: i16) -> Result<(), ErrorCode> {
        self.calls.push(UnderglowCall::ChangeBrightness(steps));
        self.result_for(UnderglowOp::ChangeBrightness)
    }

    fn change_speed(&mut self, delta: i8) -> Result<(), ErrorCode> {
        self.calls.push(UnderglowCall::ChangeSpeed(delta));
        self.result_for(UnderglowOp::ChangeSpeed)?;
        self.speed = self.speed.saturating_add_signed(delta).clamp(SPEED_MIN, SPEED_MAX);
        Ok(())
    }
}

/// Radio stack call recorded by [`MockBle`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BleOp {
    SelectProfile(u8),
    ClearBonds,
}

/// Radio stack simulator: records calls in order; `select_profile` results
/// are scripted, defaulting to success when the script runs out.
#[derive(Default)]
pub struct MockBle {
    pub ops: Vec<BleOp>,
    pub select_results: VecDeque<Result<(), ErrorCode>>,
}

impl ProfileControl for MockBle {
    fn select_profile(&mut self, profile: u8) -> Result<(), ErrorCode> {
        self.ops.push(BleOp::SelectProfile(profile));
        self.select_results.pop_front().unwrap_or(Ok(()))
    }

    fn clear_bonds(&mut self) {
        self.ops.push(BleOp::ClearBonds);
    }
}

#[derive(Default)]
pub struct TimerState {
    /// Delay of the pending fire, if armed
    pub armed: Option<u32>,
    pub schedules: u32,
    pub cancels: u32,
}

/// Delayed work handle with shared state, so a test can keep a clone and
/// observe arming while the behavior owns the handle.
#[derive(Clone, Default)]
pub struct MockTimer(pub Rc<RefCell<TimerState>>);

impl DelayedWork for MockTimer {
    fn schedule(&mut self, delay_ms: u32) {
        let mut state = self.0.borrow_mut();
        state.armed = Some(delay_ms);
        state.schedules += 1;
    }

    fn cancel(&mut self) {
        let mut state = self.0.borrow_mut();
        state.armed = None;
        state.cancels += 1;
    }
}

impl MockTimer {
    pub fn armed(&self) -> Option<u32> {
        self.0.borrow().armed
    }

    /// Consume the pending fire, as the platform does when delivering it
    pub fn take_fire(&self) -> bool {
        self.0.borrow_mut().armed.take().is_some()
    }
}
