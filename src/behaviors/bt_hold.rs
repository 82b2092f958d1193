use serde::{Serialize, Deserialize};
use smlang::statemachine;

use super::BehaviorResult;
use crate::ble::ProfileControl;
use crate::work::DelayedWork;

/// Configuration of a single hold-to-clear binding
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldConfig {
    /// Time in milliseconds the key must stay pressed before bonds are cleared
    pub hold_ms: u32,
    /// Wireless profile slot to clear and re-advertise
    pub profile: u8,
}

statemachine! {
    transitions: {
        *Idle + Press / arm = Armed,
        Armed + Press / arm = Armed,
        Triggered + Press / arm = Armed,

        Armed + Release / disarm = Idle,
        Triggered + Release = Idle,

        Armed + Expired = Triggered,
    }
}

/// Timer request emitted by a transition action, applied by [`BtHold`]
/// which owns the timer handle
enum TimerOp {
    Arm,
    Disarm,
}

pub struct Context {
    timer_op: Option<TimerOp>,
}

impl Context {
    fn request(&mut self, op: TimerOp) {
        let prev = self.timer_op.replace(op);
        debug_assert!(prev.is_none(), "Timer request not consumed since last transition");
    }
}

impl StateMachineContext for Context {
    fn arm(&mut self) {
        self.request(TimerOp::Arm);
    }

    fn disarm(&mut self) {
        self.request(TimerOp::Disarm);
    }
}

/// Hold-to-clear behavior
///
/// Pressing the key arms a delayed action; releasing before `hold_ms`
/// elapsed disarms it. Once the delay expires the behavior selects the
/// configured profile, wipes its bonds and selects it again so the profile
/// starts advertising. The bond wipe is irreversible, so a release arriving
/// after expiry is a no-op and a mid-sequence failure is never retried.
pub struct BtHold<T: DelayedWork> {
    fsm: StateMachine<Context>,
    timer: T,
    config: HoldConfig,
}

impl<T: DelayedWork> BtHold<T> {
    pub fn new(config: HoldConfig, timer: T) -> Self {
        Self {
            fsm: StateMachine::new(Context { timer_op: None }),
            timer,
            config,
        }
    }

    /// Arm the hold timer, replacing any pending fire of a previous press.
    pub fn on_press(&mut self) -> BehaviorResult {
        self.fsm.process_event(Events::Press).ok();
        self.apply_timer_op();
        Ok(())
    }

    /// Disarm the hold timer unless the delayed action already fired.
    pub fn on_release(&mut self) -> BehaviorResult {
        self.fsm.process_event(Events::Release).ok();
        self.apply_timer_op();
        Ok(())
    }

    /// Delayed action: select the profile, wipe its bonds, select it again.
    ///
    /// Failures are logged and never retried. A failed first select leaves
    /// the bonds untouched; a failed reselect is reported but the clear
    /// already took effect.
    pub fn on_hold_expired(&mut self, ble: &mut dyn ProfileControl) {
        if self.fsm.process_event(Events::Expired).is_err() {
            // Cancellation is best-effort: an expiry that was already in
            // flight when the release cancelled the timer arrives late and
            // must not fire.
            log::debug!("Stale hold timer expiry ignored");
            return;
        }

        let profile = self.config.profile;
        if let Err(code) = ble.select_profile(profile) {
            log::error!("Failed to focus profile {}: {}", profile, code.0);
            return;
        }

        ble.clear_bonds();

        match ble.select_profile(profile) {
            Err(code) => log::error!("BT profile {} reselect failed: {}", profile, code.0),
            Ok(()) => log::info!("BT profile {} cleared and advertising", profile),
        }
    }

    fn apply_timer_op(&mut self) {
        match self.fsm.context.timer_op.take() {
            Some(TimerOp::Arm) => self.timer.reschedule(self.config.hold_ms),
            Some(TimerOp::Disarm) => self.timer.cancel(),
            None => {}
        }
    }
}
