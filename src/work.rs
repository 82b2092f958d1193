/// Handle to a single cancellable delayed action.
///
/// The platform owns the timer facility and the callback bound to the
/// handle; this trait only exposes arming and disarming. The callback runs
/// later on the same serialized context as the behavior handlers, so a
/// handler never races with its own delayed action.
pub trait DelayedWork {
    /// Request the bound action to fire once after `delay_ms` milliseconds.
    fn schedule(&mut self, delay_ms: u32);

    /// Replace any pending fire with a new one after `delay_ms` milliseconds.
    ///
    /// Keeps the invariant of at most one pending fire per handle.
    fn reschedule(&mut self, delay_ms: u32) {
        self.cancel();
        self.schedule(delay_ms);
    }

    /// Cancel a pending fire, best-effort.
    ///
    /// A callback that was already dispatched when the cancel request is
    /// processed may still be delivered; callers must treat such late
    /// delivery as stale.
    fn cancel(&mut self);
}
