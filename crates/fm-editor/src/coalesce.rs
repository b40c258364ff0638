//! Per-frame coalescing for high-frequency drag updates.
//!
//! Pointer-move events can arrive many times per animation frame. Writing
//! each one to the placement store would redo the same work several times
//! before anything is painted. [`FrameCoalescer`] keeps only the latest value
//! and at most one outstanding frame request:
//!
//! - `schedule` stores the value and tells the caller whether a new frame
//!   tick must be requested (only the first call since the last tick does).
//! - `on_tick` is called from the frame callback and drains the value.
//! - `flush_now` drains immediately (pointer-up); `cancel` drops it
//!   (pointer-cancel). Either way an already requested tick still arrives
//!   and simply finds nothing.
//!
//! Not thread-safe; lives on the single UI thread like everything else here.

/// Latest-value-wins pending slot with a single scheduled flush.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    tick_requested: bool,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameCoalescer<T> {
    pub const fn new() -> Self {
        Self {
            pending: None,
            tick_requested: false,
        }
    }

    /// Replace the pending value. Returns `true` if the caller must request
    /// a frame tick.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending = Some(value);
        if self.tick_requested {
            false
        } else {
            self.tick_requested = true;
            true
        }
    }

    /// Frame callback: clears the outstanding request and drains the value.
    pub fn on_tick(&mut self) -> Option<T> {
        self.tick_requested = false;
        self.pending.take()
    }

    /// Drain the pending value without waiting for the tick.
    pub fn flush_now(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn tick_requested(&self) -> bool {
        self.tick_requested
    }
}
