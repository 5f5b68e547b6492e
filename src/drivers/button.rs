//! Debounced mode button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. The main loop samples the raw
//! level once per tick and feeds it to [`Debouncer::poll`] together with the
//! current monotonic time. No ISR is involved.
//!
//! ## Behaviour
//!
//! Any change of level restarts the settle window and re-arms the edge.
//! Once the level has been stable for longer than the window *and* reads
//! pressed, a single [`EdgeEvent::Pressed`] is emitted. Holding the button
//! produces nothing further; the next event needs a release and a fresh
//! press, however long the contacts bounce in between.

use embedded_hal::digital::PinState;

/// Clean edge derived from the raw button level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEvent {
    Pressed,
}

pub struct Debouncer {
    settle_ms: u32,
    last_level: PinState,
    last_change_ms: u32,
    edge_consumed: bool,
}

impl Debouncer {
    /// Released (high) initial level, so a button held through boot still
    /// has to settle before it counts.
    pub fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms,
            last_level: PinState::High,
            last_change_ms: 0,
            edge_consumed: false,
        }
    }

    /// Call once per control tick with the raw level and `now_ms`.
    pub fn poll(&mut self, level: PinState, now_ms: u32) -> Option<EdgeEvent> {
        if level != self.last_level {
            self.last_change_ms = now_ms;
            self.edge_consumed = false;
        }

        let mut event = None;
        if now_ms.wrapping_sub(self.last_change_ms) > self.settle_ms
            && level == PinState::Low
            && !self.edge_consumed
        {
            self.edge_consumed = true;
            event = Some(EdgeEvent::Pressed);
        }

        self.last_level = level;
        event
    }

    /// Whether the current press has already produced its event.
    pub fn is_consumed(&self) -> bool {
        self.edge_consumed
    }
}
