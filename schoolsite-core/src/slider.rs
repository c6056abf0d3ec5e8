//! Hero slider state machine.
//!
//! `SliderState` holds nothing but the index arithmetic. `SliderController`
//! adds the auto-advance timer on top of it. The timer is any handle type
//! whose `Drop` cancels the underlying interval, so holding at most one
//! handle is the same thing as running at most one timer.

/// Auto-advance period used when no configuration overrides it.
pub const DEFAULT_INTERVAL_MS: u32 = 5000;

/// Which slide/dot pair to deactivate and which to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    len: usize,
    current: usize,
}

impl SliderState {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Active slide index, or `None` for an empty slide set.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    /// Make `index` the active slide.
    ///
    /// Returns `None` without touching state when `index` is out of range.
    /// Going to the already-active slide is allowed and reported as a change
    /// from and to the same index.
    pub fn go_to(&mut self, index: usize) -> Option<SlideChange> {
        if index >= self.len {
            return None;
        }
        let change = SlideChange {
            from: self.current,
            to: index,
        };
        self.current = index;
        Some(change)
    }

    pub fn next(&mut self) -> Option<SlideChange> {
        if self.is_empty() {
            return None;
        }
        self.go_to((self.current + 1) % self.len)
    }

    pub fn previous(&mut self) -> Option<SlideChange> {
        if self.is_empty() {
            return None;
        }
        self.go_to((self.current + self.len - 1) % self.len)
    }
}

/// Slider state plus the single auto-advance timer.
///
/// `H` is a timer handle; dropping it must cancel the timer it represents.
#[derive(Debug)]
pub struct SliderController<H> {
    state: SliderState,
    period_ms: u32,
    timer: Option<H>,
}

impl<H> SliderController<H> {
    #[must_use]
    pub const fn new(len: usize, period_ms: u32) -> Self {
        Self {
            state: SliderState::new(len),
            period_ms,
            timer: None,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.state.current()
    }

    #[must_use]
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn go_to(&mut self, index: usize) -> Option<SlideChange> {
        let change = self.state.go_to(index);
        if change.is_none() {
            log::debug!("slider: ignoring go_to({index}) with {} slides", self.len());
        }
        change
    }

    pub fn next(&mut self) -> Option<SlideChange> {
        self.state.next()
    }

    pub fn previous(&mut self) -> Option<SlideChange> {
        self.state.previous()
    }

    /// Start the repeating timer, replacing any timer already running.
    ///
    /// `spawn` receives the period and returns the new handle. It is not
    /// called for an empty slide set.
    pub fn start_auto_advance<F>(&mut self, spawn: F)
    where
        F: FnOnce(u32) -> H,
    {
        self.stop_auto_advance();
        if self.is_empty() {
            return;
        }
        self.timer = Some(spawn(self.period_ms));
    }

    pub fn stop_auto_advance(&mut self) {
        // Drop cancels.
        self.timer = None;
    }

    pub fn pointer_entered(&mut self) {
        self.stop_auto_advance();
    }

    pub fn pointer_left<F>(&mut self, spawn: F)
    where
        F: FnOnce(u32) -> H,
    {
        self.start_auto_advance(spawn);
    }
}
