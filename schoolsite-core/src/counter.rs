//! Count-up animation for statistic counters.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub done: bool,
}

/// Frame-stepped count from zero to `target` over roughly `duration_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = (f64::from(duration_ms) / f64::from(frame_ms.max(1))).max(1.0);
        #[allow(clippy::cast_precision_loss)]
        let increment = target as f64 / frames;
        Self {
            target,
            increment,
            current: 0.0,
            done: false,
        }
    }

    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame. Once done, keeps returning the target.
    pub fn step(&mut self) -> CounterFrame {
        if self.done {
            return self.finished();
        }
        self.current += self.increment;
        #[allow(clippy::cast_precision_loss)]
        let reached = self.current >= self.target as f64;
        if reached {
            self.done = true;
            return self.finished();
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = self.current.floor() as u64;
        CounterFrame { value, done: false }
    }

    const fn finished(&self) -> CounterFrame {
        CounterFrame {
            value: self.target,
            done: true,
        }
    }
}

/// Parse a `data-target` attribute. Anything unparsable counts to zero.
#[must_use]
pub fn parse_target(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}
