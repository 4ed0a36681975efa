use crate::gfx::style::Target;
use anyhow::{Context, Result};
use log::debug;
use std::str::FromStr;

/// Where the bound region stops, measured from `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEnd {
    /// `+=2000`: that many pixels after start.
    Relative(f32),
    /// Absolute document offset.
    Absolute(f32),
}

impl FromStr for ScrollEnd {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(px) = s.strip_prefix("+=") {
            let px = px.trim().parse::<f32>().with_context(|| format!("Bad scroll end: {}", s))?;
            Ok(ScrollEnd::Relative(px))
        } else {
            let px = s.parse::<f32>().with_context(|| format!("Bad scroll end: {}", s))?;
            Ok(ScrollEnd::Absolute(px))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollBinding {
    pub trigger: Target,
    pub pin: bool,
    /// Catch-up lag in seconds. `None` snaps straight to the scroll position.
    pub scrub: Option<f32>,
    /// Document offset at which the trigger's top meets the viewport's top.
    pub start: f32,
    pub end: ScrollEnd,
}

impl ScrollBinding {
    pub fn end_offset(&self) -> f32 {
        match self.end {
            ScrollEnd::Relative(px) => self.start + px,
            ScrollEnd::Absolute(px) => px,
        }
    }

    pub fn span(&self) -> f32 {
        (self.end_offset() - self.start).max(0.0)
    }

    pub fn raw_progress(&self, scroll_y: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }

    /// How far the pinned element has to be pushed down to stay put in the viewport.
    pub fn pin_offset(&self, scroll_y: f32) -> f32 {
        if !self.pin {
            return 0.0;
        }
        (scroll_y - self.start).clamp(0.0, self.span())
    }

    pub fn is_pinned(&self, scroll_y: f32) -> bool {
        self.pin && scroll_y >= self.start && scroll_y <= self.end_offset()
    }
}

/// Critically damped follower. Never overshoots its target and settles
/// within roughly `lag` seconds.
#[derive(Debug, Clone)]
pub struct ScrubFollower {
    lag: f32,
    value: f32,
    velocity: f32,
}

impl ScrubFollower {
    const SETTLE: f32 = 1e-4;

    pub fn new(lag: f32) -> Self {
        Self {
            lag: lag.max(0.0),
            value: 0.0,
            velocity: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_settled(&self, target: f32) -> bool {
        self.value == target && self.velocity == 0.0
    }

    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        if self.lag <= 0.0 {
            self.value = target;
            self.velocity = 0.0;
            return self.value;
        }
        if dt <= 0.0 {
            return self.value;
        }

        // Reversing direction drops the momentum built up the other way.
        if self.velocity * (target - self.value) <= 0.0 {
            self.velocity = 0.0;
        }

        let smooth_time = self.lag / 6.0;
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = self.value - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut next = target + (change + temp) * decay;

        // Crossing the target means the spring would overshoot.
        if (target - self.value > 0.0) == (next > target) {
            next = target;
            self.velocity = 0.0;
        }
        if (next - target).abs() < Self::SETTLE && self.velocity.abs() < Self::SETTLE {
            next = target;
            self.velocity = 0.0;
        }

        self.value = next;
        self.value
    }
}

/// A binding plus its smoothing state.
#[derive(Debug, Clone)]
pub struct ScrollObserver {
    pub binding: ScrollBinding,
    follower: ScrubFollower,
    scroll_y: f32,
}

impl ScrollObserver {
    pub fn new(binding: ScrollBinding) -> Self {
        let follower = ScrubFollower::new(binding.scrub.unwrap_or(0.0));
        Self {
            binding,
            follower,
            scroll_y: 0.0,
        }
    }

    pub fn update(&mut self, scroll_y: f32, dt: f32) -> f32 {
        self.scroll_y = scroll_y;
        let target = self.binding.raw_progress(scroll_y);
        let progress = self.follower.update(target, dt);
        if !self.follower.is_settled(target) {
            debug!("scrub: target {:.4} smoothed {:.4}", target, progress);
        }
        progress
    }

    pub fn progress(&self) -> f32 {
        self.follower.value()
    }

    pub fn pin_offset(&self) -> f32 {
        self.binding.pin_offset(self.scroll_y)
    }
}
