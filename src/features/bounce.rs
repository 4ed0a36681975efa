use super::Feature;
use crate::app::PageSession;
use crate::gfx::anim::{lerp, Ease};
use crate::gfx::draw::DrawContext;
use crate::gfx::style::{Property, Target};
use anyhow::Result;

pub const HALF_CYCLE: f32 = 0.8;
pub const TRAVEL: f32 = 20.0;
pub const LOW_OPACITY: f32 = 0.6;
pub const BOUNCE_EASE: &str = "power1.inOut";

/// Scroll hint that bobs forever, playing forward then backward.
pub struct Bounce {
    ease: Ease,
    elapsed: f32,
}

impl Bounce {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ease: BOUNCE_EASE.parse()?,
            elapsed: 0.0,
        })
    }

    /// Position within the current half-cycle, folded so odd half-cycles run backward.
    pub fn phase(&self) -> f32 {
        let cycles = self.elapsed.max(0.0) / HALF_CYCLE;
        let half = cycles.floor();
        let local = cycles - half;
        if half as u64 % 2 == 1 {
            1.0 - local
        } else {
            local
        }
    }

    pub fn sample(&self) -> (f32, f32) {
        let t = self.ease.apply(self.phase());
        (lerp(0.0, TRAVEL, t), lerp(1.0, LOW_OPACITY, t))
    }
}

impl Feature for Bounce {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn update(&mut self, _dt: f32, page: &PageSession) {
        self.elapsed = page.time;
    }

    fn render(&self, draw: &mut DrawContext) {
        let (y, opacity) = self.sample();
        draw.set_number(Target::ScrollIndicator, Property::Y, y);
        draw.set_number(Target::ScrollIndicator, Property::Opacity, opacity);
    }
}
