use super::Feature;
use crate::app::PageSession;
use crate::gfx::anim::{lerp, Timeline};
use crate::gfx::draw::DrawContext;
use crate::gfx::style::{Property, Stylesheet, Target};
use anyhow::Result;
use log::info;

pub const INTRO_DURATION: f32 = 2.8;
pub const INTRO_START_SCALE: f32 = 1.45;
pub const INTRO_EASE: &str = "power3.out";

/// Page-load zoom-out of the hero plus the overlay fade. Both run on one
/// clock, so the overlay finishing is the intro finishing.
pub struct Intro {
    tl: Timeline,
    scale_from: f32,
    scale_to: f32,
    finished: bool,
}

impl Intro {
    pub fn new(stylesheet: &Stylesheet) -> Result<Self> {
        let scale_to = stylesheet
            .number(Target::HeroMainContainer, Property::Scale)
            .ok_or_else(|| anyhow::anyhow!("Stylesheet has no resting hero scale"))?;
        let mut tl = Timeline::new(INTRO_DURATION).with_ease(INTRO_EASE.parse()?);
        tl.start(0.0);
        Ok(Self {
            tl,
            scale_from: INTRO_START_SCALE,
            scale_to,
            finished: false,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.finished
    }

    pub fn overlay_opacity(&self) -> f32 {
        lerp(1.0, 0.0, self.tl.eased_progress())
    }

    pub fn hero_scale(&self) -> f32 {
        lerp(self.scale_from, self.scale_to, self.tl.eased_progress())
    }
}

impl Feature for Intro {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn update(&mut self, _dt: f32, page: &PageSession) {
        self.tl.update(page.time);
        if !self.finished && self.tl.is_complete() {
            self.finished = true;
            info!("Intro finished at {:.2}s", page.time);
        }
    }

    fn render(&self, draw: &mut DrawContext) {
        draw.set_number(Target::Overlay, Property::Opacity, self.overlay_opacity());
        // Once settled, the scroll timeline owns the hero's scale.
        if !self.finished {
            draw.set_number(Target::HeroMainContainer, Property::Scale, self.hero_scale());
        }
    }
}
