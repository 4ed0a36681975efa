use super::page::{
    DIFFUSE_GRADIENT, HERO_RESTING_SCALE, LOGO_MASK_HIDDEN, LOGO_MASK_REVEALED,
    SATURATED_GRADIENT, SECTION_MASK_FULL, SECTION_MASK_GONE,
};
use super::Feature;
use crate::app::PageSession;
use crate::gfx::draw::DrawContext;
use crate::gfx::schedule::{AnimationStep, Position, Schedule};
use crate::gfx::style::{Property, Stylesheet, Target, Value, Visibility};
use crate::scroll::{ScrollBinding, ScrollObserver};
use anyhow::Result;

pub const SCROLL_END: &str = "+=2000";
pub const SCRUB_LAG: f32 = 2.0;

pub fn binding() -> Result<ScrollBinding> {
    Ok(ScrollBinding {
        trigger: Target::Container,
        pin: true,
        scrub: Some(SCRUB_LAG),
        start: 0.0,
        end: SCROLL_END.parse()?,
    })
}

fn pos(s: &str) -> Result<Position> {
    s.parse()
}

pub fn steps() -> Result<Vec<AnimationStep>> {
    use AnimationStep as Step;
    use Property as P;
    use Target as T;

    let n = Value::Number;
    let diffuse = || Value::gradient(DIFFUSE_GRADIENT);
    let saturated = || Value::gradient(SATURATED_GRADIENT);

    Ok(vec![
        // Same scale the intro settles on, so the handoff doesn't jump.
        Step::set("hero-scale-anchor", T::HeroMainContainer).prop(P::Scale, n(HERO_RESTING_SCALE)),
        Step::to("hero-scale-down", T::HeroMainContainer, 1.0).prop(P::Scale, n(1.0)),
        Step::to("logo-fade", T::HeroMainLogo, 0.5)
            .prop(P::Opacity, n(0.0))
            .at(pos("<")?),
        Step::to("image-fade", T::HeroMainImage, 0.9)
            .prop(P::Opacity, n(0.0))
            .at(pos("<+=0.5")?),
        Step::to("background-shrink", T::HeroMainContainer, 1.5)
            .prop(P::BackgroundSize, Value::length("28vh")?)
            .at(pos("<+=0.2")?),
        Step::to("text-gradient", T::HeroText, 3.0)
            .from_to(P::BackgroundImage, diffuse()?, saturated()?)
            .at(Position::before_previous_end(1.2)),
        Step::to("text-logo-reveal", T::HeroTextLogo, 3.0)
            .from_to(P::Opacity, n(0.0), n(1.0))
            .from_to(
                P::MaskImage,
                Value::gradient(LOGO_MASK_HIDDEN)?,
                Value::gradient(LOGO_MASK_REVEALED)?,
            )
            .at(pos("<0.2")?),
        Step::set("hero-hide", T::HeroMainContainer).prop(P::Opacity, n(0.0)),
        Step::to("section-recede", T::Hero1Container, 3.0)
            .prop(P::Scale, n(0.85))
            .at(pos("<-=3")?),
        Step::set("section-mask", T::Hero1Container)
            .prop(P::MaskImage, Value::gradient(SECTION_MASK_FULL)?)
            .at(pos("<+=2.1")?),
        Step::to("section-mask-sweep", T::Hero1Container, 2.0)
            .prop(P::MaskImage, Value::gradient(SECTION_MASK_GONE)?)
            .at(pos("<+=0.2")?),
        Step::to("text-logo-fade", T::HeroTextLogo, 2.0)
            .prop(P::Opacity, n(0.0))
            .at(pos("<1.5")?),
        Step::set("section-1-hide", T::Hero1Container).prop(P::Opacity, n(0.0)),
        Step::set("section-2-show", T::Hero2Container)
            .prop(P::Visibility, Value::Visibility(Visibility::Visible)),
        Step::to("section-2-fade-in", T::Hero2Container, 3.0)
            .prop(P::Opacity, n(1.0))
            .at(pos("<+=0.2")?),
        Step::to("section-2-gradient", T::Hero2Container, 3.0)
            .from_to(P::BackgroundImage, diffuse()?, saturated()?)
            .at(Position::before_previous_end(1.2)),
    ])
}

/// The pinned, scrubbed master timeline.
pub struct HeroScroll {
    schedule: Schedule,
    observer: ScrollObserver,
}

impl HeroScroll {
    pub fn new(stylesheet: &Stylesheet) -> Result<Self> {
        Ok(Self {
            schedule: Schedule::build(&steps()?, stylesheet)?,
            observer: ScrollObserver::new(binding()?),
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn progress(&self) -> f32 {
        self.observer.progress()
    }

    pub fn binding(&self) -> &ScrollBinding {
        &self.observer.binding
    }

    pub fn scroll_limit(&self) -> f32 {
        self.observer.binding.end_offset()
    }
}

impl Feature for HeroScroll {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn update(&mut self, dt: f32, page: &PageSession) {
        self.observer.update(page.scroll_y, dt);
    }

    fn render(&self, draw: &mut DrawContext) {
        draw.extend(self.schedule.sample_progress(self.progress()));
        if self.observer.binding.pin {
            draw.set_number(self.observer.binding.trigger, Property::Y, self.observer.pin_offset());
        }
    }
}
