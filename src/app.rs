use crate::config::Config;
use crate::features::{bounce::Bounce, hero::HeroScroll, intro::Intro, page, Feature};
use crate::gfx::draw::{DrawContext, Frame};
use anyhow::Result;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Hidden,
    Visible,
}

/// Which axes the page lets the user scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

impl ScrollPolicy {
    pub fn locked() -> Self {
        Self {
            overflow_x: Overflow::Hidden,
            overflow_y: Overflow::Hidden,
        }
    }

    pub fn vertical_only() -> Self {
        Self {
            overflow_x: Overflow::Hidden,
            overflow_y: Overflow::Visible,
        }
    }

    pub fn allows_vertical(&self) -> bool {
        self.overflow_y == Overflow::Visible
    }
}

/// Everything about the page that isn't owned by a single animation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSession {
    pub time: f32,
    pub scroll_y: f32,
    pub viewport: [f32; 2],
    pub scroll: ScrollPolicy,
}

impl Default for PageSession {
    fn default() -> Self {
        Self {
            time: 0.0,
            scroll_y: 0.0,
            viewport: [1440.0, 900.0],
            scroll: ScrollPolicy::locked(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageMode {
    Intro,
    Ready,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Wheel movement in pixels, positive scrolls down.
    Scroll { delta: f32 },
}

pub struct App {
    pub config: Config,
    pub mode: PageMode,
    pub session: PageSession,
    pub intro: Intro,
    pub bounce: Bounce,
    pub hero: HeroScroll,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let stylesheet = page::stylesheet()?;
        let session = PageSession {
            viewport: [config.viewport.width as f32, config.viewport.height as f32],
            ..PageSession::default()
        };
        Ok(Self {
            intro: Intro::new(&stylesheet)?,
            bounce: Bounce::new()?,
            hero: HeroScroll::new(&stylesheet)?,
            mode: PageMode::Intro,
            session,
            config,
        })
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Scroll { delta } => {
                if !self.session.scroll.allows_vertical() {
                    debug!("Scroll of {} dropped, page is locked", delta);
                    return;
                }
                let limit = self.hero.scroll_limit();
                self.session.scroll_y = (self.session.scroll_y + delta).clamp(0.0, limit);
                debug!("Scrolled to {}", self.session.scroll_y);
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.session.time += dt;

        let session = self.session.clone();
        for feature in self.features_mut() {
            feature.update(dt, &session);
        }

        if self.mode == PageMode::Intro && self.intro.is_complete() {
            self.mode = PageMode::Ready;
            self.session.scroll = ScrollPolicy::vertical_only();
            info!("Scrolling enabled at {:.2}s", self.session.time);
        }
    }

    /// Render order matters: the intro overrides the hero's scale until it settles.
    fn features_mut(&mut self) -> [&mut dyn Feature; 3] {
        [&mut self.hero, &mut self.intro, &mut self.bounce]
    }

    pub fn render(&mut self, draw: &mut DrawContext) -> Frame {
        draw.begin(self.session.viewport);
        draw.set_time(self.session.time);
        for feature in self.features_mut() {
            feature.render(draw);
        }
        draw.flush()
    }

    pub fn feature_names(&mut self) -> Vec<&'static str> {
        self.features_mut().iter().map(|f| f.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::intro::INTRO_DURATION;
    use crate::gfx::style::{Property, Target, Value, Visibility};

    const DT: f32 = 1.0 / 60.0;

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    fn run(app: &mut App, seconds: f32) {
        let frames = (seconds / DT).round() as usize;
        for _ in 0..frames {
            app.update(DT);
        }
    }

    #[test]
    fn wheel_is_ignored_during_intro() {
        let mut app = app();
        run(&mut app, 1.0);
        app.handle_event(UiEvent::Scroll { delta: 500.0 });
        assert_eq!(app.session.scroll_y, 0.0);
        assert_eq!(app.session.scroll, ScrollPolicy::locked());

        run(&mut app, 3.0);
        let mut draw = DrawContext::new(app.session.viewport);
        let frame = app.render(&mut draw);
        assert_eq!(app.hero.progress(), 0.0);
        assert_eq!(frame.number(Target::HeroMainLogo, Property::Opacity), Some(1.0));
    }

    #[test]
    fn intro_unlocks_vertical_scroll() {
        let mut app = app();
        run(&mut app, INTRO_DURATION - 0.1);
        assert_eq!(app.mode, PageMode::Intro);

        run(&mut app, 0.2);
        assert_eq!(app.mode, PageMode::Ready);
        assert_eq!(app.session.scroll, ScrollPolicy::vertical_only());

        let mut draw = DrawContext::new(app.session.viewport);
        let frame = app.render(&mut draw);
        assert_eq!(frame.number(Target::Overlay, Property::Opacity), Some(0.0));
        assert_eq!(frame.number(Target::HeroMainContainer, Property::Scale), Some(1.25));
    }

    #[test]
    fn scroll_is_clamped_to_the_pinned_span() {
        let mut app = app();
        run(&mut app, 3.0);
        app.handle_event(UiEvent::Scroll { delta: -100.0 });
        assert_eq!(app.session.scroll_y, 0.0);
        app.handle_event(UiEvent::Scroll { delta: 5000.0 });
        assert_eq!(app.session.scroll_y, 2000.0);
    }

    #[test]
    fn load_then_scroll_through_and_back() {
        let mut app = app();
        let mut draw = DrawContext::new(app.session.viewport);
        run(&mut app, 3.0);

        for _ in 0..20 {
            app.handle_event(UiEvent::Scroll { delta: 100.0 });
            app.update(DT);
        }
        run(&mut app, 3.0);
        let end = app.render(&mut draw);
        assert_eq!(app.hero.progress(), 1.0);
        assert_eq!(end.number(Target::HeroMainContainer, Property::Opacity), Some(0.0));
        assert_eq!(end.number(Target::Hero1Container, Property::Opacity), Some(0.0));
        assert_eq!(end.number(Target::Hero2Container, Property::Opacity), Some(1.0));
        assert_eq!(end.number(Target::Container, Property::Y), Some(2000.0));

        app.handle_event(UiEvent::Scroll { delta: -2000.0 });
        run(&mut app, 3.0);
        let back = app.render(&mut draw);
        assert_eq!(app.hero.progress(), 0.0);
        assert_eq!(back.number(Target::HeroMainContainer, Property::Scale), Some(1.25));
        assert_eq!(back.number(Target::HeroMainLogo, Property::Opacity), Some(1.0));
        assert_eq!(
            back.get(Target::Hero2Container, Property::Visibility),
            Some(&Value::Visibility(Visibility::Hidden))
        );
    }

    #[test]
    fn full_scrub_returns_every_element_to_its_opening_frame() {
        let mut app = app();
        let mut draw = DrawContext::new(app.session.viewport);
        run(&mut app, 3.0);
        let mut opening = app.render(&mut draw);

        app.handle_event(UiEvent::Scroll { delta: 2000.0 });
        run(&mut app, 3.0);
        assert_eq!(app.hero.progress(), 1.0);
        app.handle_event(UiEvent::Scroll { delta: -2000.0 });
        run(&mut app, 3.0);
        assert_eq!(app.hero.progress(), 0.0);
        let mut reopened = app.render(&mut draw);

        // The indicator bobs on the wall clock, not on scroll.
        opening.elements.remove(&Target::ScrollIndicator);
        reopened.elements.remove(&Target::ScrollIndicator);
        assert_eq!(opening.elements, reopened.elements);
    }

    #[test]
    fn lists_features_in_render_order() {
        assert_eq!(app().feature_names(), vec!["hero", "intro", "bounce"]);
    }
}
