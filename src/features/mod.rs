pub mod bounce;
pub mod hero;
pub mod intro;
pub mod page;

use crate::app::PageSession;
use crate::gfx::draw::DrawContext;

pub trait Feature {
    fn name(&self) -> &'static str;
    fn update(&mut self, dt: f32, page: &PageSession);
    fn render(&self, draw: &mut DrawContext);
}
