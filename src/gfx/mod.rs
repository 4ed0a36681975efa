pub mod anim;
pub mod draw;
pub mod math;
pub mod schedule;
pub mod style;
