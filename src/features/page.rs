use crate::gfx::style::{Property, Stylesheet, Target, Value, Visibility};
use anyhow::Result;

pub const HERO_RESTING_SCALE: f32 = 1.25;
pub const HERO_BACKGROUND_SIZE: &str = "1000vh";

pub const DIFFUSE_GRADIENT: &str = "radial-gradient(
          circle at 50% 200vh,
          rgba(255, 214, 135, 0) 0,
          rgba(157, 47, 106, 0.5) 90vh,
          rgba(157, 47, 106, 0.8) 120vh,
          rgba(32, 31, 66, 0) 150vh
        )";

pub const SATURATED_GRADIENT: &str = "radial-gradient(circle at 50% 3.9575vh, rgb(255, 213, 133) 0vh,
     rgb(247, 77, 82) 50.011vh,
      rgb(145, 42, 105) 90.0183vh,
       rgba(32, 31, 66, 0) 140.599vh)";

pub const LOGO_MASK_HIDDEN: &str =
    "radial-gradient(circle at 50% 145.835%, rgb(0, 0, 0) 36.11%, rgba(0, 0, 0, 0) 68.055%)";

pub const LOGO_MASK_REVEALED: &str = "radial-gradient(
    circle at 50% 105.594%,
    rgb(0, 0, 0) 62.9372%,
    rgba(0, 0, 0, 0) 81.4686%
  )";

pub const SECTION_MASK_FULL: &str =
    "radial-gradient(circle at 50% 16.1137vh, rgb(0, 0, 0) 96.1949vh, rgba(0, 0, 0, 0) 112.065vh)";

pub const SECTION_MASK_GONE: &str =
    "radial-gradient(circle at 50% -40vh, rgb(0, 0, 0) 0vh, rgba(0, 0, 0, 0) 80vh)";

pub fn stylesheet() -> Result<Stylesheet> {
    let n = Value::Number;
    Ok(Stylesheet::new()
        .with(Target::Overlay, Property::Opacity, n(1.0))
        .with(Target::ScrollIndicator, Property::Y, n(0.0))
        .with(Target::ScrollIndicator, Property::Opacity, n(1.0))
        .with(Target::HeroMainContainer, Property::Scale, n(HERO_RESTING_SCALE))
        .with(Target::HeroMainContainer, Property::Opacity, n(1.0))
        .with(Target::HeroMainContainer, Property::BackgroundSize, Value::length(HERO_BACKGROUND_SIZE)?)
        .with(Target::HeroMainLogo, Property::Opacity, n(1.0))
        .with(Target::HeroMainImage, Property::Opacity, n(1.0))
        .with(Target::HeroText, Property::BackgroundImage, Value::gradient(DIFFUSE_GRADIENT)?)
        .with(Target::HeroTextLogo, Property::Opacity, n(0.0))
        .with(Target::HeroTextLogo, Property::MaskImage, Value::gradient(LOGO_MASK_HIDDEN)?)
        .with(Target::Hero1Container, Property::Scale, n(1.0))
        .with(Target::Hero1Container, Property::Opacity, n(1.0))
        .with(Target::Hero1Container, Property::MaskImage, Value::None)
        .with(Target::Hero2Container, Property::Opacity, n(0.0))
        .with(Target::Hero2Container, Property::Visibility, Value::Visibility(Visibility::Hidden))
        .with(Target::Hero2Container, Property::BackgroundImage, Value::gradient(DIFFUSE_GRADIENT)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_literal_parses() {
        let sheet = stylesheet().unwrap();
        assert_eq!(sheet.number(Target::HeroMainContainer, Property::Scale), Some(1.25));
        for css in [SATURATED_GRADIENT, LOGO_MASK_REVEALED, SECTION_MASK_FULL, SECTION_MASK_GONE] {
            assert!(Value::gradient(css).is_ok(), "{}", css);
        }
    }
}
