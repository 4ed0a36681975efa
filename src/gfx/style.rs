use super::anim::lerp;
use super::math::{fmt_num, Color, Length};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Container,
    Overlay,
    ScrollIndicator,
    HeroMainContainer,
    HeroMainLogo,
    HeroMainImage,
    HeroText,
    HeroTextLogo,
    Hero1Container,
    Hero2Container,
}

impl Target {
    pub fn selector(self) -> &'static str {
        match self {
            Target::Container => ".container",
            Target::Overlay => ".overlay",
            Target::ScrollIndicator => ".scroll-indicator",
            Target::HeroMainContainer => ".hero-main-container",
            Target::HeroMainLogo => ".hero-main-logo",
            Target::HeroMainImage => ".hero-main-image",
            Target::HeroText => ".hero-text",
            Target::HeroTextLogo => ".hero-text-logo",
            Target::Hero1Container => ".hero-1-container",
            Target::Hero2Container => ".hero-2-container",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Y,
    Scale,
    Opacity,
    BackgroundSize,
    BackgroundImage,
    MaskImage,
    Visibility,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Property::Y => "y",
            Property::Scale => "scale",
            Property::Opacity => "opacity",
            Property::BackgroundSize => "background-size",
            Property::BackgroundImage => "background-image",
            Property::MaskImage => "mask-image",
            Property::Visibility => "visibility",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub color: Color,
    pub position: Length,
}

/// `radial-gradient(circle at X Y, <stop>, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: (Length, Length),
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn lerp(&self, other: &RadialGradient, t: f32) -> Option<RadialGradient> {
        if self.stops.len() != other.stops.len() {
            return None;
        }
        let center = (
            self.center.0.lerp(&other.center.0, t)?,
            self.center.1.lerp(&other.center.1, t)?,
        );
        let stops = self
            .stops
            .iter()
            .zip(&other.stops)
            .map(|(a, b)| {
                Some(ColorStop {
                    color: a.color.lerp(&b.color, t),
                    position: a.position.lerp(&b.position, t)?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(RadialGradient { center, stops })
    }
}

/// Splits on commas that aren't nested inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn parse_stop(s: &str) -> Result<ColorStop> {
    let s = s.trim();
    let close = s
        .find(')')
        .ok_or_else(|| anyhow::anyhow!("Color stop without a color: {}", s))?;
    let color = s[..=close].parse::<Color>()?;
    let rest = s[close + 1..].trim();
    if rest.is_empty() {
        anyhow::bail!("Color stop without a position: {}", s);
    }
    let position = rest.parse::<Length>()?;
    Ok(ColorStop { color, position })
}

impl FromStr for RadialGradient {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let body = normalized
            .strip_prefix("radial-gradient(")
            .and_then(|b| b.strip_suffix(')'))
            .ok_or_else(|| anyhow::anyhow!("Not a radial gradient: {}", normalized))?;

        let parts = split_top_level(body);
        let (shape, stops) = parts
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("Empty gradient"))?;

        let mut words = shape.split_whitespace();
        if words.next() != Some("circle") || words.next() != Some("at") {
            anyhow::bail!("Expected `circle at X Y` in {}", shape.trim());
        }
        let x = words.next().ok_or_else(|| anyhow::anyhow!("Missing gradient x"))?;
        let y = words.next().ok_or_else(|| anyhow::anyhow!("Missing gradient y"))?;
        let center = (x.parse::<Length>()?, y.parse::<Length>()?);

        let stops = stops
            .iter()
            .map(|p| parse_stop(p))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Bad gradient: {}", normalized))?;
        if stops.len() < 2 {
            anyhow::bail!("Gradient needs at least two stops: {}", normalized);
        }

        Ok(RadialGradient { center, stops })
    }
}

impl fmt::Display for RadialGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "radial-gradient(circle at {} {}", self.center.0, self.center.1)?;
        for stop in &self.stops {
            write!(f, ", {} {}", stop.color, stop.position)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Length(Length),
    Visibility(Visibility),
    Gradient(RadialGradient),
    None,
}

impl Value {
    pub fn gradient(css: &str) -> Result<Value> {
        Ok(Value::Gradient(css.parse()?))
    }

    pub fn length(css: &str) -> Result<Value> {
        Ok(Value::Length(css.parse()?))
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Values that can't be blended hold `self` until the tween ends.
    pub fn interpolate(&self, to: &Value, t: f32) -> Value {
        let blended = match (self, to) {
            (Value::Number(a), Value::Number(b)) => Some(Value::Number(lerp(*a, *b, t))),
            (Value::Length(a), Value::Length(b)) => a.lerp(b, t).map(Value::Length),
            (Value::Gradient(a), Value::Gradient(b)) => a.lerp(b, t).map(Value::Gradient),
            _ => None,
        };
        blended.unwrap_or_else(|| if t >= 1.0 { to.clone() } else { self.clone() })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&fmt_num(*n)),
            Value::Length(l) => write!(f, "{}", l),
            Value::Visibility(Visibility::Visible) => f.write_str("visible"),
            Value::Visibility(Visibility::Hidden) => f.write_str("hidden"),
            Value::Gradient(g) => write!(f, "{}", g),
            Value::None => f.write_str("none"),
        }
    }
}

/// Computed style of one element for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStyle {
    pub props: BTreeMap<Property, Value>,
}

impl ElementStyle {
    pub fn get(&self, property: Property) -> Option<&Value> {
        self.props.get(&property)
    }

    #[cfg(test)]
    pub fn number(&self, property: Property) -> Option<f32> {
        self.get(property).and_then(Value::as_number)
    }

    /// CSS declarations, with `y` and `scale` folded into one `transform`.
    pub fn declarations(&self) -> Vec<String> {
        let mut out = Vec::new();
        let y = self.get(Property::Y);
        let scale = self.get(Property::Scale);
        match (y, scale) {
            (Some(y), Some(s)) => out.push(format!("transform: translateY({}px) scale({})", y, s)),
            (Some(y), None) => out.push(format!("transform: translateY({}px)", y)),
            (None, Some(s)) => out.push(format!("transform: scale({})", s)),
            (None, None) => {}
        }
        for (property, value) in &self.props {
            if matches!(property, Property::Y | Property::Scale) {
                continue;
            }
            out.push(format!("{}: {}", property, value));
        }
        out
    }
}

/// Resting values the page's stylesheet gives each animated property.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    values: BTreeMap<(Target, Property), Value>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: Target, property: Property, value: Value) -> Self {
        self.values.insert((target, property), value);
        self
    }

    pub fn get(&self, target: Target, property: Property) -> Option<&Value> {
        self.values.get(&(target, property))
    }

    pub fn number(&self, target: Target, property: Property) -> Option<f32> {
        self.get(target, property).and_then(Value::as_number)
    }
}
