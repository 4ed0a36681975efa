use super::anim::lerp;
use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

/// Formats a float the way a stylesheet author would write it: at most four
/// decimals, no trailing zeros.
pub fn fmt_num(v: f32) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// RGB channels in 0..=255, alpha in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[cfg(test)]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32, 1.0)
    }

    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            anyhow::bail!("Unsupported color: {}", s);
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| anyhow::anyhow!("Unterminated color: {}", s))?;

        let channels = body
            .split(',')
            .map(|c| c.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Bad color channel in {}", s))?;

        match (channels.as_slice(), has_alpha) {
            ([r, g, b], false) => Ok(Color::new(*r, *g, *b, 1.0)),
            ([r, g, b, a], true) => Ok(Color::new(*r, *g, *b, *a)),
            _ => anyhow::bail!("Wrong channel count in {}", s),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < 1e-6 {
            write!(f, "rgb({}, {}, {})", fmt_num(self.r), fmt_num(self.g), fmt_num(self.b))
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                fmt_num(self.r),
                fmt_num(self.g),
                fmt_num(self.b),
                fmt_num(self.a)
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    None,
    Px,
    Vh,
    Percent,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Px => "px",
            Unit::Vh => "vh",
            Unit::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: Unit,
}

impl Length {
    pub fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    #[cfg(test)]
    pub fn px(value: f32) -> Self {
        Self::new(value, Unit::Px)
    }

    #[cfg(test)]
    pub fn vh(value: f32) -> Self {
        Self::new(value, Unit::Vh)
    }

    #[cfg(test)]
    pub fn percent(value: f32) -> Self {
        Self::new(value, Unit::Percent)
    }

    /// Interpolates two lengths. A bare `0` takes the unit of the other side;
    /// any other unit mismatch can't be interpolated.
    pub fn lerp(&self, other: &Length, t: f32) -> Option<Length> {
        let unit = match (self.unit, other.unit) {
            (a, b) if a == b => a,
            (Unit::None, b) if self.value == 0.0 => b,
            (a, Unit::None) if other.value == 0.0 => a,
            _ => return None,
        };
        Some(Length::new(lerp(self.value, other.value, t), unit))
    }
}

impl FromStr for Length {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (number, unit) = if let Some(n) = s.strip_suffix("px") {
            (n, Unit::Px)
        } else if let Some(n) = s.strip_suffix("vh") {
            (n, Unit::Vh)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Unit::Percent)
        } else {
            (s, Unit::None)
        };
        let value = number
            .trim()
            .parse::<f32>()
            .with_context(|| format!("Bad length: {}", s))?;
        Ok(Length::new(value, unit))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", fmt_num(self.value), self.unit.suffix())
    }
}
