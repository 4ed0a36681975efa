use anyhow::Result;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Quadratic in-out, the `power1.inOut` curve.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Named easing curves. `Power(n)` families follow the usual naming where
/// `power1` is quadratic and `power4` is quintic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    None,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    SineInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::None => t,
            Ease::PowerIn(n) => t.powi(n as i32 + 1),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(n as i32 + 1),
            Ease::PowerInOut(1) => ease_in_out(t),
            Ease::PowerInOut(n) => {
                let exp = n as i32 + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::PowerOut(1)
    }
}

impl FromStr for Ease {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "none" | "linear" => return Ok(Ease::None),
            "sine.inOut" => return Ok(Ease::SineInOut),
            _ => {}
        }

        let (family, kind) = s.split_once('.').unwrap_or((s, "out"));
        let power = family
            .strip_prefix("power")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=4).contains(n))
            .ok_or_else(|| anyhow::anyhow!("Unknown ease: {}", s))?;

        match kind {
            "in" => Ok(Ease::PowerIn(power)),
            "out" => Ok(Ease::PowerOut(power)),
            "inOut" => Ok(Ease::PowerInOut(power)),
            _ => anyhow::bail!("Unknown ease direction in {}", s),
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::None => write!(f, "none"),
            Ease::PowerIn(n) => write!(f, "power{}.in", n),
            Ease::PowerOut(n) => write!(f, "power{}.out", n),
            Ease::PowerInOut(n) => write!(f, "power{}.inOut", n),
            Ease::SineInOut => write!(f, "sine.inOut"),
        }
    }
}

/// Wall-clock timeline used by the load-time animations.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub start_time: f32,
    pub duration: f32,
    pub current_time: f32,
    pub ease: Ease,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self {
            start_time: 0.0,
            duration,
            current_time: 0.0,
            ease: Ease::None,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn start(&mut self, now: f32) {
        self.start_time = now;
        self.current_time = now;
    }

    pub fn update(&mut self, now: f32) {
        self.current_time = now;
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = self.current_time - self.start_time;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn eased_progress(&self) -> f32 {
        self.ease.apply(self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 7] = [
        Ease::None,
        Ease::PowerIn(2),
        Ease::PowerOut(1),
        Ease::PowerOut(3),
        Ease::PowerInOut(1),
        Ease::PowerInOut(3),
        Ease::SineInOut,
    ];

    #[test]
    fn eases_hit_endpoints() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-6, "{} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{} at 1", ease);
        }
    }

    #[test]
    fn in_out_curves_are_symmetric() {
        for ease in [Ease::PowerInOut(1), Ease::PowerInOut(2), Ease::SineInOut] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
            let a = ease.apply(0.2);
            let b = ease.apply(0.8);
            assert!((a + b - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn power3_out_decelerates() {
        let ease = Ease::PowerOut(3);
        assert!(ease.apply(0.25) > 0.25);
        assert!((ease.apply(0.5) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn parses_engine_names() {
        assert_eq!("power3.out".parse::<Ease>().unwrap(), Ease::PowerOut(3));
        assert_eq!("power1.inOut".parse::<Ease>().unwrap(), Ease::PowerInOut(1));
        assert_eq!("power2".parse::<Ease>().unwrap(), Ease::PowerOut(2));
        assert_eq!("none".parse::<Ease>().unwrap(), Ease::None);
        assert!("bounce.out".parse::<Ease>().is_err());
        assert!("power9.in".parse::<Ease>().is_err());
    }

    #[test]
    fn timeline_progress_clamps() {
        let mut tl = Timeline::new(2.0).with_ease(Ease::PowerOut(3));
        tl.start(1.0);
        tl.update(0.5);
        assert_eq!(tl.progress(), 0.0);
        tl.update(2.0);
        assert!((tl.progress() - 0.5).abs() < 1e-6);
        assert!(!tl.is_complete());
        tl.update(10.0);
        assert!(tl.is_complete());
        assert_eq!(tl.eased_progress(), 1.0);
    }

    #[test]
    fn zero_duration_timeline_is_complete() {
        let tl = Timeline::new(0.0);
        assert!(tl.is_complete());
    }
}
