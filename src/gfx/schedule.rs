use super::anim::Ease;
use super::style::{ElementStyle, Property, Stylesheet, Target, Value};
use anyhow::{Context, Result};
use log::info;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const EPSILON: f32 = 1e-4;

/// Where a step starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// After everything declared so far.
    End,
    At(f32),
    /// Relative to the previous step's start (`<`, `<0.5`, `<+=0.5`, `<-=3`).
    PreviousStart(f32),
    /// Relative to the previous step's end (`>`, `>-1.2`, `>+=0.2`).
    PreviousEnd(f32),
    /// Relative to the timeline's end (`+=1`, `-=0.5`).
    EndOffset(f32),
}

impl Position {
    pub fn before_previous_end(delta: f32) -> Self {
        Position::PreviousEnd(-delta)
    }
}

fn parse_offset(s: &str) -> Result<f32> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let value = if let Some(n) = s.strip_prefix("+=") {
        n.trim().parse::<f32>()?
    } else if let Some(n) = s.strip_prefix("-=") {
        -n.trim().parse::<f32>()?
    } else {
        s.parse::<f32>()?
    };
    Ok(value)
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parsed = if s.is_empty() {
            Ok(Position::End)
        } else if let Some(rest) = s.strip_prefix('<') {
            parse_offset(rest).map(Position::PreviousStart)
        } else if let Some(rest) = s.strip_prefix('>') {
            parse_offset(rest).map(Position::PreviousEnd)
        } else if s.starts_with("+=") || s.starts_with("-=") {
            parse_offset(s).map(Position::EndOffset)
        } else {
            s.parse::<f32>().map(Position::At).map_err(anyhow::Error::from)
        };
        parsed.with_context(|| format!("Bad position: {:?}", s))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::End => f.write_str("end"),
            Position::At(t) => write!(f, "{}", t),
            Position::PreviousStart(d) => write!(f, "<{:+}", d),
            Position::PreviousEnd(d) => write!(f, ">{:+}", d),
            Position::EndOffset(d) => write!(f, "end{:+}", d),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tween {
    pub property: Property,
    pub from: Option<Value>,
    pub to: Value,
}

#[derive(Debug, Clone)]
pub struct AnimationStep {
    pub label: &'static str,
    pub target: Target,
    pub tweens: Vec<Tween>,
    pub duration: f32,
    pub ease: Ease,
    pub position: Position,
}

impl AnimationStep {
    /// Instant write, appended at the timeline's end unless moved with [`Self::at`].
    pub fn set(label: &'static str, target: Target) -> Self {
        Self {
            label,
            target,
            tweens: Vec::new(),
            duration: 0.0,
            ease: Ease::None,
            position: Position::End,
        }
    }

    pub fn to(label: &'static str, target: Target, duration: f32) -> Self {
        Self {
            duration,
            ease: Ease::default(),
            ..Self::set(label, target)
        }
    }

    pub fn prop(mut self, property: Property, to: Value) -> Self {
        self.tweens.push(Tween { property, from: None, to });
        self
    }

    pub fn from_to(mut self, property: Property, from: Value, to: Value) -> Self {
        self.tweens.push(Tween {
            property,
            from: Some(from),
            to,
        });
        self
    }

    #[cfg(test)]
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
    pub from: Value,
    pub to: Value,
}

impl Segment {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    fn value_at(&self, time: f32) -> Value {
        if self.duration <= 0.0 || time >= self.end() {
            return self.to.clone();
        }
        let local = ((time - self.start) / self.duration).clamp(0.0, 1.0);
        self.from.interpolate(&self.to, self.ease.apply(local))
    }
}

/// Every segment that writes one property of one element, in time order.
#[derive(Debug, Clone)]
pub struct Channel {
    pub target: Target,
    pub property: Property,
    pub segments: Vec<Segment>,
}

impl Channel {
    pub fn value_at(&self, time: f32) -> Value {
        let started = self.segments.partition_point(|s| s.start <= time);
        match started {
            0 => self.segments[0].from.clone(),
            n => self.segments[n - 1].value_at(time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStep {
    pub label: &'static str,
    pub target: Target,
    pub position: Position,
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    steps: Vec<ResolvedStep>,
    channels: Vec<Channel>,
    duration: f32,
}

impl Schedule {
    pub fn build(steps: &[AnimationStep], stylesheet: &Stylesheet) -> Result<Self> {
        let mut resolved = Vec::with_capacity(steps.len());
        let mut channels: BTreeMap<(Target, Property), Vec<Segment>> = BTreeMap::new();
        let mut clock_end = 0.0f32;
        let mut previous: Option<ResolvedStep> = None;

        for step in steps {
            let start = match step.position {
                Position::End => clock_end,
                Position::At(t) => t,
                Position::PreviousStart(d) => previous.map_or(0.0, |p| p.start) + d,
                Position::PreviousEnd(d) => previous.map_or(0.0, |p| p.end) + d,
                Position::EndOffset(d) => clock_end + d,
            };
            if start < -EPSILON {
                anyhow::bail!("Step {:?} resolves to negative start {}", step.label, start);
            }
            let start = start.max(0.0);
            let end = start + step.duration;

            for tween in &step.tweens {
                let segments = channels.entry((step.target, tween.property)).or_default();
                if let Some(last) = segments.last() {
                    if start < last.end() - EPSILON {
                        anyhow::bail!(
                            "Step {:?} writes {} {} at {} while an earlier tween runs until {}",
                            step.label,
                            step.target,
                            tween.property,
                            start,
                            last.end()
                        );
                    }
                }
                let from = match (&tween.from, segments.last()) {
                    (Some(from), _) => from.clone(),
                    (None, Some(last)) => last.to.clone(),
                    (None, None) => stylesheet
                        .get(step.target, tween.property)
                        .cloned()
                        .ok_or_else(|| {
                            anyhow::anyhow!(
                                "No resting value for {} {} (step {:?})",
                                step.target,
                                tween.property,
                                step.label
                            )
                        })?,
                };
                segments.push(Segment {
                    start,
                    duration: step.duration,
                    ease: step.ease,
                    from,
                    to: tween.to.clone(),
                });
            }

            let this = ResolvedStep {
                label: step.label,
                target: step.target,
                position: step.position,
                start,
                end,
            };
            clock_end = clock_end.max(end);
            previous = Some(this);
            resolved.push(this);
        }

        let channels = channels
            .into_iter()
            .map(|((target, property), segments)| Channel {
                target,
                property,
                segments,
            })
            .collect();

        info!("Built schedule: {} steps, {:.2} units", resolved.len(), clock_end);

        Ok(Self {
            steps: resolved,
            channels,
            duration: clock_end,
        })
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[cfg(test)]
    pub fn step(&self, label: &str) -> Option<&ResolvedStep> {
        self.steps.iter().find(|s| s.label == label)
    }

    #[cfg(test)]
    pub fn value_at(&self, target: Target, property: Property, time: f32) -> Option<Value> {
        self.channels
            .iter()
            .find(|c| c.target == target && c.property == property)
            .map(|c| c.value_at(time))
    }

    /// Styles of every animated element at `time`.
    pub fn sample(&self, time: f32) -> BTreeMap<Target, ElementStyle> {
        let mut out: BTreeMap<Target, ElementStyle> = BTreeMap::new();
        for channel in &self.channels {
            out.entry(channel.target)
                .or_default()
                .props
                .insert(channel.property, channel.value_at(time));
        }
        out
    }

    pub fn sample_progress(&self, progress: f32) -> BTreeMap<Target, ElementStyle> {
        self.sample(progress.clamp(0.0, 1.0) * self.duration)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<4} {:<20} {:<22} {:<8} {:>7} {:>7}",
            "#", "step", "target", "at", "start", "end"
        )?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(
                f,
                "{:<4} {:<20} {:<22} {:<8} {:>7.2} {:>7.2}",
                i + 1,
                step.label,
                step.target.selector(),
                step.position.to_string(),
                step.start,
                step.end
            )?;
        }
        write!(f, "total {:.2}", self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Stylesheet {
        Stylesheet::new()
            .with(Target::Overlay, Property::Opacity, Value::Number(1.0))
            .with(Target::HeroMainLogo, Property::Opacity, Value::Number(1.0))
    }

    #[test]
    fn parses_positions() {
        assert_eq!("".parse::<Position>().unwrap(), Position::End);
        assert_eq!("<".parse::<Position>().unwrap(), Position::PreviousStart(0.0));
        assert_eq!("<0.2".parse::<Position>().unwrap(), Position::PreviousStart(0.2));
        assert_eq!("<+=0.5".parse::<Position>().unwrap(), Position::PreviousStart(0.5));
        assert_eq!("<-=3".parse::<Position>().unwrap(), Position::PreviousStart(-3.0));
        assert_eq!(">-1.2".parse::<Position>().unwrap(), Position::before_previous_end(1.2));
        assert_eq!("+=1".parse::<Position>().unwrap(), Position::EndOffset(1.0));
        assert_eq!("2.5".parse::<Position>().unwrap(), Position::At(2.5));
        assert!("<abc".parse::<Position>().is_err());
        assert!("soon".parse::<Position>().is_err());
    }

    #[test]
    fn resolves_against_previous_step_only() {
        let steps = [
            AnimationStep::to("a", Target::Overlay, 2.0).prop(Property::Opacity, Value::Number(0.0)),
            AnimationStep::to("b", Target::HeroMainLogo, 1.0)
                .prop(Property::Opacity, Value::Number(0.0))
                .at(Position::PreviousStart(0.5)),
            AnimationStep::to("c", Target::HeroMainLogo, 1.0)
                .prop(Property::Scale, Value::Number(2.0))
                .at(Position::End),
        ];
        let sheet = sheet().with(Target::HeroMainLogo, Property::Scale, Value::Number(1.0));
        let schedule = Schedule::build(&steps, &sheet).unwrap();
        assert_eq!(schedule.step("b").unwrap().start, 0.5);
        // `End` is the running end of the timeline, not the previous step's end.
        assert_eq!(schedule.step("c").unwrap().start, 2.0);
        assert_eq!(schedule.duration(), 3.0);
    }

    #[test]
    fn rejects_overlapping_writes() {
        let steps = [
            AnimationStep::to("a", Target::Overlay, 2.0).prop(Property::Opacity, Value::Number(0.0)),
            AnimationStep::to("b", Target::Overlay, 1.0)
                .prop(Property::Opacity, Value::Number(1.0))
                .at("<".parse().unwrap()),
        ];
        let err = Schedule::build(&steps, &sheet()).unwrap_err();
        assert!(err.to_string().contains("while an earlier tween runs"));
    }

    #[test]
    fn rejects_missing_resting_value() {
        let steps = [AnimationStep::to("a", Target::Hero2Container, 1.0).prop(Property::Opacity, Value::Number(1.0))];
        assert!(Schedule::build(&steps, &sheet()).is_err());
    }

    #[test]
    fn rejects_negative_start() {
        let steps = [AnimationStep::to("a", Target::Overlay, 1.0)
            .prop(Property::Opacity, Value::Number(0.0))
            .at(Position::PreviousStart(-1.0))];
        assert!(Schedule::build(&steps, &sheet()).is_err());
    }

    #[test]
    fn implicit_from_chains_through_channel() {
        let steps = [
            AnimationStep::to("out", Target::Overlay, 1.0)
                .prop(Property::Opacity, Value::Number(0.2))
                .ease(Ease::None),
            AnimationStep::to("back", Target::Overlay, 1.0)
                .prop(Property::Opacity, Value::Number(1.0))
                .ease(Ease::None),
        ];
        let schedule = Schedule::build(&steps, &sheet()).unwrap();
        let at = |t| schedule.value_at(Target::Overlay, Property::Opacity, t).unwrap().as_number().unwrap();
        assert!((at(0.0) - 1.0).abs() < 1e-6);
        assert!((at(1.0) - 0.2).abs() < 1e-6);
        assert!((at(1.5) - 0.6).abs() < 1e-6);
        assert!((at(9.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sets_apply_from_their_start() {
        let steps = [
            AnimationStep::to("fade", Target::Overlay, 1.0).prop(Property::Opacity, Value::Number(0.5)),
            AnimationStep::set("hide", Target::Overlay).prop(Property::Opacity, Value::Number(0.0)),
        ];
        let schedule = Schedule::build(&steps, &sheet()).unwrap();
        assert_eq!(schedule.step("hide").unwrap().start, 1.0);
        let at = |t| schedule.value_at(Target::Overlay, Property::Opacity, t).unwrap();
        assert_eq!(at(0.9).as_number().map(|v| v > 0.5), Some(true));
        assert_eq!(at(1.0), Value::Number(0.0));
    }

    #[test]
    fn from_to_holds_its_from_before_start() {
        let steps = [
            AnimationStep::to("wait", Target::Overlay, 2.0).prop(Property::Opacity, Value::Number(0.0)),
            AnimationStep::to("reveal", Target::HeroMainLogo, 1.0)
                .from_to(Property::Opacity, Value::Number(0.0), Value::Number(1.0)),
        ];
        let schedule = Schedule::build(&steps, &sheet()).unwrap();
        let logo = |t| schedule.value_at(Target::HeroMainLogo, Property::Opacity, t).unwrap();
        assert_eq!(logo(0.0), Value::Number(0.0));
        assert_eq!(logo(3.0), Value::Number(1.0));
    }
}
