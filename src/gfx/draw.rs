use super::math::fmt_num;
use super::style::{ElementStyle, Property, Target, Value};
use std::collections::BTreeMap;
use std::fmt;

/// One frame's worth of computed styles.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub index: u64,
    pub time: f32,
    pub viewport: [f32; 2],
    pub elements: BTreeMap<Target, ElementStyle>,
}

#[cfg(test)]
impl Frame {
    pub fn get(&self, target: Target, property: Property) -> Option<&Value> {
        self.elements.get(&target).and_then(|s| s.get(property))
    }

    pub fn number(&self, target: Target, property: Property) -> Option<f32> {
        self.get(target, property).and_then(Value::as_number)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "/* frame {} @ {}s, {}x{} */",
            self.index,
            fmt_num(self.time),
            self.viewport[0],
            self.viewport[1]
        )?;
        for (target, style) in &self.elements {
            writeln!(f, "{} {{", target.selector())?;
            for decl in style.declarations() {
                writeln!(f, "  {};", decl)?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Collects style writes between `begin` and `flush`. Later writes to the
/// same property win.
pub struct DrawContext {
    viewport: [f32; 2],
    time: f32,
    frames: u64,
    elements: BTreeMap<Target, ElementStyle>,
}

impl DrawContext {
    pub fn new(viewport: [f32; 2]) -> Self {
        Self {
            viewport,
            time: 0.0,
            frames: 0,
            elements: BTreeMap::new(),
        }
    }

    pub fn begin(&mut self, viewport: [f32; 2]) {
        self.viewport = viewport;
        self.elements.clear();
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn set(&mut self, target: Target, property: Property, value: Value) {
        self.elements.entry(target).or_default().props.insert(property, value);
    }

    pub fn set_number(&mut self, target: Target, property: Property, value: f32) {
        self.set(target, property, Value::Number(value));
    }

    pub fn extend(&mut self, styles: BTreeMap<Target, ElementStyle>) {
        for (target, style) in styles {
            let entry = self.elements.entry(target).or_default();
            entry.props.extend(style.props);
        }
    }

    pub fn flush(&mut self) -> Frame {
        let frame = Frame {
            index: self.frames,
            time: self.time,
            viewport: self.viewport,
            elements: std::mem::take(&mut self.elements),
        };
        self.frames += 1;
        frame
    }
}
