//! Capability contract between the motion core and the page's visual targets.
//!
//! The core never touches a concrete scene graph. Elements are addressed by
//! `TargetId`, an opaque index into an arena owned by the frontend; geometry
//! is reported in document coordinates (already offset by the page scroll).

/// Stable handle to one visual target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

impl TargetId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Axis-aligned rectangle in document pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Animatable properties understood by the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    /// Horizontal translation in px.
    X,
    /// Vertical translation in px.
    Y,
    /// Vertical translation as a percentage of the element's own height.
    YPercent,
    Scale,
    /// Rotation around the x axis in degrees.
    RotateX,
    /// Width as a percentage of the parent.
    WidthPercent,
    /// Whole-number text content (counters).
    Counter,
    /// A CSS custom property, written as `--name`.
    Custom(&'static str),
}

impl Property {
    /// Value assumed when the scene cannot report a current value.
    pub fn neutral(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            _ => 0.0,
        }
    }
}

/// Mutations applied instantly rather than tweened.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Text(String),
    Style { name: String, value: String },
}

/// Everything the motion core needs from the page.
///
/// Setters return `false` when the target no longer exists so callers can
/// skip it; none of them fail otherwise.
pub trait Scene {
    /// Document-space bounding box of a target.
    fn bounding_box(&self, target: TargetId) -> Option<Rect>;
    /// Current value of an animatable property, if the scene tracks it.
    fn property(&self, target: TargetId, property: Property) -> Option<f32>;
    fn set_property(&mut self, target: TargetId, property: Property, value: f32) -> bool;
    fn set_text(&mut self, target: TargetId, text: &str) -> bool;
    fn set_class(&mut self, target: TargetId, class: &str, on: bool) -> bool;
    fn set_style(&mut self, target: TargetId, name: &str, value: &str) -> bool;
    /// Apply the smoothed page scroll offset.
    fn set_page_scroll(&mut self, y: f64);

    fn apply(&mut self, target: TargetId, mutation: &Mutation) -> bool {
        match mutation {
            Mutation::Text(text) => self.set_text(target, text),
            Mutation::Style { name, value } => self.set_style(target, name, value),
        }
    }
}
