//! Vector document model: typed drawing primitives in paint order.
//!
//! A [`VectorDocument`] is an ordered collection of [`PathPrimitive`]s;
//! insertion order is paint order and every transform in this crate
//! preserves it.
use serde::{Deserialize, Serialize};

pub mod optimize;
pub mod svg;
pub mod transform;

/// Default stroke width when none is given.
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// A typed drawing primitive.
///
/// Color fields are `None` for "no paint". Width defaults to
/// [`DEFAULT_STROKE_WIDTH`] and opacity to 1.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathPrimitive {
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Option<String>,
        width: f32,
        opacity: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<String>,
        stroke: Option<String>,
        width: f32,
        opacity: f32,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        fill: Option<String>,
        stroke: Option<String>,
        width: f32,
        opacity: f32,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<String>,
        opacity: f32,
    },
}

impl PathPrimitive {
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: None,
            width: DEFAULT_STROKE_WIDTH,
            opacity: 1.0,
        }
    }

    pub fn circle(cx: f32, cy: f32, r: f32) -> Self {
        Self::Circle {
            cx,
            cy,
            r,
            fill: None,
            stroke: None,
            width: DEFAULT_STROKE_WIDTH,
            opacity: 1.0,
        }
    }

    pub fn polygon(points: Vec<(f32, f32)>) -> Self {
        Self::Polygon {
            points,
            fill: None,
            stroke: None,
            width: DEFAULT_STROKE_WIDTH,
            opacity: 1.0,
        }
    }

    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::Rect {
            x,
            y,
            w,
            h,
            fill: None,
            opacity: 1.0,
        }
    }

    /// Sets the stroke color. No effect on `Rect`, which has no stroke.
    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        match &mut self {
            Self::Line { stroke, .. }
            | Self::Circle { stroke, .. }
            | Self::Polygon { stroke, .. } => *stroke = Some(color.into()),
            Self::Rect { .. } => {}
        }
        self
    }

    /// Sets the fill color. No effect on `Line`, which has no fill.
    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        match &mut self {
            Self::Circle { fill, .. } | Self::Polygon { fill, .. } | Self::Rect { fill, .. } => {
                *fill = Some(color.into())
            }
            Self::Line { .. } => {}
        }
        self
    }

    /// Sets the stroke width. No effect on `Rect`.
    pub fn with_width(mut self, value: f32) -> Self {
        match &mut self {
            Self::Line { width, .. }
            | Self::Circle { width, .. }
            | Self::Polygon { width, .. } => *width = value,
            Self::Rect { .. } => {}
        }
        self
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        match &mut self {
            Self::Line { opacity, .. }
            | Self::Circle { opacity, .. }
            | Self::Polygon { opacity, .. }
            | Self::Rect { opacity, .. } => *opacity = value,
        }
        self
    }

    pub fn fill(&self) -> Option<&str> {
        match self {
            Self::Circle { fill, .. } | Self::Polygon { fill, .. } | Self::Rect { fill, .. } => {
                fill.as_deref()
            }
            Self::Line { .. } => None,
        }
    }

    pub fn stroke(&self) -> Option<&str> {
        match self {
            Self::Line { stroke, .. }
            | Self::Circle { stroke, .. }
            | Self::Polygon { stroke, .. } => stroke.as_deref(),
            Self::Rect { .. } => None,
        }
    }
}

/// An ordered vector document with optional background color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub width: f32,
    pub height: f32,
    pub background: Option<String>,
    pub primitives: Vec<PathPrimitive>,
}

impl VectorDocument {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: None,
            primitives: Vec::new(),
        }
    }

    /// Sets the background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Appends a primitive; later primitives paint on top.
    pub fn push(&mut self, primitive: PathPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_apply_style_defaults() {
        let line = PathPrimitive::line(0.0, 0.0, 1.0, 1.0);
        assert_eq!(line.stroke(), None);
        match line {
            PathPrimitive::Line { width, opacity, .. } => {
                assert_eq!(width, DEFAULT_STROKE_WIDTH);
                assert_eq!(opacity, 1.0);
            }
            _ => unreachable!(),
        }

        let circle = PathPrimitive::circle(0.0, 0.0, 5.0);
        assert_eq!(circle.fill(), None);
        assert_eq!(circle.stroke(), None);
    }

    #[test]
    fn builders_set_style_fields() {
        let poly = PathPrimitive::polygon(vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)])
            .with_fill("#ff0000")
            .with_stroke("#000000")
            .with_width(2.0)
            .with_opacity(0.5);
        assert_eq!(poly.fill(), Some("#ff0000"));
        assert_eq!(poly.stroke(), Some("#000000"));
    }

    #[test]
    fn rect_ignores_stroke_builder() {
        let rect = PathPrimitive::rect(0.0, 0.0, 10.0, 10.0).with_stroke("#123456");
        assert_eq!(rect.stroke(), None);
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut doc = VectorDocument::new(100.0, 100.0);
        doc.push(PathPrimitive::line(0.0, 0.0, 1.0, 1.0));
        doc.push(PathPrimitive::circle(5.0, 5.0, 2.0));
        assert_eq!(doc.len(), 2);
        assert!(matches!(doc.primitives[0], PathPrimitive::Line { .. }));
        assert!(matches!(doc.primitives[1], PathPrimitive::Circle { .. }));
    }
}
