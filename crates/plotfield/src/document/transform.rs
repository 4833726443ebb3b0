//! Mode-dependent document transformation for screen vs. plotter output.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::optimize::optimize_paths;
use crate::document::{PathPrimitive, VectorDocument};

/// Output target for a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Visual display: backgrounds and fills retained.
    Screen,
    /// Physical pen plotting: stroke-only, background-free.
    Plotter,
}

/// Plotter-specific rewrite switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotterOptions {
    /// Drop the painted background; a plotter has none.
    pub remove_background: bool,
    /// Replace gradient paints with the default stroke color.
    pub remove_gradients: bool,
    /// Turn filled shapes into stroked outlines.
    pub convert_fills_to_strokes: bool,
    /// Merge collinear segments and drop zero-length ones.
    pub optimize_paths: bool,
}

impl Default for PlotterOptions {
    fn default() -> Self {
        Self {
            remove_background: true,
            remove_gradients: true,
            convert_fills_to_strokes: true,
            optimize_paths: true,
        }
    }
}

/// Settings for exporting a document.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub mode: RenderMode,
    /// Stroke width applied when converting fills to strokes.
    pub stroke_weight: f32,
    /// Fallback stroke color for gradient replacement.
    pub stroke_color: String,
    pub plotter: PlotterOptions,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Screen,
            stroke_weight: 0.5,
            stroke_color: "#000000".to_owned(),
            plotter: PlotterOptions::default(),
        }
    }
}

impl ExportSettings {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Sets the stroke weight.
    pub fn with_stroke_weight(mut self, stroke_weight: f32) -> Self {
        self.stroke_weight = stroke_weight;
        self
    }

    /// Sets the fallback stroke color.
    pub fn with_stroke_color(mut self, stroke_color: impl Into<String>) -> Self {
        self.stroke_color = stroke_color.into();
        self
    }

    /// Sets the plotter options.
    pub fn with_plotter_options(mut self, plotter: PlotterOptions) -> Self {
        self.plotter = plotter;
        self
    }
}

/// Rewrites a document for the requested render mode.
///
/// Screen mode returns the document unchanged. Plotter mode removes the
/// background, converts fills to strokes, and optimizes paths according to
/// the settings. Primitive order is preserved.
pub fn transform_for_mode(doc: &VectorDocument, settings: &ExportSettings) -> VectorDocument {
    match settings.mode {
        RenderMode::Screen => doc.clone(),
        RenderMode::Plotter => transform_for_plotter(doc, settings),
    }
}

fn transform_for_plotter(doc: &VectorDocument, settings: &ExportSettings) -> VectorDocument {
    let options = &settings.plotter;
    let mut out = VectorDocument::new(doc.width, doc.height);
    out.background = if options.remove_background {
        None
    } else {
        doc.background.clone()
    };

    for primitive in &doc.primitives {
        if options.remove_background && is_canvas_background(primitive, doc) {
            continue;
        }
        let mut primitive = primitive.clone();
        if options.remove_gradients {
            strip_gradients(&mut primitive, &settings.stroke_color);
        }
        if options.convert_fills_to_strokes {
            primitive = fill_to_stroke(primitive, settings.stroke_weight);
        }
        out.push(primitive);
    }

    if options.optimize_paths {
        let before = out.len();
        out.primitives = optimize_paths(out.primitives);
        debug!(before, after = out.len(), "plotter path optimization");
    }

    out
}

/// A filled rect covering the whole canvas acts as a painted background.
fn is_canvas_background(primitive: &PathPrimitive, doc: &VectorDocument) -> bool {
    match primitive {
        PathPrimitive::Rect {
            x,
            y,
            w,
            h,
            fill: Some(_),
            ..
        } => *x <= 0.0 && *y <= 0.0 && *w >= doc.width && *h >= doc.height,
        _ => false,
    }
}

fn strip_gradients(primitive: &mut PathPrimitive, fallback: &str) {
    let is_gradient = |color: &Option<String>| {
        color
            .as_deref()
            .is_some_and(|c| c.starts_with("url(") || c.contains("gradient"))
    };
    match primitive {
        PathPrimitive::Line { stroke, .. } => {
            if is_gradient(stroke) {
                *stroke = Some(fallback.to_owned());
            }
        }
        PathPrimitive::Circle { fill, stroke, .. }
        | PathPrimitive::Polygon { fill, stroke, .. } => {
            if is_gradient(fill) {
                *fill = Some(fallback.to_owned());
            }
            if is_gradient(stroke) {
                *stroke = Some(fallback.to_owned());
            }
        }
        PathPrimitive::Rect { fill, .. } => {
            if is_gradient(fill) {
                *fill = Some(fallback.to_owned());
            }
        }
    }
}

/// Converts a set fill with no stroke into a stroked outline; a pen can only
/// draw strokes. Filled rects become stroked polygons for the same reason.
fn fill_to_stroke(primitive: PathPrimitive, stroke_weight: f32) -> PathPrimitive {
    match primitive {
        PathPrimitive::Circle {
            cx,
            cy,
            r,
            fill: Some(fill),
            stroke: None,
            opacity,
            ..
        } => PathPrimitive::Circle {
            cx,
            cy,
            r,
            fill: None,
            stroke: Some(fill),
            width: stroke_weight,
            opacity,
        },
        PathPrimitive::Polygon {
            points,
            fill: Some(fill),
            stroke: None,
            opacity,
            ..
        } => PathPrimitive::Polygon {
            points,
            fill: None,
            stroke: Some(fill),
            width: stroke_weight,
            opacity,
        },
        PathPrimitive::Rect {
            x,
            y,
            w,
            h,
            fill: Some(fill),
            opacity,
        } => PathPrimitive::Polygon {
            points: vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
            fill: None,
            stroke: Some(fill),
            width: stroke_weight,
            opacity,
        },
        other => other,
    }
}
