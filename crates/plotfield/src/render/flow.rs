//! Builds a vector document from traced flow-field polylines.
use crate::document::{PathPrimitive, VectorDocument};
use crate::field::tracer::Polyline;

/// Styling for flow-field rendering.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct FlowRenderConfig {
    pub stroke_color: String,
    pub stroke_weight: f32,
    pub background: Option<String>,
}

impl Default for FlowRenderConfig {
    fn default() -> Self {
        Self {
            stroke_color: "#000000".to_owned(),
            stroke_weight: 0.5,
            background: Some("white".to_owned()),
        }
    }
}

impl FlowRenderConfig {
    /// Sets the stroke color.
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }

    /// Sets the stroke weight.
    pub fn with_stroke_weight(mut self, weight: f32) -> Self {
        self.stroke_weight = weight;
        self
    }

    /// Sets or clears the background color.
    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.background = background;
        self
    }
}

/// Builds a document with one line per consecutive point pair.
///
/// Each segment carries its end point's fade opacity, so paths dim smoothly
/// toward the margins. Polylines shorter than two points draw nothing.
pub fn render_polylines(
    polylines: &[Polyline],
    width: f32,
    height: f32,
    config: &FlowRenderConfig,
) -> VectorDocument {
    let mut doc = VectorDocument::new(width, height);
    doc.background = config.background.clone();

    for polyline in polylines {
        for pair in polyline.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            doc.push(
                PathPrimitive::line(a.position.x, a.position.y, b.position.x, b.position.y)
                    .with_stroke(config.stroke_color.clone())
                    .with_width(config.stroke_weight)
                    .with_opacity(b.opacity),
            );
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use mint::Vector2;

    use super::*;
    use crate::field::tracer::TracePoint;

    fn point(x: f32, y: f32, opacity: f32) -> TracePoint {
        TracePoint {
            position: Vector2 { x, y },
            opacity,
        }
    }

    #[test]
    fn emits_one_segment_per_point_pair() {
        let lines = vec![Polyline {
            points: vec![point(0.0, 0.0, 1.0), point(1.0, 0.0, 0.8), point(2.0, 0.0, 0.2)],
        }];
        let doc = render_polylines(&lines, 10.0, 10.0, &FlowRenderConfig::default());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn segments_carry_end_point_opacity() {
        let lines = vec![Polyline {
            points: vec![point(0.0, 0.0, 1.0), point(1.0, 1.0, 0.25)],
        }];
        let doc = render_polylines(&lines, 10.0, 10.0, &FlowRenderConfig::default());
        match &doc.primitives[0] {
            PathPrimitive::Line { opacity, .. } => assert_eq!(*opacity, 0.25),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn single_point_paths_draw_nothing() {
        let lines = vec![Polyline {
            points: vec![point(5.0, 5.0, 1.0)],
        }];
        let doc = render_polylines(&lines, 10.0, 10.0, &FlowRenderConfig::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn config_controls_background_and_style() {
        let config = FlowRenderConfig::default()
            .with_stroke_color("#112233")
            .with_stroke_weight(1.5)
            .with_background(None);
        let lines = vec![Polyline {
            points: vec![point(0.0, 0.0, 1.0), point(1.0, 1.0, 1.0)],
        }];
        let doc = render_polylines(&lines, 10.0, 10.0, &config);
        assert_eq!(doc.background, None);
        assert_eq!(doc.primitives[0].stroke(), Some("#112233"));
    }
}
