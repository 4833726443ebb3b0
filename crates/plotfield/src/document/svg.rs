//! Deterministic SVG serialization of a [`VectorDocument`].
//!
//! Attribute order per element is fixed so equal documents always serialize
//! to byte-identical output.
use std::fmt::Write;

use crate::document::{PathPrimitive, VectorDocument};

/// Serializes a document to SVG text.
pub fn serialize(doc: &VectorDocument) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(doc.width),
        h = num(doc.height),
    );

    if let Some(bg) = &doc.background {
        let _ = writeln!(out, "  <rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>");
    }

    out.push_str("  <g>\n");
    for primitive in &doc.primitives {
        out.push_str("    ");
        write_primitive(&mut out, primitive);
        out.push('\n');
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn write_primitive(out: &mut String, primitive: &PathPrimitive) {
    match primitive {
        PathPrimitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
            opacity,
        } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\" stroke-linecap=\"round\"/>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                paint(stroke),
                num(*width),
                num(*opacity),
            );
        }
        PathPrimitive::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            width,
            opacity,
        } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"/>",
                num(*cx),
                num(*cy),
                num(*r),
                paint(fill),
                paint(stroke),
                num(*width),
                num(*opacity),
            );
        }
        PathPrimitive::Polygon {
            points,
            fill,
            stroke,
            width,
            opacity,
        } => {
            let joined = points
                .iter()
                .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(
                out,
                "<polygon points=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"/>",
                joined,
                paint(fill),
                paint(stroke),
                num(*width),
                num(*opacity),
            );
        }
        PathPrimitive::Rect {
            x,
            y,
            w,
            h,
            fill,
            opacity,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" opacity=\"{}\"/>",
                num(*x),
                num(*y),
                num(*w),
                num(*h),
                paint(fill),
                num(*opacity),
            );
        }
    }
}

fn paint(color: &Option<String>) -> &str {
    color.as_deref().unwrap_or("none")
}

/// Integral values print without a decimal point; everything else uses the
/// shortest round-trip form. One formatting path keeps output byte-stable.
fn num(v: f32) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> VectorDocument {
        let mut doc = VectorDocument::new(100.0, 80.0).with_background("white");
        doc.push(
            PathPrimitive::line(10.0, 10.5, 20.0, 10.5)
                .with_stroke("#000000")
                .with_width(0.5),
        );
        doc.push(PathPrimitive::circle(50.0, 40.0, 10.0).with_fill("#ff0000"));
        doc.push(PathPrimitive::polygon(vec![(0.0, 0.0), (5.0, 0.0), (2.5, 4.0)]).with_stroke("#00ff00"));
        doc.push(PathPrimitive::rect(1.0, 2.0, 3.0, 4.0).with_fill("#0000ff"));
        doc
    }

    #[test]
    fn equal_documents_serialize_byte_identically() {
        let a = serialize(&sample_doc());
        let b = serialize(&sample_doc());
        assert_eq!(a, b);
    }

    #[test]
    fn root_carries_dimensions_and_viewbox() {
        let svg = serialize(&sample_doc());
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(svg.contains("width=\"100\" height=\"80\" viewBox=\"0 0 100 80\""));
    }

    #[test]
    fn background_rect_present_only_when_set() {
        let svg = serialize(&sample_doc());
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>"));

        let bare = VectorDocument::new(10.0, 10.0);
        assert!(!serialize(&bare).contains("100%"));
    }

    #[test]
    fn line_attributes_are_in_fixed_order() {
        let svg = serialize(&sample_doc());
        assert!(svg.contains(
            "<line x1=\"10\" y1=\"10.5\" x2=\"20\" y2=\"10.5\" stroke=\"#000000\" stroke-width=\"0.5\" opacity=\"1\" stroke-linecap=\"round\"/>"
        ));
    }

    #[test]
    fn unset_paints_serialize_as_none() {
        let svg = serialize(&sample_doc());
        assert!(svg.contains("<circle cx=\"50\" cy=\"40\" r=\"10\" fill=\"#ff0000\" stroke=\"none\""));
        assert!(svg.contains("<polygon points=\"0,0 5,0 2.5,4\" fill=\"none\" stroke=\"#00ff00\""));
    }

    #[test]
    fn primitives_appear_in_document_order() {
        let svg = serialize(&sample_doc());
        let line_at = svg.find("<line").unwrap();
        let circle_at = svg.find("<circle").unwrap();
        let polygon_at = svg.find("<polygon").unwrap();
        assert!(line_at < circle_at && circle_at < polygon_at);
    }
}
