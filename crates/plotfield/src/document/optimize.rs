//! Path optimization for plotter output.
//!
//! Merges chains of collinear line segments and drops zero-length ones.
//! The output renders identically and never contains more primitives than
//! the input; relative order is preserved.
use crate::document::PathPrimitive;

const EPS: f32 = 1e-4;

pub fn optimize_paths(primitives: Vec<PathPrimitive>) -> Vec<PathPrimitive> {
    let mut out: Vec<PathPrimitive> = Vec::with_capacity(primitives.len());

    for primitive in primitives {
        match primitive {
            PathPrimitive::Line { x1, y1, x2, y2, .. }
                if (x2 - x1).abs() < EPS && (y2 - y1).abs() < EPS => {}
            PathPrimitive::Line { .. } => {
                if let Some(last) = out.last_mut() {
                    if try_merge(last, &primitive) {
                        continue;
                    }
                }
                out.push(primitive);
            }
            other => out.push(other),
        }
    }

    out
}

/// Extends `prev` with `next` when they share an endpoint and style and
/// continue in the same direction.
fn try_merge(prev: &mut PathPrimitive, next: &PathPrimitive) -> bool {
    let (
        PathPrimitive::Line {
            x1: px1,
            y1: py1,
            x2: px2,
            y2: py2,
            stroke: ps,
            width: pw,
            opacity: po,
        },
        PathPrimitive::Line {
            x1: nx1,
            y1: ny1,
            x2: nx2,
            y2: ny2,
            stroke: ns,
            width: nw,
            opacity: no,
        },
    ) = (&mut *prev, next)
    else {
        return false;
    };

    if ps != ns || (*pw - nw).abs() > EPS || (*po - no).abs() > EPS {
        return false;
    }
    if (*px2 - nx1).abs() > EPS || (*py2 - ny1).abs() > EPS {
        return false;
    }

    let (dx1, dy1) = (*px2 - *px1, *py2 - *py1);
    let (dx2, dy2) = (nx2 - nx1, ny2 - ny1);
    let cross = dx1 * dy2 - dy1 * dx2;
    let dot = dx1 * dx2 + dy1 * dy2;
    if cross.abs() > EPS || dot <= 0.0 {
        return false;
    }

    *px2 = *nx2;
    *py2 = *ny2;
    true
}
