//! Rendering surface port and the built-in in-memory raster surface.
//!
//! The export pipeline only needs pixel dimensions and a snapshot; hosts
//! with a real canvas implement [`RenderSurface`] directly. [`RasterSurface`]
//! is a self-contained implementation that rasterizes a [`VectorDocument`],
//! used by the exporters, the recorder, and tests.
use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::document::{PathPrimitive, VectorDocument};
use crate::render::color::parse_color;

/// A host surface exposing pixel dimensions and a snapshot operation.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Deep copy of the current pixels.
    fn snapshot(&self) -> RgbaImage;
}

/// In-memory RGBA canvas with a minimal rasterizer for document primitives.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Creates a white surface.
    pub fn new(width: u32, height: u32) -> Self {
        let mut image = RgbaImage::new(width.max(1), height.max(1));
        image.pixels_mut().for_each(|p| *p = Rgba([255, 255, 255, 255]));
        Self { image }
    }

    /// Creates a surface sized to a document and draws it.
    pub fn from_document(doc: &VectorDocument) -> Self {
        let mut surface = Self::new(doc.width.ceil() as u32, doc.height.ceil() as u32);
        surface.draw_document(doc);
        surface
    }

    /// Fills the whole surface with one color.
    pub fn clear(&mut self, color: [u8; 4]) {
        self.image.pixels_mut().for_each(|p| *p = Rgba(color));
    }

    /// Draws a document over the current pixels.
    pub fn draw_document(&mut self, doc: &VectorDocument) {
        if let Some(bg) = doc.background.as_deref().and_then(parse_color) {
            self.clear(bg);
        }
        for primitive in &doc.primitives {
            self.draw_primitive(primitive);
        }
    }

    fn draw_primitive(&mut self, primitive: &PathPrimitive) {
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
                if let Some(color) = stroke.as_deref().and_then(parse_color) {
                    self.draw_line(
                        Vec2::new(*x1, *y1),
                        Vec2::new(*x2, *y2),
                        color,
                        *width,
                        *opacity,
                    );
                }
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
                if let Some(color) = fill.as_deref().and_then(parse_color) {
                    self.fill_circle(*cx, *cy, *r, color, *opacity);
                }
                if let Some(color) = stroke.as_deref().and_then(parse_color) {
                    self.stroke_circle(*cx, *cy, *r, color, *width, *opacity);
                }
            }
            PathPrimitive::Polygon {
                points,
                fill,
                stroke,
                width,
                opacity,
            } => {
                if let Some(color) = fill.as_deref().and_then(parse_color) {
                    self.fill_polygon(points, color, *opacity);
                }
                if let Some(color) = stroke.as_deref().and_then(parse_color) {
                    for pair in points.windows(2) {
                        self.draw_line(pair[0].into(), pair[1].into(), color, *width, *opacity);
                    }
                    if points.len() > 2 {
                        let first = points[0];
                        let last = points[points.len() - 1];
                        self.draw_line(last.into(), first.into(), color, *width, *opacity);
                    }
                }
            }
            PathPrimitive::Rect {
                x,
                y,
                w,
                h,
                fill,
                opacity,
            } => {
                if let Some(color) = fill.as_deref().and_then(parse_color) {
                    self.fill_rect(*x, *y, *w, *h, color, *opacity);
                }
            }
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: [u8; 4], opacity: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = (color[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let src = color[c] as f32;
            let dst = pixel.0[c] as f32;
            pixel.0[c] = (src * alpha + dst * (1.0 - alpha)).round() as u8;
        }
        pixel.0[3] = 255;
    }

    fn stamp(&mut self, center: Vec2, radius: f32, color: [u8; 4], opacity: f32) {
        if radius <= 0.5 {
            self.blend(center.x.round() as i64, center.y.round() as i64, color, opacity);
            return;
        }
        let r = radius.ceil() as i64;
        let cx = center.x.round() as i64;
        let cy = center.y.round() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f32) <= radius * radius {
                    self.blend(cx + dx, cy + dy, color, opacity);
                }
            }
        }
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: [u8; 4], width: f32, opacity: f32) {
        let length = a.distance(b);
        let steps = length.ceil().max(1.0) as usize;
        let radius = width * 0.5;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(a.lerp(b, t), radius, color, opacity);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4], opacity: f32) {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let x1 = (x + w).ceil() as i64;
        let y1 = (y + h).ceil() as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, opacity);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 4], opacity: f32) {
        self.stamp(Vec2::new(cx, cy), r, color, opacity);
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 4], width: f32, opacity: f32) {
        let circumference = std::f32::consts::TAU * r;
        let steps = circumference.ceil().max(8.0) as usize;
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            let p = Vec2::new(cx + angle.cos() * r, cy + angle.sin() * r);
            self.stamp(p, (width * 0.5).max(0.5), color, opacity);
        }
    }

    /// Even-odd scanline polygon fill.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: [u8; 4], opacity: f32) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor() as i64;
        let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

        for py in min_y..=max_y {
            let scan = py as f32 + 0.5;
            let mut crossings = Vec::new();
            for i in 0..points.len() {
                let (x1, y1) = points[i];
                let (x2, y2) = points[(i + 1) % points.len()];
                if (y1 <= scan && y2 > scan) || (y2 <= scan && y1 > scan) {
                    let t = (scan - y1) / (y2 - y1);
                    crossings.push(x1 + t * (x2 - x1));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks(2) {
                if let [start, end] = span {
                    for px in start.round() as i64..=end.round() as i64 {
                        self.blend(px, py, color, opacity);
                    }
                }
            }
        }
    }
}

impl RenderSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn snapshot(&self) -> RgbaImage {
        self.image.clone()
    }
}
