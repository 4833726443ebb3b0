//! Bounded-size raster snapshot export.
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::warn;

use crate::error::{Error, Result};
use crate::export::surface::RenderSurface;

/// Reference size-guard threshold in pixels per axis.
pub const DEFAULT_MAX_SIZE_PX: u32 = 4000;

/// PNG exporter with a size safeguard.
///
/// Raster export cost grows with pixel count; requests over the threshold
/// need an explicit confirmation callback to proceed.
#[derive(Clone, Copy, Debug)]
pub struct RasterExporter {
    max_size_px: u32,
}

impl Default for RasterExporter {
    fn default() -> Self {
        Self {
            max_size_px: DEFAULT_MAX_SIZE_PX,
        }
    }
}

impl RasterExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size-guard threshold.
    pub fn with_max_size(mut self, max_size_px: u32) -> Self {
        self.max_size_px = max_size_px;
        self
    }

    /// Captures a PNG snapshot of the surface.
    ///
    /// If either dimension exceeds the threshold the export only proceeds
    /// when `confirm` is supplied and returns true; otherwise it fails with
    /// [`Error::SizeLimitExceeded`]. No callback means deny.
    pub fn export(
        &self,
        surface: &dyn RenderSurface,
        confirm: Option<&dyn Fn(u32, u32) -> bool>,
    ) -> Result<Vec<u8>> {
        let (width, height) = (surface.width(), surface.height());
        if width > self.max_size_px || height > self.max_size_px {
            let confirmed = confirm.map(|f| f(width, height)).unwrap_or(false);
            if !confirmed {
                warn!(width, height, max = self.max_size_px, "raster export denied");
                return Err(Error::SizeLimitExceeded {
                    width,
                    height,
                    max: self.max_size_px,
                });
            }
        }

        encode_png(&surface.snapshot())
    }
}

pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::surface::RasterSurface;

    #[test]
    fn exports_png_bytes_under_threshold() {
        let surface = RasterSurface::new(16, 16);
        let bytes = RasterExporter::new().export(&surface, None).unwrap();
        // PNG magic.
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn oversized_export_without_confirmation_fails() {
        let surface = RasterSurface::new(32, 8);
        let exporter = RasterExporter::new().with_max_size(16);
        let err = exporter.export(&surface, None).unwrap_err();
        assert!(matches!(err, Error::SizeLimitExceeded { width: 32, .. }));
    }

    #[test]
    fn denied_confirmation_fails() {
        let surface = RasterSurface::new(32, 32);
        let exporter = RasterExporter::new().with_max_size(16);
        let deny = |_w: u32, _h: u32| false;
        assert!(exporter.export(&surface, Some(&deny)).is_err());
    }

    #[test]
    fn confirmed_oversized_export_proceeds() {
        let surface = RasterSurface::new(32, 32);
        let exporter = RasterExporter::new().with_max_size(16);
        let allow = |w: u32, h: u32| w == 32 && h == 32;
        assert!(exporter.export(&surface, Some(&allow)).is_ok());
    }
}
