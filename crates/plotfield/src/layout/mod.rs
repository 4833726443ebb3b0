//! Paper presets and fit-to-paper layout math.
//!
//! The catalogue matches common plotter paper sizes at 150 dpi. Fitting
//! never upscales: artwork smaller than the printable area keeps its size
//! and is centered.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A paper size in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaperPreset {
    pub id: String,
    pub width_px: f32,
    pub height_px: f32,
    pub label: String,
}

impl PaperPreset {
    fn new(id: &str, width_px: f32, height_px: f32, label: &str) -> Self {
        Self {
            id: id.to_owned(),
            width_px,
            height_px,
            label: label.to_owned(),
        }
    }
}

/// Named paper sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    A5,
    A4,
    A3,
    Letter,
    Square,
    Custom,
}

/// Fixed paper catalogue plus a mutable custom preset.
#[derive(Clone, Debug, Default)]
pub struct PaperCatalog {
    custom: Option<PaperPreset>,
}

impl PaperCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(&self, size: PaperSize) -> PaperPreset {
        match size {
            PaperSize::A5 => PaperPreset::new("a5", 874.0, 1240.0, "A5 (148x210mm)"),
            PaperSize::A4 => PaperPreset::new("a4", 1240.0, 1754.0, "A4 (210x297mm)"),
            PaperSize::A3 => PaperPreset::new("a3", 1754.0, 2480.0, "A3 (297x420mm)"),
            PaperSize::Letter => {
                PaperPreset::new("letter", 1275.0, 1650.0, "US Letter (216x279mm)")
            }
            PaperSize::Square => PaperPreset::new("square", 1772.0, 1772.0, "Square (300x300mm)"),
            PaperSize::Custom => self
                .custom
                .clone()
                .unwrap_or_else(|| PaperPreset::new("custom", 800.0, 600.0, "Custom")),
        }
    }

    /// Replaces the custom preset dimensions.
    pub fn set_custom(&mut self, width_px: f32, height_px: f32) {
        self.custom = Some(PaperPreset::new("custom", width_px, height_px, "Custom"));
    }
}

/// Scale/center transform mapping artwork into a paper rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    /// Never exceeds 1.
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Fits artwork into a paper preset with a uniform margin.
///
/// scale = min(inner_w / art, inner_h / art, 1); the scaled art is centered
/// within the paper rectangle.
pub fn fit_to_paper(
    art_width: f32,
    art_height: f32,
    preset: &PaperPreset,
    margin: f32,
) -> Result<FitTransform> {
    if !(art_width > 0.0) || !(art_height > 0.0) {
        return Err(Error::Validation(
            "artwork dimensions must be positive".into(),
        ));
    }
    if !margin.is_finite() || margin < 0.0 {
        return Err(Error::Validation("margin must be >= 0".into()));
    }

    let inner_w = (preset.width_px - margin * 2.0).max(1.0);
    let inner_h = (preset.height_px - margin * 2.0).max(1.0);
    let scale = (inner_w / art_width).min(inner_h / art_height).min(1.0);

    Ok(FitTransform {
        scale,
        offset_x: (preset.width_px - art_width * scale) / 2.0,
        offset_y: (preset.height_px - art_height * scale) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_matches_known_sizes() {
        let catalog = PaperCatalog::new();
        let a4 = catalog.preset(PaperSize::A4);
        assert_eq!((a4.width_px, a4.height_px), (1240.0, 1754.0));
        let square = catalog.preset(PaperSize::Square);
        assert_eq!(square.width_px, square.height_px);
    }

    #[test]
    fn custom_preset_is_mutable_with_default_fallback() {
        let mut catalog = PaperCatalog::new();
        let default = catalog.preset(PaperSize::Custom);
        assert_eq!((default.width_px, default.height_px), (800.0, 600.0));

        catalog.set_custom(1000.0, 500.0);
        let custom = catalog.preset(PaperSize::Custom);
        assert_eq!((custom.width_px, custom.height_px), (1000.0, 500.0));
    }

    #[test]
    fn exact_fit_gives_unit_scale_and_zero_offsets() {
        let preset = PaperCatalog::new().preset(PaperSize::Square);
        let margin = 86.0;
        let inner = preset.width_px - margin * 2.0;
        let fit = fit_to_paper(inner, inner, &preset, margin).unwrap();
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.offset_x, margin);
        assert_eq!(fit.offset_y, margin);
    }

    #[test]
    fn oversized_art_is_downscaled_and_centered() {
        let preset = PaperCatalog::new().preset(PaperSize::A4);
        let fit = fit_to_paper(5000.0, 5000.0, &preset, 50.0).unwrap();
        assert!(fit.scale < 1.0);
        assert_eq!(fit.offset_x, (preset.width_px - 5000.0 * fit.scale) / 2.0);
        assert_eq!(fit.offset_y, (preset.height_px - 5000.0 * fit.scale) / 2.0);
        assert!(fit.offset_x > 0.0);
        assert!(fit.offset_y > 0.0);
    }

    #[test]
    fn small_art_is_never_upscaled() {
        let preset = PaperCatalog::new().preset(PaperSize::A3);
        let fit = fit_to_paper(100.0, 100.0, &preset, 0.0).unwrap();
        assert_eq!(fit.scale, 1.0);
    }

    #[test]
    fn margin_larger_than_paper_floors_inner_size() {
        let preset = PaperCatalog::new().preset(PaperSize::Custom);
        // Degenerate margin still yields a usable (tiny) printable area.
        let fit = fit_to_paper(100.0, 100.0, &preset, 10_000.0).unwrap();
        assert!(fit.scale > 0.0);
        assert!(fit.scale <= 1.0);
    }

    #[test]
    fn rejects_non_positive_artwork() {
        let preset = PaperCatalog::new().preset(PaperSize::A5);
        assert!(fit_to_paper(0.0, 10.0, &preset, 0.0).is_err());
        assert!(fit_to_paper(10.0, -1.0, &preset, 0.0).is_err());
    }
}
