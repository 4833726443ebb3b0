//! Angle-field generation from coherent noise.
use std::f32::consts::TAU;

use crate::error::{Error, Result};
use crate::field::noise::NoiseSource;

/// How noise is turned into a flow direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    /// Divergence-free flow from the rotated noise gradient. Organic,
    /// non-crossing streamlines.
    Curl,
    /// Direct mapping: noise(x*scale, y*scale) * 2pi * strength.
    Standard,
}

/// Configuration for a [`FieldGenerator`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct FieldConfig {
    /// Field mode.
    pub mode: FieldMode,
    /// Noise frequency applied to sample coordinates.
    pub noise_scale: f32,
    /// Angle multiplier in standard mode.
    pub noise_strength: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mode: FieldMode::Curl,
            noise_scale: 0.002,
            noise_strength: 1.0,
        }
    }
}

impl FieldConfig {
    pub fn new(mode: FieldMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Sets the noise scale.
    pub fn with_noise_scale(mut self, noise_scale: f32) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    /// Sets the noise strength.
    pub fn with_noise_strength(mut self, noise_strength: f32) -> Self {
        self.noise_strength = noise_strength;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(Error::Validation("noise_scale must be > 0".into()));
        }
        if !self.noise_strength.is_finite() {
            return Err(Error::Validation("noise_strength must be finite".into()));
        }
        Ok(())
    }
}

/// Deterministic angle field over a 2D domain.
///
/// A pure function of (noise source, position, config): holds no mutable
/// state, so overlapping reads are always safe.
pub struct FieldGenerator {
    config: FieldConfig,
    noise: Box<dyn NoiseSource>,
}

impl FieldGenerator {
    pub fn try_new(config: FieldConfig, noise: Box<dyn NoiseSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, noise })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Samples the flow angle at a position. Result is in [0, 2pi).
    pub fn sample_angle(&self, x: f32, y: f32) -> f32 {
        let angle = match self.config.mode {
            FieldMode::Curl => self.curl_angle(x as f64, y as f64),
            FieldMode::Standard => self.standard_angle(x as f64, y as f64),
        };
        angle.rem_euclid(TAU)
    }

    fn curl_angle(&self, x: f64, y: f64) -> f32 {
        const EPS: f64 = 1e-4;
        let f = self.config.noise_scale as f64;

        // Symmetric finite differences on the scaled noise field, rotated
        // 90 degrees so the flow follows iso-lines of the scalar field.
        let n1 = self.noise.sample(x * f, (y - EPS) * f);
        let n2 = self.noise.sample(x * f, (y + EPS) * f);
        let a = (n1 - n2) / (2.0 * EPS);

        let n3 = self.noise.sample((x - EPS) * f, y * f);
        let n4 = self.noise.sample((x + EPS) * f, y * f);
        let b = (n3 - n4) / (2.0 * EPS);

        b.atan2(a) as f32
    }

    fn standard_angle(&self, x: f64, y: f64) -> f32 {
        let f = self.config.noise_scale as f64;
        let n = self.noise.sample(x * f, y * f);
        (n * std::f64::consts::TAU * self.config.noise_strength as f64) as f32
    }
}
