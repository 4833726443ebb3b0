//! Seeded noise fields and particle path tracing.
//!
//! This module defines the noise port, the angle-field generator, and the
//! tracer that advances particles through a field to produce polylines.
use rand::RngCore;

pub mod generator;
pub mod noise;
pub mod tracer;

pub use generator::{FieldConfig, FieldGenerator, FieldMode};
pub use noise::{NoiseSource, PerlinNoise};
pub use tracer::{PathTracer, Polyline, TraceConfig, TracePoint};

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
