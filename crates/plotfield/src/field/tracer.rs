//! Particle tracing through an angle field.
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;
use tracing::info;

use crate::error::{Error, Result};
use crate::field::generator::FieldGenerator;
use crate::field::rand01;

/// A traced point with its edge-fade opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracePoint {
    pub position: Vector2<f32>,
    /// Opacity in [0, 1]; 1.0 when edge fading is disabled.
    pub opacity: f32,
}

/// An ordered sequence of traced points from a single particle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<TracePoint>,
}

impl Polyline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Configuration for a [`PathTracer`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct TraceConfig {
    /// Number of particles to trace.
    pub particle_count: usize,
    /// Maximum steps per particle.
    pub steps: usize,
    /// Distance advanced per step.
    pub step_length: f32,
    /// Inset from the canvas edges for particle start positions.
    pub margin: f32,
    /// Fade opacity toward the margin edges.
    pub fade_edges: bool,
    /// Distance over which the edge fade ramps from 0 to 1.
    pub fade_distance: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            steps: 100,
            step_length: 2.0,
            margin: 20.0,
            fade_edges: true,
            fade_distance: 50.0,
        }
    }
}

impl TraceConfig {
    pub fn new(particle_count: usize) -> Self {
        Self {
            particle_count,
            ..Default::default()
        }
    }

    /// Sets the maximum steps per particle.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the step length.
    pub fn with_step_length(mut self, step_length: f32) -> Self {
        self.step_length = step_length;
        self
    }

    /// Sets the start-position margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Enables or disables edge fading.
    pub fn with_fade_edges(mut self, fade_edges: bool) -> Self {
        self.fade_edges = fade_edges;
        self
    }

    /// Sets the edge-fade ramp distance.
    pub fn with_fade_distance(mut self, fade_distance: f32) -> Self {
        self.fade_distance = fade_distance;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(Error::Validation("particle_count must be > 0".into()));
        }
        if self.steps == 0 {
            return Err(Error::Validation("steps must be > 0".into()));
        }
        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(Error::Validation("step_length must be > 0".into()));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::Validation("margin must be >= 0".into()));
        }
        if !self.fade_distance.is_finite() || self.fade_distance <= 0.0 {
            return Err(Error::Validation("fade_distance must be > 0".into()));
        }
        Ok(())
    }
}

/// Advances particles through a [`FieldGenerator`] to produce polylines.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathTracer {
    config: TraceConfig,
}

impl PathTracer {
    pub fn try_new(config: TraceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Traces all particles over a width x height canvas.
    ///
    /// Start positions are drawn uniformly inside the margin inset. A
    /// particle stops once it leaves the canvas, keeping its partial path.
    pub fn trace(
        &self,
        field: &FieldGenerator,
        width: f32,
        height: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Polyline>> {
        let margin = self.config.margin;
        if width <= margin * 2.0 || height <= margin * 2.0 {
            return Err(Error::Validation(format!(
                "canvas {width}x{height} leaves no room inside margin {margin}"
            )));
        }

        let inner_w = width - margin * 2.0;
        let inner_h = height - margin * 2.0;

        let mut polylines = Vec::with_capacity(self.config.particle_count);
        let mut total_points = 0usize;

        for _ in 0..self.config.particle_count {
            let mut pos = Vec2::new(
                margin + rand01(rng) * inner_w,
                margin + rand01(rng) * inner_h,
            );

            let mut points = Vec::with_capacity(self.config.steps);
            for _ in 0..self.config.steps {
                points.push(TracePoint {
                    position: pos.into(),
                    opacity: self.point_opacity(pos, width, height),
                });

                let angle = field.sample_angle(pos.x, pos.y);
                pos += Vec2::new(angle.cos(), angle.sin()) * self.config.step_length;

                if pos.x < 0.0 || pos.x > width || pos.y < 0.0 || pos.y > height {
                    break;
                }
            }

            total_points += points.len();
            polylines.push(Polyline { points });
        }

        info!(
            particles = polylines.len(),
            points = total_points,
            "trace complete"
        );
        Ok(polylines)
    }

    fn point_opacity(&self, pos: Vec2, width: f32, height: f32) -> f32 {
        if !self.config.fade_edges {
            return 1.0;
        }
        let margin = self.config.margin;
        let edge_dist = (pos.x - margin)
            .min(pos.y - margin)
            .min(width - margin - pos.x)
            .min(height - margin - pos.y);
        (edge_dist / self.config.fade_distance).clamp(0.0, 1.0)
    }
}
