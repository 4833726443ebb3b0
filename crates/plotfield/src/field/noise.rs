//! Coherent noise port and the built-in seeded gradient noise.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Trait for coherent 2D noise sources.
///
/// Implementations must be pure functions of (seed, position): the same
/// instance returns the same value for the same coordinates on every call,
/// on every platform. Output is in [-1, 1].
pub trait NoiseSource: Send + Sync {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Classic permutation-table gradient noise, seeded.
///
/// Two instances built from the same seed produce identical fields.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    perm: [u8; 512],
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table: [u8; 256] = [0; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        // Fisher-Yates over next_u32 keeps the shuffle independent of
        // rand's distribution internals across versions.
        for i in (1..256usize).rev() {
            let j = (rng.next_u32() as usize) % (i + 1);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        match hash & 3 {
            0 => x + y,
            1 => -x + y,
            2 => x - y,
            _ => -x - y,
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor() as i64;
        let yi = y.floor() as i64;
        let xf = x - xi as f64;
        let yf = y - yi as f64;

        let xw = (xi & 255) as usize;
        let yw = (yi & 255) as usize;

        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let aa = self.perm[(self.perm[xw] as usize) + yw];
        let ab = self.perm[(self.perm[xw] as usize) + yw + 1];
        let ba = self.perm[(self.perm[xw + 1] as usize) + yw];
        let bb = self.perm[(self.perm[xw + 1] as usize) + yw + 1];

        let x1 = lerp(
            Self::grad(aa, xf, yf),
            Self::grad(ba, xf - 1.0, yf),
            u,
        );
        let x2 = lerp(
            Self::grad(ab, xf, yf - 1.0),
            Self::grad(bb, xf - 1.0, yf - 1.0),
            u,
        );

        // Raw 2D gradient noise spans about +-sqrt(2)/2; normalize to [-1, 1].
        (lerp(x1, x2, v) * std::f64::consts::SQRT_2).clamp(-1.0, 1.0)
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
