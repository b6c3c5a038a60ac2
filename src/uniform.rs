//! Sources of uniform draws.
//!
//! Sampling only ever needs `U ~ Uniform[0, 1)`, so the source is abstracted behind
//! [`UniformSource`]. Every `rand` RNG is a source; [`FixedDraws`] replays a fixed
//! sequence so tests can pin exact outcomes.

use ndarray::Array2;
use rand::{Rng, RngCore};

/// Something that yields independent draws from `[0, 1)`.
pub trait UniformSource {
    /// Next draw.
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// A replayable sequence of draws. Cycles back to the start once exhausted.
///
/// An empty sequence yields `0.0` forever.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedDraws {
    draws: Vec<f64>,
    pos: usize,
}

impl FixedDraws {
    /// Replay `draws` in order.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            pos: 0,
        }
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl UniformSource for FixedDraws {
    fn next_uniform(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let u = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        u
    }
}

/// Draw an `h x w` matrix of uniforms, filled in row-major order.
pub fn uniform_matrix<S: UniformSource + ?Sized>(source: &mut S, h: usize, w: usize) -> Array2<f64> {
    Array2::from_shape_simple_fn((h, w), || source.next_uniform())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rng_draws_are_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let m = uniform_matrix(&mut rng, 50, 40);
        assert_eq!(m.dim(), (50, 40));
        assert!(m.iter().all(|&u| (0.0..1.0).contains(&u)));
    }

    #[test]
    fn rng_draws_look_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let m = uniform_matrix(&mut rng, 100, 100);
        let mean = m.mean().expect("non-empty");
        assert!((mean - 0.5).abs() < 0.01, "mean was {mean}");
    }

    #[test]
    fn fixed_draws_fill_row_major() {
        let mut src = FixedDraws::new(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let m = uniform_matrix(&mut src, 2, 3);
        assert_eq!(m, arr2(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]));
        assert_eq!(src.consumed(), 6);
    }

    #[test]
    fn fixed_draws_cycle() {
        let mut src = FixedDraws::new([0.9, 0.1]);
        let seq: Vec<f64> = (0..5).map(|_| src.next_uniform()).collect();
        assert_eq!(seq, vec![0.9, 0.1, 0.9, 0.1, 0.9]);
    }

    #[test]
    fn empty_fixed_draws_yield_zero() {
        let mut src = FixedDraws::new(Vec::<f64>::new());
        assert_eq!(src.next_uniform(), 0.0);
        assert_eq!(src.consumed(), 0);
    }

    #[test]
    fn trait_object_source() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let src: &mut dyn UniformSource = &mut rng;
        let m = uniform_matrix(src, 1, 4);
        assert_eq!(m.len(), 4);
    }
}
