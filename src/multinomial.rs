//! Batched multinomial sampling.
//!
//! Each row of an `H x W` weight matrix is an independent categorical distribution.
//! [`MultinomialSampler`] draws `num_samples` outcomes per row by inversion:
//! build the row's cumulative distribution, draw `u ~ Uniform[0, 1)`, and locate `u`
//! with [`invert`]. Outcomes are reported **1-indexed**, in `[1, W]`.
//!
//! Without replacement, draws within a row are sequential: after each draw the chosen
//! weight is zeroed and the row's cumulative distribution is rebuilt, so no outcome is
//! drawn twice. That costs O(W) per draw, O(H * num_samples * W) overall.
//!
//! [`MultinomialSampler::sample`] never touches the caller's matrix;
//! [`MultinomialSampler::sample_in_place`] zeroes the consumed weights of the matrix it
//! is given, which avoids a copy when the caller no longer needs the weights.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut2};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug_span, trace};

use crate::cumulative::{cumulative_matrix, fill_cumulative_row};
use crate::inverse::invert;
use crate::uniform::{uniform_matrix, UniformSource};

/// Invalid input to a sampling call. No partial results are ever produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MultinomialError {
    /// More draws per row than there are outcomes.
    #[error("num_samples ({num_samples}) exceeds prob_width ({prob_width})")]
    TooManySamples { num_samples: usize, prob_width: usize },
    /// The probability matrix has no rows or no columns.
    #[error("probability matrix must be non-empty (got {height}x{width})")]
    EmptyMatrix { height: usize, width: usize },
    /// A weight is negative, NaN, or infinite.
    #[error("weight at ({row}, {col}) must be finite and >= 0 (got {weight})")]
    InvalidWeight { row: usize, col: usize, weight: f64 },
    /// A row sums to zero, so it defines no distribution.
    #[error("row {row} has zero total mass")]
    ZeroMassRow { row: usize },
    /// A row of finite weights whose sum overflows `f64`.
    #[error("row {row} total mass overflows to infinity")]
    NonFiniteRowMass { row: usize },
    /// Without replacement, a row has fewer positive-weight outcomes than requested draws.
    #[error("row {row} has {available} outcomes with positive weight, {requested} requested without replacement")]
    InsufficientSupport {
        row: usize,
        available: usize,
        requested: usize,
    },
}

impl MultinomialError {
    /// Every variant is a caller error in the arguments.
    pub fn is_invalid_argument(&self) -> bool {
        true
    }
}

/// Whether a drawn outcome stays eligible for later draws in the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Replacement {
    /// Outcomes may repeat within a row.
    With,
    /// Outcomes are pairwise distinct within a row.
    Without,
}

impl From<bool> for Replacement {
    fn from(with_replacement: bool) -> Self {
        if with_replacement {
            Self::With
        } else {
            Self::Without
        }
    }
}

/// Row-wise categorical sampler.
///
/// The uniform source is seeded once, at construction; every call draws from the same
/// stream.
#[derive(Debug, Clone)]
pub struct MultinomialSampler<S = StdRng> {
    source: S,
}

impl Default for MultinomialSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl MultinomialSampler<StdRng> {
    /// Sampler seeded from OS entropy: separate processes get separate streams.
    pub fn new() -> Self {
        Self {
            source: StdRng::from_os_rng(),
        }
    }

    /// Sampler with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            source: StdRng::seed_from_u64(seed),
        }
    }
}

impl<S: UniformSource> MultinomialSampler<S> {
    /// Sampler drawing from `source` (any `rand` RNG, or [`crate::FixedDraws`]).
    pub fn from_source(source: S) -> Self {
        Self { source }
    }

    /// The underlying uniform source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consume the sampler, returning its source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Draw `num_samples` outcomes per row of `probs`, leaving `probs` untouched.
    ///
    /// Returns an `H x num_samples` matrix of 1-indexed outcomes. Without replacement the
    /// weights are copied first; use [`Self::sample_in_place`] to skip the copy.
    pub fn sample(
        &mut self,
        probs: ArrayView2<'_, f64>,
        num_samples: usize,
        replacement: Replacement,
    ) -> Result<Array2<usize>, MultinomialError> {
        match replacement {
            Replacement::With => {
                validate(probs, num_samples, replacement)?;
                Ok(self.draw_with_replacement(probs, num_samples))
            }
            Replacement::Without => {
                let mut owned = probs.to_owned();
                self.sample_in_place(owned.view_mut(), num_samples, replacement)
            }
        }
    }

    /// Like [`Self::sample`], but without replacement every drawn weight in `probs` is
    /// set to zero. Re-populate the matrix before sampling from it again.
    ///
    /// With replacement `probs` is not modified. On error `probs` is not modified.
    pub fn sample_in_place(
        &mut self,
        probs: ArrayViewMut2<'_, f64>,
        num_samples: usize,
        replacement: Replacement,
    ) -> Result<Array2<usize>, MultinomialError> {
        validate(probs.view(), num_samples, replacement)?;
        Ok(match replacement {
            Replacement::With => self.draw_with_replacement(probs.view(), num_samples),
            Replacement::Without => self.draw_without_replacement(probs, num_samples),
        })
    }

    fn draw_with_replacement(
        &mut self,
        probs: ArrayView2<'_, f64>,
        num_samples: usize,
    ) -> Array2<usize> {
        let (height, width) = probs.dim();
        let _span =
            debug_span!("multinomial", height, width, num_samples, replacement = "with").entered();

        let cum = cumulative_matrix(probs);
        let draws = uniform_matrix(&mut self.source, height, num_samples);
        let mut out = Array2::zeros((height, num_samples));

        for i in 0..height {
            let cum_row = cum.row(i);
            let p_row = probs.row(i);
            for j in 0..num_samples {
                let u = draws[[i, j]];
                let slot = supported_slot(p_row, invert(cum_row, u));
                trace!(row = i, draw = j, u, slot, "drew with replacement");
                out[[i, j]] = slot + 1;
            }
        }
        out
    }

    fn draw_without_replacement(
        &mut self,
        mut probs: ArrayViewMut2<'_, f64>,
        num_samples: usize,
    ) -> Array2<usize> {
        let (height, width) = probs.dim();
        let _span =
            debug_span!("multinomial", height, width, num_samples, replacement = "without")
                .entered();

        let mut cum = cumulative_matrix(probs.view());
        let draws = uniform_matrix(&mut self.source, height, num_samples);
        let mut out = Array2::zeros((height, num_samples));

        for i in 0..height {
            for j in 0..num_samples {
                let u = draws[[i, j]];
                let slot = supported_slot(probs.row(i), invert(cum.row(i), u));
                trace!(row = i, draw = j, u, slot, "drew without replacement");
                out[[i, j]] = slot + 1;

                probs[[i, slot]] = 0.0;
                fill_cumulative_row(probs.row(i), cum.row_mut(i));
            }
        }
        out
    }
}

/// Draw `num_samples` outcomes per row using the thread-local RNG.
///
/// Convenience wrapper over [`MultinomialSampler::sample`]; `probs` is not modified.
pub fn multinomial(
    probs: ArrayView2<'_, f64>,
    num_samples: usize,
    with_replacement: bool,
) -> Result<Array2<usize>, MultinomialError> {
    let mut rng = rand::rng();
    multinomial_with_rng(probs, num_samples, with_replacement, &mut rng)
}

/// [`multinomial`] with a caller-supplied RNG (for tests/benchmarks).
pub fn multinomial_with_rng<R: RngCore + ?Sized>(
    probs: ArrayView2<'_, f64>,
    num_samples: usize,
    with_replacement: bool,
    rng: &mut R,
) -> Result<Array2<usize>, MultinomialError> {
    MultinomialSampler::from_source(rng).sample(probs, num_samples, with_replacement.into())
}

fn validate(
    probs: ArrayView2<'_, f64>,
    num_samples: usize,
    replacement: Replacement,
) -> Result<(), MultinomialError> {
    let (height, width) = probs.dim();
    if height == 0 || width == 0 {
        return Err(MultinomialError::EmptyMatrix { height, width });
    }
    if num_samples > width {
        return Err(MultinomialError::TooManySamples {
            num_samples,
            prob_width: width,
        });
    }

    for (row, p_row) in probs.rows().into_iter().enumerate() {
        let mut total = 0.0;
        let mut available = 0usize;
        for (col, &weight) in p_row.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MultinomialError::InvalidWeight { row, col, weight });
            }
            if weight > 0.0 {
                available += 1;
            }
            total += weight;
        }

        if total <= 0.0 {
            return Err(MultinomialError::ZeroMassRow { row });
        }
        // Zeroing weights later only shrinks the total, so one check covers every draw.
        if !total.is_finite() {
            return Err(MultinomialError::NonFiniteRowMass { row });
        }
        if replacement == Replacement::Without && available < num_samples {
            return Err(MultinomialError::InsufficientSupport {
                row,
                available,
                requested: num_samples,
            });
        }
    }
    Ok(())
}

/// Move a slot with zero weight to the nearest positive-weight slot, searching upward
/// first. Inversion only lands on a zero-width bucket when `u` sits exactly on a
/// breakpoint.
fn supported_slot(p_row: ArrayView1<'_, f64>, slot: usize) -> usize {
    if p_row[slot] > 0.0 {
        return slot;
    }
    (slot + 1..p_row.len())
        .chain((0..slot).rev())
        .find(|&k| p_row[k] > 0.0)
        .unwrap_or(slot)
}
