//! `tirage`: batched categorical (multinomial) sampling.
//!
//! Given `H` independent categorical distributions, each an unnormalized row of `W`
//! nonnegative weights, draw `num_samples` outcome indices per row, with or without
//! replacement.
//!
//! Sampling is by inversion: each row becomes a normalized cumulative distribution,
//! and each uniform draw is located in it by binary search.
//!
//! Exposed modules:
//! - `cumulative`: weight rows to normalized cumulative rows.
//! - `uniform`: uniform draw sources (any `rand` RNG, or fixed replay for tests).
//! - `inverse`: binary-search inversion of a cumulative row.
//! - `multinomial`: the row-wise sampler tying the above together.

#![forbid(unsafe_code)]

pub mod cumulative;
pub mod inverse;
pub mod multinomial;
pub mod uniform;

pub use cumulative::{cumulative_matrix, fill_cumulative_row};
pub use inverse::invert;
pub use multinomial::{
    multinomial, multinomial_with_rng, MultinomialError, MultinomialSampler, Replacement,
};
pub use uniform::{uniform_matrix, FixedDraws, UniformSource};
