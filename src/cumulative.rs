//! Cumulative distributions over rows of unnormalized weights.
//!
//! A probability row `p` of width `W` maps to a cumulative row `c` of width `W + 1`:
//!
//! \[
//! c_0 = 0, \quad c_k = \frac{1}{Z} \sum_{j < k} p_j, \quad Z = \sum_j p_j
//! \]
//!
//! so `c_W == 1` exactly whenever `0 < Z < inf` (the last prefix sum *is* `Z`).
//! A row with `Z == 0` is left as its raw prefix sums, i.e. all zeros. A row whose sum
//! overflows to infinity has no meaningful normalization; callers reject it first.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1};

/// Rebuild one cumulative row from its probability row. Returns the row total.
///
/// O(W). Called once per draw on the mutated row when sampling without replacement.
///
/// # Panics
///
/// Panics if `cum.len() != probs.len() + 1`.
pub fn fill_cumulative_row(probs: ArrayView1<'_, f64>, mut cum: ArrayViewMut1<'_, f64>) -> f64 {
    assert_eq!(
        cum.len(),
        probs.len() + 1,
        "fill_cumulative_row: cumulative row must be one wider than the probability row"
    );

    cum[0] = 0.0;
    let mut total = 0.0;
    for (k, &p) in probs.iter().enumerate() {
        total += p;
        cum[k + 1] = total;
    }

    if total > 0.0 {
        cum.mapv_inplace(|c| c / total);
    }
    total
}

/// Build the `H x (W + 1)` cumulative matrix for an `H x W` probability matrix.
pub fn cumulative_matrix(probs: ArrayView2<'_, f64>) -> Array2<f64> {
    let (height, width) = probs.dim();
    let mut cum = Array2::zeros((height, width + 1));
    for (p_row, c_row) in probs.rows().into_iter().zip(cum.rows_mut()) {
        fill_cumulative_row(p_row, c_row);
    }
    cum
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array1};

    #[test]
    fn uniform_row_has_even_breakpoints() {
        let probs = arr1(&[0.25, 0.25, 0.25, 0.25]);
        let mut cum = Array1::zeros(5);
        let total = fill_cumulative_row(probs.view(), cum.view_mut());
        assert_eq!(total, 1.0);
        assert_eq!(cum, arr1(&[0.0, 0.25, 0.5, 0.75, 1.0]));
    }

    #[test]
    fn unnormalized_row_is_rescaled() {
        let probs = arr1(&[2.0, 0.0, 6.0]);
        let mut cum = Array1::zeros(4);
        let total = fill_cumulative_row(probs.view(), cum.view_mut());
        assert_eq!(total, 8.0);
        assert_eq!(cum, arr1(&[0.0, 0.25, 0.25, 1.0]));
    }

    #[test]
    fn zero_mass_row_stays_zero() {
        let probs = arr1(&[0.0, 0.0, 0.0]);
        let mut cum = Array1::from_elem(4, 7.0);
        let total = fill_cumulative_row(probs.view(), cum.view_mut());
        assert_eq!(total, 0.0);
        assert!(cum.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn rebuild_overwrites_stale_values() {
        let mut probs = arr1(&[1.0, 1.0, 2.0]);
        let mut cum = Array1::zeros(4);
        fill_cumulative_row(probs.view(), cum.view_mut());
        probs[2] = 0.0;
        fill_cumulative_row(probs.view(), cum.view_mut());
        assert_eq!(cum, arr1(&[0.0, 0.5, 1.0, 1.0]));
    }

    #[test]
    fn matrix_is_built_row_by_row() {
        let probs = arr2(&[[1.0, 3.0], [5.0, 5.0]]);
        let cum = cumulative_matrix(probs.view());
        assert_eq!(cum, arr2(&[[0.0, 0.25, 1.0], [0.0, 0.5, 1.0]]));
    }

    #[test]
    #[should_panic(expected = "one wider")]
    fn mismatched_widths_panic() {
        let probs = arr1(&[1.0, 1.0]);
        let mut cum = Array1::zeros(2);
        fill_cumulative_row(probs.view(), cum.view_mut());
    }
}
