//! Inverse-CDF lookup over a cumulative row.
//!
//! Given a non-decreasing cumulative row `c` and a draw `u`, find the bucket `i` with
//! `c[i] <= u <= c[i + 1]`.
//!
//! The search keeps a bracket `[left, right]` with `c[left] <= u <= c[right]` and probes
//! two midpoints per step: `left_mid` rounds toward `left`, `right_mid` toward `right`
//! (they coincide when the bracket width is even). Both comparisons are strict, so a
//! draw sitting exactly on a breakpoint settles in the lower bucket.
//!
//! If `u` equals the cumulative value at *both* midpoints, neither strict comparison
//! moves a pointer. The bracket is then collapsed to `right = left_mid`, which keeps
//! the invariant and the lower-index tie-break, and guarantees progress.

use ndarray::ArrayView1;

/// Bucket index in `[0, cum.len() - 2]` for the draw `u`.
///
/// `cum` must be non-decreasing with `cum[0] <= u <= cum[last]` for the bracket
/// guarantee to hold; the search terminates for any input, including NaN.
///
/// # Panics
///
/// Panics if `cum` has fewer than two entries (no buckets).
pub fn invert(cum: ArrayView1<'_, f64>, u: f64) -> usize {
    assert!(cum.len() >= 2, "invert: cumulative row needs at least one bucket");

    let mut left = 0usize;
    let mut right = cum.len() - 1;

    while right - left > 1 {
        let half = (right - left) / 2;
        let left_mid = left + half;
        let right_mid = right - half;

        let mut moved = false;
        if u > cum[left_mid] {
            left = left_mid;
            moved = true;
        }
        if u < cum[right_mid] {
            right = right_mid;
            moved = true;
        }

        // u == cum[left_mid] == cum[right_mid]: plateau at a breakpoint.
        if !moved {
            right = left_mid;
        }
    }

    left
}
