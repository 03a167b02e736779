//! Pure view rewrites: partition, slice, and matricize.
//!
//! None of these move or inspect data; they split or reshape the shape
//! metadata and shift the base pointer when a sub-view starts at a
//! nonzero offset. The inverses are precondition-checked with
//! [`are_congruent_along`] so that only views produced by the forward
//! operation (or congruent ones) can be recombined.

use crate::strides::are_congruent_along;
use crate::view::{Extent, Stride, TensorView};

fn erased(values: &[i64], dim: usize) -> Vec<i64> {
    let mut v = values.to_vec();
    v.remove(dim);
    v
}

fn replaced(values: &[i64], dim: usize, value: i64) -> Vec<i64> {
    let mut v = values.to_vec();
    v[dim] = value;
    v
}

/// Split `a` along `dim` at offset `off` into a leading part of length
/// `off` and a trailing part of the remaining length. `off` is clamped
/// to `[0, len[dim]]`; a boundary offset yields an empty part.
pub fn partition<'a, T>(
    a: &TensorView<'a, T>,
    dim: usize,
    off: Extent,
) -> (TensorView<'a, T>, TensorView<'a, T>) {
    assert!(dim < a.ndim(), "axis {} out of range for rank {}", dim, a.ndim());
    let off = off.clamp(0, a.length(dim));

    let a0 = a.shifted(0, &replaced(a.lengths(), dim, off), a.strides());
    let a1 = a.shifted(
        off * a.stride(dim),
        &replaced(a.lengths(), dim, a.length(dim) - off),
        a.strides(),
    );
    (a0, a1)
}

/// Inverse of [`partition`]: rejoin two views along `dim`.
///
/// Requires congruence along `dim` and `a1` starting exactly one step
/// past the end of `a0`.
pub fn unpartition<'a, T>(
    a0: &TensorView<'a, T>,
    a1: &TensorView<'a, T>,
    dim: usize,
) -> TensorView<'a, T> {
    assert!(dim < a0.ndim(), "axis {} out of range for rank {}", dim, a0.ndim());
    assert!(
        are_congruent_along(a0, a1, dim),
        "views are not congruent along axis {dim}"
    );
    assert!(
        a1.as_ptr()
            == a0
                .as_ptr()
                .wrapping_offset((a0.length(dim) * a0.stride(dim)) as isize),
        "trailing view does not start at the end of the leading view"
    );

    a0.shifted(
        0,
        &replaced(a0.lengths(), dim, a0.length(dim) + a1.length(dim)),
        a0.strides(),
    )
}

/// Split `a` along `dim` at offset `off` into a leading part (length
/// `off`), the hyperplane at `off` (one fewer dimension), and a
/// trailing part (length `len[dim] - off - 1`). Requires
/// `0 <= off < len[dim]`.
#[allow(clippy::type_complexity)]
pub fn slice<'a, T>(
    a: &TensorView<'a, T>,
    dim: usize,
    off: Extent,
) -> (TensorView<'a, T>, TensorView<'a, T>, TensorView<'a, T>) {
    assert!(dim < a.ndim(), "axis {} out of range for rank {}", dim, a.ndim());
    assert!(
        off >= 0 && off < a.length(dim),
        "offset {} out of range for axis of length {}",
        off,
        a.length(dim)
    );

    let a0 = a.shifted(0, &replaced(a.lengths(), dim, off), a.strides());
    let a1 = a.shifted(
        off * a.stride(dim),
        &erased(a.lengths(), dim),
        &erased(a.strides(), dim),
    );
    let a2 = a.shifted(
        (off + 1) * a.stride(dim),
        &replaced(a.lengths(), dim, a.length(dim) - off - 1),
        a.strides(),
    );
    (a0, a1, a2)
}

/// Take the first hyperplane along `dim`: the `d-1`-dimensional front
/// face and the remainder of length `len[dim] - 1`.
pub fn slice_front<'a, T>(
    a: &TensorView<'a, T>,
    dim: usize,
) -> (TensorView<'a, T>, TensorView<'a, T>) {
    assert!(dim < a.ndim(), "axis {} out of range for rank {}", dim, a.ndim());

    let a0 = a.shifted(0, &erased(a.lengths(), dim), &erased(a.strides(), dim));
    let a1 = a.shifted(
        a.stride(dim),
        &replaced(a.lengths(), dim, a.length(dim) - 1),
        a.strides(),
    );
    (a0, a1)
}

/// Take the last hyperplane along `dim`: the remainder of length
/// `len[dim] - 1` and the `d-1`-dimensional back face.
pub fn slice_back<'a, T>(
    a: &TensorView<'a, T>,
    dim: usize,
) -> (TensorView<'a, T>, TensorView<'a, T>) {
    assert!(dim < a.ndim(), "axis {} out of range for rank {}", dim, a.ndim());

    let a0 = a.shifted(0, &replaced(a.lengths(), dim, a.length(dim) - 1), a.strides());
    let a1 = a.shifted(
        (a.length(dim) - 1) * a.stride(dim),
        &erased(a.lengths(), dim),
        &erased(a.strides(), dim),
    );
    (a0, a1)
}

/// Inverse of [`slice`].
pub fn unslice<'a, T>(
    a0: &TensorView<'a, T>,
    a1: &TensorView<'a, T>,
    a2: &TensorView<'a, T>,
    dim: usize,
) -> TensorView<'a, T> {
    assert!(dim < a0.ndim(), "axis {} out of range for rank {}", dim, a0.ndim());
    assert_eq!(a0.ndim(), a1.ndim() + 1);
    assert_eq!(a2.ndim(), a1.ndim() + 1);
    assert!(
        are_congruent_along(a0, a1, dim),
        "hyperplane is not congruent along axis {dim}"
    );
    assert!(
        are_congruent_along(a0, a2, dim),
        "views are not congruent along axis {dim}"
    );
    assert!(
        a1.as_ptr()
            == a0
                .as_ptr()
                .wrapping_offset((a0.length(dim) * a0.stride(dim)) as isize),
        "hyperplane does not sit at the end of the leading view"
    );
    assert!(
        a2.as_ptr()
            == a0
                .as_ptr()
                .wrapping_offset(((a0.length(dim) + 1) * a0.stride(dim)) as isize),
        "trailing view does not start one step past the hyperplane"
    );

    a0.shifted(
        0,
        &replaced(a0.lengths(), dim, a0.length(dim) + a2.length(dim) + 1),
        a0.strides(),
    )
}

/// Inverse of [`slice_front`].
pub fn unslice_front<'a, T>(
    a0: &TensorView<'a, T>,
    a1: &TensorView<'a, T>,
    dim: usize,
) -> TensorView<'a, T> {
    assert!(dim < a1.ndim(), "axis {} out of range for rank {}", dim, a1.ndim());
    assert_eq!(a1.ndim(), a0.ndim() + 1);
    assert!(
        are_congruent_along(a0, a1, dim),
        "views are not congruent along axis {dim}"
    );
    assert!(
        a1.as_ptr() == a0.as_ptr().wrapping_offset(a1.stride(dim) as isize),
        "trailing view does not start one step past the front face"
    );

    a0.shifted(
        0,
        &replaced(a1.lengths(), dim, a1.length(dim) + 1),
        a1.strides(),
    )
}

/// Inverse of [`slice_back`].
pub fn unslice_back<'a, T>(
    a0: &TensorView<'a, T>,
    a1: &TensorView<'a, T>,
    dim: usize,
) -> TensorView<'a, T> {
    assert!(dim < a0.ndim(), "axis {} out of range for rank {}", dim, a0.ndim());
    assert_eq!(a0.ndim(), a1.ndim() + 1);
    assert!(
        are_congruent_along(a0, a1, dim),
        "views are not congruent along axis {dim}"
    );
    assert!(
        a1.as_ptr()
            == a0
                .as_ptr()
                .wrapping_offset((a0.length(dim) * a0.stride(dim)) as isize),
        "back face does not sit at the end of the leading view"
    );

    a0.shifted(
        0,
        &replaced(a0.lengths(), dim, a0.length(dim) + 1),
        a0.strides(),
    )
}

/// Reshape `a` into a two-dimensional view of shape
/// `(∏ len[..split], ∏ len[split..])`.
///
/// The axes on each side of `split` must be jointly contiguous in
/// stride order (asserted). A rank-0 input becomes a 1x1 view with unit
/// strides; a single-axis input becomes a stride-preserving 1xN or Nx1
/// reshape according to `split`.
pub fn matricize<'a, T>(a: &TensorView<'a, T>, split: usize) -> TensorView<'a, T> {
    let ndim = a.ndim();
    assert!(split <= ndim, "split {split} out of range for rank {ndim}");

    let ascending = ndim > 0 && a.stride(0) < a.stride(ndim - 1);
    if ascending {
        for i in 1..split {
            assert_eq!(
                a.stride(i),
                a.stride(i - 1) * a.length(i - 1),
                "row axes are not contiguous at axis {i}"
            );
        }
        for i in split + 1..ndim {
            assert_eq!(
                a.stride(i),
                a.stride(i - 1) * a.length(i - 1),
                "column axes are not contiguous at axis {i}"
            );
        }
    } else {
        for i in 0..split.saturating_sub(1) {
            assert_eq!(
                a.stride(i),
                a.stride(i + 1) * a.length(i + 1),
                "row axes are not contiguous at axis {i}"
            );
        }
        for i in split..ndim.saturating_sub(1) {
            assert_eq!(
                a.stride(i),
                a.stride(i + 1) * a.length(i + 1),
                "column axes are not contiguous at axis {i}"
            );
        }
    }

    let m: Extent = a.lengths()[..split].iter().product();
    let n: Extent = a.lengths()[split..].iter().product();

    let (rs, cs): (Stride, Stride) = if ndim == 0 {
        (1, 1)
    } else if ascending {
        (
            if split == 0 { 1 } else { a.stride(0) },
            if split == ndim { m } else { a.stride(split) },
        )
    } else {
        (
            if split == 0 { n } else { a.stride(split - 1) },
            if split == ndim { 1 } else { a.stride(ndim - 1) },
        )
    };

    a.shifted(0, &[m, n], &[rs, cs])
}
