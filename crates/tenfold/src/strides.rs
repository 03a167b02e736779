//! Stride and layout utilities.
//!
//! Axis order is canonicalized to ascending stride ("most contiguous
//! first"), matching column-major storage convention.

use crate::labels::Label;
use crate::view::{Extent, Stride, TensorView};

/// Permutation of `0..n` sorting axes by ascending stride.
///
/// With several stride vectors, an axis sorts by the minimum of its
/// strides across all of them. The sort is stable, so equal-stride axes
/// keep their relative order.
pub fn sort_by_stride(strides: &[&[Stride]]) -> Vec<usize> {
    assert!(!strides.is_empty());
    let ndim = strides[0].len();
    debug_assert!(strides.iter().all(|s| s.len() == ndim));

    let min_stride = |i: usize| strides.iter().map(|s| s[i]).min().unwrap_or(0);

    let mut perm: Vec<usize> = (0..ndim).collect();
    perm.sort_by_key(|&i| min_stride(i));
    perm
}

/// Permutation of `0..n` sorting axes by their index label.
pub(crate) fn sort_by_label(idx: &[Label]) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..idx.len()).collect();
    perm.sort_by_key(|&i| idx[i]);
    perm
}

pub(crate) fn permuted(values: &[i64], perm: &[usize]) -> Vec<i64> {
    perm.iter().map(|&i| values[i]).collect()
}

/// Enumerates the element offsets of a strided layout in odometer order
/// (first axis fastest).
pub(crate) struct OffsetIter {
    len: Vec<Extent>,
    stride: Vec<Stride>,
    coord: Vec<Extent>,
    off: Stride,
    remaining: usize,
}

impl OffsetIter {
    pub(crate) fn new(len: &[Extent], stride: &[Stride]) -> Self {
        assert_eq!(len.len(), stride.len());
        Self {
            len: len.to_vec(),
            stride: stride.to_vec(),
            coord: vec![0; len.len()],
            off: 0,
            remaining: tensor_size(len),
        }
    }
}

impl Iterator for OffsetIter {
    type Item = Stride;

    fn next(&mut self) -> Option<Stride> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let out = self.off;

        for d in 0..self.len.len() {
            self.coord[d] += 1;
            self.off += self.stride[d];
            if self.coord[d] < self.len[d] {
                break;
            }
            self.off -= self.stride[d] * self.len[d];
            self.coord[d] = 0;
        }

        Some(out)
    }
}

/// True iff `a` and `b` agree on all strides and on all lengths except
/// possibly at axis `dim`.
///
/// Also true in the degenerate case where one view has exactly one fewer
/// dimension (axis `dim` missing entirely) and all remaining strides and
/// lengths match. Guards the partition/slice inverse operations.
pub fn are_congruent_along<T>(a: &TensorView<T>, b: &TensorView<T>, dim: usize) -> bool {
    let (a, b) = if a.ndim() < b.ndim() { (b, a) } else { (a, b) };
    let ndim = a.ndim();
    assert!(dim < ndim, "axis {dim} out of range for rank {ndim}");

    if b.ndim() == ndim {
        a.strides() == b.strides()
            && a.lengths()[..dim] == b.lengths()[..dim]
            && a.lengths()[dim + 1..] == b.lengths()[dim + 1..]
    } else if b.ndim() + 1 == ndim {
        a.strides()[..dim] == b.strides()[..dim]
            && a.strides()[dim + 1..] == b.strides()[dim..]
            && a.lengths()[..dim] == b.lengths()[..dim]
            && a.lengths()[dim + 1..] == b.lengths()[dim..]
    } else {
        false
    }
}

/// True iff the two strided layouts enumerate the same offset sequence
/// over the same number of elements, once each is put in canonical
/// (ascending stride) axis order.
///
/// Used in debug assertions after folding: a folded descriptor must
/// address exactly the elements of the descriptor it replaced.
pub fn are_compatible(
    len_a: &[Extent],
    stride_a: &[Stride],
    len_b: &[Extent],
    stride_b: &[Stride],
) -> bool {
    assert_eq!(len_a.len(), stride_a.len());
    assert_eq!(len_b.len(), stride_b.len());

    let perm_a = sort_by_stride(&[stride_a]);
    let len_ar = permuted(len_a, &perm_a);
    let stride_ar = permuted(stride_a, &perm_a);

    let perm_b = sort_by_stride(&[stride_b]);
    let len_br = permuted(len_b, &perm_b);
    let stride_br = permuted(stride_b, &perm_b);

    if tensor_size(&len_ar) != tensor_size(&len_br) {
        return false;
    }

    let it_a = OffsetIter::new(&len_ar, &stride_ar);
    let mut it_b = OffsetIter::new(&len_br, &stride_br);
    for off_a in it_a {
        if Some(off_a) != it_b.next() {
            return false;
        }
    }

    true
}

/// View-level compatibility: same base pointer and compatible layouts.
pub fn are_compatible_views<T>(a: &TensorView<T>, b: &TensorView<T>) -> bool {
    a.as_ptr() == b.as_ptr()
        && are_compatible(a.lengths(), a.strides(), b.lengths(), b.strides())
}

/// Number of elements addressed by a shape: `∏ len[i]` (1 for rank 0).
pub fn tensor_size(len: &[Extent]) -> usize {
    len.iter().map(|&l| l as usize).product()
}

/// Number of storage elements spanned by a layout:
/// `1 + Σ |stride[i]| * (len[i] - 1)`, or [`tensor_size`] when the
/// stride vector is absent (packed layout).
pub fn tensor_storage_size(len: &[Extent], stride: Option<&[Stride]>) -> usize {
    match stride {
        None => tensor_size(len),
        Some(stride) => {
            assert_eq!(len.len(), stride.len());
            let mut size: i64 = 1;
            for (&l, &s) in len.iter().zip(stride.iter()) {
                size += s.abs() * (l - 1);
            }
            size as usize
        }
    }
}
