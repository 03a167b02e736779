//! Diagonal extraction.
//!
//! A label appearing on several axes of one operand selects the
//! generalized diagonal: the collapsed axis strides by the sum of the
//! collapsed strides, so the diagonal is an ordinary strided view with
//! no data movement.

use crate::labels::{to_labels, Label};
use crate::strides::sort_by_label;
use crate::view::{Extent, Stride, TensorView};

/// Descriptor-level diagonalization.
///
/// Axes are visited in label order; length-1 axes are dropped, and runs
/// of equal-label axes merge into one axis with the summed stride. The
/// output axis order is therefore sorted by label.
pub(crate) fn diagonal_desc(
    len: &[Extent],
    stride: &[Stride],
    idx: &[Label],
) -> (Vec<Extent>, Vec<Stride>, Vec<Label>) {
    assert_eq!(
        idx.len(),
        len.len(),
        "index string length {} does not match dimensionality {}",
        idx.len(),
        len.len()
    );

    let order = sort_by_label(idx);

    let mut out_len: Vec<Extent> = Vec::with_capacity(len.len());
    let mut out_stride: Vec<Stride> = Vec::with_capacity(len.len());
    let mut out_idx: Vec<Label> = Vec::with_capacity(len.len());

    for &ax in &order {
        if len[ax] == 1 {
            continue;
        }
        if out_idx.last() == Some(&idx[ax]) {
            // Same label as the previously emitted axis: generalized
            // diagonal, stride is the sum of the collapsed strides.
            assert_eq!(*out_len.last().unwrap(), len[ax]);
            *out_stride.last_mut().unwrap() += stride[ax];
        } else {
            out_idx.push(idx[ax]);
            out_len.push(len[ax]);
            out_stride.push(stride[ax]);
        }
    }

    (out_len, out_stride, out_idx)
}

/// Rewrite a view so repeated labels become a single diagonal axis and
/// length-1 axes disappear. Returns the rewritten view and its index
/// string; the input view is unchanged.
///
/// # Examples
///
/// ```
/// use tenfold::{diagonal, TensorView};
///
/// // Column-major 2x2 matrix [[1, 3], [2, 4]].
/// let data = [1.0, 2.0, 3.0, 4.0];
/// let a = TensorView::from_slice(&data, &[2, 2], &[1, 2]).unwrap();
/// let (d, idx) = diagonal(a, "ii");
/// assert_eq!(idx, "i");
/// assert_eq!(d.lengths(), &[2]);
/// assert_eq!(d.strides(), &[3]);
/// assert_eq!(d.get(&[0]), 1.0);
/// assert_eq!(d.get(&[1]), 4.0);
/// ```
pub fn diagonal<'a, T>(a: TensorView<'a, T>, idx: &str) -> (TensorView<'a, T>, String) {
    let labels = to_labels(idx);
    let (len, stride, out_idx) = diagonal_desc(a.lengths(), a.strides(), &labels);
    (a.with_shape(&len, &stride), out_idx.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_labels_sorted() {
        // "ki" reorders to "ik".
        let (len, stride, idx) = diagonal_desc(&[4, 2], &[1, 4], &['k', 'i']);
        assert_eq!(idx, vec!['i', 'k']);
        assert_eq!(len, vec![2, 4]);
        assert_eq!(stride, vec![4, 1]);
    }

    #[test]
    fn test_length_one_axes_dropped() {
        let (len, stride, idx) = diagonal_desc(&[2, 1, 3], &[1, 2, 2], &['i', 'j', 'k']);
        assert_eq!(idx, vec!['i', 'k']);
        assert_eq!(len, vec![2, 3]);
        assert_eq!(stride, vec![1, 2]);
    }

    #[test]
    fn test_repeated_label_sums_strides() {
        let (len, stride, idx) = diagonal_desc(&[3, 3], &[1, 3], &['i', 'i']);
        assert_eq!(idx, vec!['i']);
        assert_eq!(len, vec![3]);
        assert_eq!(stride, vec![4]);
    }

    #[test]
    fn test_triple_repeat() {
        let (len, stride, idx) = diagonal_desc(&[2, 2, 2], &[1, 2, 4], &['i', 'i', 'i']);
        assert_eq!(idx, vec!['i']);
        assert_eq!(len, vec![2]);
        assert_eq!(stride, vec![7]);
    }

    #[test]
    fn test_all_axes_length_one() {
        let (len, stride, idx) = diagonal_desc(&[1, 1], &[1, 1], &['i', 'j']);
        assert!(idx.is_empty());
        assert!(len.is_empty());
        assert!(stride.is_empty());
    }

    #[test]
    fn test_diagonal_values() {
        // 3x3 column-major: data[i + 3*j].
        let data: Vec<f64> = (0..9).map(|x| x as f64).collect();
        let a = TensorView::from_slice(&data, &[3, 3], &[1, 3]).unwrap();
        let (d, idx) = diagonal(a, "ii");
        assert_eq!(idx, "i");
        assert_eq!(d.get(&[0]), 0.0);
        assert_eq!(d.get(&[1]), 4.0);
        assert_eq!(d.get(&[2]), 8.0);
    }
}
