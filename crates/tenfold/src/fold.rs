//! Stride-based index folding.
//!
//! Folding merges consecutive axes (in ascending stride order) whose
//! strides are contiguous across *all* participating operands, reducing
//! dimensionality without changing which elements are addressed. Joint
//! folds partition labels into ownership classes first and fold each
//! class independently, so axes belonging to different operand sets are
//! never merged together.

use crate::labels::{exclusion, intersection, intersection3, select_from, to_labels, unique, Label};
use crate::strides::{are_compatible, sort_by_stride};
use crate::view::{Extent, Stride, TensorView};

/// One operand's shape descriptor during normalization.
#[derive(Debug, Clone)]
pub(crate) struct Desc {
    pub len: Vec<Extent>,
    pub stride: Vec<Stride>,
    pub idx: Vec<Label>,
}

impl Desc {
    pub(crate) fn new(len: &[Extent], stride: &[Stride], idx: &[Label]) -> Self {
        Self {
            len: len.to_vec(),
            stride: stride.to_vec(),
            idx: idx.to_vec(),
        }
    }
}

/// Fold one group of axes shared by `strides.len()` operands.
///
/// Axes are walked in ascending order of the first operand's strides; an
/// axis joins the current group iff for every operand its stride equals
/// the previous axis' stride times the previous axis' length. Each group
/// emits one axis: the product length, and the first axis' stride and
/// label.
pub(crate) fn fold_desc(
    len: &[Extent],
    strides: &[&[Stride]],
    idx: &[Label],
) -> (Vec<Extent>, Vec<Vec<Stride>>, Vec<Label>) {
    let ndim = len.len();
    assert_eq!(idx.len(), ndim);
    assert!(!strides.is_empty());
    for s in strides {
        assert_eq!(s.len(), ndim);
    }

    let perm = sort_by_stride(&[strides[0]]);

    let mut out_len: Vec<Extent> = Vec::with_capacity(ndim);
    let mut out_strides: Vec<Vec<Stride>> = vec![Vec::with_capacity(ndim); strides.len()];
    let mut out_idx: Vec<Label> = Vec::with_capacity(ndim);

    for (i, &ax) in perm.iter().enumerate() {
        let joins_group = i > 0 && {
            let prev = perm[i - 1];
            strides.iter().all(|s| s[ax] == s[prev] * len[prev])
        };

        if joins_group {
            *out_len.last_mut().unwrap() *= len[ax];
        } else {
            out_idx.push(idx[ax]);
            out_len.push(len[ax]);
            for (k, s) in strides.iter().enumerate() {
                out_strides[k].push(s[ax]);
            }
        }
    }

    for (k, s) in strides.iter().enumerate() {
        debug_assert!(
            are_compatible(len, s, &out_len, &out_strides[k]),
            "folded descriptor no longer addresses the same elements"
        );
    }

    (out_len, out_strides, out_idx)
}

fn concat(mut head: Vec<i64>, tail: &[i64]) -> Vec<i64> {
    head.extend_from_slice(tail);
    head
}

fn concat_idx(mut head: Vec<Label>, tail: &[Label]) -> Vec<Label> {
    head.extend_from_slice(tail);
    head
}

/// Joint fold of two operands.
///
/// Expects labels unique within each operand (diagonalize first). The
/// folded axes come out own-only first, then shared, so inter-class
/// boundaries are preserved.
pub(crate) fn fold2_desc(a: &Desc, b: &Desc) -> (Desc, Desc) {
    debug_assert_eq!(unique(&a.idx).len(), a.idx.len());
    debug_assert_eq!(unique(&b.idx).len(), b.idx.len());

    let idx_ab = intersection(&a.idx, &b.idx);
    let idx_a_only = exclusion(&a.idx, &[&b.idx]);
    let idx_b_only = exclusion(&b.idx, &[&a.idx]);

    let len_ab = select_from(&a.len, &a.idx, &idx_ab);
    let sa_ab = select_from(&a.stride, &a.idx, &idx_ab);
    let sb_ab = select_from(&b.stride, &b.idx, &idx_ab);

    let len_a = select_from(&a.len, &a.idx, &idx_a_only);
    let sa_a = select_from(&a.stride, &a.idx, &idx_a_only);

    let len_b = select_from(&b.len, &b.idx, &idx_b_only);
    let sb_b = select_from(&b.stride, &b.idx, &idx_b_only);

    let (flen_a, fs_a, fidx_a) = fold_desc(&len_a, &[&sa_a], &idx_a_only);
    let (flen_b, fs_b, fidx_b) = fold_desc(&len_b, &[&sb_b], &idx_b_only);
    let (flen_ab, fs_ab, fidx_ab) = fold_desc(&len_ab, &[&sa_ab, &sb_ab], &idx_ab);

    let out_a = Desc {
        len: concat(flen_a, &flen_ab),
        stride: concat(fs_a.into_iter().next().unwrap(), &fs_ab[0]),
        idx: concat_idx(fidx_a, &fidx_ab),
    };
    let out_b = Desc {
        len: concat(flen_b, &flen_ab),
        stride: concat(fs_b.into_iter().next().unwrap(), &fs_ab[1]),
        idx: concat_idx(fidx_b, &fidx_ab),
    };

    (out_a, out_b)
}

/// Joint fold of three operands: each of the seven label classes folds
/// independently; per operand the axes come out own-only, then pairwise,
/// then fully shared.
pub(crate) fn fold3_desc(a: &Desc, b: &Desc, c: &Desc) -> (Desc, Desc, Desc) {
    debug_assert_eq!(unique(&a.idx).len(), a.idx.len());
    debug_assert_eq!(unique(&b.idx).len(), b.idx.len());
    debug_assert_eq!(unique(&c.idx).len(), c.idx.len());

    let idx_abc = intersection3(&a.idx, &b.idx, &c.idx);
    let len_abc = select_from(&a.len, &a.idx, &idx_abc);
    let sa_abc = select_from(&a.stride, &a.idx, &idx_abc);
    let sb_abc = select_from(&b.stride, &b.idx, &idx_abc);
    let sc_abc = select_from(&c.stride, &c.idx, &idx_abc);

    let idx_ab = exclusion(&intersection(&a.idx, &b.idx), &[&idx_abc]);
    let len_ab = select_from(&a.len, &a.idx, &idx_ab);
    let sa_ab = select_from(&a.stride, &a.idx, &idx_ab);
    let sb_ab = select_from(&b.stride, &b.idx, &idx_ab);

    let idx_ac = exclusion(&intersection(&a.idx, &c.idx), &[&idx_abc]);
    let len_ac = select_from(&a.len, &a.idx, &idx_ac);
    let sa_ac = select_from(&a.stride, &a.idx, &idx_ac);
    let sc_ac = select_from(&c.stride, &c.idx, &idx_ac);

    let idx_bc = exclusion(&intersection(&b.idx, &c.idx), &[&idx_abc]);
    let len_bc = select_from(&b.len, &b.idx, &idx_bc);
    let sb_bc = select_from(&b.stride, &b.idx, &idx_bc);
    let sc_bc = select_from(&c.stride, &c.idx, &idx_bc);

    let idx_a_only = exclusion(&a.idx, &[&b.idx, &c.idx]);
    let len_a = select_from(&a.len, &a.idx, &idx_a_only);
    let sa_a = select_from(&a.stride, &a.idx, &idx_a_only);

    let idx_b_only = exclusion(&b.idx, &[&a.idx, &c.idx]);
    let len_b = select_from(&b.len, &b.idx, &idx_b_only);
    let sb_b = select_from(&b.stride, &b.idx, &idx_b_only);

    let idx_c_only = exclusion(&c.idx, &[&a.idx, &b.idx]);
    let len_c = select_from(&c.len, &c.idx, &idx_c_only);
    let sc_c = select_from(&c.stride, &c.idx, &idx_c_only);

    let (flen_a, fs_a, fidx_a) = fold_desc(&len_a, &[&sa_a], &idx_a_only);
    let (flen_b, fs_b, fidx_b) = fold_desc(&len_b, &[&sb_b], &idx_b_only);
    let (flen_c, fs_c, fidx_c) = fold_desc(&len_c, &[&sc_c], &idx_c_only);
    let (flen_ab, fs_ab, fidx_ab) = fold_desc(&len_ab, &[&sa_ab, &sb_ab], &idx_ab);
    let (flen_ac, fs_ac, fidx_ac) = fold_desc(&len_ac, &[&sa_ac, &sc_ac], &idx_ac);
    let (flen_bc, fs_bc, fidx_bc) = fold_desc(&len_bc, &[&sb_bc, &sc_bc], &idx_bc);
    let (flen_abc, fs_abc, fidx_abc) = fold_desc(&len_abc, &[&sa_abc, &sb_abc, &sc_abc], &idx_abc);

    let out_a = Desc {
        len: concat(concat(concat(flen_a, &flen_ab), &flen_ac), &flen_abc),
        stride: concat(
            concat(
                concat(fs_a.into_iter().next().unwrap(), &fs_ab[0]),
                &fs_ac[0],
            ),
            &fs_abc[0],
        ),
        idx: concat_idx(concat_idx(concat_idx(fidx_a, &fidx_ab), &fidx_ac), &fidx_abc),
    };
    let out_b = Desc {
        len: concat(concat(concat(flen_b, &flen_ab), &flen_bc), &flen_abc),
        stride: concat(
            concat(
                concat(fs_b.into_iter().next().unwrap(), &fs_ab[1]),
                &fs_bc[0],
            ),
            &fs_abc[1],
        ),
        idx: concat_idx(concat_idx(concat_idx(fidx_b, &fidx_ab), &fidx_bc), &fidx_abc),
    };
    let out_c = Desc {
        len: concat(concat(concat(flen_c, &flen_ac), &flen_bc), &flen_abc),
        stride: concat(
            concat(
                concat(fs_c.into_iter().next().unwrap(), &fs_ac[1]),
                &fs_bc[1],
            ),
            &fs_abc[2],
        ),
        idx: concat_idx(concat_idx(concat_idx(fidx_c, &fidx_ac), &fidx_bc), &fidx_abc),
    };

    (out_a, out_b, out_c)
}

/// Fold a single view: merge contiguous axes, returning the rewritten
/// view and its index string. The input view is unchanged.
///
/// # Examples
///
/// ```
/// use tenfold::{fold, TensorView};
///
/// let data = [0.0; 24];
/// let a = TensorView::from_slice(&data, &[2, 3, 4], &[1, 2, 6]).unwrap();
/// let (f, idx) = fold(a, "ijk");
/// assert_eq!(f.lengths(), &[24]);
/// assert_eq!(f.strides(), &[1]);
/// assert_eq!(idx, "i");
/// ```
pub fn fold<'a, T>(a: TensorView<'a, T>, idx: &str) -> (TensorView<'a, T>, String) {
    let labels = to_labels(idx);
    assert_eq!(
        labels.len(),
        a.ndim(),
        "index string length {} does not match dimensionality {}",
        labels.len(),
        a.ndim()
    );
    let (len, strides, out_idx) = fold_desc(a.lengths(), &[a.strides()], &labels);
    (
        a.with_shape(&len, &strides[0]),
        out_idx.into_iter().collect(),
    )
}

/// Jointly fold two views so merged axes remain expressible as a single
/// loop in both. Labels must be unique within each operand (apply
/// [`diagonal`](crate::diagonal) first).
pub fn fold_pair<'a, 'b, T>(
    a: TensorView<'a, T>,
    idx_a: &str,
    b: TensorView<'b, T>,
    idx_b: &str,
) -> (TensorView<'a, T>, String, TensorView<'b, T>, String) {
    let da = Desc::new(a.lengths(), a.strides(), &to_labels(idx_a));
    let db = Desc::new(b.lengths(), b.strides(), &to_labels(idx_b));
    assert_eq!(da.idx.len(), a.ndim());
    assert_eq!(db.idx.len(), b.ndim());

    let (fa, fb) = fold2_desc(&da, &db);
    (
        a.with_shape(&fa.len, &fa.stride),
        fa.idx.into_iter().collect(),
        b.with_shape(&fb.len, &fb.stride),
        fb.idx.into_iter().collect(),
    )
}

/// Jointly fold three views; see [`fold_pair`].
#[allow(clippy::type_complexity)]
pub fn fold_triple<'a, 'b, 'c, T>(
    a: TensorView<'a, T>,
    idx_a: &str,
    b: TensorView<'b, T>,
    idx_b: &str,
    c: TensorView<'c, T>,
    idx_c: &str,
) -> (
    TensorView<'a, T>,
    String,
    TensorView<'b, T>,
    String,
    TensorView<'c, T>,
    String,
) {
    let da = Desc::new(a.lengths(), a.strides(), &to_labels(idx_a));
    let db = Desc::new(b.lengths(), b.strides(), &to_labels(idx_b));
    let dc = Desc::new(c.lengths(), c.strides(), &to_labels(idx_c));
    assert_eq!(da.idx.len(), a.ndim());
    assert_eq!(db.idx.len(), b.ndim());
    assert_eq!(dc.idx.len(), c.ndim());

    let (fa, fb, fc) = fold3_desc(&da, &db, &dc);
    (
        a.with_shape(&fa.len, &fa.stride),
        fa.idx.into_iter().collect(),
        b.with_shape(&fb.len, &fb.stride),
        fb.idx.into_iter().collect(),
        c.with_shape(&fc.len, &fc.stride),
        fc.idx.into_iter().collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_packed_merges_all() {
        let (len, strides, idx) = fold_desc(&[2, 3, 4], &[&[1, 2, 6]], &['i', 'j', 'k']);
        assert_eq!(len, vec![24]);
        assert_eq!(strides, vec![vec![1]]);
        assert_eq!(idx, vec!['i']);
    }

    #[test]
    fn test_fold_gap_not_merged() {
        // Stride 8 != 2 * 3: the outer axis stays separate.
        let (len, strides, idx) = fold_desc(&[3, 4], &[&[2, 8]], &['i', 'j']);
        assert_eq!(len, vec![3, 4]);
        assert_eq!(strides, vec![vec![2, 8]]);
        assert_eq!(idx, vec!['i', 'j']);
    }

    #[test]
    fn test_fold_sorts_by_stride_first() {
        // Axes given outermost-first still fold once sorted.
        let (len, strides, idx) = fold_desc(&[3, 2], &[&[2, 1]], &['j', 'i']);
        assert_eq!(len, vec![6]);
        assert_eq!(strides, vec![vec![1]]);
        assert_eq!(idx, vec!['i']);
    }

    #[test]
    fn test_fold_blocked_by_second_operand() {
        // Contiguous in the first operand but transposed in the second.
        let (len, strides, idx) = fold_desc(&[2, 3], &[&[1, 2], &[3, 1]], &['i', 'j']);
        assert_eq!(len, vec![2, 3]);
        assert_eq!(strides, vec![vec![1, 2], vec![3, 1]]);
        assert_eq!(idx, vec!['i', 'j']);
    }

    #[test]
    fn test_fold_joint_merge() {
        // Both operands packed the same way: full merge.
        let (len, strides, idx) = fold_desc(&[2, 3], &[&[1, 2], &[1, 2]], &['i', 'j']);
        assert_eq!(len, vec![6]);
        assert_eq!(strides, vec![vec![1], vec![1]]);
        assert_eq!(idx, vec!['i']);
    }

    #[test]
    fn test_fold_idempotent() {
        let len = [2, 3, 5];
        let stride = [1, 2, 12];
        let idx = ['i', 'j', 'k'];
        let (l1, s1, i1) = fold_desc(&len, &[&stride], &idx);
        let (l2, s2, i2) = fold_desc(&l1, &[&s1[0]], &i1);
        assert_eq!(l1, l2);
        assert_eq!(s1, s2);
        assert_eq!(i1, i2);
    }

    #[test]
    fn test_fold2_classes_stay_separate() {
        // Outer product layout: every axis of C is contiguous with the
        // next, but A's axis and B's axis belong to different classes
        // and must not merge in C.
        let a = Desc::new(&[2], &[1], &['i']);
        let c = Desc::new(&[2, 3], &[1, 2], &['i', 'j']);
        let (fa, fc) = fold2_desc(&a, &c);
        assert_eq!(fa.idx, vec!['i']);
        assert_eq!(fc.idx, vec!['j', 'i']);
        assert_eq!(fc.len, vec![3, 2]);
        assert_eq!(fc.stride, vec![2, 1]);
    }

    #[test]
    fn test_fold2_shared_axes_fold_jointly() {
        // Same packed layout in both operands: shared axes merge.
        let a = Desc::new(&[2, 3], &[1, 2], &['i', 'j']);
        let b = Desc::new(&[2, 3], &[1, 2], &['i', 'j']);
        let (fa, fb) = fold2_desc(&a, &b);
        assert_eq!(fa.len, vec![6]);
        assert_eq!(fb.len, vec![6]);
        assert_eq!(fa.stride, vec![1]);
        assert_eq!(fb.stride, vec![1]);
    }

    #[test]
    fn test_fold3_ordering() {
        // C[i,j] = A[i,k] * B[k,j]: per-operand order is own-only,
        // pairwise, shared.
        let a = Desc::new(&[2, 4], &[1, 2], &['i', 'k']);
        let b = Desc::new(&[4, 3], &[1, 4], &['k', 'j']);
        let c = Desc::new(&[2, 3], &[1, 2], &['i', 'j']);
        let (fa, fb, fc) = fold3_desc(&a, &b, &c);
        // k is AB, i is AC, j is BC; pairwise classes concatenate in
        // AB, AC, BC order after the (empty) own-only class.
        assert_eq!(fa.idx, vec!['k', 'i']);
        assert_eq!(fb.idx, vec!['k', 'j']);
        assert_eq!(fc.idx, vec!['i', 'j']);
        assert_eq!(fa.len, vec![4, 2]);
        assert_eq!(fa.stride, vec![2, 1]);
        assert_eq!(fb.len, vec![4, 3]);
        assert_eq!(fb.stride, vec![1, 4]);
        assert_eq!(fc.len, vec![2, 3]);
        assert_eq!(fc.stride, vec![1, 2]);
    }
}
