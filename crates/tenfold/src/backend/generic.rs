//! Generic (naive loop-based) reference kernels.
//!
//! Each kernel walks a unified index space built from the union of the
//! operands' labels, keeping one running element offset per operand.
//! The binary and ternary accumulating kernels share one loop each: the
//! label partition, not the kernel, is what distinguishes contraction
//! from weighting from an outer product, so by the time operands reach
//! this layer the same loop serves them all.

use crate::labels::{position, Label};
use crate::ops::{ReduceOp, Status};
use crate::scalar::Scalar;
use crate::strides::{tensor_size, OffsetIter};
use crate::view::{Extent, Stride, TensorView, TensorViewMut};
use num_traits::{Float, Zero};

const OK: Status = 0;

/// Unified index space over several operands: one axis per distinct
/// label, with a per-operand stride row (0 where the operand lacks the
/// label).
fn joint_space(
    operands: &[(&[Extent], &[Stride], &[Label])],
) -> (Vec<Extent>, Vec<Vec<Stride>>) {
    let mut labels: Vec<Label> = Vec::new();
    let mut len: Vec<Extent> = Vec::new();

    for &(l, _, idx) in operands {
        for (d, &lab) in idx.iter().enumerate() {
            if !labels.contains(&lab) {
                labels.push(lab);
                len.push(l[d]);
            }
        }
    }

    let strides = operands
        .iter()
        .map(|&(_, s, idx)| {
            labels
                .iter()
                .map(|&lab| position(idx, lab).map_or(0, |p| s[p]))
                .collect()
        })
        .collect();

    (len, strides)
}

/// Odometer over the joint space, calling `f` with the current element
/// offset of every operand.
fn joint_for_each(len: &[Extent], strides: &[Vec<Stride>], mut f: impl FnMut(&[Stride])) {
    let nops = strides.len();
    let total = tensor_size(len);
    let mut offs = vec![0i64; nops];
    let mut coord = vec![0i64; len.len()];

    for _ in 0..total {
        f(&offs);
        for d in 0..len.len() {
            coord[d] += 1;
            for k in 0..nops {
                offs[k] += strides[k][d];
            }
            if coord[d] < len[d] {
                break;
            }
            for k in 0..nops {
                offs[k] -= strides[k][d] * len[d];
            }
            coord[d] = 0;
        }
    }
}

/// Apply the destination coefficient: `beta == 0` overwrites with zeros
/// without reading (the destination may hold NaN/Inf), any other value
/// scales in place.
fn scale_dest<T: Scalar>(beta: T, v: &mut TensorViewMut<T>) {
    let ptr = v.as_mut_ptr();
    if beta.is_zero() {
        for off in OffsetIter::new(v.lengths(), v.strides()) {
            unsafe { *ptr.offset(off as isize) = T::zero() };
        }
    } else if beta != T::one() {
        for off in OffsetIter::new(v.lengths(), v.strides()) {
            unsafe {
                let p = ptr.offset(off as isize);
                *p *= beta;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn mult_impl<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    beta: T,
    c: &mut TensorViewMut<T>,
    idx_c: &[Label],
) -> Status {
    scale_dest(beta, c);
    if alpha.is_zero() {
        return OK;
    }

    let (len, strides) = joint_space(&[
        (a.lengths(), a.strides(), idx_a),
        (b.lengths(), b.strides(), idx_b),
        (c.lengths(), c.strides(), idx_c),
    ]);

    let pa = a.as_ptr();
    let pb = b.as_ptr();
    let pc = c.as_mut_ptr();
    joint_for_each(&len, &strides, |offs| unsafe {
        let av = *pa.offset(offs[0] as isize);
        let bv = *pb.offset(offs[1] as isize);
        *pc.offset(offs[2] as isize) += alpha * av * bv;
    });

    OK
}

pub(super) fn sum_impl<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    beta: T,
    b: &mut TensorViewMut<T>,
    idx_b: &[Label],
) -> Status {
    scale_dest(beta, b);
    if alpha.is_zero() {
        return OK;
    }

    let (len, strides) = joint_space(&[
        (a.lengths(), a.strides(), idx_a),
        (b.lengths(), b.strides(), idx_b),
    ]);

    let pa = a.as_ptr();
    let pb = b.as_mut_ptr();
    joint_for_each(&len, &strides, |offs| unsafe {
        let av = *pa.offset(offs[0] as isize);
        *pb.offset(offs[1] as isize) += alpha * av;
    });

    OK
}

pub(super) fn dot_impl<T: Scalar>(
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    val: &mut T,
) -> Status {
    let (len, strides) = joint_space(&[
        (a.lengths(), a.strides(), idx_a),
        (b.lengths(), b.strides(), idx_b),
    ]);

    let pa = a.as_ptr();
    let pb = b.as_ptr();
    let mut acc = T::zero();
    joint_for_each(&len, &strides, |offs| unsafe {
        acc += *pa.offset(offs[0] as isize) * *pb.offset(offs[1] as isize);
    });

    *val = acc;
    OK
}

pub(super) fn scale_impl<T: Scalar>(
    alpha: T,
    a: &mut TensorViewMut<T>,
    _idx_a: &[Label],
) -> Status {
    // Same coefficient convention as for destinations: zero overwrites.
    scale_dest(alpha, a);
    OK
}

pub(super) fn reduce_impl<T: Scalar>(
    op: ReduceOp,
    a: &TensorView<T>,
    _idx_a: &[Label],
    val: &mut T,
    pos: &mut Stride,
) -> Status {
    let ptr = a.as_ptr();

    let mut acc = T::zero();
    let mut racc = <T::Real as Zero>::zero();
    let mut best = T::zero();
    let mut best_r = <T::Real as Zero>::zero();
    let mut best_off: Stride = -1;
    let mut first = true;

    for off in OffsetIter::new(a.lengths(), a.strides()) {
        let x = unsafe { *ptr.offset(off as isize) };
        match op {
            ReduceOp::Sum => acc += x,
            ReduceOp::SumAbs => racc = racc + x.abs(),
            ReduceOp::Norm2 => racc = racc + x.abs_sqr(),
            ReduceOp::Max => {
                let r = x.real();
                if first || r > best_r {
                    best_r = r;
                    best = x;
                    best_off = off;
                }
            }
            ReduceOp::Min => {
                let r = x.real();
                if first || r < best_r {
                    best_r = r;
                    best = x;
                    best_off = off;
                }
            }
            ReduceOp::MaxAbs => {
                let r = x.abs();
                if first || r > best_r {
                    best_r = r;
                    best = T::from_real(r);
                    best_off = off;
                }
            }
            ReduceOp::MinAbs => {
                let r = x.abs();
                if first || r < best_r {
                    best_r = r;
                    best = T::from_real(r);
                    best_off = off;
                }
            }
        }
        first = false;
    }

    match op {
        ReduceOp::Sum => {
            *val = acc;
            *pos = -1;
        }
        ReduceOp::SumAbs => {
            *val = T::from_real(racc);
            *pos = -1;
        }
        ReduceOp::Norm2 => {
            *val = T::from_real(Float::sqrt(racc));
            *pos = -1;
        }
        ReduceOp::Max | ReduceOp::Min | ReduceOp::MaxAbs | ReduceOp::MinAbs => {
            *val = best;
            *pos = best_off;
        }
    }

    OK
}
