//! Back-end kernel dispatch.
//!
//! The front-end hands each kernel already-normalized operands: views
//! that have been diagonalized and jointly folded, with their reduced
//! index strings. Kernels return an integer status (0 on success) that
//! the front-end passes through unchanged.

mod generic;

use crate::labels::Label;
use crate::ops::{ReduceOp, Status};
use crate::scalar::Scalar;
use crate::view::{Stride, TensorView, TensorViewMut};

#[allow(clippy::too_many_arguments)]
pub(crate) fn kernel_mult<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    beta: T,
    c: &mut TensorViewMut<T>,
    idx_c: &[Label],
) -> Status {
    generic::mult_impl(alpha, a, idx_a, b, idx_b, beta, c, idx_c)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn kernel_contract<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    beta: T,
    c: &mut TensorViewMut<T>,
    idx_c: &[Label],
) -> Status {
    generic::mult_impl(alpha, a, idx_a, b, idx_b, beta, c, idx_c)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn kernel_weight<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    beta: T,
    c: &mut TensorViewMut<T>,
    idx_c: &[Label],
) -> Status {
    generic::mult_impl(alpha, a, idx_a, b, idx_b, beta, c, idx_c)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn kernel_outer_prod<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    beta: T,
    c: &mut TensorViewMut<T>,
    idx_c: &[Label],
) -> Status {
    generic::mult_impl(alpha, a, idx_a, b, idx_b, beta, c, idx_c)
}

pub(crate) fn kernel_sum<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    beta: T,
    b: &mut TensorViewMut<T>,
    idx_b: &[Label],
) -> Status {
    generic::sum_impl(alpha, a, idx_a, beta, b, idx_b)
}

pub(crate) fn kernel_trace<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    beta: T,
    b: &mut TensorViewMut<T>,
    idx_b: &[Label],
) -> Status {
    generic::sum_impl(alpha, a, idx_a, beta, b, idx_b)
}

pub(crate) fn kernel_replicate<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    beta: T,
    b: &mut TensorViewMut<T>,
    idx_b: &[Label],
) -> Status {
    generic::sum_impl(alpha, a, idx_a, beta, b, idx_b)
}

pub(crate) fn kernel_transpose<T: Scalar>(
    alpha: T,
    a: &TensorView<T>,
    idx_a: &[Label],
    beta: T,
    b: &mut TensorViewMut<T>,
    idx_b: &[Label],
) -> Status {
    generic::sum_impl(alpha, a, idx_a, beta, b, idx_b)
}

pub(crate) fn kernel_dot<T: Scalar>(
    a: &TensorView<T>,
    idx_a: &[Label],
    b: &TensorView<T>,
    idx_b: &[Label],
    val: &mut T,
) -> Status {
    generic::dot_impl(a, idx_a, b, idx_b, val)
}

pub(crate) fn kernel_scale<T: Scalar>(
    alpha: T,
    a: &mut TensorViewMut<T>,
    idx_a: &[Label],
) -> Status {
    generic::scale_impl(alpha, a, idx_a)
}

pub(crate) fn kernel_reduce<T: Scalar>(
    op: ReduceOp,
    a: &TensorView<T>,
    idx_a: &[Label],
    val: &mut T,
    pos: &mut Stride,
) -> Status {
    generic::reduce_impl(op, a, idx_a, val, pos)
}
