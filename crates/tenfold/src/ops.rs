//! Tensor operation primitives.
//!
//! Every primitive has the same shape: validate the label partition,
//! diagonalize each operand, jointly fold all operands, and hand the
//! normalized views to the back-end kernel. Only the permitted
//! partition and the kernel differ between operations.
//!
//! Accumulating operations take `alpha` (multiplier on the operand
//! product) and `beta` (multiplier on the destination before
//! accumulation); `beta == 0` means "overwrite, do not read", so a
//! destination holding NaN/Inf is safe to target.
//!
//! Precondition violations (wrong index-string length, inconsistent
//! label lengths, a label partition the operation does not permit)
//! abort with a panic diagnostic; kernel statuses are returned
//! unchanged, 0 meaning success.

use crate::backend;
use crate::diagonal::diagonal_desc;
use crate::fold::{fold2_desc, fold3_desc, fold_desc, Desc};
use crate::labels::{to_labels, Label};
use crate::scalar::Scalar;
use crate::validate::{check_indices_1, check_indices_2, check_indices_3};
use crate::view::{Extent, Stride, TensorView, TensorViewMut};

/// Kernel status; 0 on success.
pub type Status = i32;

/// Reduction operation selector for [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    Sum,
    SumAbs,
    Max,
    Min,
    MaxAbs,
    MinAbs,
    Norm2,
}

fn normalized_desc(len: &[Extent], stride: &[Stride], idx: &[Label]) -> Desc {
    let (dlen, dstride, didx) = diagonal_desc(len, stride, idx);
    let (flen, fstrides, fidx) = fold_desc(&dlen, &[&dstride], &didx);
    Desc {
        len: flen,
        stride: fstrides.into_iter().next().unwrap(),
        idx: fidx,
    }
}

type TernaryKernel<T> = fn(
    T,
    &TensorView<T>,
    &[Label],
    &TensorView<T>,
    &[Label],
    T,
    &mut TensorViewMut<T>,
    &[Label],
) -> Status;

#[allow(clippy::too_many_arguments)]
fn mult_like<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
    beta: T,
    c: TensorViewMut<'_, T>,
    idx_c: &str,
    permitted: [bool; 7],
    kernel: TernaryKernel<T>,
) -> Status {
    let la = to_labels(idx_a);
    let lb = to_labels(idx_b);
    let lc = to_labels(idx_c);
    let [a_only, b_only, c_only, ab, ac, bc, abc] = permitted;
    check_indices_3(
        a.lengths(),
        &la,
        b.lengths(),
        &lb,
        c.lengths(),
        &lc,
        a_only,
        b_only,
        c_only,
        ab,
        ac,
        bc,
        abc,
    );

    let (alen, astride, aidx) = diagonal_desc(a.lengths(), a.strides(), &la);
    let (blen, bstride, bidx) = diagonal_desc(b.lengths(), b.strides(), &lb);
    let (clen, cstride, cidx) = diagonal_desc(c.lengths(), c.strides(), &lc);
    let (da, db, dc) = fold3_desc(
        &Desc { len: alen, stride: astride, idx: aidx },
        &Desc { len: blen, stride: bstride, idx: bidx },
        &Desc { len: clen, stride: cstride, idx: cidx },
    );

    let a = a.with_shape(&da.len, &da.stride);
    let b = b.with_shape(&db.len, &db.stride);
    let mut c = c.with_shape(&dc.len, &dc.stride);
    kernel(alpha, &a, &da.idx, &b, &db.idx, beta, &mut c, &dc.idx)
}

type BinaryKernel<T> = fn(
    T,
    &TensorView<T>,
    &[Label],
    T,
    &mut TensorViewMut<T>,
    &[Label],
) -> Status;

#[allow(clippy::too_many_arguments)]
fn sum_like<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    beta: T,
    b: TensorViewMut<'_, T>,
    idx_b: &str,
    permitted: [bool; 3],
    kernel: BinaryKernel<T>,
) -> Status {
    let la = to_labels(idx_a);
    let lb = to_labels(idx_b);
    let [a_only, b_only, ab] = permitted;
    check_indices_2(a.lengths(), &la, b.lengths(), &lb, a_only, b_only, ab);

    let (alen, astride, aidx) = diagonal_desc(a.lengths(), a.strides(), &la);
    let (blen, bstride, bidx) = diagonal_desc(b.lengths(), b.strides(), &lb);
    let (da, db) = fold2_desc(
        &Desc { len: alen, stride: astride, idx: aidx },
        &Desc { len: blen, stride: bstride, idx: bidx },
    );

    let a = a.with_shape(&da.len, &da.stride);
    let mut b = b.with_shape(&db.len, &db.stride);
    kernel(alpha, &a, &da.idx, beta, &mut b, &db.idx)
}

/// Multiply two tensors together and sum onto a third:
/// `C[idx_C] = α Σ A[idx_A] B[idx_B] + β C[idx_C]`.
///
/// The most general ternary form: every label partition class is
/// permitted, so contraction, weighting, outer products, traces,
/// transposes, and replication may occur in any combination.
#[allow(clippy::too_many_arguments)]
pub fn mult<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
    beta: T,
    c: TensorViewMut<'_, T>,
    idx_c: &str,
) -> Status {
    mult_like(
        alpha,
        a,
        idx_a,
        b,
        idx_b,
        beta,
        c,
        idx_c,
        [true, true, true, true, true, true, true],
        backend::kernel_mult,
    )
}

/// Contract two tensors into a third:
/// `C[ab...cd...] = α Σ_ef A[ab...ef...] B[ef...cd...] + β C[...]`.
///
/// Every label must be shared by exactly two operands; labels shared by
/// A and B are summed over. With no summed labels this reduces to an
/// outer product.
///
/// # Examples
///
/// ```
/// use tenfold::{contract, TensorView, TensorViewMut};
///
/// // C[i,j] = A[i,k] * B[k,j], column-major 2x2 operands.
/// let a = [1.0, 3.0, 2.0, 4.0]; // [[1, 2], [3, 4]]
/// let b = [5.0, 7.0, 6.0, 8.0]; // [[5, 6], [7, 8]]
/// let mut c = [0.0; 4];
///
/// let av = TensorView::from_slice(&a, &[2, 2], &[1, 2]).unwrap();
/// let bv = TensorView::from_slice(&b, &[2, 2], &[1, 2]).unwrap();
/// let cv = TensorViewMut::from_slice(&mut c, &[2, 2], &[1, 2]).unwrap();
///
/// assert_eq!(contract(1.0, av, "ik", bv, "kj", 0.0, cv, "ij"), 0);
/// assert_eq!(c, [19.0, 43.0, 22.0, 50.0]); // [[19, 22], [43, 50]]
/// ```
#[allow(clippy::too_many_arguments)]
pub fn contract<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
    beta: T,
    c: TensorViewMut<'_, T>,
    idx_c: &str,
) -> Status {
    mult_like(
        alpha,
        a,
        idx_a,
        b,
        idx_b,
        beta,
        c,
        idx_c,
        [false, false, false, true, true, true, false],
        backend::kernel_contract,
    )
}

/// Weight a tensor by a second and sum onto a third:
/// `C[ab...cd...ef...] = α A[ab...ef...] B[ef...cd...] + β C[...]`.
///
/// No labels are summed over; the weighting labels appear in all three
/// operands.
#[allow(clippy::too_many_arguments)]
pub fn weight<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
    beta: T,
    c: TensorViewMut<'_, T>,
    idx_c: &str,
) -> Status {
    mult_like(
        alpha,
        a,
        idx_a,
        b,
        idx_b,
        beta,
        c,
        idx_c,
        [false, false, false, false, true, true, true],
        backend::kernel_weight,
    )
}

/// Sum the outer product of two tensors onto a third:
/// `C[ab...cd...] = α A[ab...] B[cd...] + β C[...]`.
#[allow(clippy::too_many_arguments)]
pub fn outer_prod<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
    beta: T,
    c: TensorViewMut<'_, T>,
    idx_c: &str,
) -> Status {
    mult_like(
        alpha,
        a,
        idx_a,
        b,
        idx_b,
        beta,
        c,
        idx_c,
        [false, false, false, false, true, true, false],
        backend::kernel_outer_prod,
    )
}

/// Sum a tensor onto a second: `B[idx_B] = α Σ A[idx_A] + β B[idx_B]`.
///
/// The general unary form: traces, transposes, and replication may occur
/// in any combination.
pub fn sum<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    beta: T,
    b: TensorViewMut<'_, T>,
    idx_b: &str,
) -> Status {
    sum_like(
        alpha,
        a,
        idx_a,
        beta,
        b,
        idx_b,
        [true, true, true],
        backend::kernel_sum,
    )
}

/// Sum over (semi)diagonal elements of a tensor and sum onto a second:
/// `B[ab...] = α Σ_kl A[ab...k*l*...] + β B[ab...]`, where the labels
/// appearing only in A are traced over.
pub fn trace<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    beta: T,
    b: TensorViewMut<'_, T>,
    idx_b: &str,
) -> Status {
    sum_like(
        alpha,
        a,
        idx_a,
        beta,
        b,
        idx_b,
        [true, false, true],
        backend::kernel_trace,
    )
}

/// Replicate a tensor and sum onto a second:
/// `B[ab...c*d*...] = α A[ab...] + β B[...]`.
///
/// # Examples
///
/// ```
/// use tenfold::{replicate, TensorView, TensorViewMut};
///
/// let a = [10.0, 20.0];
/// let mut b = [0.0; 6];
/// let av = TensorView::from_slice(&a, &[2], &[1]).unwrap();
/// let bv = TensorViewMut::from_slice(&mut b, &[2, 3], &[1, 2]).unwrap();
///
/// assert_eq!(replicate(1.0, av, "i", 0.0, bv, "ij"), 0);
/// assert_eq!(b, [10.0, 20.0, 10.0, 20.0, 10.0, 20.0]);
/// ```
pub fn replicate<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    beta: T,
    b: TensorViewMut<'_, T>,
    idx_b: &str,
) -> Status {
    sum_like(
        alpha,
        a,
        idx_a,
        beta,
        b,
        idx_b,
        [false, true, true],
        backend::kernel_replicate,
    )
}

/// Transpose a tensor and sum onto a second:
/// `B[P(ab...)] = α A[ab...] + β B[P(ab...)]` for a permutation `P`.
pub fn transpose<T: Scalar>(
    alpha: T,
    a: TensorView<'_, T>,
    idx_a: &str,
    beta: T,
    b: TensorViewMut<'_, T>,
    idx_b: &str,
) -> Status {
    sum_like(
        alpha,
        a,
        idx_a,
        beta,
        b,
        idx_b,
        [false, false, true],
        backend::kernel_transpose,
    )
}

/// Dot product of two tensors over fully shared labels; the scalar
/// result is written to `val`.
pub fn dot<T: Scalar>(
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
    val: &mut T,
) -> Status {
    let la = to_labels(idx_a);
    let lb = to_labels(idx_b);
    check_indices_2(a.lengths(), &la, b.lengths(), &lb, false, false, true);

    let (alen, astride, aidx) = diagonal_desc(a.lengths(), a.strides(), &la);
    let (blen, bstride, bidx) = diagonal_desc(b.lengths(), b.strides(), &lb);
    let (da, db) = fold2_desc(
        &Desc { len: alen, stride: astride, idx: aidx },
        &Desc { len: blen, stride: bstride, idx: bidx },
    );

    let a = a.with_shape(&da.len, &da.stride);
    let b = b.with_shape(&db.len, &db.stride);
    backend::kernel_dot(&a, &da.idx, &b, &db.idx, val)
}

/// Convenience form of [`dot`] returning the value directly.
pub fn dot_value<T: Scalar>(
    a: TensorView<'_, T>,
    idx_a: &str,
    b: TensorView<'_, T>,
    idx_b: &str,
) -> T {
    let mut val = T::zero();
    dot(a, idx_a, b, idx_b, &mut val);
    val
}

/// Scale a tensor in place: `A[idx_A] = α A[idx_A]`.
///
/// `alpha == 0` overwrites with zeros without reading.
pub fn scale<T: Scalar>(alpha: T, a: TensorViewMut<'_, T>, idx_a: &str) -> Status {
    let la = to_labels(idx_a);
    check_indices_1(a.lengths(), &la);

    let d = normalized_desc(a.lengths(), a.strides(), &la);
    let mut a = a.with_shape(&d.len, &d.stride);
    backend::kernel_scale(alpha, &mut a, &d.idx)
}

/// Reduce a tensor to a scalar.
///
/// Writes the result to `val`. For `Max`, `Min`, `MaxAbs`, and `MinAbs`
/// the element offset of the extremum (in elements from the normalized
/// input's data pointer) is written to `pos`; other reductions set it
/// to -1.
pub fn reduce<T: Scalar>(
    op: ReduceOp,
    a: TensorView<'_, T>,
    idx_a: &str,
    val: &mut T,
    pos: &mut Stride,
) -> Status {
    let la = to_labels(idx_a);
    check_indices_1(a.lengths(), &la);

    let d = normalized_desc(a.lengths(), a.strides(), &la);
    let a = a.with_shape(&d.len, &d.stride);
    backend::kernel_reduce(op, &a, &d.idx, val, pos)
}

/// Convenience form of [`reduce`] returning `(value, offset)` directly.
pub fn reduce_value<T: Scalar>(op: ReduceOp, a: TensorView<'_, T>, idx_a: &str) -> (T, Stride) {
    let mut val = T::zero();
    let mut pos: Stride = -1;
    reduce(op, a, idx_a, &mut val, &mut pos);
    (val, pos)
}
