//! C API for tenfold.
//!
//! Raw-pointer entry points, one per element type and operation, for
//! calling the tensor primitives from C, Fortran, Julia, or Python.
//! Each function accepts `(ptr, ndim, len, stride, idx)` tuples, copies
//! the shape arrays into owned vectors, constructs views, and forwards
//! to the core. Core precondition panics are caught at the boundary and
//! reported as a status code.
//!
//! Functions are prefixed by element type in BLAS style: `tf_s_*`
//! (f32), `tf_d_*` (f64), `tf_c_*` (complex f32), `tf_z_*` (complex
//! f64).

use libc::{c_char, c_int, size_t};
use std::panic::catch_unwind;
use tenfold::{c32, c64, ReduceOp, TensorView, TensorViewMut};

pub type StatusCode = c_int;

pub const TF_SUCCESS: StatusCode = 0;
pub const TF_INVALID_ARGUMENT: StatusCode = -1;
pub const TF_PRECONDITION_VIOLATION: StatusCode = -2;

pub const TF_REDUCE_SUM: c_int = 0;
pub const TF_REDUCE_SUM_ABS: c_int = 1;
pub const TF_REDUCE_MAX: c_int = 2;
pub const TF_REDUCE_MIN: c_int = 3;
pub const TF_REDUCE_MAX_ABS: c_int = 4;
pub const TF_REDUCE_MIN_ABS: c_int = 5;
pub const TF_REDUCE_NORM_2: c_int = 6;

fn reduce_op(code: c_int) -> Option<ReduceOp> {
    match code {
        TF_REDUCE_SUM => Some(ReduceOp::Sum),
        TF_REDUCE_SUM_ABS => Some(ReduceOp::SumAbs),
        TF_REDUCE_MAX => Some(ReduceOp::Max),
        TF_REDUCE_MIN => Some(ReduceOp::Min),
        TF_REDUCE_MAX_ABS => Some(ReduceOp::MaxAbs),
        TF_REDUCE_MIN_ABS => Some(ReduceOp::MinAbs),
        TF_REDUCE_NORM_2 => Some(ReduceOp::Norm2),
        _ => None,
    }
}

/// Shape pointers may be null only for rank-0 operands.
fn shape_ok(ndim: size_t, len: *const i64, stride: *const i64, idx: *const c_char) -> bool {
    ndim == 0 || (!len.is_null() && !stride.is_null() && !idx.is_null())
}

/// Copy raw shape arrays into owned vectors and an index string.
///
/// # Safety
///
/// The pointers must be valid for `ndim` reads (checked non-null by the
/// caller via [`shape_ok`]).
unsafe fn shape_args(
    ndim: size_t,
    len: *const i64,
    stride: *const i64,
    idx: *const c_char,
) -> (Vec<i64>, Vec<i64>, String) {
    if ndim == 0 {
        return (Vec::new(), Vec::new(), String::new());
    }
    let len = unsafe { std::slice::from_raw_parts(len, ndim) }.to_vec();
    let stride = unsafe { std::slice::from_raw_parts(stride, ndim) }.to_vec();
    let idx = unsafe { std::slice::from_raw_parts(idx, ndim) }
        .iter()
        .map(|&ch| ch as u8 as char)
        .collect();
    (len, stride, idx)
}

macro_rules! tensor_capi {
    ($ty:ty, $mult:ident, $contract:ident, $weight:ident, $outer_prod:ident,
     $sum:ident, $trace:ident, $replicate:ident, $transpose:ident,
     $dot:ident, $scale:ident, $reduce:ident) => {
        tensor_capi!(@ternary $ty, $mult, mult);
        tensor_capi!(@ternary $ty, $contract, contract);
        tensor_capi!(@ternary $ty, $weight, weight);
        tensor_capi!(@ternary $ty, $outer_prod, outer_prod);
        tensor_capi!(@binary $ty, $sum, sum);
        tensor_capi!(@binary $ty, $trace, trace);
        tensor_capi!(@binary $ty, $replicate, replicate);
        tensor_capi!(@binary $ty, $transpose, transpose);

        #[unsafe(no_mangle)]
        pub extern "C" fn $dot(
            a: *const $ty,
            ndim_a: size_t,
            len_a: *const i64,
            stride_a: *const i64,
            idx_a: *const c_char,
            b: *const $ty,
            ndim_b: size_t,
            len_b: *const i64,
            stride_b: *const i64,
            idx_b: *const c_char,
            val: *mut $ty,
        ) -> StatusCode {
            if a.is_null()
                || b.is_null()
                || val.is_null()
                || !shape_ok(ndim_a, len_a, stride_a, idx_a)
                || !shape_ok(ndim_b, len_b, stride_b, idx_b)
            {
                return TF_INVALID_ARGUMENT;
            }

            let result = catch_unwind(|| unsafe {
                let (la, sa, ia) = shape_args(ndim_a, len_a, stride_a, idx_a);
                let (lb, sb, ib) = shape_args(ndim_b, len_b, stride_b, idx_b);
                let av = TensorView::from_raw_parts(a, &la, &sa);
                let bv = TensorView::from_raw_parts(b, &lb, &sb);
                let mut out = <$ty as tenfold::Scalar>::zero();
                let status = tenfold::dot(av, &ia, bv, &ib, &mut out);
                *val = out;
                status
            });
            result.unwrap_or(TF_PRECONDITION_VIOLATION)
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $scale(
            alpha: $ty,
            a: *mut $ty,
            ndim_a: size_t,
            len_a: *const i64,
            stride_a: *const i64,
            idx_a: *const c_char,
        ) -> StatusCode {
            if a.is_null() || !shape_ok(ndim_a, len_a, stride_a, idx_a) {
                return TF_INVALID_ARGUMENT;
            }

            let result = catch_unwind(|| unsafe {
                let (la, sa, ia) = shape_args(ndim_a, len_a, stride_a, idx_a);
                let av = TensorViewMut::from_raw_parts(a, &la, &sa);
                tenfold::scale(alpha, av, &ia)
            });
            result.unwrap_or(TF_PRECONDITION_VIOLATION)
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn $reduce(
            op: c_int,
            a: *const $ty,
            ndim_a: size_t,
            len_a: *const i64,
            stride_a: *const i64,
            idx_a: *const c_char,
            val: *mut $ty,
            pos: *mut i64,
        ) -> StatusCode {
            if a.is_null() || val.is_null() || pos.is_null() || !shape_ok(ndim_a, len_a, stride_a, idx_a)
            {
                return TF_INVALID_ARGUMENT;
            }
            let Some(op) = reduce_op(op) else {
                return TF_INVALID_ARGUMENT;
            };

            let result = catch_unwind(|| unsafe {
                let (la, sa, ia) = shape_args(ndim_a, len_a, stride_a, idx_a);
                let av = TensorView::from_raw_parts(a, &la, &sa);
                let mut out = <$ty as tenfold::Scalar>::zero();
                let mut out_pos: i64 = -1;
                let status = tenfold::reduce(op, av, &ia, &mut out, &mut out_pos);
                *val = out;
                *pos = out_pos;
                status
            });
            result.unwrap_or(TF_PRECONDITION_VIOLATION)
        }
    };

    (@ternary $ty:ty, $name:ident, $op:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            alpha: $ty,
            a: *const $ty,
            ndim_a: size_t,
            len_a: *const i64,
            stride_a: *const i64,
            idx_a: *const c_char,
            b: *const $ty,
            ndim_b: size_t,
            len_b: *const i64,
            stride_b: *const i64,
            idx_b: *const c_char,
            beta: $ty,
            c: *mut $ty,
            ndim_c: size_t,
            len_c: *const i64,
            stride_c: *const i64,
            idx_c: *const c_char,
        ) -> StatusCode {
            if a.is_null()
                || b.is_null()
                || c.is_null()
                || !shape_ok(ndim_a, len_a, stride_a, idx_a)
                || !shape_ok(ndim_b, len_b, stride_b, idx_b)
                || !shape_ok(ndim_c, len_c, stride_c, idx_c)
            {
                return TF_INVALID_ARGUMENT;
            }

            let result = catch_unwind(|| unsafe {
                let (la, sa, ia) = shape_args(ndim_a, len_a, stride_a, idx_a);
                let (lb, sb, ib) = shape_args(ndim_b, len_b, stride_b, idx_b);
                let (lc, sc, ic) = shape_args(ndim_c, len_c, stride_c, idx_c);
                let av = TensorView::from_raw_parts(a, &la, &sa);
                let bv = TensorView::from_raw_parts(b, &lb, &sb);
                let cv = TensorViewMut::from_raw_parts(c, &lc, &sc);
                tenfold::$op(alpha, av, &ia, bv, &ib, beta, cv, &ic)
            });
            result.unwrap_or(TF_PRECONDITION_VIOLATION)
        }
    };

    (@binary $ty:ty, $name:ident, $op:ident) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(
            alpha: $ty,
            a: *const $ty,
            ndim_a: size_t,
            len_a: *const i64,
            stride_a: *const i64,
            idx_a: *const c_char,
            beta: $ty,
            b: *mut $ty,
            ndim_b: size_t,
            len_b: *const i64,
            stride_b: *const i64,
            idx_b: *const c_char,
        ) -> StatusCode {
            if a.is_null()
                || b.is_null()
                || !shape_ok(ndim_a, len_a, stride_a, idx_a)
                || !shape_ok(ndim_b, len_b, stride_b, idx_b)
            {
                return TF_INVALID_ARGUMENT;
            }

            let result = catch_unwind(|| unsafe {
                let (la, sa, ia) = shape_args(ndim_a, len_a, stride_a, idx_a);
                let (lb, sb, ib) = shape_args(ndim_b, len_b, stride_b, idx_b);
                let av = TensorView::from_raw_parts(a, &la, &sa);
                let bv = TensorViewMut::from_raw_parts(b, &lb, &sb);
                tenfold::$op(alpha, av, &ia, beta, bv, &ib)
            });
            result.unwrap_or(TF_PRECONDITION_VIOLATION)
        }
    };
}

tensor_capi!(
    f32, tf_s_mult, tf_s_contract, tf_s_weight, tf_s_outer_prod, tf_s_sum, tf_s_trace,
    tf_s_replicate, tf_s_transpose, tf_s_dot, tf_s_scale, tf_s_reduce
);
tensor_capi!(
    f64, tf_d_mult, tf_d_contract, tf_d_weight, tf_d_outer_prod, tf_d_sum, tf_d_trace,
    tf_d_replicate, tf_d_transpose, tf_d_dot, tf_d_scale, tf_d_reduce
);
tensor_capi!(
    c32, tf_c_mult, tf_c_contract, tf_c_weight, tf_c_outer_prod, tf_c_sum, tf_c_trace,
    tf_c_replicate, tf_c_transpose, tf_c_dot, tf_c_scale, tf_c_reduce
);
tensor_capi!(
    c64, tf_z_mult, tf_z_contract, tf_z_weight, tf_z_outer_prod, tf_z_sum, tf_z_trace,
    tf_z_replicate, tf_z_transpose, tf_z_dot, tf_z_scale, tf_z_reduce
);
