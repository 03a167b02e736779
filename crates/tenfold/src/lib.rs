//! tenfold - einsum-style tensor operations over strided views.
//!
//! This crate is the front-end of a tensor library: it accepts
//! named-index (Einstein-convention) descriptions of tensor operations
//! over non-owning strided views, normalizes the operand shapes, and
//! dispatches to a back-end kernel.
//!
//! # Architecture
//!
//! Every primitive runs the same pipeline:
//!
//! ```text
//! validate     - repeated labels bind axes of equal length; the label
//!                partition must be one the operation permits
//! diagonalize  - repeated labels within one operand collapse into a
//!                single axis striding by the sum of the collapsed
//!                strides; length-1 axes are dropped
//! fold         - axes contiguous across *all* operands merge, jointly,
//!                class by class
//! dispatch     - the back-end kernel computes on the normalized views
//! ```
//!
//! Views are passed by value and never mutated: normalization builds new
//! descriptors over the same storage. The crate never allocates or frees
//! backing memory.
//!
//! # Example
//!
//! ```
//! use tenfold::{contract, trace, TensorView, TensorViewMut};
//!
//! // C[i,j] = A[i,k] * B[k,j] (column-major storage).
//! let a = [1.0, 3.0, 2.0, 4.0];
//! let b = [5.0, 7.0, 6.0, 8.0];
//! let mut c = [0.0; 4];
//! let av = TensorView::from_slice(&a, &[2, 2], &[1, 2]).unwrap();
//! let bv = TensorView::from_slice(&b, &[2, 2], &[1, 2]).unwrap();
//! let cv = TensorViewMut::from_slice(&mut c, &[2, 2], &[1, 2]).unwrap();
//! assert_eq!(contract(1.0, av, "ik", bv, "kj", 0.0, cv, "ij"), 0);
//!
//! // b = trace of A: repeated labels select the diagonal.
//! let av = TensorView::from_slice(&a, &[2, 2], &[1, 2]).unwrap();
//! let mut t = [0.0];
//! let tv = TensorViewMut::from_slice(&mut t, &[], &[]).unwrap();
//! assert_eq!(trace(1.0, av, "ii", 0.0, tv, ""), 0);
//! assert_eq!(t[0], 5.0);
//! ```

mod backend;
pub mod diagonal;
pub mod error;
pub mod fold;
pub mod labels;
pub mod ops;
pub mod scalar;
pub mod shapers;
pub mod strides;
mod validate;
pub mod view;

pub use diagonal::diagonal;
pub use error::TensorError;
pub use fold::{fold, fold_pair, fold_triple};
pub use labels::Label;
pub use ops::{
    contract, dot, dot_value, mult, outer_prod, reduce, reduce_value, replicate, scale, sum,
    trace, transpose, weight, ReduceOp, Status,
};
pub use scalar::{c32, c64, Scalar};
pub use shapers::{
    matricize, partition, slice, slice_back, slice_front, unpartition, unslice, unslice_back,
    unslice_front,
};
pub use strides::{
    are_compatible, are_compatible_views, are_congruent_along, sort_by_stride, tensor_size,
    tensor_storage_size,
};
pub use view::{Extent, Stride, TensorView, TensorViewMut};
