//! Scalar trait for tensor element types.

use num_traits::Float;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

#[allow(non_camel_case_types)]
pub type c32 = num_complex::Complex32;
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex64;

/// Trait for scalar types supported by tenfold.
///
/// Covers the four element types the kernels are instantiated for
/// (`f32`, `f64`, `c32`, `c64`) with the small amount of arithmetic the
/// reference kernels and reductions need.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + MulAssign
    + 'static
{
    /// The real type associated with this scalar.
    type Real: Float + Debug + Default;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Embeds a real value into this scalar type.
    fn from_real(re: Self::Real) -> Self;

    /// Real part.
    fn real(self) -> Self::Real;

    /// Modulus.
    fn abs(self) -> Self::Real;

    /// Squared modulus.
    fn abs_sqr(self) -> Self::Real;

    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

impl Scalar for f32 {
    type Real = f32;

    fn one() -> Self {
        1.0
    }

    fn from_real(re: f32) -> Self {
        re
    }

    fn real(self) -> f32 {
        self
    }

    fn abs(self) -> f32 {
        f32::abs(self)
    }

    fn abs_sqr(self) -> f32 {
        self * self
    }
}

impl Scalar for f64 {
    type Real = f64;

    fn one() -> Self {
        1.0
    }

    fn from_real(re: f64) -> Self {
        re
    }

    fn real(self) -> f64 {
        self
    }

    fn abs(self) -> f64 {
        f64::abs(self)
    }

    fn abs_sqr(self) -> f64 {
        self * self
    }
}

impl Scalar for c32 {
    type Real = f32;

    fn one() -> Self {
        c32::new(1.0, 0.0)
    }

    fn from_real(re: f32) -> Self {
        c32::new(re, 0.0)
    }

    fn real(self) -> f32 {
        self.re
    }

    fn abs(self) -> f32 {
        self.norm()
    }

    fn abs_sqr(self) -> f32 {
        self.norm_sqr()
    }
}

impl Scalar for c64 {
    type Real = f64;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    fn from_real(re: f64) -> Self {
        c64::new(re, 0.0)
    }

    fn real(self) -> f64 {
        self.re
    }

    fn abs(self) -> f64 {
        self.norm()
    }

    fn abs_sqr(self) -> f64 {
        self.norm_sqr()
    }
}
