//! Scalar trait for tensor element types.

use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::AddAssign;

pub use num_complex::Complex64 as c64;

/// Trait for scalar types stored in owned tensors.
///
/// The permutation engine itself only needs `Copy` elements; this trait adds
/// the bounds required by tensor construction (`zeros`, `ones`) and by the
/// standard `accumulate` combine function.
pub trait Scalar:
    Copy + Debug + Default + PartialEq + Zero + One + AddAssign + Send + Sync + 'static
{
}

impl Scalar for f64 {}

impl Scalar for c64 {}
