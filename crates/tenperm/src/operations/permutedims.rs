//! Axis permutation for owned tensors.

use crate::error::TensorError;
use crate::permutation::Permutation;
use crate::permute;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Permute the axes of a tensor, returning a new tensor.
///
/// `perm.dest(j)` gives the destination axis of source axis `j`.
///
/// # Errors
///
/// Returns an error if the permutation size does not match the tensor
/// rank.
///
/// # Examples
///
/// ```
/// use tenperm::operations::permutedims;
/// use tenperm::{DenseTensor, Permutation};
///
/// let t: DenseTensor<f64> =
///     DenseTensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let p = Permutation::from_dest(&[1, 0]).unwrap();
///
/// let t2 = permutedims(&t, &p).unwrap();
/// assert_eq!(t2.extents(), &[3, 2]);
/// assert_eq!(t.get(&[1, 0]), t2.get(&[0, 1]));
/// ```
pub fn permutedims<T: Scalar>(
    tensor: &DenseTensor<T>,
    perm: &Permutation,
) -> Result<DenseTensor<T>, TensorError> {
    permute::permute(&tensor.view(), perm)
}

/// Permute tensor axes into an existing destination tensor.
///
/// The destination must already have the permuted shape.
///
/// # Errors
///
/// Returns an error if the shapes are not consistent under the
/// permutation; the destination is untouched on failure.
///
/// # Examples
///
/// ```
/// use tenperm::operations::permutedims_into;
/// use tenperm::{DenseTensor, Permutation};
///
/// let src: DenseTensor<f64> =
///     DenseTensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let mut dest: DenseTensor<f64> = DenseTensor::zeros(&[3, 2]);
/// let p = Permutation::from_dest(&[1, 0]).unwrap();
///
/// permutedims_into(&mut dest, &src, &p).unwrap();
/// assert_eq!(src.get(&[1, 2]), dest.get(&[2, 1]));
/// ```
pub fn permutedims_into<T: Scalar>(
    dest: &mut DenseTensor<T>,
    src: &DenseTensor<T>,
    perm: &Permutation,
) -> Result<(), TensorError> {
    let from = src.view();
    let mut to = dest.view_mut();
    permute::permute_into(&from, perm, &mut to)
}
