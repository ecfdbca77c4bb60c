//! Owned dense tensors.
//!
//! [`Tensor`] pairs a flat column-major buffer with an extents/strides
//! descriptor. It plays two roles for the permutation engine: it is the
//! storage allocator behind the allocating overload, and its
//! [`view`](Tensor::view) / [`view_mut`](Tensor::view_mut) methods produce
//! the non-owning descriptors the engine actually operates on.

use smallvec::SmallVec;
use std::marker::PhantomData;

use crate::error::TensorError;
use crate::permutation::Permutation;
use crate::scalar::Scalar;
use crate::storage::{Dense, TensorStorage};
use crate::strides::{cartesian_to_linear, column_major_strides};
use crate::view::{TensorView, TensorViewMut};

/// An owned n-dimensional tensor over a storage layout `StoreT`.
///
/// [`Dense`] is the only layout shipped here; the type parameter keeps the
/// element buffer swappable without touching the permutation engine, which
/// only ever sees views.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<ElT: Scalar, StoreT: TensorStorage<ElT> = Dense<ElT>> {
    storage: StoreT,
    extents: Vec<usize>,
    strides: Vec<usize>,
    _phantom: PhantomData<ElT>,
}

/// Tensor over [`Dense`] storage, the common case.
pub type DenseTensor<ElT> = Tensor<ElT, Dense<ElT>>;

impl<ElT: Scalar, StoreT: TensorStorage<ElT>> Tensor<ElT, StoreT> {
    /// Zero-initialized tensor with the given extents.
    ///
    /// Rank 0 (empty extents) is a scalar holding one element.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenperm::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.extents(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(extents: &[usize]) -> Self {
        let size: usize = extents.iter().product();
        Self {
            storage: StoreT::zeros(size.max(1)),
            extents: extents.to_vec(),
            strides: column_major_strides(extents),
            _phantom: PhantomData,
        }
    }

    /// Tensor filled with ones.
    pub fn ones(extents: &[usize]) -> Self {
        let mut t = Self::zeros(extents);
        t.fill(ElT::one());
        t
    }

    /// Wrap a column-major element vector in a tensor with the given
    /// extents.
    ///
    /// # Errors
    ///
    /// Fails when the vector length is not the product of the extents (one
    /// element for rank 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use tenperm::{DenseTensor, Tensor};
    ///
    /// let t: DenseTensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[1, 0]), Some(&2.0)); // column-major: [1, 0] is the second element
    /// assert_eq!(t.get(&[0, 1]), Some(&3.0));
    /// ```
    pub fn from_vec(data: Vec<ElT>, extents: &[usize]) -> Result<Self, TensorError> {
        let size = extents.iter().product::<usize>().max(1);
        if data.len() != size {
            return Err(TensorError::ShapeMismatch {
                expected: size,
                actual: data.len(),
            });
        }
        Ok(Self {
            storage: StoreT::from_vec(data),
            extents: extents.to_vec(),
            strides: column_major_strides(extents),
            _phantom: PhantomData,
        })
    }

    /// Per-axis extents.
    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Number of elements held by the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Column-major strides, in elements.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The element buffer in storage order.
    #[inline]
    pub fn data(&self) -> &[ElT] {
        self.storage.as_slice()
    }

    /// The element buffer in storage order, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        self.storage.as_mut_slice()
    }

    /// Element at a linear storage index.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<&ElT> {
        self.storage.as_slice().get(i)
    }

    /// Storage position of the element at `indices`, checking the index
    /// count and every extent.
    fn offset_of(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.rank() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: indices.len(),
            });
        }
        for (&idx, &extent) in indices.iter().zip(self.extents.iter()) {
            if idx >= extent {
                return Err(TensorError::IndexOutOfBounds {
                    index: idx,
                    dim_size: extent,
                });
            }
        }
        Ok(cartesian_to_linear(indices, &self.strides))
    }

    /// Element at the given cartesian indices, or `None` when an index is
    /// out of its extent or the index count is wrong.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        let off = self.offset_of(indices).ok()?;
        self.get_linear(off)
    }

    /// Write the element at the given cartesian indices.
    ///
    /// # Errors
    ///
    /// Fails when an index is out of its extent or the index count is
    /// wrong.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<(), TensorError> {
        let off = self.offset_of(indices)?;
        self.storage.as_mut_slice()[off] = value;
        Ok(())
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: ElT) {
        for x in self.storage.as_mut_slice() {
            *x = value;
        }
    }

    /// Borrow the tensor as an immutable strided view.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenperm::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let v = t.view();
    /// assert_eq!(v.extents(), &[2, 2]);
    /// assert_eq!(v.get(&[1, 1]), Some(&4.0));
    /// ```
    pub fn view(&self) -> TensorView<'_, ElT> {
        let strides: SmallVec<[isize; 8]> = self.strides.iter().map(|&s| s as isize).collect();
        TensorView::new(self.storage.as_slice(), &self.extents, &strides, 0)
            .expect("owned tensor views are always in bounds")
    }

    /// Borrow the tensor as a mutable strided view.
    pub fn view_mut(&mut self) -> TensorViewMut<'_, ElT> {
        let strides: SmallVec<[isize; 8]> = self.strides.iter().map(|&s| s as isize).collect();
        TensorViewMut::new(self.storage.as_mut_slice(), &self.extents, &strides, 0)
            .expect("owned tensor views are always in bounds")
    }
}

impl<ElT: Scalar> Tensor<ElT, Dense<ElT>> {
    /// Permute the axes of the tensor, returning a newly allocated result.
    ///
    /// `perm.dest(j)` gives the destination axis of source axis `j`.
    ///
    /// # Errors
    ///
    /// Fails when the permutation size does not match the rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenperm::{Permutation, Tensor};
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let p = Permutation::from_dest(&[1, 0]).unwrap();
    ///
    /// let t2 = t.permutedims(&p).unwrap();
    /// assert_eq!(t2.extents(), &[3, 2]);
    /// for i in 0..2 {
    ///     for j in 0..3 {
    ///         assert_eq!(t.get(&[i, j]), t2.get(&[j, i]));
    ///     }
    /// }
    /// ```
    pub fn permutedims(&self, perm: &Permutation) -> Result<Self, TensorError> {
        crate::operations::permutedims(self, perm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    fn check_zeros<T: Scalar>() {
        let t: Tensor<T> = Tensor::zeros(&[2, 3]);
        assert_eq!(t.extents(), &[2, 3]);
        assert_eq!(t.rank(), 2);
        assert_eq!(t.len(), 6);
        assert_eq!(t.strides(), &[1, 2]);
        for i in 0..6 {
            assert_eq!(*t.get_linear(i).unwrap(), T::zero());
        }
    }

    #[test]
    fn test_zeros_f64() {
        check_zeros::<f64>();
    }

    #[test]
    fn test_zeros_c64() {
        check_zeros::<c64>();
    }

    #[test]
    fn test_from_vec_column_major() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t: DenseTensor<f64> = Tensor::from_vec(data, &[2, 3]).unwrap();

        assert_eq!(t.get(&[0, 0]), Some(&1.0));
        assert_eq!(t.get(&[1, 0]), Some(&2.0));
        assert_eq!(t.get(&[0, 1]), Some(&3.0));
        assert_eq!(t.get(&[1, 1]), Some(&4.0));
        assert_eq!(t.get(&[0, 2]), Some(&5.0));
        assert_eq!(t.get(&[1, 2]), Some(&6.0));
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let data = vec![1.0, 2.0, 3.0];
        assert!(Tensor::<f64>::from_vec(data, &[2, 3]).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        assert_eq!(t.get(&[2, 0]), None);
        assert_eq!(t.get(&[0, 3]), None);
        assert_eq!(t.get(&[0]), None);
        assert_eq!(t.get(&[0, 0, 0]), None);
    }

    #[test]
    fn test_set() {
        let mut t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        t.set(&[1, 2], 42.0).unwrap();
        assert_eq!(t.get(&[1, 2]), Some(&42.0));

        assert!(matches!(
            t.set(&[2, 0], 0.0),
            Err(TensorError::IndexOutOfBounds { index: 2, dim_size: 2 })
        ));
        assert!(matches!(
            t.set(&[0], 0.0),
            Err(TensorError::WrongNumberOfIndices { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_fill_and_ones() {
        let mut t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        t.fill(5.0);
        for i in 0..6 {
            assert_eq!(*t.get_linear(i).unwrap(), 5.0);
        }
        let ones: Tensor<f64> = Tensor::ones(&[4]);
        assert_eq!(ones.data(), &[1.0; 4]);
    }

    #[test]
    fn test_scalar_tensor() {
        let t: Tensor<f64> = Tensor::zeros(&[]);
        assert_eq!(t.rank(), 0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.extents(), &[]);
    }

    #[test]
    fn test_view_matches_tensor() {
        let t: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let v = t.view();
        assert_eq!(v.rank(), 2);
        assert_eq!(v.size(), 6);
        assert_eq!(v.strides(), &[1, 2]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(v.get(&[i, j]), t.get(&[i, j]));
            }
        }
    }

    #[test]
    fn test_view_mut_writes_through() {
        let mut t: Tensor<f64> = Tensor::zeros(&[2, 2]);
        {
            let mut v = t.view_mut();
            *v.get_mut(&[0, 1]).unwrap() = 9.0;
        }
        assert_eq!(t.get(&[0, 1]), Some(&9.0));
    }

    #[test]
    fn test_scalar_tensor_view() {
        let t: Tensor<f64> = Tensor::from_vec(vec![7.0], &[]).unwrap();
        let v = t.view();
        assert_eq!(v.rank(), 0);
        assert_eq!(v.get(&[]), Some(&7.0));
    }
}
