//! Non-owning strided views over caller-owned storage.
//!
//! A view is a descriptor: rank, per-axis extent, per-axis signed stride,
//! and a base offset into a borrowed slice. It never owns the elements it
//! describes. Construction validates that every offset reachable through
//! the descriptor falls inside the slice, so the permutation kernel can walk
//! raw offsets without per-element bounds checks.

use smallvec::SmallVec;

use crate::error::TensorError;

/// Validate that all offsets reachable by in-extent indices stay within
/// `[0, len)`.
fn validate_bounds(
    len: usize,
    extents: &[usize],
    strides: &[isize],
    offset: usize,
) -> Result<(), TensorError> {
    if extents.len() != strides.len() {
        return Err(TensorError::StrideCountMismatch {
            extents: extents.len(),
            strides: strides.len(),
        });
    }
    // Empty view: no element is ever addressed.
    if extents.iter().any(|&e| e == 0) {
        return Ok(());
    }
    let mut min_offset = offset as isize;
    let mut max_offset = offset as isize;
    for (&extent, &stride) in extents.iter().zip(strides.iter()) {
        if extent > 1 {
            let span = stride
                .checked_mul(extent as isize - 1)
                .ok_or(TensorError::OffsetOverflow)?;
            if span >= 0 {
                max_offset = max_offset
                    .checked_add(span)
                    .ok_or(TensorError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(span)
                    .ok_or(TensorError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 {
        return Err(TensorError::NegativeOffset);
    }
    if max_offset as usize >= len {
        return Err(TensorError::ViewOutOfBounds {
            max_offset: max_offset as usize,
            len,
        });
    }
    Ok(())
}

#[inline]
fn linear_offset(offset: usize, strides: &[isize], indices: &[usize]) -> isize {
    let mut off = offset as isize;
    for (&idx, &stride) in indices.iter().zip(strides.iter()) {
        off += idx as isize * stride;
    }
    off
}

#[inline]
fn in_extents(extents: &[usize], indices: &[usize]) -> bool {
    indices.len() == extents.len()
        && indices.iter().zip(extents.iter()).all(|(&i, &e)| i < e)
}

/// Immutable strided view over a borrowed slice.
///
/// # Examples
///
/// ```
/// use tenperm::TensorView;
///
/// // A 2x3 row-major matrix [[1, 2, 3], [4, 5, 6]].
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let v = TensorView::new(&data, &[2, 3], &[3, 1], 0).unwrap();
/// assert_eq!(v.rank(), 2);
/// assert_eq!(v.size(), 6);
/// assert_eq!(v.get(&[1, 2]), Some(&6.0));
/// ```
#[derive(Debug, Clone)]
pub struct TensorView<'a, T> {
    data: &'a [T],
    offset: usize,
    extents: SmallVec<[usize; 8]>,
    strides: SmallVec<[isize; 8]>,
}

impl<'a, T> TensorView<'a, T> {
    /// Create a view over `data` with the given extents, strides (in
    /// elements), and base offset.
    ///
    /// # Errors
    ///
    /// Fails if the number of strides differs from the number of extents,
    /// or if any in-extent index would reach outside `data`.
    pub fn new(
        data: &'a [T],
        extents: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self, TensorError> {
        validate_bounds(data.len(), extents, strides, offset)?;
        Ok(Self {
            data,
            offset,
            extents: SmallVec::from_slice(extents),
            strides: SmallVec::from_slice(strides),
        })
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Extent along one axis.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// All extents.
    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Stride along one axis, in elements.
    #[inline]
    pub fn stride(&self, axis: usize) -> isize {
        self.strides[axis]
    }

    /// All strides.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Total element count: the product of the extents. Rank 0 is a single
    /// scalar, so its size is 1.
    pub fn size(&self) -> usize {
        self.extents.iter().product()
    }

    /// Element at the given cartesian indices, or `None` when an index is
    /// out of its extent or the index count is wrong.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        if !in_extents(&self.extents, indices) {
            return None;
        }
        let off = linear_offset(self.offset, &self.strides, indices);
        self.data.get(off as usize)
    }

    /// Base pointer of the underlying slice (not of the view's offset).
    #[inline]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Storage offset of the element at `indices`, including the base
    /// offset. In bounds for in-extent indices by construction.
    #[inline]
    pub(crate) fn element_offset(&self, indices: &[usize]) -> isize {
        linear_offset(self.offset, &self.strides, indices)
    }
}

/// Mutable strided view over a borrowed slice.
///
/// The descriptor itself is immutable once constructed; only the elements
/// it addresses can be written.
#[derive(Debug)]
pub struct TensorViewMut<'a, T> {
    data: &'a mut [T],
    offset: usize,
    extents: SmallVec<[usize; 8]>,
    strides: SmallVec<[isize; 8]>,
}

impl<'a, T> TensorViewMut<'a, T> {
    /// Create a mutable view over `data` with the given extents, strides
    /// (in elements), and base offset.
    ///
    /// # Errors
    ///
    /// Fails if the number of strides differs from the number of extents,
    /// or if any in-extent index would reach outside `data`.
    pub fn new(
        data: &'a mut [T],
        extents: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self, TensorError> {
        validate_bounds(data.len(), extents, strides, offset)?;
        Ok(Self {
            data,
            offset,
            extents: SmallVec::from_slice(extents),
            strides: SmallVec::from_slice(strides),
        })
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Extent along one axis.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// All extents.
    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Stride along one axis, in elements.
    #[inline]
    pub fn stride(&self, axis: usize) -> isize {
        self.strides[axis]
    }

    /// All strides.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Total element count: the product of the extents.
    pub fn size(&self) -> usize {
        self.extents.iter().product()
    }

    /// Element at the given cartesian indices.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        if !in_extents(&self.extents, indices) {
            return None;
        }
        let off = linear_offset(self.offset, &self.strides, indices);
        self.data.get(off as usize)
    }

    /// Mutable element at the given cartesian indices.
    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut T> {
        if !in_extents(&self.extents, indices) {
            return None;
        }
        let off = linear_offset(self.offset, &self.strides, indices);
        self.data.get_mut(off as usize)
    }

    /// Base pointer of the underlying slice (not of the view's offset).
    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Storage offset of the element at `indices`, including the base
    /// offset. In bounds for in-extent indices by construction.
    #[inline]
    pub(crate) fn element_offset(&self, indices: &[usize]) -> isize {
        linear_offset(self.offset, &self.strides, indices)
    }
}
