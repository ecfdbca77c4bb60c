//! Stride computation for owned tensors.
//!
//! Owned storage is column-major (Fortran order): axis 0 is contiguous and
//! each later axis strides over the product of the extents before it.

/// Column-major strides for the given extents.
///
/// Extents `[d0, d1, d2]` give strides `[1, d0, d0 * d1]`; empty extents
/// (rank 0) give no strides.
///
/// # Examples
///
/// ```
/// use tenperm::strides::column_major_strides;
///
/// assert_eq!(column_major_strides(&[3, 4, 5]), vec![1, 3, 12]);
/// assert_eq!(column_major_strides(&[2, 3]), vec![1, 2]);
/// assert_eq!(column_major_strides(&[]), Vec::<usize>::new());
/// ```
pub fn column_major_strides(extents: &[usize]) -> Vec<usize> {
    extents
        .iter()
        .scan(1, |stride, &extent| {
            let s = *stride;
            *stride *= extent;
            Some(s)
        })
        .collect()
}

/// Linear storage index of the element at `indices` under the given
/// strides.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}
