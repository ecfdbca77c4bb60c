//! The axis-permutation engine.
//!
//! Moves every element of a source view to its permuted position in a
//! destination view, combining each pair through a caller-supplied binary
//! operation:
//!
//! ```text
//! permute(src, P)                    # allocating: result owns fresh storage
//!     -> permute_into(src, P, dst)   # checked, default assign
//!     -> permute_into_with(...)      # checked, explicit combine
//!     -> permute_kernel(...)         # unchecked stride-walking loop
//! ```
//!
//! The kernel picks the source axis with the largest extent, walks it in a
//! tight two-pointer inner loop, and drives an [`Odometer`] over the
//! remaining axes. This keeps the number of counter advances (relatively
//! expensive) proportional to `size / big_extent` while the cheap inner
//! loop covers the dominant axis.
//!
//! Checked entry points validate the shape preconditions and report every
//! failure before a single destination element is written. The `_unchecked`
//! twins skip validation for the hot path and state the same preconditions
//! as safety requirements.

use smallvec::{smallvec, SmallVec};
use std::ops::AddAssign;

use crate::error::TensorError;
use crate::odometer::Odometer;
use crate::permutation::Permutation;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;
use crate::view::{TensorView, TensorViewMut};

/// Standard combine function: overwrite the destination element.
#[inline]
pub fn assign<T>(dest: &mut T, src: T) {
    *dest = src;
}

/// Standard combine function: add the source element onto the destination.
#[inline]
pub fn accumulate<T: AddAssign>(dest: &mut T, src: T) {
    *dest += src;
}

/// Verify the shape preconditions shared by all checked entry points.
fn check_shapes<T>(
    from: &TensorView<'_, T>,
    p: &Permutation,
    to: &TensorViewMut<'_, T>,
) -> Result<(), TensorError> {
    let r = p.size();
    if r != from.rank() {
        return Err(TensorError::PermutationSizeMismatch {
            perm_size: r,
            rank: from.rank(),
        });
    }
    if to.rank() != from.rank() {
        return Err(TensorError::RankMismatch {
            from: from.rank(),
            to: to.rank(),
        });
    }
    if to.size() != from.size() {
        return Err(TensorError::SizeMismatch {
            from: from.size(),
            to: to.size(),
        });
    }
    for j in 0..r {
        if to.extent(p.dest(j)) != from.extent(j) {
            return Err(TensorError::ExtentMismatch {
                axis: j,
                dest_axis: p.dest(j),
                from: from.extent(j),
                to: to.extent(p.dest(j)),
            });
        }
    }
    Ok(())
}

/// The stride-walking permutation loop. No validation.
///
/// # Safety
///
/// The caller must guarantee the shape preconditions: `p.size()` equals
/// both ranks, source and destination sizes are equal, and
/// `to.extent(p.dest(j)) == from.extent(j)` for every source axis `j`.
/// With those invariants every computed offset stays inside the views'
/// validated bounds; without them the loop may read or write out of
/// bounds.
unsafe fn permute_kernel<T, F>(
    from: &TensorView<'_, T>,
    p: &Permutation,
    to: &mut TensorViewMut<'_, T>,
    mut f: F,
) where
    T: Copy,
    F: FnMut(&mut T, T),
{
    let r = p.size();

    if r == 0 {
        let from_off = from.element_offset(&[]);
        let to_off = to.element_offset(&[]);
        let to_ptr = to.as_mut_ptr();
        f(&mut *to_ptr.offset(to_off), *from.as_ptr().offset(from_off));
        return;
    }
    if from.size() == 0 {
        return;
    }

    // Largest source axis; the first axis wins ties.
    let mut big_axis = 0;
    let mut big_extent = from.extent(0);
    for j in 1..r {
        if big_extent < from.extent(j) {
            big_extent = from.extent(j);
            big_axis = j;
        }
    }

    let step_from = from.stride(big_axis);
    let step_to = to.stride(p.dest(big_axis));

    let mut c = Odometer::new(r, 0, 0);
    for j in 0..r {
        c.set_range(j, 0, from.extent(j) - 1);
    }
    // Keep the big axis pinned at zero; the inner loop advances it by
    // stepping the raw offsets directly.
    c.set_range(big_axis, 0, 0);

    // Destination descriptor data is read up front so the loop only ever
    // touches the destination through the raw pointer.
    let to_base = to.element_offset(&[]);
    let to_strides: SmallVec<[isize; 8]> = SmallVec::from_slice(to.strides());
    let from_ptr = from.as_ptr();
    let to_ptr = to.as_mut_ptr();

    let mut ti: SmallVec<[usize; 8]> = smallvec![0; r];
    while c.not_done() {
        for j in 0..r {
            ti[p.dest(j)] = c.index(j);
        }
        let mut to_off = to_base;
        for j in 0..r {
            to_off += ti[j] as isize * to_strides[j];
        }

        let mut pto = to_ptr.offset(to_off);
        let mut pfrom = from_ptr.offset(from.element_offset(c.indices()));
        for _ in 0..big_extent {
            f(&mut *pto, *pfrom);
            pto = pto.offset(step_to);
            pfrom = pfrom.offset(step_from);
        }
        c.advance();
    }
}

/// Permute `from` into `to`, overwriting destination elements.
///
/// `p.dest(j)` names the destination axis that source axis `j` maps to,
/// so element `from[i0, i1, ...]` lands at the destination index vector
/// with `i_j` at position `p.dest(j)`.
///
/// # Errors
///
/// Fails, before writing anything, if the permutation size or either rank
/// disagree, if total sizes differ, or if a destination extent does not
/// match its source extent under the permutation.
///
/// # Examples
///
/// ```
/// use tenperm::{permute_into, Permutation, Tensor};
///
/// let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let p = Permutation::from_dest(&[1, 0]).unwrap();
///
/// let mut dst = Tensor::<f64>::zeros(&[3, 2]);
/// permute_into(&src.view(), &p, &mut dst.view_mut()).unwrap();
///
/// for i in 0..2 {
///     for j in 0..3 {
///         assert_eq!(dst.get(&[j, i]), src.get(&[i, j]));
///     }
/// }
/// ```
pub fn permute_into<T: Copy>(
    from: &TensorView<'_, T>,
    p: &Permutation,
    to: &mut TensorViewMut<'_, T>,
) -> Result<(), TensorError> {
    permute_into_with(from, p, to, assign)
}

/// Permute `from` into `to`, combining each element pair with `f`.
///
/// `f` receives a mutable reference to the destination element and the
/// value of the source element; [`assign`] and [`accumulate`] are the two
/// standard choices, and any `FnMut(&mut T, T)` can be substituted.
///
/// # Errors
///
/// Same shape preconditions as [`permute_into`]; nothing is written on
/// failure.
///
/// # Examples
///
/// ```
/// use tenperm::{accumulate, permute_into_with, Permutation, Tensor};
///
/// let src: Tensor<f64> = Tensor::from_vec(vec![5.0; 6], &[2, 3]).unwrap();
/// let mut dst: Tensor<f64> = Tensor::from_vec(vec![10.0; 6], &[3, 2]).unwrap();
/// let p = Permutation::from_dest(&[1, 0]).unwrap();
///
/// permute_into_with(&src.view(), &p, &mut dst.view_mut(), accumulate).unwrap();
/// assert!(dst.data().iter().all(|&x| x == 15.0));
/// ```
pub fn permute_into_with<T, F>(
    from: &TensorView<'_, T>,
    p: &Permutation,
    to: &mut TensorViewMut<'_, T>,
    f: F,
) -> Result<(), TensorError>
where
    T: Copy,
    F: FnMut(&mut T, T),
{
    check_shapes(from, p, to)?;
    // Shape preconditions verified above.
    unsafe { permute_kernel(from, p, to, f) };
    Ok(())
}

/// Permute `from` into `to` without validating shapes, overwriting
/// destination elements.
///
/// # Safety
///
/// The caller must uphold the shape preconditions listed on
/// [`permute_into`]; violating them may read or write out of bounds.
pub unsafe fn permute_into_unchecked<T: Copy>(
    from: &TensorView<'_, T>,
    p: &Permutation,
    to: &mut TensorViewMut<'_, T>,
) {
    permute_kernel(from, p, to, assign)
}

/// Permute `from` into `to` without validating shapes, combining each
/// element pair with `f`.
///
/// # Safety
///
/// The caller must uphold the shape preconditions listed on
/// [`permute_into`]; violating them may read or write out of bounds.
pub unsafe fn permute_into_with_unchecked<T, F>(
    from: &TensorView<'_, T>,
    p: &Permutation,
    to: &mut TensorViewMut<'_, T>,
    f: F,
) where
    T: Copy,
    F: FnMut(&mut T, T),
{
    permute_kernel(from, p, to, f)
}

/// Permute `from` into `to`, deriving the permutation from axis label
/// lists: the label at source position `j` names the same axis as the
/// identical label in the destination list.
///
/// Empty label lists denote the rank-0 case and short-circuit to a single
/// scalar assignment.
///
/// # Errors
///
/// Fails on mismatched or non-bijective label lists, and on the shape
/// preconditions of [`permute_into`].
///
/// # Examples
///
/// ```
/// use tenperm::{permute_into_labeled, Permutation, Tensor};
///
/// let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let mut dst = Tensor::<f64>::zeros(&[3, 2]);
///
/// permute_into_labeled(&src.view(), &['i', 'j'], &mut dst.view_mut(), &['j', 'i']).unwrap();
/// assert_eq!(dst.get(&[2, 1]), src.get(&[1, 2]));
/// ```
pub fn permute_into_labeled<T: Copy, L: Eq>(
    from: &TensorView<'_, T>,
    from_labels: &[L],
    to: &mut TensorViewMut<'_, T>,
    to_labels: &[L],
) -> Result<(), TensorError> {
    permute_into_labeled_with(from, from_labels, to, to_labels, assign)
}

/// Permute `from` into `to` with a permutation derived from axis label
/// lists, combining each element pair with `f`.
///
/// # Errors
///
/// Same conditions as [`permute_into_labeled`].
pub fn permute_into_labeled_with<T, L, F>(
    from: &TensorView<'_, T>,
    from_labels: &[L],
    to: &mut TensorViewMut<'_, T>,
    to_labels: &[L],
    f: F,
) -> Result<(), TensorError>
where
    T: Copy,
    L: Eq,
    F: FnMut(&mut T, T),
{
    if from_labels.len() != to_labels.len() {
        return Err(TensorError::LabelLengthMismatch {
            from: from_labels.len(),
            to: to_labels.len(),
        });
    }
    if from_labels.is_empty() {
        // Rank-0 short circuit: no permutation to resolve.
        return permute_into_with(from, &Permutation::identity(0), to, f);
    }
    let p = Permutation::from_labels(from_labels, to_labels)?;
    permute_into_with(from, &p, to, f)
}

/// Permute `from` into a newly allocated tensor whose extents are the
/// source extents forwarded through the permutation.
///
/// # Errors
///
/// Fails if the permutation size does not match the source rank.
///
/// # Examples
///
/// ```
/// use tenperm::{permute, Permutation, Tensor};
///
/// let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let p = Permutation::from_dest(&[1, 0]).unwrap();
///
/// let dst = permute(&src.view(), &p).unwrap();
/// assert_eq!(dst.extents(), &[3, 2]);
/// assert_eq!(dst.get(&[2, 0]), src.get(&[0, 2]));
/// ```
pub fn permute<T: Scalar>(
    from: &TensorView<'_, T>,
    p: &Permutation,
) -> Result<DenseTensor<T>, TensorError> {
    if p.size() != from.rank() {
        return Err(TensorError::PermutationSizeMismatch {
            perm_size: p.size(),
            rank: from.rank(),
        });
    }
    let mut to = DenseTensor::zeros(&p.permuted_extents(from.extents()));
    let mut view = to.view_mut();
    permute_into(from, p, &mut view)?;
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;

    #[test]
    fn test_transpose_row_major_source() {
        // Source uses row-major strides: [[1, 2, 3], [4, 5, 6]].
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let src = TensorView::new(&data, &[2, 3], &[3, 1], 0).unwrap();
        let p = Permutation::from_dest(&[1, 0]).unwrap();

        let dst = permute(&src, &p).unwrap();
        assert_eq!(dst.extents(), &[3, 2]);
        // Expected destination: [[1, 4], [2, 5], [3, 6]].
        assert_eq!(dst.get(&[0, 0]), Some(&1.0));
        assert_eq!(dst.get(&[0, 1]), Some(&4.0));
        assert_eq!(dst.get(&[1, 0]), Some(&2.0));
        assert_eq!(dst.get(&[1, 1]), Some(&5.0));
        assert_eq!(dst.get(&[2, 0]), Some(&3.0));
        assert_eq!(dst.get(&[2, 1]), Some(&6.0));
    }

    #[test]
    fn test_rank_zero_scalar() {
        let src: Tensor<f64> = Tensor::from_vec(vec![42.0], &[]).unwrap();
        let p = Permutation::identity(0);
        let dst = permute(&src.view(), &p).unwrap();
        assert_eq!(dst.rank(), 0);
        assert_eq!(dst.get(&[]), Some(&42.0));
    }

    #[test]
    fn test_identity_is_copy() {
        let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let p = Permutation::identity(2);
        let dst = permute(&src.view(), &p).unwrap();
        assert_eq!(dst.extents(), src.extents());
        assert_eq!(dst.data(), src.data());
    }

    #[test]
    fn test_three_axes() {
        let mut src: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    src.set(&[i, j, k], (i * 100 + j * 10 + k) as f64).unwrap();
                }
            }
        }

        // Send axis 0 -> 2, axis 1 -> 0, axis 2 -> 1.
        let p = Permutation::from_dest(&[2, 0, 1]).unwrap();
        let dst = permute(&src.view(), &p).unwrap();
        assert_eq!(dst.extents(), &[3, 4, 2]);

        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(dst.get(&[j, k, i]), src.get(&[i, j, k]));
                }
            }
        }
    }

    #[test]
    fn test_accumulate() {
        let src: Tensor<f64> = Tensor::from_vec(vec![5.0; 6], &[2, 3]).unwrap();
        let mut dst: Tensor<f64> = Tensor::from_vec(vec![10.0; 6], &[3, 2]).unwrap();
        let p = Permutation::from_dest(&[1, 0]).unwrap();

        permute_into_with(&src.view(), &p, &mut dst.view_mut(), accumulate).unwrap();
        for i in 0..6 {
            assert_eq!(*dst.get_linear(i).unwrap(), 15.0);
        }
    }

    #[test]
    fn test_every_cell_written_once() {
        let src: Tensor<f64> = Tensor::ones(&[3, 2, 4]);
        let mut dst: Tensor<f64> = Tensor::zeros(&[4, 3, 2]);
        let p = Permutation::from_dest(&[1, 2, 0]).unwrap();

        // Count writes per destination cell by accumulating 1 for each.
        permute_into_with(&src.view(), &p, &mut dst.view_mut(), |d, _s| *d += 1.0).unwrap();
        for i in 0..dst.len() {
            assert_eq!(*dst.get_linear(i).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_checked_failure_leaves_destination_untouched() {
        let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let mut dst: Tensor<f64> = Tensor::from_vec(vec![-1.0; 6], &[2, 3]).unwrap();
        // Transposed permutation against an untransposed destination.
        let p = Permutation::from_dest(&[1, 0]).unwrap();

        let err = permute_into(&src.view(), &p, &mut dst.view_mut()).unwrap_err();
        assert!(matches!(err, TensorError::ExtentMismatch { .. }));
        assert_eq!(dst.data(), &[-1.0; 6]);
    }

    #[test]
    fn test_permutation_size_mismatch() {
        let src: Tensor<f64> = Tensor::zeros(&[2, 3]);
        let mut dst: Tensor<f64> = Tensor::zeros(&[3, 2]);
        let p = Permutation::from_dest(&[0]).unwrap();

        assert!(matches!(
            permute_into(&src.view(), &p, &mut dst.view_mut()),
            Err(TensorError::PermutationSizeMismatch { perm_size: 1, rank: 2 })
        ));
    }

    #[test]
    fn test_rank_mismatch() {
        let src: Tensor<f64> = Tensor::zeros(&[6]);
        let mut dst: Tensor<f64> = Tensor::zeros(&[2, 3]);
        let p = Permutation::identity(1);

        assert!(matches!(
            permute_into(&src.view(), &p, &mut dst.view_mut()),
            Err(TensorError::RankMismatch { from: 1, to: 2 })
        ));
    }

    #[test]
    fn test_unchecked_matches_checked() {
        let src: Tensor<f64> = Tensor::from_vec((1..=24).map(f64::from).collect(), &[2, 3, 4]).unwrap();
        let p = Permutation::from_dest(&[2, 0, 1]).unwrap();

        let checked = permute(&src.view(), &p).unwrap();
        let mut unchecked: Tensor<f64> = Tensor::zeros(&[3, 4, 2]);
        unsafe {
            permute_into_unchecked(&src.view(), &p, &mut unchecked.view_mut());
        }
        assert_eq!(checked.data(), unchecked.data());
    }

    #[test]
    fn test_labeled_transpose() {
        let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let mut dst = Tensor::<f64>::zeros(&[3, 2]);

        permute_into_labeled(&src.view(), &["i", "j"], &mut dst.view_mut(), &["j", "i"]).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(dst.get(&[j, i]), src.get(&[i, j]));
            }
        }
    }

    #[test]
    fn test_labeled_empty_lists_scalar() {
        let src: Tensor<f64> = Tensor::from_vec(vec![3.5], &[]).unwrap();
        let mut dst = Tensor::<f64>::zeros(&[]);

        permute_into_labeled::<f64, u32>(&src.view(), &[], &mut dst.view_mut(), &[]).unwrap();
        assert_eq!(dst.get(&[]), Some(&3.5));
    }

    #[test]
    fn test_labeled_mismatch_errors() {
        let src: Tensor<f64> = Tensor::zeros(&[2, 3]);
        let mut dst: Tensor<f64> = Tensor::zeros(&[3, 2]);

        assert!(matches!(
            permute_into_labeled(&src.view(), &['i', 'j'], &mut dst.view_mut(), &['j', 'x']),
            Err(TensorError::LabelMismatch { axis: 0 })
        ));
        assert!(matches!(
            permute_into_labeled(&src.view(), &['i', 'j'], &mut dst.view_mut(), &['j']),
            Err(TensorError::LabelLengthMismatch { from: 2, to: 1 })
        ));
    }

    #[test]
    fn test_negative_stride_source() {
        // Reversed 1-D view: [3, 2, 1].
        let data = [1.0, 2.0, 3.0];
        let src = TensorView::new(&data, &[3], &[-1], 2).unwrap();
        let p = Permutation::identity(1);

        let dst = permute(&src, &p).unwrap();
        assert_eq!(dst.data(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_big_axis_tie_keeps_first() {
        // Both axes have extent 2; the engine must walk axis 0 in the
        // inner loop, and the result must be identical either way.
        let src: Tensor<f64> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let p = Permutation::from_dest(&[1, 0]).unwrap();
        let dst = permute(&src.view(), &p).unwrap();
        assert_eq!(dst.get(&[0, 1]), src.get(&[1, 0]));
        assert_eq!(dst.get(&[1, 0]), src.get(&[0, 1]));
    }

    #[test]
    fn test_empty_source_writes_nothing() {
        let src: Tensor<f64> = Tensor::zeros(&[0, 3]);
        let mut dst: Tensor<f64> = Tensor::zeros(&[3, 0]);
        let p = Permutation::from_dest(&[1, 0]).unwrap();

        permute_into(&src.view(), &p, &mut dst.view_mut()).unwrap();
        assert_eq!(dst.len(), 1); // backing scalar slot stays untouched
        assert_eq!(*dst.get_linear(0).unwrap(), 0.0);
    }
}
