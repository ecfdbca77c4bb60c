//! Error types for tenperm.

use thiserror::Error;

/// Errors that can occur when constructing views, permutations, or tensors,
/// or when running a checked permutation.
///
/// Checked permutation entry points report all of these before any
/// destination element is mutated.
#[derive(Debug, Error)]
pub enum TensorError {
    /// Permutation size does not match the source tensor rank.
    #[error("mismatched permutation size: permutation has {perm_size} entries for tensor of rank {rank}")]
    PermutationSizeMismatch { perm_size: usize, rank: usize },

    /// Source and destination ranks differ.
    #[error("mismatched tensor ranks: source has rank {from}, destination has rank {to}")]
    RankMismatch { from: usize, to: usize },

    /// Source and destination total element counts differ.
    #[error("mismatched storage sizes: source has {from} elements, destination has {to}")]
    SizeMismatch { from: usize, to: usize },

    /// A destination extent does not match the corresponding source extent.
    #[error(
        "incompatible extents: source axis {axis} has extent {from}, \
         destination axis {dest_axis} has extent {to}"
    )]
    ExtentMismatch {
        axis: usize,
        dest_axis: usize,
        from: usize,
        to: usize,
    },

    /// The destination mapping is not a bijection on `0..size`.
    #[error("invalid permutation {perm:?} for size {size}")]
    InvalidPermutation { perm: Vec<usize>, size: usize },

    /// Source and destination label lists have different lengths.
    #[error("mismatched label lists: source has {from} labels, destination has {to}")]
    LabelLengthMismatch { from: usize, to: usize },

    /// A source label has no partner in the destination list, or the lists
    /// do not pair up one-to-one.
    #[error("label mismatch: source label at position {axis} has no unique partner in the destination list")]
    LabelMismatch { axis: usize },

    /// A view was given a different number of strides than extents.
    #[error("mismatched view descriptor: {extents} extents but {strides} strides")]
    StrideCountMismatch { extents: usize, strides: usize },

    /// A view's reachable offsets do not all fall inside its storage.
    #[error("view exceeds its storage: offsets reach element {max_offset}, storage holds {len}")]
    ViewOutOfBounds { max_offset: usize, len: usize },

    /// A view's extents and strides reach a negative storage offset.
    #[error("view reaches a negative storage offset")]
    NegativeOffset,

    /// A view's offset computation overflows the offset type.
    #[error("view offset computation overflows")]
    OffsetOverflow,

    /// Shape mismatch between data length and expected size.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },
}
