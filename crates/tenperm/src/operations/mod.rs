//! High-level tensor operations.
//!
//! Dispatch hierarchy, from allocation down to the strided kernel:
//!
//! ```text
//! permutedims(tensor, perm)            # allocates the permuted output
//!     -> permutedims_into(dest, src)   # in-place, checked
//!         -> permute engine            # view-level stride-walking loop
//! ```

mod permutedims;

pub use permutedims::{permutedims, permutedims_into};
