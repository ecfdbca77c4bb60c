//! tenperm - axis permutation engine for dense strided tensors
//!
//! This crate rearranges the elements of a dense, strided, multi-dimensional
//! array according to an axis permutation, combining each source/destination
//! element pair through a pluggable binary operation (assign, accumulate, or
//! any custom `FnMut(&mut T, T)`).
//!
//! # Architecture
//!
//! ```text
//! Level 1: High-level API (operations module, Tensor::permutedims)
//!     → allocate output with permuted extents
//!
//! Level 2: View-level checked API (permute module)
//!     → permute_into, permute_into_with, label-based variants
//!
//! Level 3: Unchecked kernel
//!     → big-axis inner loop + Odometer over the remaining axes
//! ```
//!
//! # Example
//!
//! ```
//! use tenperm::{permute, Permutation, Tensor};
//!
//! // A 2x3 tensor in column-major order.
//! let t: Tensor<f64> =
//!     Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
//!
//! // Swap the axes.
//! let p = Permutation::from_dest(&[1, 0]).unwrap();
//! let t2 = permute(&t.view(), &p).unwrap();
//!
//! assert_eq!(t2.extents(), &[3, 2]);
//! assert_eq!(t.get(&[1, 2]), t2.get(&[2, 1]));
//! ```

pub mod error;
pub mod odometer;
pub mod operations;
pub mod permutation;
pub mod permute;
pub mod random;
pub mod scalar;
pub mod storage;
pub mod strides;
pub mod tensor;
pub mod view;

pub use error::TensorError;
pub use odometer::Odometer;
pub use permutation::Permutation;
pub use permute::{
    accumulate, assign, permute, permute_into, permute_into_labeled, permute_into_labeled_with,
    permute_into_unchecked, permute_into_with, permute_into_with_unchecked,
};
pub use scalar::{c64, Scalar};
pub use storage::{Dense, TensorStorage};
pub use tensor::{DenseTensor, Tensor};
pub use view::{TensorView, TensorViewMut};
