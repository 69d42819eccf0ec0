//! `shear-tensor` - N-dimensional arrays with composable views for shear.
//!
//! This crate provides:
//! - A `Tensor` type with one representation for owned buffers, lazily
//!   computed elements and views
//! - Shape normalization, row-major strides and index conversion
//! - Per-axis `Selector`s and view composition that keeps re-sliced views
//!   one indirection away from their owner
//! - Row-major enumeration through a mixed-radix counter
//! - Enclose / disclose for arrays of arrays, and the joins and vector
//!   maps, folds and scans built on them
//!
//! ```
//! use shear_tensor::{Selector, Tensor};
//!
//! let t = Tensor::from_vec(&[2, 3], vec![0, 1, 2, 3, 4, 5])?;
//! assert_eq!(t.element_at(&[1, 2])?, 5);
//!
//! let v = t.slice(&[Selector::All, Selector::from(vec![0, 2])])?;
//! assert_eq!(v.dims(), &[2, 2]);
//! assert_eq!(v.to_vec(), vec![0, 2, 3, 5]);
//!
//! let columns = t.enclose(&[0])?;
//! assert_eq!(columns.dims(), &[3]);
//! assert_eq!(columns.element_at_linear(0)?.to_vec(), vec![0, 3]);
//! # Ok::<(), shear_tensor::TensorError>(())
//! ```

pub mod counter;
pub mod enclose;
pub mod error;
pub mod map_reduce;
pub mod selector;
pub mod shape;
pub mod storage;
pub mod tensor;
pub mod transform;
pub mod view;


// Re-export primary types at the crate root for convenience.
pub use counter::RowMajorIndices;
pub use error::{Result, TensorError};
pub use selector::Selector;
pub use shape::{cartesian_to_linear, in_bounds, in_bounds_linear, linear_to_cartesian, Shape};
pub use storage::CpuStorage;
pub use tensor::{Coordinates, Element, Elements, Tensor};
pub use view::{compose_selectors, compute_view_shape, Compaction, View};
