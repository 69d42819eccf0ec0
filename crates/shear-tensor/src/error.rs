use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("invalid shape {dims:?}: every dimension must be at least 1")]
    InvalidShape { dims: Vec<usize> },
    #[error("index {index:?} out of bounds {bound:?}")]
    InvalidIndex { index: Vec<usize>, bound: Vec<usize> },
    #[error("invalid slice: {0}")]
    InvalidSlice(String),
    #[error("cannot reshape {count} elements into shape {shape:?}")]
    InvalidReshape { count: usize, shape: Vec<usize> },
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },
    #[error("invalid axis {axis} for tensor with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },
    #[error("cannot infer a shape from an empty collection")]
    EmptyCollection,
    #[error("tensor is not backed by an owned buffer")]
    NotOwned,
}

pub type Result<T> = std::result::Result<T, TensorError>;
