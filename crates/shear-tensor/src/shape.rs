use crate::error::{Result, TensorError};
use std::fmt;

/// A normalized tensor shape.
///
/// Dimensions of extent 1 are never stored, so `[1, 5]` and `[5]` describe
/// the same shape. The empty shape `[]` is a 0-dimensional scalar holding
/// exactly one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    count: usize,
}

/// Product of `dims`, or `None` if it does not fit in a `usize`.
pub(crate) fn checked_count(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

impl Shape {
    /// Normalize raw dimensions into a shape.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if any dimension is zero or the
    /// element count overflows `usize`.
    pub fn normalize(raw: &[usize]) -> Result<Self> {
        if raw.iter().any(|&d| d < 1) {
            return Err(TensorError::InvalidShape { dims: raw.to_vec() });
        }
        let count =
            checked_count(raw).ok_or_else(|| TensorError::InvalidShape { dims: raw.to_vec() })?;
        Ok(Shape {
            dims: raw.iter().copied().filter(|&d| d != 1).collect(),
            count,
        })
    }

    /// The 0-dimensional scalar shape.
    pub fn scalar() -> Self {
        Shape {
            dims: Vec::new(),
            count: 1,
        }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements. A scalar holds one.
    pub fn numel(&self) -> usize {
        self.count
    }

    /// Returns the size of dimension `i`, or `None` if `i >= ndim()`.
    pub fn dim(&self, i: usize) -> Option<usize> {
        self.dims.get(i).copied()
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// Computes row-major contiguous strides for this shape.
    ///
    /// For a shape [d0, d1, d2], the strides are [d1*d2, d2, 1].
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![0usize; self.dims.len()];
        strides[self.dims.len() - 1] = 1;
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// The shape whose dimensions are `self` followed by `other`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if the combined element count
    /// overflows `usize`.
    pub fn concat(&self, other: &Shape) -> Result<Shape> {
        let mut dims = self.dims.clone();
        dims.extend_from_slice(&other.dims);
        match self.count.checked_mul(other.count) {
            Some(count) => Ok(Shape { dims, count }),
            None => Err(TensorError::InvalidShape { dims }),
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::scalar()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = TensorError;

    fn try_from(dims: Vec<usize>) -> Result<Self> {
        Shape::normalize(&dims)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = TensorError;

    fn try_from(dims: &[usize]) -> Result<Self> {
        Shape::normalize(dims)
    }
}

/// Converts a linear (row-major) offset into cartesian indices.
///
/// Does not check that `index` is below the element count.
pub fn linear_to_cartesian(mut index: usize, strides: &[usize]) -> Vec<usize> {
    strides
        .iter()
        .map(|&s| {
            let digit = index / s;
            index %= s;
            digit
        })
        .collect()
}

/// Converts cartesian indices into a linear offset.
///
/// Does not check that the indices are in bounds.
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices.iter().zip(strides).map(|(i, s)| i * s).sum()
}

/// Returns true iff `indices` addresses an element of a tensor with `dims`.
pub fn in_bounds(indices: &[usize], dims: &[usize]) -> bool {
    indices.len() == dims.len() && indices.iter().zip(dims).all(|(i, d)| i < d)
}

/// Returns true iff `index` is a valid linear offset into `count` elements.
pub fn in_bounds_linear(index: usize, count: usize) -> bool {
    index < count
}
