use crate::error::{Result, TensorError};
use crate::shape::{checked_count, Shape};

/// Enumerates every cartesian index of a shape in row-major order (last axis
/// fastest) without any per-step division.
///
/// Internally this is a mixed-radix counter over the reversed dimensions:
/// digit 0 is the true last axis, so it increments fastest, and each
/// yielded digit vector is reversed back into a cartesian index.
///
/// ```
/// use shear_tensor::RowMajorIndices;
///
/// let all: Vec<Vec<usize>> = RowMajorIndices::new(&[2, 3])?.collect();
/// assert_eq!(all[0], vec![0, 0]);
/// assert_eq!(all[1], vec![0, 1]);
/// assert_eq!(all[3], vec![1, 0]);
/// assert_eq!(all.len(), 6);
/// # Ok::<(), shear_tensor::TensorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RowMajorIndices {
    bounds_rev: Vec<usize>,
    digits: Option<Vec<usize>>,
    remaining: usize,
}

impl RowMajorIndices {
    /// Starts a counter at the all-zeros index of `dims`.
    ///
    /// A zero-length dimension yields nothing; the empty shape yields the
    /// single index `[]`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidShape`] if the number of indices
    /// overflows `usize`.
    pub fn new(dims: &[usize]) -> Result<Self> {
        let remaining = if dims.contains(&0) {
            0
        } else {
            checked_count(dims).ok_or_else(|| TensorError::InvalidShape {
                dims: dims.to_vec(),
            })?
        };
        Ok(Self::with_count(dims, remaining))
    }

    /// A counter over every index of `shape`.
    pub fn for_shape(shape: &Shape) -> Self {
        Self::with_count(shape.dims(), shape.numel())
    }

    fn with_count(dims: &[usize], remaining: usize) -> Self {
        RowMajorIndices {
            bounds_rev: dims.iter().rev().copied().collect(),
            digits: (remaining > 0).then(|| vec![0; dims.len()]),
            remaining,
        }
    }

    fn increment(&mut self) {
        let Some(digits) = self.digits.as_mut() else {
            return;
        };
        let mut pos = 0;
        loop {
            if pos == digits.len() {
                self.digits = None;
                return;
            }
            digits[pos] += 1;
            if digits[pos] >= self.bounds_rev[pos] {
                digits[pos] -= self.bounds_rev[pos];
                pos += 1;
            } else {
                return;
            }
        }
    }
}

impl Iterator for RowMajorIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let mut index = self.digits.clone()?;
        index.reverse();
        self.increment();
        self.remaining = self.remaining.saturating_sub(1);
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RowMajorIndices {}

impl std::iter::FusedIterator for RowMajorIndices {}
