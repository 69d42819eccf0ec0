use crate::error::{Result, TensorError};
use crate::selector::Selector;
use crate::tensor::{Element, Tensor};

impl<T: Element> Tensor<T> {
    /// A computed tensor of `dims` whose element at `idx` is this tensor's
    /// element at `to_source(idx)`.
    fn remap<F>(&self, dims: &[usize], to_source: F) -> Result<Self>
    where
        F: Fn(&[usize]) -> Vec<usize> + Send + Sync + 'static,
    {
        let base = self.cartesian_fn();
        Tensor::from_cartesian_fn(dims, move |idx| base(&to_source(idx)))
    }

    /// Reorders axes: axis `i` of the result is axis `axes[i]` of `self`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidAxis`] unless `axes` is a permutation of
    /// `0..rank`.
    pub fn permute(&self, axes: &[usize]) -> Result<Self> {
        let rank = self.rank();
        let mut seen = vec![false; rank];
        for &axis in axes {
            if axis >= rank || seen[axis] {
                return Err(TensorError::InvalidAxis { axis, ndim: rank });
            }
            seen[axis] = true;
        }
        if axes.len() != rank {
            return Err(TensorError::InvalidAxis {
                axis: axes.len(),
                ndim: rank,
            });
        }

        let dims: Vec<usize> = axes.iter().map(|&a| self.dims()[a]).collect();
        let axes = axes.to_vec();
        self.remap(&dims, move |idx| {
            let mut source = vec![0; idx.len()];
            for (&axis, &i) in axes.iter().zip(idx) {
                source[axis] = i;
            }
            source
        })
    }

    /// Reverses the order of the axes.
    pub fn transpose(&self) -> Result<Self> {
        let axes: Vec<usize> = (0..self.rank()).rev().collect();
        self.permute(&axes)
    }

    /// Reverses element order along the last axis.
    pub fn reverse(&self) -> Result<Self> {
        match self.rank() {
            0 => Ok(self.clone()),
            rank => self.mirror(rank - 1),
        }
    }

    /// Reverses element order along the first axis.
    pub fn flip(&self) -> Result<Self> {
        if self.is_scalar() {
            return Ok(self.clone());
        }
        self.mirror(0)
    }

    fn mirror(&self, axis: usize) -> Result<Self> {
        let len = self.dims()[axis];
        self.remap(self.dims(), move |idx| {
            let mut source = idx.to_vec();
            source[axis] = len - 1 - idx[axis];
            source
        })
    }

    /// Cyclically shifts elements `n` places towards the front of the last
    /// axis. Negative `n` shifts towards the back.
    pub fn rotate(&self, n: isize) -> Result<Self> {
        match self.rank() {
            0 => Ok(self.clone()),
            rank => self.shift(rank - 1, n),
        }
    }

    /// Cyclically shifts elements `n` places along the first axis.
    pub fn rotate_first(&self, n: isize) -> Result<Self> {
        if self.is_scalar() {
            return Ok(self.clone());
        }
        self.shift(0, n)
    }

    fn shift(&self, axis: usize, n: isize) -> Result<Self> {
        let len = self.dims()[axis];
        let offset = n.rem_euclid(len as isize) as usize;
        self.remap(self.dims(), move |idx| {
            let mut source = idx.to_vec();
            source[axis] = (idx[axis] + offset) % len;
            source
        })
    }

    /// The sub-tensors obtained by pinning `axis` at each of its positions.
    ///
    /// A scalar sequenced on axis 0 yields itself.
    pub fn sequence(&self, axis: usize) -> Result<Vec<Self>> {
        if self.is_scalar() && axis == 0 {
            return Ok(vec![self.clone()]);
        }
        if axis >= self.rank() {
            return Err(TensorError::InvalidAxis {
                axis,
                ndim: self.rank(),
            });
        }
        let mut selectors = vec![Selector::All; self.rank()];
        (0..self.dims()[axis])
            .map(|i| {
                selectors[axis] = Selector::Single(i);
                self.slice(&selectors)
            })
            .collect()
    }

    /// Sub-tensors along the first axis, the cache-friendly direction for
    /// row-major buffers.
    pub fn sequence_first(&self) -> Result<Vec<Self>> {
        self.sequence(0)
    }

    pub fn sequence_last(&self) -> Result<Vec<Self>> {
        self.sequence(self.rank().saturating_sub(1))
    }
}
