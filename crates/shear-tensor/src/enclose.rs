//! Arrays of arrays.
//!
//! `enclose` groups a set of axes into inner tensors indexed by the remaining
//! axes; `disclose` and `disclose_first` merge a uniform tensor of tensors
//! back into one. Both are expressed with slicing and computed tensors only.
//! Joins along new or existing axes live here too.

use tracing::debug;

use crate::counter::RowMajorIndices;
use crate::error::{Result, TensorError};
use crate::selector::Selector;
use crate::shape::Shape;
use crate::tensor::{Element, Tensor};

impl<T: Element> Tensor<T> {
    /// Groups `axes` into inner tensors.
    ///
    /// The result is indexed by the remaining axes, in their original order;
    /// each element is the view that pins those axes and keeps every enclosed
    /// axis whole. Axes are applied in ascending order with duplicates
    /// ignored. Enclosing no axes yields a scalar holding `self`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidAxis`] if an axis is not below the rank.
    pub fn enclose(&self, axes: &[usize]) -> Result<Tensor<Tensor<T>>> {
        let mut axes = axes.to_vec();
        axes.sort_unstable();
        axes.dedup();
        if axes.is_empty() {
            return Ok(Tensor::scalar(self.clone()));
        }
        if let Some(&axis) = axes.iter().find(|&&a| a >= self.rank()) {
            return Err(TensorError::InvalidAxis {
                axis,
                ndim: self.rank(),
            });
        }

        let retained: Vec<usize> = (0..self.rank())
            .filter(|a| axes.binary_search(a).is_err())
            .collect();
        let outer_dims: Vec<usize> = retained.iter().map(|&a| self.dims()[a]).collect();

        let inner = RowMajorIndices::new(&outer_dims)?
            .map(|outer| {
                let mut selectors = vec![Selector::All; self.rank()];
                for (&axis, &i) in retained.iter().zip(&outer) {
                    selectors[axis] = Selector::Single(i);
                }
                self.slice(&selectors)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            shape = %self.shape(),
            axes = ?axes,
            outer = ?outer_dims,
            "enclosed tensor"
        );
        Tensor::from_vec(&outer_dims, inner)
    }
}

impl<T: Element> Tensor<Tensor<T>> {
    /// The shape shared by every inner tensor.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] naming the first inner shape
    /// that differs from the first element's.
    pub fn inner_shape(&self) -> Result<Shape> {
        let mut inner = self.all_elements();
        let first = match inner.next() {
            Some(t) => t.shape().clone(),
            None => return Err(TensorError::EmptyCollection),
        };
        if let Some(other) = inner.find(|t| t.shape() != &first) {
            return Err(TensorError::ShapeMismatch {
                expected: first.dims().to_vec(),
                got: other.dims().to_vec(),
            });
        }
        Ok(first)
    }

    /// Merges inner tensors into one, with outer axes first.
    ///
    /// Element `[o.., i..]` of the result is element `[i..]` of inner tensor
    /// `[o..]`.
    pub fn disclose(&self) -> Result<Tensor<T>> {
        let inner = self.inner_shape()?;
        let shape = self.shape().concat(&inner)?;
        let outer_rank = self.rank();
        let outer = self.clone();
        debug!(outer = %self.shape(), inner = %inner, "disclosing tensor");
        Tensor::from_cartesian_fn(shape.dims(), move |idx| {
            outer
                .get_cartesian(&idx[..outer_rank])
                .get_cartesian(&idx[outer_rank..])
        })
    }

    /// Merges inner tensors into one, with inner axes first.
    ///
    /// Element `[i.., o..]` of the result is element `[i..]` of inner tensor
    /// `[o..]`.
    pub fn disclose_first(&self) -> Result<Tensor<T>> {
        let inner = self.inner_shape()?;
        let shape = inner.concat(self.shape())?;
        let inner_rank = inner.ndim();
        let outer = self.clone();
        debug!(outer = %self.shape(), inner = %inner, "disclosing tensor inner-first");
        Tensor::from_cartesian_fn(shape.dims(), move |idx| {
            outer
                .get_cartesian(&idx[inner_rank..])
                .get_cartesian(&idx[..inner_rank])
        })
    }
}

/// Splits off the first or last axis: its extent and the remaining axes.
/// A scalar counts as one position.
fn split_axis(dims: &[usize], first: bool) -> (usize, &[usize]) {
    match (dims, first) {
        ([], _) => (1, dims),
        ([head, rest @ ..], true) => (*head, rest),
        ([rest @ .., last], false) => (*last, rest),
    }
}

fn with_axis(rest: &[usize], k: usize, first: bool) -> Vec<usize> {
    let mut out = Vec::with_capacity(rest.len() + 1);
    if first {
        out.push(k);
        out.extend_from_slice(rest);
    } else {
        out.extend_from_slice(rest);
        out.push(k);
    }
    out
}

fn common_shape<T: Element>(tensors: &[Tensor<T>]) -> Result<Shape> {
    let first = tensors.first().ok_or(TensorError::EmptyCollection)?;
    if let Some(other) = tensors.iter().find(|t| t.shape() != first.shape()) {
        return Err(TensorError::ShapeMismatch {
            expected: first.dims().to_vec(),
            got: other.dims().to_vec(),
        });
    }
    Ok(first.shape().clone())
}

impl<T: Element> Tensor<T> {
    /// Copies equally shaped tensors into one owned tensor whose first axis
    /// runs over `tensors`.
    pub fn stack(tensors: &[Tensor<T>]) -> Result<Self> {
        let inner = common_shape(tensors)?;
        let mut dims = vec![tensors.len()];
        dims.extend_from_slice(inner.dims());
        let data: Vec<T> = tensors.iter().flat_map(|t| t.all_elements()).collect();
        debug!(count = data.len(), dims = ?dims, "stacked tensors");
        Tensor::from_vec(&dims, data)
    }

    /// Copies equally shaped tensors into one owned tensor whose last axis
    /// runs over `tensors`.
    pub fn stack_last(tensors: &[Tensor<T>]) -> Result<Self> {
        let inner = common_shape(tensors)?;
        let mut dims = inner.dims().to_vec();
        dims.push(tensors.len());
        let data: Vec<T> = (0..inner.numel())
            .flat_map(|i| tensors.iter().map(move |t| t.get_linear(i)))
            .collect();
        debug!(count = data.len(), dims = ?dims, "stacked tensors on last axis");
        Tensor::from_vec(&dims, data)
    }

    /// Joins `self` and `other` along a new first axis.
    pub fn laminate(&self, other: &Tensor<T>) -> Result<Self> {
        self.pair(other)?.disclose()
    }

    /// Joins `self` and `other` along a new last axis.
    pub fn interpose(&self, other: &Tensor<T>) -> Result<Self> {
        self.pair(other)?.disclose_first()
    }

    /// Extends the last axis with the elements of `other`.
    ///
    /// `other` either has the same rank and matches every axis but the last,
    /// or has one axis fewer and equals `self`'s shape without the last
    /// axis, in which case it contributes a single position. A scalar counts as a vector of
    /// one element.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the shapes cannot be joined.
    pub fn append(&self, other: &Tensor<T>) -> Result<Self> {
        self.join(other, false)
    }

    /// Extends the first axis with the elements of `other`. Shapes follow
    /// the rules of [`append`](Self::append) with the first axis in place of
    /// the last.
    pub fn concat(&self, other: &Tensor<T>) -> Result<Self> {
        self.join(other, true)
    }

    /// Extends the last axis by one position filled with `value`.
    pub fn append_item(&self, value: T) -> Result<Self> {
        let (_, rest) = split_axis(self.dims(), false);
        self.join(&Tensor::constant(rest, value)?, false)
    }

    /// Extends the first axis by one position filled with `value`.
    pub fn concat_item(&self, value: T) -> Result<Self> {
        let (_, rest) = split_axis(self.dims(), true);
        self.join(&Tensor::constant(rest, value)?, true)
    }

    fn join(&self, other: &Tensor<T>, first: bool) -> Result<Self> {
        let (left_len, rest) = split_axis(self.dims(), first);
        let (other_len, other_rest) = split_axis(other.dims(), first);
        let (right_len, right_has_axis) = if other.rank() == self.rank() && other_rest == rest {
            (other_len, !other.is_scalar())
        } else if other.rank() + 1 == self.rank() && other.dims() == rest {
            (1, false)
        } else {
            return Err(TensorError::ShapeMismatch {
                expected: rest.to_vec(),
                got: other.dims().to_vec(),
            });
        };
        let len = left_len
            .checked_add(right_len)
            .ok_or_else(|| TensorError::InvalidShape {
                dims: with_axis(rest, usize::MAX, first),
            })?;
        let dims = with_axis(rest, len, first);

        let left_has_axis = !self.is_scalar();
        let left = self.cartesian_fn();
        let right = other.cartesian_fn();
        debug!(left = %self.shape(), right = %other.shape(), dims = ?dims, first, "joining tensors");
        Tensor::from_cartesian_fn(&dims, move |idx| {
            let (k, rest) = split_axis(idx, first);
            if k < left_len {
                if left_has_axis {
                    left(idx)
                } else {
                    left(rest)
                }
            } else if right_has_axis {
                right(&with_axis(rest, k - left_len, first))
            } else {
                right(rest)
            }
        })
    }

    fn pair(&self, other: &Tensor<T>) -> Result<Tensor<Tensor<T>>> {
        if self.shape() != other.shape() {
            return Err(TensorError::ShapeMismatch {
                expected: self.dims().to_vec(),
                got: other.dims().to_vec(),
            });
        }
        Tensor::from_vec(&[2], vec![self.clone(), other.clone()])
    }
}
