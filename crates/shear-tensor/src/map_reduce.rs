//! Element-wise and vector-wise combinators.
//!
//! `map` and `zip` stay lazy. The vector combinators run a closure over
//! every vector along the first or last axis, once each, and reassemble the
//! results with `enclose` and `disclose`.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, TensorError};
use crate::tensor::{Element, Tensor};

/// Wraps `data` as a vector tensor. A single element becomes a scalar.
fn vector<U: Element>(data: Vec<U>) -> Result<Tensor<U>> {
    Tensor::from_vec(&[data.len()], data)
}

fn scan_inclusive<T: Clone>(v: &[T], f: impl Fn(T, T) -> T) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(v.len());
    for x in v {
        let next = match out.last() {
            Some(prev) => f(prev.clone(), x.clone()),
            None => x.clone(),
        };
        out.push(next);
    }
    out
}

fn scan_from<A: Clone, T: Clone>(v: &[T], init: A, f: impl Fn(A, T) -> A) -> Vec<A> {
    let mut out = Vec::with_capacity(v.len() + 1);
    let mut acc = init;
    out.push(acc.clone());
    for x in v {
        acc = f(acc, x.clone());
        out.push(acc.clone());
    }
    out
}

impl<T: Element> Tensor<T> {
    /// A computed tensor of the same shape holding `f` of every element.
    ///
    /// `f` runs on each access; `unify` the result to evaluate it once.
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.linear_fn();
        Tensor::computed_from_linear(
            self.shape().clone(),
            Arc::new(move |i: usize| f(source(i))),
            false,
        )
    }

    /// Pairs up the elements of two equally shaped tensors.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
    pub fn zip<U: Element>(&self, other: &Tensor<U>) -> Result<Tensor<(T, U)>> {
        if self.shape() != other.shape() {
            return Err(TensorError::ShapeMismatch {
                expected: self.dims().to_vec(),
                got: other.dims().to_vec(),
            });
        }
        let left = self.linear_fn();
        let right = other.linear_fn();
        Ok(Tensor::computed_from_linear(
            self.shape().clone(),
            Arc::new(move |i: usize| (left(i), right(i))),
            false,
        ))
    }

    /// Replaces every vector along the last axis with `f` of that vector.
    ///
    /// A scalar is treated as a vector of one element. The last axis of the
    /// result has the length `f` returns; a single element drops the axis.
    ///
    /// # Errors
    /// Returns [`TensorError::ShapeMismatch`] if `f` returns vectors of
    /// different lengths and [`TensorError::InvalidShape`] if it returns an
    /// empty one.
    pub fn vector_map<U, F>(&self, f: F) -> Result<Tensor<U>>
    where
        U: Element,
        F: Fn(&[T]) -> Vec<U>,
    {
        self.map_vectors(f, false)
    }

    /// Like [`vector_map`](Self::vector_map), over vectors along the first
    /// axis.
    pub fn vector_map_first<U, F>(&self, f: F) -> Result<Tensor<U>>
    where
        U: Element,
        F: Fn(&[T]) -> Vec<U>,
    {
        self.map_vectors(f, true)
    }

    fn map_vectors<U, F>(&self, f: F, first: bool) -> Result<Tensor<U>>
    where
        U: Element,
        F: Fn(&[T]) -> Vec<U>,
    {
        if self.is_scalar() {
            return vector(f(&self.to_vec()));
        }
        let axis = if first { 0 } else { self.rank() - 1 };
        let enclosed = self.enclose(&[axis])?;
        let results = enclosed
            .all_elements()
            .map(|v| vector(f(&v.to_vec())))
            .collect::<Result<Vec<_>>>()?;
        debug!(shape = %self.shape(), axis, vectors = results.len(), "mapped vectors");
        let outer = Tensor::from_vec(enclosed.dims(), results)?;
        if first {
            outer.disclose_first()
        } else {
            outer.disclose()
        }
    }

    /// Folds every vector along the last axis, dropping that axis.
    pub fn fold<A, F>(&self, init: A, f: F) -> Result<Tensor<A>>
    where
        A: Element,
        F: Fn(A, T) -> A,
    {
        self.vector_map(|v| vec![v.iter().cloned().fold(init.clone(), &f)])
    }

    /// Folds every vector along the first axis, dropping that axis.
    pub fn fold_first<A, F>(&self, init: A, f: F) -> Result<Tensor<A>>
    where
        A: Element,
        F: Fn(A, T) -> A,
    {
        self.vector_map_first(|v| vec![v.iter().cloned().fold(init.clone(), &f)])
    }

    /// Combines the elements of every vector along the last axis, dropping
    /// that axis. A vector reduces to a scalar.
    pub fn reduce<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        self.vector_map(|v| v.iter().cloned().reduce(&f).into_iter().collect())
    }

    /// Combines the elements of every vector along the first axis, dropping
    /// that axis.
    pub fn reduce_first<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        self.vector_map_first(|v| v.iter().cloned().reduce(&f).into_iter().collect())
    }

    /// Running combination along the last axis; the shape is unchanged.
    pub fn scan<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        self.vector_map(|v| scan_inclusive(v, &f))
    }

    pub fn scan_first<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        self.vector_map_first(|v| scan_inclusive(v, &f))
    }

    /// Running fold along the last axis starting from `init`. The last axis
    /// grows by one to hold `init` itself.
    pub fn scan_with<A, F>(&self, init: A, f: F) -> Result<Tensor<A>>
    where
        A: Element,
        F: Fn(A, T) -> A,
    {
        self.vector_map(|v| scan_from(v, init.clone(), &f))
    }

    pub fn scan_first_with<A, F>(&self, init: A, f: F) -> Result<Tensor<A>>
    where
        A: Element,
        F: Fn(A, T) -> A,
    {
        self.vector_map_first(|v| scan_from(v, init.clone(), &f))
    }
}
