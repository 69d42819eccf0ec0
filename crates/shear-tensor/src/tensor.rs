use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::counter::RowMajorIndices;
use crate::error::{Result, TensorError};
use crate::selector::Selector;
use crate::shape::{cartesian_to_linear, in_bounds, in_bounds_linear, linear_to_cartesian, Shape};
use crate::storage::CpuStorage;
use crate::view::View;

/// Bounds required of tensor elements.
///
/// Elements are handed out by value, and computed tensors may be read from
/// several threads at once.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

pub(crate) type CartesianFn<T> = Arc<dyn Fn(&[usize]) -> T + Send + Sync>;
pub(crate) type LinearFn<T> = Arc<dyn Fn(usize) -> T + Send + Sync>;

#[derive(Clone)]
enum Backing<T> {
    /// A contiguous row-major buffer.
    Owned(CpuStorage<T>),
    /// A pair of access functions, each derivable from the other.
    Computed {
        cartesian: CartesianFn<T>,
        linear: LinearFn<T>,
    },
}

/// The fully composed origin of a view: the owner's access function and a
/// selector list expressed directly against the owner.
struct ViewSource<T> {
    base: CartesianFn<T>,
    base_shape: Shape,
    base_unified: bool,
    view: View,
}

/// An N-dimensional array.
///
/// A tensor is either backed by an owned buffer, computed lazily from a
/// function of its indices, or a view into another tensor. All three share
/// one representation: a shape and a pair of access functions. Cloning is
/// cheap; buffers and functions are reference counted.
#[derive(Clone)]
pub struct Tensor<T> {
    backing: Backing<T>,
    shape: Shape,
    strides: Vec<usize>,
    count: usize,
    unified: bool,
    source: Option<Arc<ViewSource<T>>>,
}

impl<T: Element> Tensor<T> {
    fn build(
        shape: Shape,
        backing: Backing<T>,
        unified: bool,
        source: Option<Arc<ViewSource<T>>>,
    ) -> Self {
        let strides = shape.strides();
        let count = shape.numel();
        Tensor {
            backing,
            shape,
            strides,
            count,
            unified,
            source,
        }
    }

    fn computed_from_cartesian(shape: Shape, cartesian: CartesianFn<T>, unified: bool) -> Self {
        let strides = shape.strides();
        let f = Arc::clone(&cartesian);
        let linear: LinearFn<T> = Arc::new(move |i: usize| f(&linear_to_cartesian(i, &strides)));
        Self::build(shape, Backing::Computed { cartesian, linear }, unified, None)
    }

    pub(crate) fn computed_from_linear(shape: Shape, linear: LinearFn<T>, unified: bool) -> Self {
        let strides = shape.strides();
        let f = Arc::clone(&linear);
        let cartesian: CartesianFn<T> =
            Arc::new(move |idx: &[usize]| f(cartesian_to_linear(idx, &strides)));
        Self::build(shape, Backing::Computed { cartesian, linear }, unified, None)
    }

    /// A tensor of `dims` whose every element is `value`.
    pub fn constant(dims: &[usize], value: T) -> Result<Self> {
        let shape = Shape::normalize(dims)?;
        let v = value.clone();
        let cartesian: CartesianFn<T> = Arc::new(move |_: &[usize]| v.clone());
        let linear: LinearFn<T> = Arc::new(move |_: usize| value.clone());
        Ok(Self::build(shape, Backing::Computed { cartesian, linear }, true, None))
    }

    /// Wraps a row-major buffer as a tensor of `dims`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidReshape`] if `data.len()` is not the
    /// element count of `dims`.
    pub fn from_vec(dims: &[usize], data: Vec<T>) -> Result<Self> {
        let shape = Shape::normalize(dims)?;
        if data.len() != shape.numel() {
            return Err(TensorError::InvalidReshape {
                count: data.len(),
                shape: dims.to_vec(),
            });
        }
        Ok(Self::build(
            shape,
            Backing::Owned(CpuStorage::from_vec(data)),
            true,
            None,
        ))
    }

    /// A 0-dimensional tensor holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::build(
            Shape::scalar(),
            Backing::Owned(CpuStorage::from_vec(vec![value])),
            true,
            None,
        )
    }

    /// A tensor whose elements are computed from their cartesian indices.
    ///
    /// `f` is only called with in-bounds indices.
    pub fn from_cartesian_fn<F>(dims: &[usize], f: F) -> Result<Self>
    where
        F: Fn(&[usize]) -> T + Send + Sync + 'static,
    {
        let shape = Shape::normalize(dims)?;
        Ok(Self::computed_from_cartesian(shape, Arc::new(f), false))
    }

    /// A tensor whose elements are computed from their linear index.
    ///
    /// `f` is only called with in-bounds indices.
    pub fn from_linear_fn<F>(dims: &[usize], f: F) -> Result<Self>
    where
        F: Fn(usize) -> T + Send + Sync + 'static,
    {
        let shape = Shape::normalize(dims)?;
        Ok(Self::computed_from_linear(shape, Arc::new(f), false))
    }

    /// A view of `base` through one selector per axis of `base`.
    ///
    /// Slicing a view folds both selector lists into one list against the
    /// tensor that owns the elements, so element access goes through exactly
    /// one translation regardless of how often a tensor has been re-sliced.
    pub fn from_view(selectors: &[Selector], base: &Tensor<T>) -> Result<Self> {
        let source = match &base.source {
            Some(parent) => {
                let composed = parent.view.compose(selectors)?;
                trace!(selectors = ?selectors, composed = ?composed, "composed view selectors");
                ViewSource {
                    base: Arc::clone(&parent.base),
                    base_shape: parent.base_shape.clone(),
                    base_unified: parent.base_unified,
                    view: View::new(&parent.base_shape, composed)?,
                }
            }
            None => ViewSource {
                base: base.cartesian_fn(),
                base_shape: base.shape.clone(),
                base_unified: base.unified,
                view: View::new(&base.shape, selectors.to_vec())?,
            },
        };
        let source = Arc::new(source);
        let shape = source.view.shape().clone();
        let unified = source.base_unified
            && shape == source.base_shape
            && !source.view.selectors().iter().any(Selector::is_list);
        trace!(
            shape = %shape,
            base_shape = %source.base_shape,
            compaction = ?source.view.compaction(),
            "built view"
        );

        let s = Arc::clone(&source);
        let cartesian: CartesianFn<T> = Arc::new(move |idx: &[usize]| (s.base)(&s.view.resolve(idx)));
        let mut tensor = Self::computed_from_cartesian(shape, cartesian, unified);
        tensor.source = Some(source);
        Ok(tensor)
    }

    /// The shape of this tensor.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Row-major strides of this tensor's shape.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Hint that this tensor reads from one contiguous owned buffer.
    ///
    /// Higher layers use it to decide whether to [`unify`](Self::unify)
    /// before heavy elementwise work.
    pub fn is_unified(&self) -> bool {
        self.unified
    }

    /// Returns true if this tensor owns its buffer and accepts writes.
    pub fn is_owned(&self) -> bool {
        matches!(self.backing, Backing::Owned(_))
    }

    /// Returns true if this tensor is a view into another tensor.
    pub fn is_view(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_scalar()
    }

    pub fn is_vector(&self) -> bool {
        self.rank() == 1
    }

    /// The value of a 0-dimensional tensor.
    pub fn as_scalar(&self) -> Option<T> {
        self.is_scalar().then(|| self.get_linear(0))
    }

    /// Length along axis `d`; 1 for axes beyond the rank.
    pub fn size(&self, d: usize) -> usize {
        self.shape.dim(d).unwrap_or(1)
    }

    /// The owned buffer, if this tensor has one.
    pub fn as_slice(&self) -> Option<&[T]> {
        match &self.backing {
            Backing::Owned(storage) => Some(storage.as_slice()),
            Backing::Computed { .. } => None,
        }
    }

    /// Reads the element at `indices` without bounds checking.
    pub(crate) fn get_cartesian(&self, indices: &[usize]) -> T {
        match &self.backing {
            Backing::Owned(storage) => {
                storage.as_slice()[cartesian_to_linear(indices, &self.strides)].clone()
            }
            Backing::Computed { cartesian, .. } => cartesian(indices),
        }
    }

    /// Reads the element at linear `index` without bounds checking.
    pub(crate) fn get_linear(&self, index: usize) -> T {
        match &self.backing {
            Backing::Owned(storage) => storage.as_slice()[index].clone(),
            Backing::Computed { linear, .. } => linear(index),
        }
    }

    /// The cartesian access function, shared rather than wrapped.
    pub(crate) fn cartesian_fn(&self) -> CartesianFn<T> {
        match &self.backing {
            Backing::Owned(storage) => {
                let storage = storage.clone();
                let strides = self.strides.clone();
                Arc::new(move |idx: &[usize]| {
                    storage.as_slice()[cartesian_to_linear(idx, &strides)].clone()
                })
            }
            Backing::Computed { cartesian, .. } => Arc::clone(cartesian),
        }
    }

    /// The linear access function, shared rather than wrapped.
    pub(crate) fn linear_fn(&self) -> LinearFn<T> {
        match &self.backing {
            Backing::Owned(storage) => {
                let storage = storage.clone();
                Arc::new(move |i: usize| storage.as_slice()[i].clone())
            }
            Backing::Computed { linear, .. } => Arc::clone(linear),
        }
    }

    /// Returns the element at cartesian `indices`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidIndex`] if the index count differs from
    /// the rank or any index is out of range.
    pub fn element_at(&self, indices: &[usize]) -> Result<T> {
        if !in_bounds(indices, self.shape.dims()) {
            return Err(TensorError::InvalidIndex {
                index: indices.to_vec(),
                bound: self.shape.dims().to_vec(),
            });
        }
        Ok(self.get_cartesian(indices))
    }

    /// Returns the element at row-major offset `index`.
    pub fn element_at_linear(&self, index: usize) -> Result<T> {
        if !in_bounds_linear(index, self.count) {
            return Err(TensorError::InvalidIndex {
                index: vec![index],
                bound: vec![self.count],
            });
        }
        Ok(self.get_linear(index))
    }

    /// A view through one selector per axis. See [`Tensor::from_view`].
    pub fn slice(&self, selectors: &[Selector]) -> Result<Self> {
        Self::from_view(selectors, self)
    }

    /// A vector view over the half-open range of linear offsets `range`.
    pub fn slice_linear(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end || range.end > self.count || range.is_empty() {
            return Err(TensorError::InvalidSlice(format!(
                "linear range {:?} invalid for {} elements",
                range, self.count
            )));
        }
        let linear = self.linear_fn();
        let lo = range.start;
        let shape = Shape::normalize(&[range.len()])?;
        Ok(Self::computed_from_linear(
            shape,
            Arc::new(move |i: usize| linear(lo + i)),
            false,
        ))
    }

    /// The same elements, in the same row-major order, with shape `dims`.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidReshape`] if `dims` holds a different
    /// number of elements.
    pub fn reshape(&self, dims: &[usize]) -> Result<Self> {
        let shape = Shape::normalize(dims)?;
        if shape.numel() != self.count {
            return Err(TensorError::InvalidReshape {
                count: self.count,
                shape: dims.to_vec(),
            });
        }
        Ok(match &self.backing {
            Backing::Owned(storage) => {
                Self::build(shape, Backing::Owned(storage.clone()), self.unified, None)
            }
            Backing::Computed { linear, .. } => {
                Self::computed_from_linear(shape, Arc::clone(linear), self.unified)
            }
        })
    }

    /// The elements as a vector.
    pub fn ravel(&self) -> Result<Self> {
        self.reshape(&[self.count])
    }

    /// Realizes every element into a freshly owned buffer.
    ///
    /// Tensors that already own their buffer are returned as they are.
    pub fn unify(&self) -> Self {
        if self.is_owned() {
            return self.clone();
        }
        debug!(shape = %self.shape, count = self.count, "unifying tensor");
        let data: Vec<T> = self.all_elements().collect();
        Self::build(
            self.shape.clone(),
            Backing::Owned(CpuStorage::from_vec(data)),
            true,
            None,
        )
    }

    /// All elements in row-major order.
    ///
    /// The iterator is built from the tensor alone, so calling this again
    /// restarts from the first element.
    pub fn all_elements(&self) -> Elements<T> {
        Elements {
            tensor: self.clone(),
            indices: RowMajorIndices::for_shape(&self.shape),
        }
    }

    /// `(cartesian index, element)` pairs in row-major order.
    pub fn coordinates(&self) -> Coordinates<T> {
        Coordinates {
            tensor: self.clone(),
            indices: RowMajorIndices::for_shape(&self.shape),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        match &self.backing {
            Backing::Owned(storage) => storage.as_slice().to_vec(),
            Backing::Computed { .. } => self.all_elements().collect(),
        }
    }

    /// Overwrites the element at `indices` in an owned buffer.
    ///
    /// Views and reshapes taken earlier keep reading the previous values.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidIndex`] for out-of-range indices and
    /// [`TensorError::NotOwned`] for computed tensors and views.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        if !in_bounds(indices, self.shape.dims()) {
            return Err(TensorError::InvalidIndex {
                index: indices.to_vec(),
                bound: self.shape.dims().to_vec(),
            });
        }
        let index = cartesian_to_linear(indices, &self.strides);
        self.set_linear(index, value)
    }

    /// Overwrites the element at linear `index` in an owned buffer.
    pub fn set_linear(&mut self, index: usize, value: T) -> Result<()> {
        if !in_bounds_linear(index, self.count) {
            return Err(TensorError::InvalidIndex {
                index: vec![index],
                bound: vec![self.count],
            });
        }
        match &mut self.backing {
            Backing::Owned(storage) => {
                storage.as_mut_slice()[index] = value;
                Ok(())
            }
            Backing::Computed { .. } => Err(TensorError::NotOwned),
        }
    }
}

impl Tensor<usize> {
    /// The vector `[0, 1, .., n - 1]`, computed on access.
    pub fn iota(n: usize) -> Result<Self> {
        Self::from_linear_fn(&[n], |i| i)
    }
}

impl<T: Element + PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.all_elements().eq(other.all_elements())
    }
}

impl<T> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backing = match (&self.backing, &self.source) {
            (Backing::Owned(_), _) => "owned",
            (Backing::Computed { .. }, Some(_)) => "view",
            (Backing::Computed { .. }, None) => "computed",
        };
        f.debug_struct("Tensor")
            .field("shape", &self.shape.dims())
            .field("backing", &backing)
            .field("unified", &self.unified)
            .finish()
    }
}

/// Row-major iterator over a tensor's elements.
#[derive(Clone)]
pub struct Elements<T> {
    tensor: Tensor<T>,
    indices: RowMajorIndices,
}

impl<T: Element> Iterator for Elements<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let index = self.indices.next()?;
        Some(self.tensor.get_cartesian(&index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T: Element> ExactSizeIterator for Elements<T> {}

/// Row-major iterator over `(cartesian index, element)` pairs.
#[derive(Clone)]
pub struct Coordinates<T> {
    tensor: Tensor<T>,
    indices: RowMajorIndices,
}

impl<T: Element> Iterator for Coordinates<T> {
    type Item = (Vec<usize>, T);

    fn next(&mut self) -> Option<(Vec<usize>, T)> {
        let index = self.indices.next()?;
        let value = self.tensor.get_cartesian(&index);
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T: Element> ExactSizeIterator for Coordinates<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector::{All, List, Range as R, Single};
    use approx::assert_relative_eq;

    fn sample() -> Tensor<i32> {
        Tensor::from_vec(&[2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap()
    }

    #[test]
    fn test_from_vec() {
        let t = sample();
        assert_eq!(t.dims(), &[2, 3]);
        assert_eq!(t.strides(), &[3, 1]);
        assert_eq!(t.count(), 6);
        assert!(t.is_unified());
        assert!(t.is_owned());
        assert_eq!(t.element_at(&[1, 2]).unwrap(), 5);
        assert_eq!(t.element_at_linear(4).unwrap(), 4);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        assert!(matches!(
            Tensor::from_vec(&[2, 2], vec![1, 2, 3]),
            Err(TensorError::InvalidReshape { count: 3, .. })
        ));
        assert!(matches!(
            Tensor::from_vec(&[0], Vec::<i32>::new()),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let t = sample();
        assert_eq!(
            t.element_at(&[2, 0]),
            Err(TensorError::InvalidIndex {
                index: vec![2, 0],
                bound: vec![2, 3]
            })
        );
        assert!(t.element_at(&[1]).is_err());
        assert_eq!(
            t.element_at_linear(6),
            Err(TensorError::InvalidIndex {
                index: vec![6],
                bound: vec![6]
            })
        );
    }

    #[test]
    fn test_constant() {
        let t = Tensor::constant(&[3, 1, 4], 7u8).unwrap();
        assert_eq!(t.dims(), &[3, 4]);
        assert!(t.is_unified());
        assert!(!t.is_owned());
        assert!(t.all_elements().all(|v| v == 7));
    }

    #[test]
    fn test_scalar() {
        let s = Tensor::scalar(9);
        assert!(s.is_scalar());
        assert_eq!(s.count(), 1);
        assert_eq!(s.element_at(&[]).unwrap(), 9);
        assert_eq!(s.as_scalar(), Some(9));
        assert_eq!(sample().as_scalar(), None);
        assert_eq!(s.size(0), 1);
    }

    #[test]
    fn test_computed_tensors() {
        let c = Tensor::from_cartesian_fn(&[2, 3], |idx| idx[0] * 10 + idx[1]).unwrap();
        assert!(!c.is_unified());
        assert_eq!(c.element_at(&[1, 2]).unwrap(), 12);
        assert_eq!(c.element_at_linear(4).unwrap(), 11);

        let l = Tensor::from_linear_fn(&[2, 3], |i| i as f64 * 0.5).unwrap();
        assert_relative_eq!(l.element_at(&[1, 1]).unwrap(), 2.0);
        assert_relative_eq!(l.element_at_linear(5).unwrap(), 2.5);
    }

    #[test]
    fn test_iota() {
        let v = Tensor::iota(5).unwrap();
        assert_eq!(v.to_vec(), vec![0, 1, 2, 3, 4]);
        assert!(Tensor::iota(0).is_err());
    }

    #[test]
    fn test_slice_list() {
        let v = sample().slice(&[All, List(vec![0, 2])]).unwrap();
        assert_eq!(v.dims(), &[2, 2]);
        assert_eq!(v.to_vec(), vec![0, 2, 3, 5]);
        assert!(v.is_view());
        assert!(!v.is_unified());
    }

    #[test]
    fn test_slice_single_drops_axis() {
        let v = sample().slice(&[Single(1), All]).unwrap();
        assert_eq!(v.dims(), &[3]);
        assert_eq!(v.to_vec(), vec![3, 4, 5]);
        let e = sample().slice(&[Single(1), Single(1)]).unwrap();
        assert!(e.is_scalar());
        assert_eq!(e.as_scalar(), Some(4));
    }

    #[test]
    fn test_full_view_stays_unified() {
        let v = sample().slice(&[All, R(0, 3)]).unwrap();
        assert!(v.is_unified());
        let w = sample().slice(&[All, List(vec![0, 1, 2])]).unwrap();
        assert!(!w.is_unified());
    }

    #[test]
    fn test_slice_of_slice_composes() {
        let t = Tensor::iota(100).unwrap().reshape(&[10, 10]).unwrap();
        let a = t.slice(&[R(2, 8), List(vec![9, 7, 5, 3, 1])]).unwrap();
        let b = a.slice(&[R(1, 4), R(1, 3)]).unwrap();
        let c = b.slice(&[Single(2), All]).unwrap();
        assert_eq!(b.dims(), &[3, 2]);
        assert_eq!(b.to_vec(), vec![37, 35, 47, 45, 57, 55]);
        assert_eq!(c.to_vec(), vec![57, 55]);

        let direct = t.slice(&[Single(5), List(vec![7, 5])]).unwrap();
        assert_eq!(c, direct);
    }

    #[test]
    fn test_slice_errors() {
        let t = sample();
        assert!(matches!(t.slice(&[All]), Err(TensorError::InvalidSlice(_))));
        assert!(matches!(
            t.slice(&[All, R(1, 4)]),
            Err(TensorError::InvalidSlice(_))
        ));
        let v = t.slice(&[All, R(1, 3)]).unwrap();
        assert!(matches!(
            v.slice(&[All, Single(2)]),
            Err(TensorError::InvalidSlice(_))
        ));
    }

    #[test]
    fn test_slice_linear() {
        let t = sample();
        assert_eq!(t.slice_linear(1..4).unwrap().to_vec(), vec![1, 2, 3]);
        assert_eq!(t.slice_linear(0..6).unwrap().count(), 6);
        assert!(t.slice_linear(3..3).is_err());
        assert!(t.slice_linear(4..7).is_err());
    }

    #[test]
    fn test_reshape() {
        let t = sample();
        let r = t.reshape(&[3, 2]).unwrap();
        assert_eq!(r.dims(), &[3, 2]);
        assert_eq!(r.to_vec(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(r.element_at(&[2, 0]).unwrap(), 4);
        assert!(r.is_owned());
        assert_eq!(t.ravel().unwrap().dims(), &[6]);
    }

    #[test]
    fn test_reshape_view_uses_row_major_order() {
        let v = sample().slice(&[All, List(vec![2, 0])]).unwrap();
        let r = v.reshape(&[4]).unwrap();
        assert_eq!(r.to_vec(), vec![2, 0, 5, 3]);
    }

    #[test]
    fn test_reshape_mismatch() {
        assert_eq!(
            sample().reshape(&[4]),
            Err(TensorError::InvalidReshape {
                count: 6,
                shape: vec![4]
            })
        );
    }

    #[test]
    fn test_unify() {
        let v = sample().slice(&[All, List(vec![0, 2])]).unwrap();
        let u = v.unify();
        assert!(u.is_owned());
        assert!(u.is_unified());
        assert_eq!(u.as_slice(), Some(&[0, 2, 3, 5][..]));
    }

    #[test]
    fn test_all_elements_restartable() {
        let t = Tensor::iota(6).unwrap().reshape(&[3, 2]).unwrap();
        let first: Vec<usize> = t.all_elements().collect();
        let second: Vec<usize> = t.all_elements().collect();
        assert_eq!(first, second);
        assert_eq!(t.all_elements().len(), 6);
    }

    #[test]
    fn test_coordinates() {
        let pairs: Vec<(Vec<usize>, i32)> = sample().coordinates().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (vec![0, 0], 0));
        assert_eq!(pairs[4], (vec![1, 1], 4));
    }

    #[test]
    fn test_set_copies_on_write() {
        let mut t = sample();
        let view = t.slice(&[Single(0), All]).unwrap();
        let reshaped = t.reshape(&[6]).unwrap();
        t.set(&[0, 1], 10).unwrap();
        t.set_linear(5, 50).unwrap();
        assert_eq!(t.to_vec(), vec![0, 10, 2, 3, 4, 50]);
        assert_eq!(view.to_vec(), vec![0, 1, 2]);
        assert_eq!(reshaped.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_set_rejects_computed_and_out_of_bounds() {
        let mut t = sample();
        assert!(matches!(
            t.set(&[2, 2], 1),
            Err(TensorError::InvalidIndex { .. })
        ));
        let mut v = t.slice(&[All, R(0, 2)]).unwrap();
        assert_eq!(v.set(&[0, 0], 1), Err(TensorError::NotOwned));
    }

    #[test]
    fn test_equality() {
        let a = sample();
        let b = Tensor::from_linear_fn(&[2, 3], |i| i as i32).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, a.reshape(&[3, 2]).unwrap());
    }

    #[test]
    fn test_debug() {
        let s = format!("{:?}", sample());
        assert!(s.contains("owned"));
        let v = sample().slice(&[All, Single(0)]).unwrap();
        assert!(format!("{:?}", v).contains("view"));
    }
}
