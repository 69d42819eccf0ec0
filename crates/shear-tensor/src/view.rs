//! View composition.
//!
//! A [`View`] is a selector list applied to a base shape together with the
//! derived result shape and compaction record. Views over views are never
//! chained: [`compose_selectors`] folds a child selector list through its
//! parent into one list expressed against the parent's own base, so a view
//! always resolves indices with a single translation step no matter how many
//! times it has been re-sliced.

use crate::error::{Result, TensorError};
use crate::selector::Selector;
use crate::shape::Shape;

/// Per-axis record of positions that no longer vary in a view.
///
/// `Some(i)` means the base axis is pinned at absolute position `i` and does
/// not appear in the view's shape.
pub type Compaction = Vec<Option<usize>>;

/// A validated selector list against a base shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    selectors: Vec<Selector>,
    compaction: Compaction,
    shape: Shape,
}

impl View {
    /// Validates `selectors` against `base` and derives the view's shape.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidSlice`] if the selector count differs from
    /// the base rank, a selector is out of bounds, or an axis would be empty.
    pub fn new(base: &Shape, selectors: Vec<Selector>) -> Result<Self> {
        let (shape, compaction) = compute_view_shape(base.dims(), &selectors)?;
        Ok(View {
            selectors,
            compaction,
            shape,
        })
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn compaction(&self) -> &[Option<usize>] {
        &self.compaction
    }

    /// Shape of the view, with pinned axes removed.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Maps in-bounds cartesian indices of the view onto the base.
    pub fn resolve(&self, indices: &[usize]) -> Vec<usize> {
        debug_assert_eq!(indices.len(), self.shape.ndim());
        let mut resolved: Vec<usize> = vec![0; self.selectors.len()];
        for ((axis, selector), &i) in self.open_axes().zip(indices) {
            resolved[axis] = selector.translate(i);
        }
        for (axis, pinned) in self.compaction.iter().enumerate() {
            if let Some(d) = pinned {
                resolved[axis] = *d;
            }
        }
        resolved
    }

    /// Base axes that still vary in the view, with their selectors, in
    /// the order they appear in the view's shape.
    fn open_axes(&self) -> impl Iterator<Item = (usize, &Selector)> + '_ {
        self.compaction
            .iter()
            .zip(&self.selectors)
            .enumerate()
            .filter(|(_, (pinned, _))| pinned.is_none())
            .map(|(axis, (_, selector))| (axis, selector))
    }

    /// Folds `child` (a selector list against this view's shape) into a list
    /// against this view's base.
    pub fn compose(&self, child: &[Selector]) -> Result<Vec<Selector>> {
        compose_selectors(self, child)
    }
}

/// Computes the result shape and compaction of `selectors` applied to a base
/// with dimensions `base`.
pub fn compute_view_shape(base: &[usize], selectors: &[Selector]) -> Result<(Shape, Compaction)> {
    if selectors.len() != base.len() {
        return Err(TensorError::InvalidSlice(format!(
            "expected {} selectors, got {}",
            base.len(),
            selectors.len()
        )));
    }
    if let Some((axis, s)) = selectors
        .iter()
        .enumerate()
        .find(|(i, s)| !s.is_in_bounds(base[*i]))
    {
        return Err(TensorError::InvalidSlice(format!(
            "selector {:?} out of bounds for axis {} of length {}",
            s, axis, base[axis]
        )));
    }

    let extents: Vec<usize> = selectors
        .iter()
        .zip(base)
        .map(|(s, &bound)| s.extent(bound))
        .collect();
    if let Some(axis) = extents.iter().position(|&e| e < 1) {
        return Err(TensorError::InvalidSlice(format!(
            "selector {:?} selects nothing on axis {}",
            selectors[axis], axis
        )));
    }

    let compaction = selectors
        .iter()
        .zip(&extents)
        .map(|(s, &extent)| {
            if extent != 1 {
                return None;
            }
            Some(match s {
                Selector::All => 0,
                Selector::Single(i) => *i,
                Selector::Range(lo, _) => *lo,
                Selector::List(xs) => xs[0],
            })
        })
        .collect();

    let dims: Vec<usize> = extents.into_iter().filter(|&e| e != 1).collect();
    Ok((Shape::normalize(&dims)?, compaction))
}

/// Folds a child selector list through its parent view into one absolute
/// selector list against the parent's base.
///
/// `child` holds one selector per axis of the parent view's shape. Each is
/// checked against that axis before folding, so the result only names
/// positions the parent can reach.
///
/// # Errors
/// Returns [`TensorError::InvalidSlice`] if the selector count differs from
/// the parent's rank or a selector is out of bounds for its axis.
pub fn compose_selectors(parent: &View, child: &[Selector]) -> Result<Vec<Selector>> {
    let open = parent.shape.dims();
    if child.len() != open.len() {
        return Err(TensorError::InvalidSlice(format!(
            "expected {} selectors, got {}",
            open.len(),
            child.len()
        )));
    }
    if let Some((axis, (s, bound))) = child
        .iter()
        .zip(open)
        .enumerate()
        .find(|(_, (s, bound))| !s.is_in_bounds(**bound))
    {
        return Err(TensorError::InvalidSlice(format!(
            "selector {:?} out of bounds for axis {} of length {}",
            s, axis, bound
        )));
    }

    let mut requests = child.iter();
    parent
        .compaction
        .iter()
        .zip(&parent.selectors)
        .map(|(pinned, selector)| match pinned {
            Some(d) => Ok(Selector::Single(*d)),
            None => requests
                .next()
                .map(|request| fold(selector, request.clone()))
                .ok_or_else(|| TensorError::InvalidSlice("too few selectors".to_string())),
        })
        .collect()
}

fn fold(parent: &Selector, request: Selector) -> Selector {
    match parent {
        Selector::All => request,
        Selector::Single(s) => Selector::Single(*s),
        Selector::Range(lo, _) => match request {
            Selector::All => parent.clone(),
            Selector::Single(s) => Selector::Single(lo + s),
            Selector::Range(a, b) => Selector::Range(lo + a, lo + b),
            Selector::List(ys) => Selector::List(ys.into_iter().map(|y| lo + y).collect()),
        },
        Selector::List(xs) => match request {
            Selector::All => parent.clone(),
            Selector::Single(s) => Selector::Single(xs[s]),
            Selector::Range(a, b) => Selector::List(xs[a..b].to_vec()),
            Selector::List(ys) => Selector::List(ys.into_iter().map(|y| xs[y]).collect()),
        },
    }
}
