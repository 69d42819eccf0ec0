use std::ops::{Range, RangeFull, RangeInclusive};

/// Per-axis choice of which positions a view includes.
///
/// Build selectors through the `From` conversions so call sites read like
/// indexing expressions:
///
/// ```
/// use shear_tensor::Selector;
///
/// assert_eq!(Selector::from(..), Selector::All);
/// assert_eq!(Selector::from(3), Selector::Single(3));
/// assert_eq!(Selector::from(1..4), Selector::Range(1, 4));
/// assert_eq!(Selector::from(1..=4), Selector::Range(1, 5));
/// assert_eq!(Selector::from(vec![0, 2]), Selector::List(vec![0, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every position of the axis.
    All,
    /// One position; the axis is dropped from the view's shape.
    Single(usize),
    /// The half-open range `[lo, hi)`.
    Range(usize, usize),
    /// An explicit list of positions, in order. Duplicates are allowed.
    List(Vec<usize>),
}

impl Selector {
    /// Returns true iff the selector only addresses positions below `bound`.
    pub fn is_in_bounds(&self, bound: usize) -> bool {
        match self {
            Selector::All => true,
            Selector::Single(i) => *i < bound,
            Selector::Range(lo, hi) => lo <= hi && *hi <= bound,
            Selector::List(xs) => xs.iter().all(|&x| x < bound),
        }
    }

    /// Number of positions the selector yields on an axis of length `bound`.
    pub fn extent(&self, bound: usize) -> usize {
        match self {
            Selector::All => bound,
            Selector::Single(_) => 1,
            Selector::Range(lo, hi) => hi.saturating_sub(*lo),
            Selector::List(xs) => xs.len(),
        }
    }

    /// Maps a position relative to the view onto the underlying axis.
    ///
    /// Axes governed by `Single` are compacted out of every view, so they are
    /// never translated; the single position is returned for completeness.
    pub fn translate(&self, relative: usize) -> usize {
        match self {
            Selector::All => relative,
            Selector::Single(i) => {
                debug_assert_eq!(relative, 0, "single selectors are never translated");
                *i
            }
            Selector::Range(lo, _) => lo + relative,
            Selector::List(xs) => xs[relative],
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Selector::List(_))
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Selector::All
    }
}

impl From<usize> for Selector {
    fn from(i: usize) -> Self {
        Selector::Single(i)
    }
}

impl From<Range<usize>> for Selector {
    fn from(r: Range<usize>) -> Self {
        Selector::Range(r.start, r.end)
    }
}

impl From<RangeInclusive<usize>> for Selector {
    fn from(r: RangeInclusive<usize>) -> Self {
        // Saturating keeps `lo..=usize::MAX` constructible; bounds checks reject it.
        let (lo, hi) = r.into_inner();
        Selector::Range(lo, hi.saturating_add(1))
    }
}

impl From<Vec<usize>> for Selector {
    fn from(xs: Vec<usize>) -> Self {
        Selector::List(xs)
    }
}

impl From<&[usize]> for Selector {
    fn from(xs: &[usize]) -> Self {
        Selector::List(xs.to_vec())
    }
}
