//! Range and length bounds.
//!
//! Predicates take their bounds as ordinary Rust range expressions
//! (`..`, `1..=20`, `..5`, `0.0..`). An unbounded side falls back to the
//! host's safe-integer span, `[-(2^53 - 1), 2^53 - 1]`.

use crate::foundation::{Value, ViolationKind};
use std::ops::{Bound, RangeBounds};

/// Largest integer a double represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Smallest integer a double represents exactly (`-(2^53 - 1)`).
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

// ============================================================================
// NUMERIC SPAN
// ============================================================================

/// A numeric interval checked against `f64` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Span {
    start: Bound<f64>,
    end: Bound<f64>,
}

impl Span {
    pub(crate) fn from_floats(range: &impl RangeBounds<f64>) -> Self {
        Self {
            start: range.start_bound().cloned(),
            end: range.end_bound().cloned(),
        }
    }

    pub(crate) fn from_integers(range: &impl RangeBounds<i64>) -> Self {
        Self {
            start: widen(range.start_bound()),
            end: widen(range.end_bound()),
        }
    }

    /// The first NaN bound, if any.
    pub(crate) fn nan_bound(&self) -> Option<f64> {
        [self.start, self.end].into_iter().find_map(|bound| match bound {
            Bound::Included(b) | Bound::Excluded(b) if b.is_nan() => Some(b),
            _ => None,
        })
    }

    /// `None` when `value` lies inside the span.
    pub(crate) fn check(&self, value: f64) -> Option<ViolationKind> {
        let below = match self.start {
            Bound::Included(min) => value < min,
            Bound::Excluded(min) => value <= min,
            Bound::Unbounded => value < MIN_SAFE_INTEGER as f64,
        };
        if below {
            return Some(ViolationKind::TooSmall);
        }
        let above = match self.end {
            Bound::Included(max) => value > max,
            Bound::Excluded(max) => value >= max,
            Bound::Unbounded => value > MAX_SAFE_INTEGER as f64,
        };
        above.then_some(ViolationKind::TooLarge)
    }
}

fn widen(bound: Bound<&i64>) -> Bound<f64> {
    match bound {
        Bound::Included(b) => Bound::Included(*b as f64),
        Bound::Excluded(b) => Bound::Excluded(*b as f64),
        Bound::Unbounded => Bound::Unbounded,
    }
}

// ============================================================================
// LENGTH BOUNDS
// ============================================================================

/// Inclusive `[min, max]` on a character, element or key count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthBounds {
    /// Minimum count (inclusive).
    pub min: usize,
    /// Maximum count (inclusive).
    pub max: usize,
}

impl LengthBounds {
    /// The signed inclusive bounds a range asks for, before validation.
    ///
    /// `..0` asks for a maximum of `-1`; `..` asks for `[0, MAX_SAFE_INTEGER]`.
    pub(crate) fn requested(range: &impl RangeBounds<usize>) -> (i64, i64) {
        let min = match range.start_bound() {
            Bound::Included(b) => saturate(*b),
            Bound::Excluded(b) => saturate(*b).saturating_add(1),
            Bound::Unbounded => 0,
        };
        let max = match range.end_bound() {
            Bound::Included(b) => saturate(*b),
            Bound::Excluded(b) => saturate(*b) - 1,
            Bound::Unbounded => MAX_SAFE_INTEGER,
        };
        (min, max)
    }

    /// The unusable sides of a length range, as reportable values.
    ///
    /// A side below zero (`..0`) is reported as its resolved count. A side the
    /// caller wrote above the safe-integer maximum is reported with the exact
    /// digits written, since an `f64` cannot hold it.
    pub(crate) fn invalid_sides(range: &impl RangeBounds<usize>) -> Vec<Value> {
        let (min, max) = Self::requested(range);
        [(min, range.start_bound()), (max, range.end_bound())]
            .into_iter()
            .filter(|(resolved, _)| !is_valid_length_bound(*resolved))
            .map(|(resolved, written)| match written {
                Bound::Included(&b) | Bound::Excluded(&b) if saturate(b) > MAX_SAFE_INTEGER => {
                    Value::String(b.to_string())
                }
                _ => Value::from(resolved),
            })
            .collect()
    }

    /// Clamps requested bounds into `usize`.
    pub(crate) fn clamped(min: i64, max: i64) -> Self {
        let clamp = |b: i64| usize::try_from(b.clamp(0, MAX_SAFE_INTEGER)).unwrap_or(usize::MAX);
        Self {
            min: clamp(min),
            max: clamp(max),
        }
    }

    /// `None` when `len` lies inside the bounds.
    #[must_use]
    pub fn check(&self, len: usize) -> Option<ViolationKind> {
        if len < self.min {
            Some(ViolationKind::TooShort)
        } else if len > self.max {
            Some(ViolationKind::TooLong)
        } else {
            None
        }
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self::clamped(0, MAX_SAFE_INTEGER)
    }
}

fn saturate(b: usize) -> i64 {
    i64::try_from(b).unwrap_or(i64::MAX)
}

/// A usable length bound is a safe non-negative integer.
fn is_valid_length_bound(bound: i64) -> bool {
    (0..=MAX_SAFE_INTEGER).contains(&bound)
}
