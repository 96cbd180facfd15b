use std::{cmp::Ordering, fmt};

use index_bound_predicate::{Orderable, Value};

use super::{BoundError, Result};

/// One boundary of a [`Segment`](super::Segment).
///
/// Infinite endpoints are never inclusive: there is no key at either end of
/// the domain that a scan could reach.
#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
    /// Below every value.
    NegInf,
    /// Above every value.
    PosInf,
    /// A concrete boundary value.
    Finite {
        /// Boundary value.
        value: Value,
        /// Whether `value` itself belongs to the range.
        inclusive: bool,
    },
}

/// Result of [`Endpoint::compare`].
///
/// Endpoints at the same position do not have a strict order. Whether they
/// actually share that position depends on both inclusivity flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointOrdering {
    /// Strictly below the other endpoint.
    Less,
    /// Strictly above the other endpoint.
    Greater,
    /// Same position; `shared` is true only when both sides include it.
    Touching {
        /// Both endpoints include the common value.
        shared: bool,
    },
}

impl EndpointOrdering {
    /// `Less`, or touching at a shared point.
    #[must_use]
    pub fn is_less_or_shared(self) -> bool {
        matches!(
            self,
            EndpointOrdering::Less | EndpointOrdering::Touching { shared: true }
        )
    }

    /// `Greater`, or touching at a shared point.
    #[must_use]
    pub fn is_greater_or_shared(self) -> bool {
        matches!(
            self,
            EndpointOrdering::Greater | EndpointOrdering::Touching { shared: true }
        )
    }
}

impl Endpoint {
    /// Finite endpoint with explicit inclusivity.
    #[must_use]
    pub fn new<V>(value: V, inclusive: bool) -> Self
    where
        V: Into<Value>,
    {
        Endpoint::Finite {
            value: value.into(),
            inclusive,
        }
    }

    /// Finite endpoint that includes `value`.
    #[must_use]
    pub fn inclusive<V>(value: V) -> Self
    where
        V: Into<Value>,
    {
        Self::new(value, true)
    }

    /// Finite endpoint that excludes `value`.
    #[must_use]
    pub fn exclusive<V>(value: V) -> Self
    where
        V: Into<Value>,
    {
        Self::new(value, false)
    }

    /// The boundary value, or `None` for an infinity.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Endpoint::Finite { value, .. } => Some(value),
            Endpoint::NegInf | Endpoint::PosInf => None,
        }
    }

    /// Whether the boundary value belongs to the range. Always false for infinities.
    #[must_use]
    pub fn is_inclusive(&self) -> bool {
        matches!(
            self,
            Endpoint::Finite {
                inclusive: true,
                ..
            }
        )
    }

    /// True for `NegInf` and `PosInf`.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Endpoint::NegInf | Endpoint::PosInf)
    }

    /// Orders two endpoints by position, reporting ties as [`EndpointOrdering::Touching`].
    ///
    /// # Errors
    ///
    /// Returns [`BoundError::IncomparableValues`] when both endpoints are
    /// finite and their values have no common ordering.
    pub fn compare(&self, other: &Endpoint) -> Result<EndpointOrdering> {
        Ok(match self.position(other)? {
            Ordering::Less => EndpointOrdering::Less,
            Ordering::Greater => EndpointOrdering::Greater,
            Ordering::Equal => EndpointOrdering::Touching {
                shared: self.is_inclusive() && other.is_inclusive(),
            },
        })
    }

    /// Flips inclusivity of a finite endpoint; infinities are unchanged.
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Endpoint::Finite { value, inclusive } => Endpoint::Finite {
                value,
                inclusive: !inclusive,
            },
            infinite => infinite,
        }
    }

    /// Position on the line, ignoring inclusivity. Matching infinities are equal.
    pub(crate) fn position(&self, other: &Endpoint) -> Result<Ordering> {
        use Endpoint::*;
        match (self, other) {
            (NegInf, NegInf) | (PosInf, PosInf) => Ok(Ordering::Equal),
            (NegInf, _) | (_, PosInf) => Ok(Ordering::Less),
            (PosInf, _) | (_, NegInf) => Ok(Ordering::Greater),
            (Finite { value: lhs, .. }, Finite { value: rhs, .. }) => {
                Orderable::compare(lhs, rhs).ok_or_else(|| BoundError::IncomparableValues {
                    left: lhs.to_string(),
                    right: rhs.to_string(),
                })
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::NegInf => f.write_str("-∞"),
            Endpoint::PosInf => f.write_str("+∞"),
            Endpoint::Finite { value, .. } => write!(f, "{value}"),
        }
    }
}
