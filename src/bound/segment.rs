use std::{cmp::Ordering, fmt};

use index_bound_predicate::Value;

use super::{BoundError, Endpoint, EndpointOrdering, Result};

/// A contiguous, non-empty range between two endpoints with `low <= high`.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    low: Endpoint,
    high: Endpoint,
}

impl Segment {
    /// Builds a segment from two endpoints given in either order.
    ///
    /// Endpoints that touch at a shared value produce a single closed point.
    ///
    /// # Errors
    ///
    /// [`BoundError::DegenerateSegment`] when the endpoints touch without
    /// sharing their value (nothing lies between them), and
    /// [`BoundError::IncomparableValues`] when they cannot be ordered.
    pub fn new(p1: Endpoint, p2: Endpoint) -> Result<Self> {
        match p1.compare(&p2)? {
            EndpointOrdering::Less | EndpointOrdering::Touching { shared: true } => {
                Ok(Self::from_ordered(p1, p2))
            }
            EndpointOrdering::Greater => Ok(Self::from_ordered(p2, p1)),
            EndpointOrdering::Touching { shared: false } => Err(BoundError::DegenerateSegment {
                low: p1.to_string(),
                high: p2.to_string(),
            }),
        }
    }

    /// `(-∞, +∞)`.
    #[must_use]
    pub fn full() -> Self {
        Self::from_ordered(Endpoint::NegInf, Endpoint::PosInf)
    }

    /// The closed single-value segment `[value, value]`.
    #[must_use]
    pub fn point<V>(value: V) -> Self
    where
        V: Into<Value>,
    {
        let value = value.into();
        Self::from_ordered(
            Endpoint::inclusive(value.clone()),
            Endpoint::inclusive(value),
        )
    }

    /// Lower endpoint.
    #[must_use]
    pub fn low(&self) -> &Endpoint {
        &self.low
    }

    /// Upper endpoint.
    #[must_use]
    pub fn high(&self) -> &Endpoint {
        &self.high
    }

    /// Splits the segment back into `(low, high)`.
    #[must_use]
    pub fn into_endpoints(self) -> (Endpoint, Endpoint) {
        (self.low, self.high)
    }

    /// True for `(-∞, +∞)`.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(
            (&self.low, &self.high),
            (Endpoint::NegInf, Endpoint::PosInf)
        )
    }

    /// Whether `point` is inside the segment, honouring both inclusivity flags.
    ///
    /// Infinities are never inclusive, so no segment contains `-∞` or `+∞`.
    pub fn contains(&self, point: &Endpoint) -> Result<bool> {
        Ok(self.low.compare(point)?.is_less_or_shared()
            && self.high.compare(point)?.is_greater_or_shared())
    }

    /// Whether the two segments share at least one value.
    pub fn intersects(&self, other: &Segment) -> Result<bool> {
        let low = max_lower(&self.low, &other.low)?;
        let high = min_upper(&self.high, &other.high)?;
        encloses(low, high)
    }

    /// Whether the segments meet at a value exactly one of them includes, so
    /// that together they cover a contiguous range without overlapping.
    pub fn is_adjacent(&self, other: &Segment) -> Result<bool> {
        Ok(meets(&self.high, &other.low)? || meets(&other.high, &self.low)?)
    }

    /// `Equal` when the segments overlap (order undefined), otherwise the
    /// order of their lower endpoints.
    pub fn compare(&self, other: &Segment) -> Result<Ordering> {
        if self.intersects(other)? {
            return Ok(Ordering::Equal);
        }
        cmp_lower(&self.low, &other.low)
    }

    /// The common part of both segments, if any.
    pub fn intersection(&self, other: &Segment) -> Result<Option<Segment>> {
        let low = max_lower(&self.low, &other.low)?;
        let high = min_upper(&self.high, &other.high)?;
        if encloses(low, high)? {
            Ok(Some(Self::from_ordered(low.clone(), high.clone())))
        } else {
            Ok(None)
        }
    }

    /// The smallest segment covering both, defined only when they overlap or
    /// are adjacent.
    pub fn span(&self, other: &Segment) -> Result<Option<Segment>> {
        if !(self.intersects(other)? || self.is_adjacent(other)?) {
            return Ok(None);
        }
        let low = min_lower(&self.low, &other.low)?;
        let high = max_upper(&self.high, &other.high)?;
        Ok(Some(Self::from_ordered(low.clone(), high.clone())))
    }

    pub(crate) fn from_ordered(low: Endpoint, high: Endpoint) -> Self {
        Self { low, high }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.low.is_inclusive() { '[' } else { '(' };
        let close = if self.high.is_inclusive() { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.low, self.high)
    }
}

// Lower-bound order: at equal values Included(x) < Excluded(x).
pub(crate) fn cmp_lower(a: &Endpoint, b: &Endpoint) -> Result<Ordering> {
    Ok(match a.position(b)? {
        Ordering::Equal => match (a.is_inclusive(), b.is_inclusive()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        },
        other => other,
    })
}

// Upper-bound order: at equal values Excluded(x) < Included(x).
pub(crate) fn cmp_upper(a: &Endpoint, b: &Endpoint) -> Result<Ordering> {
    Ok(match a.position(b)? {
        Ordering::Equal => match (a.is_inclusive(), b.is_inclusive()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
        other => other,
    })
}

fn max_lower<'a>(a: &'a Endpoint, b: &'a Endpoint) -> Result<&'a Endpoint> {
    Ok(if cmp_lower(a, b)? == Ordering::Greater {
        a
    } else {
        b
    })
}

fn min_lower<'a>(a: &'a Endpoint, b: &'a Endpoint) -> Result<&'a Endpoint> {
    Ok(if cmp_lower(a, b)? == Ordering::Less {
        a
    } else {
        b
    })
}

fn min_upper<'a>(a: &'a Endpoint, b: &'a Endpoint) -> Result<&'a Endpoint> {
    Ok(if cmp_upper(a, b)? == Ordering::Less {
        a
    } else {
        b
    })
}

fn max_upper<'a>(a: &'a Endpoint, b: &'a Endpoint) -> Result<&'a Endpoint> {
    Ok(if cmp_upper(a, b)? == Ordering::Greater {
        a
    } else {
        b
    })
}

// Whether `[low, high]` (lower/upper roles) holds at least one value.
fn encloses(low: &Endpoint, high: &Endpoint) -> Result<bool> {
    Ok(match low.compare(high)? {
        EndpointOrdering::Less => true,
        EndpointOrdering::Greater => false,
        EndpointOrdering::Touching { shared } => shared,
    })
}

// An upper endpoint meeting a lower endpoint at a finite value that exactly
// one side includes.
fn meets(high: &Endpoint, low: &Endpoint) -> Result<bool> {
    if high.is_infinite() || low.is_infinite() {
        return Ok(false);
    }
    Ok(high.position(low)? == Ordering::Equal && high.is_inclusive() != low.is_inclusive())
}
