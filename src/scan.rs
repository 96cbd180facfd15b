//! Scan-range descriptors handed to the storage engine.
//!
//! One [`IndexRange`] is produced per segment of a planned [`NumberLine`]. The
//! bounds are owned so callers can keep them past the planner's lifetime.

use std::{cmp::Ordering, fmt, ops::Bound};

use index_bound_predicate::{Orderable, Value};

use crate::bound::{BoundError, Endpoint, NumberLine, Result, Segment};

/// A key range with owned bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexRange {
    /// Low bound (inclusive/exclusive/unbounded).
    pub low: Bound<Value>,
    /// High bound (inclusive/exclusive/unbounded).
    pub high: Bound<Value>,
}

impl IndexRange {
    /// Unbounded range (all keys).
    pub fn all() -> Self {
        Self {
            low: Bound::Unbounded,
            high: Bound::Unbounded,
        }
    }

    /// Range from explicit bounds.
    pub fn new(low: Bound<Value>, high: Bound<Value>) -> Self {
        Self { low, high }
    }

    /// One range per segment of `line`, in key order.
    pub fn from_line(line: &NumberLine) -> Vec<Self> {
        line.iter().map(Self::from).collect()
    }

    /// Whether the range covers every key.
    pub fn is_unbounded(&self) -> bool {
        matches!(
            (&self.low, &self.high),
            (Bound::Unbounded, Bound::Unbounded)
        )
    }

    /// Borrowed view of the bounds suitable for `BTreeMap::range` style APIs.
    pub fn as_borrowed_bounds(&self) -> (Bound<&Value>, Bound<&Value>) {
        (self.low.as_ref(), self.high.as_ref())
    }

    /// Whether this range contains `key`.
    pub fn contains(&self, key: &Value) -> Result<bool> {
        let low_ok = match &self.low {
            Bound::Unbounded => true,
            Bound::Included(bound) => order(key, bound)? != Ordering::Less,
            Bound::Excluded(bound) => order(key, bound)? == Ordering::Greater,
        };
        if !low_ok {
            return Ok(false);
        }
        Ok(match &self.high {
            Bound::Unbounded => true,
            Bound::Included(bound) => order(key, bound)? != Ordering::Greater,
            Bound::Excluded(bound) => order(key, bound)? == Ordering::Less,
        })
    }
}

impl From<Segment> for IndexRange {
    fn from(segment: Segment) -> Self {
        let (low, high) = segment.into_endpoints();
        Self {
            low: to_bound(low),
            high: to_bound(high),
        }
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.low {
            Bound::Unbounded => f.write_str("(-∞")?,
            Bound::Included(value) => write!(f, "[{value}")?,
            Bound::Excluded(value) => write!(f, "({value}")?,
        }
        match &self.high {
            Bound::Unbounded => f.write_str(", +∞)"),
            Bound::Included(value) => write!(f, ", {value}]"),
            Bound::Excluded(value) => write!(f, ", {value})"),
        }
    }
}

fn to_bound(endpoint: Endpoint) -> Bound<Value> {
    match endpoint {
        Endpoint::NegInf | Endpoint::PosInf => Bound::Unbounded,
        Endpoint::Finite {
            value,
            inclusive: true,
        } => Bound::Included(value),
        Endpoint::Finite {
            value,
            inclusive: false,
        } => Bound::Excluded(value),
    }
}

fn order(key: &Value, bound: &Value) -> Result<Ordering> {
    key.compare(bound)
        .ok_or_else(|| BoundError::IncomparableValues {
            left: key.to_string(),
            right: bound.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> NumberLine {
        // Pieces such as "<18" or ">=65", joined with '|'.
        let segments = text.split('|').map(|piece| {
            let digits = piece.find(|c: char| c.is_ascii_digit()).unwrap_or(0);
            let (op, value) = piece.split_at(digits);
            let value = Value::from(value.parse::<i64>().expect("fixture value"));
            match op {
                "<" => Segment::new(Endpoint::NegInf, Endpoint::exclusive(value)),
                ">=" => Segment::new(Endpoint::inclusive(value), Endpoint::PosInf),
                "=" => Ok(Segment::point(value)),
                other => panic!("unknown fixture op {other}"),
            }
            .expect("fixture segment")
        });
        NumberLine::from_segments(segments).expect("fixture line")
    }

    #[test]
    fn one_range_per_segment() {
        let ranges = IndexRange::from_line(&line("<18|>=65"));
        assert_eq!(
            ranges,
            vec![
                IndexRange::new(Bound::Unbounded, Bound::Excluded(Value::from(18i64))),
                IndexRange::new(Bound::Included(Value::from(65i64)), Bound::Unbounded),
            ]
        );
        assert_eq!(ranges[0].to_string(), "(-∞, 18)");
        assert_eq!(ranges[1].to_string(), "[65, +∞)");
    }

    #[test]
    fn full_and_empty_lines() {
        let full = IndexRange::from_line(&NumberLine::full());
        assert_eq!(full.len(), 1);
        assert!(full[0].is_unbounded());
        assert!(IndexRange::from_line(&NumberLine::empty()).is_empty());
    }

    #[test]
    fn contains_respects_inclusivity() {
        let ranges = IndexRange::from_line(&line("<18|>=65"));
        assert!(ranges[0].contains(&Value::from(17i64)).unwrap());
        assert!(!ranges[0].contains(&Value::from(18i64)).unwrap());
        assert!(ranges[1].contains(&Value::from(65i64)).unwrap());

        let point = IndexRange::from_line(&line("=7"));
        assert!(point[0].contains(&Value::from(7i64)).unwrap());
        assert!(!point[0].contains(&Value::from(8i64)).unwrap());
        assert!(IndexRange::all().contains(&Value::from("any")).unwrap());
    }

    #[test]
    fn contains_reports_incomparable_keys() {
        let ranges = IndexRange::from_line(&line("<18"));
        assert!(matches!(
            ranges[0].contains(&Value::from("x")),
            Err(BoundError::IncomparableValues { .. })
        ));
    }

    #[test]
    fn borrowed_bounds_match_owned() {
        let range = IndexRange::new(
            Bound::Included(Value::from(1i64)),
            Bound::Excluded(Value::from(5i64)),
        );
        let (low, high) = range.as_borrowed_bounds();
        assert_eq!(low, Bound::Included(&Value::from(1i64)));
        assert_eq!(high, Bound::Excluded(&Value::from(5i64)));
    }
}
