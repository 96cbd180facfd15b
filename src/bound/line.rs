//! Finite unions of disjoint segments over the ordered key domain.

use std::{cmp::Ordering, fmt, iter::FusedIterator};

use super::{
    segment::{cmp_lower, cmp_upper},
    BoundError, Endpoint, EndpointOrdering, Result, Segment,
};

/// An ordered union of disjoint, non-adjacent segments.
///
/// Stored as a flat, even-length list of transitions read pairwise as
/// `(low, high)`. An empty list is the empty set; [`NumberLine::new`] is the
/// full domain `(-∞, +∞)`.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberLine {
    transitions: Vec<Endpoint>,
}

impl Default for NumberLine {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberLine {
    /// The full domain `(-∞, +∞)`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_segment(Segment::full())
    }

    /// Alias of [`NumberLine::new`].
    #[must_use]
    pub fn full() -> Self {
        Self::new()
    }

    /// The empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// A line holding exactly one segment.
    #[must_use]
    pub fn from_segment(segment: Segment) -> Self {
        let (low, high) = segment.into_endpoints();
        Self {
            transitions: vec![low, high],
        }
    }

    /// Union of arbitrary, possibly overlapping segments.
    pub fn from_segments<I>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut sorted: Vec<Segment> = Vec::new();
        for segment in segments {
            let at = lower_insertion_point(&sorted, &segment)?;
            sorted.insert(at, segment);
        }
        Self::coalesce_sorted(sorted)
    }

    /// Whether the line covers no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Whether the line is the full domain.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(
            self.transitions.as_slice(),
            [Endpoint::NegInf, Endpoint::PosInf]
        )
    }

    /// Number of segments on the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len() / 2
    }

    /// Raw transitions, read pairwise as `(low, high)`.
    #[must_use]
    pub fn transitions(&self) -> &[Endpoint] {
        &self.transitions
    }

    /// First transition, or `+∞` when empty.
    #[must_use]
    pub fn lower_bound(&self) -> Endpoint {
        self.transitions
            .first()
            .cloned()
            .unwrap_or(Endpoint::PosInf)
    }

    /// Last transition, or `-∞` when empty.
    #[must_use]
    pub fn upper_bound(&self) -> Endpoint {
        self.transitions
            .last()
            .cloned()
            .unwrap_or(Endpoint::NegInf)
    }

    /// Iterates the segments in increasing order. Each call starts afresh.
    #[must_use]
    pub fn iter(&self) -> Segments<'_> {
        Segments {
            transitions: &self.transitions,
            next: 0,
        }
    }

    /// Collects the segments into a vector.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        self.iter().collect()
    }

    /// Every value not on this line.
    ///
    /// Toggles the infinities at both ends, then flips inclusivity of every
    /// finite transition. Applying it twice restores the original line.
    #[must_use]
    pub fn complement(self) -> Self {
        let mut transitions = Vec::with_capacity(self.transitions.len() + 2);
        let mut inner = self.transitions.into_iter().peekable();

        if matches!(inner.peek(), Some(Endpoint::NegInf)) {
            inner.next();
        } else {
            transitions.push(Endpoint::NegInf);
        }
        transitions.extend(inner.map(Endpoint::complement));
        if matches!(transitions.last(), Some(Endpoint::PosInf)) {
            transitions.pop();
        } else {
            transitions.push(Endpoint::PosInf);
        }

        Self { transitions }
    }

    /// Inserts a segment that does not intersect any segment on the line.
    ///
    /// # Errors
    ///
    /// [`BoundError::OverlappingSegment`] when the precondition is violated.
    pub fn insert_segment(&mut self, segment: Segment) -> Result<()> {
        let splice = if segment.low().compare(&self.upper_bound())? == EndpointOrdering::Greater {
            None
        } else {
            let mut segments = self.iter();
            let mut splice = None;
            while let Some(existing) = segments.next() {
                match segment.compare(&existing)? {
                    Ordering::Less => {
                        splice = Some(segments.splice_point());
                        break;
                    }
                    Ordering::Equal => {
                        return Err(BoundError::OverlappingSegment {
                            segment: segment.to_string(),
                        })
                    }
                    Ordering::Greater => {}
                }
            }
            splice
        };

        let (low, high) = segment.into_endpoints();
        match splice {
            Some(at) => {
                self.transitions.insert(at, high);
                self.transitions.insert(at, low);
            }
            None => self.transitions.extend([low, high]),
        }
        Ok(())
    }

    /// Values on both lines.
    pub fn intersection(&self, other: &NumberLine) -> Result<NumberLine> {
        let left = self.segments();
        let right = other.segments();
        let mut out = NumberLine::empty();
        let (mut i, mut j) = (0, 0);
        // Both sides are sorted and disjoint, so a merge walk visits every
        // overlapping pair and emits results in increasing order.
        while i < left.len() && j < right.len() {
            if let Some(common) = left[i].intersection(&right[j])? {
                out.insert_segment(common)?;
            }
            match cmp_upper(left[i].high(), right[j].high())? {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        Ok(out)
    }

    /// Values on either line.
    pub fn union(&self, other: &NumberLine) -> Result<NumberLine> {
        let left = self.segments();
        let right = other.segments();
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let (mut left, mut right) = (left.into_iter().peekable(), right.into_iter().peekable());
        loop {
            let take_left = match (left.peek(), right.peek()) {
                (Some(a), Some(b)) => cmp_lower(a.low(), b.low())? != Ordering::Greater,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_left { left.next() } else { right.next() };
            merged.extend(next);
        }
        Self::coalesce_sorted(merged)
    }

    /// Reduces the line to at most `max_segments` segments by covering the
    /// tail with one spanning segment. The result always contains `self`.
    #[must_use]
    pub fn coalesce(self, max_segments: usize) -> NumberLine {
        let max_segments = max_segments.max(1);
        if self.len() <= max_segments {
            return self;
        }
        let mut transitions = self.transitions;
        let keep = (max_segments - 1) * 2;
        let last = transitions.pop().unwrap_or(Endpoint::PosInf);
        transitions.truncate(keep + 1);
        transitions.push(last);
        NumberLine { transitions }
    }

    // Sweeps segments sorted by lower bound, spanning any that overlap or touch.
    fn coalesce_sorted(sorted: Vec<Segment>) -> Result<NumberLine> {
        let mut out = NumberLine::empty();
        let mut segments = sorted.into_iter();
        let Some(mut current) = segments.next() else {
            return Ok(out);
        };
        for next in segments {
            match current.span(&next)? {
                Some(spanned) => current = spanned,
                None => {
                    out.insert_segment(current)?;
                    current = next;
                }
            }
        }
        out.insert_segment(current)?;
        Ok(out)
    }
}

// Index keeping `sorted` ordered by lower bound after inserting `segment`.
fn lower_insertion_point(sorted: &[Segment], segment: &Segment) -> Result<usize> {
    for (idx, existing) in sorted.iter().enumerate() {
        if cmp_lower(segment.low(), existing.low())? == Ordering::Less {
            return Ok(idx);
        }
    }
    Ok(sorted.len())
}

impl fmt::Display for NumberLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("∅");
        }
        for (idx, segment) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ∪ ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a NumberLine {
    type Item = Segment;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the segments of a [`NumberLine`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    transitions: &'a [Endpoint],
    next: usize,
}

impl Segments<'_> {
    /// Index in the line's transitions where the most recently yielded
    /// segment starts; splicing there inserts immediately before it.
    #[must_use]
    pub fn splice_point(&self) -> usize {
        self.next.saturating_sub(2)
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let [low, high] = self.transitions.get(self.next..self.next + 2)? else {
            return None;
        };
        self.next += 2;
        Some(Segment::from_ordered(low.clone(), high.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.transitions.len().saturating_sub(self.next) / 2;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}
