//! Translation of single comparator nodes into number lines.

use index_bound_predicate::{ComparisonOp, Value};

use super::{Endpoint, NumberLine, Result, Segment};

/// Solution set of `column <op> value`.
pub fn comparison_line(op: ComparisonOp, value: &Value) -> Result<NumberLine> {
    let value = value.clone();
    let segment = match op {
        ComparisonOp::Equal => Segment::point(value),
        ComparisonOp::NotEqual => {
            return Ok(NumberLine::from_segment(Segment::point(value)).complement())
        }
        ComparisonOp::LessThan => Segment::new(Endpoint::NegInf, Endpoint::exclusive(value))?,
        ComparisonOp::LessThanOrEqual => {
            Segment::new(Endpoint::NegInf, Endpoint::inclusive(value))?
        }
        ComparisonOp::GreaterThan => Segment::new(Endpoint::exclusive(value), Endpoint::PosInf)?,
        ComparisonOp::GreaterThanOrEqual => {
            Segment::new(Endpoint::inclusive(value), Endpoint::PosInf)?
        }
    };
    Ok(NumberLine::from_segment(segment))
}

/// Solution set of `column BETWEEN a AND b`, inclusive at both ends and
/// independent of operand order.
pub fn between_line(a: &Value, b: &Value) -> Result<NumberLine> {
    let segment = Segment::new(Endpoint::inclusive(a.clone()), Endpoint::inclusive(b.clone()))?;
    Ok(NumberLine::from_segment(segment))
}

/// Solution set of `column IN (values..)`: one closed point per value.
pub fn in_list_line<'a, I>(values: I) -> Result<NumberLine>
where
    I: IntoIterator<Item = &'a Value>,
{
    NumberLine::from_segments(values.into_iter().cloned().map(Segment::point))
}

/// `IS NULL` / `IS NOT NULL`.
///
/// NULL has no position among ordered keys here, so both tests span the full
/// domain.
#[must_use]
pub fn null_test_line(_negated: bool) -> NumberLine {
    NumberLine::full()
}
