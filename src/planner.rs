//! Planner entry point: predicate in, scan ranges out.

use index_bound_predicate::Predicate;

use crate::{
    bound::{BoundError, ColumnMeta, IndexBoundVisitor, NoParameters, NumberLine, Parameters},
    observability::{log_debug, log_warn},
    option::BoundOptions,
    scan::IndexRange,
};

/// Scan plan for one indexed column.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexBounds {
    /// Ranges to scan, one per segment of [`line`](Self::line).
    pub ranges: Vec<IndexRange>,
    /// Planned key set.
    pub line: NumberLine,
    /// Filter the scanned rows still have to pass; `None` when the ranges
    /// match the predicate exactly.
    pub residual: Option<Predicate>,
    /// Planning error that forced a full scan, if any.
    pub fallback: Option<BoundError>,
}

impl IndexBounds {
    fn new(line: NumberLine, residual: Option<Predicate>) -> Self {
        Self {
            ranges: IndexRange::from_line(&line),
            line,
            residual,
            fallback: None,
        }
    }

    fn full_scan(predicate: &Predicate, error: BoundError) -> Self {
        Self {
            fallback: Some(error),
            ..Self::new(NumberLine::full(), Some(predicate.clone()))
        }
    }

    /// Whether the plan scans the whole index.
    pub fn is_full_scan(&self) -> bool {
        self.line.is_full()
    }

    /// Whether no key can match.
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

/// Derives index scan ranges for one column from query predicates.
#[derive(Debug)]
pub struct IndexBoundPlanner<'a, P: ?Sized = NoParameters> {
    column: &'a ColumnMeta,
    params: &'a P,
    options: BoundOptions,
}

impl<'a> IndexBoundPlanner<'a, NoParameters> {
    /// Planner for predicates without parameter operands.
    pub fn unparameterized(column: &'a ColumnMeta) -> Self {
        Self::new(column, &NoParameters)
    }
}

impl<'a, P> IndexBoundPlanner<'a, P>
where
    P: Parameters + ?Sized,
{
    /// Planner for `column` with the invocation's parameter bindings.
    pub fn new(column: &'a ColumnMeta, params: &'a P) -> Self {
        Self {
            column,
            params,
            options: BoundOptions::default(),
        }
    }

    /// Replaces the planner options.
    #[must_use]
    pub fn with_options(self, options: BoundOptions) -> Self {
        Self { options, ..self }
    }

    /// Plans the scan for `predicate`.
    ///
    /// Planning errors are returned only when
    /// [`fallback_to_full_scan`](BoundOptions::fallback_to_full_scan) is off.
    /// Otherwise the plan is a full scan with [`IndexBounds::fallback`] set.
    pub fn plan(&self, predicate: &Predicate) -> Result<IndexBounds, BoundError> {
        let bounds = match self.derive(predicate) {
            Ok(bounds) => bounds,
            Err(error) if self.options.fallback_to_full_scan => {
                log_warn!(
                    component = "planner",
                    event = "bound_fallback_full_scan",
                    column = self.column.name(),
                    error = %error,
                );
                IndexBounds::full_scan(predicate, error)
            }
            Err(error) => return Err(error),
        };
        log_debug!(
            component = "planner",
            event = "bounds_planned",
            column = self.column.name(),
            ranges = bounds.ranges.len(),
            line = %bounds.line,
            exact = bounds.residual.is_none(),
        );
        Ok(bounds)
    }

    fn derive(&self, predicate: &Predicate) -> Result<IndexBounds, BoundError> {
        let bound = IndexBoundVisitor::new(self.column, self.params)
            .with_type_bounds(self.options.apply_type_bounds)
            .evaluate(predicate)?;
        let mut line = bound.line;
        let mut residual = bound.residual;
        if let Some(max) = self.options.max_ranges {
            if line.len() > max.max(1) {
                line = line.coalesce(max);
                // Wider ranges admit keys the predicate rejects.
                residual = Some(predicate.clone());
            }
        }
        Ok(IndexBounds::new(line, residual))
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Bound;

    use index_bound_predicate::{ColumnRef, PredicateBuilder, Value};

    use super::*;

    fn age() -> ColumnRef {
        ColumnRef::new("age")
    }

    #[test]
    fn plans_ranges_for_target_column() {
        let column = ColumnMeta::signed_int("age", 4);
        let predicate = PredicateBuilder::and()
            .greater_than_or_equal(age(), Value::from(18i64))
            .less_than(age(), Value::from(30i64))
            .build();
        let bounds = IndexBoundPlanner::unparameterized(&column)
            .plan(&predicate)
            .unwrap();
        assert_eq!(
            bounds.ranges,
            vec![IndexRange::new(
                Bound::Included(Value::from(18i64)),
                Bound::Excluded(Value::from(30i64)),
            )]
        );
        assert!(bounds.residual.is_none());
        assert!(bounds.fallback.is_none());
    }

    #[test]
    fn errors_fall_back_to_full_scan() {
        let column = ColumnMeta::new("name");
        let predicate = PredicateBuilder::leaf()
            .like(ColumnRef::new("name"), Value::from("A%"))
            .build();
        let bounds = IndexBoundPlanner::unparameterized(&column)
            .plan(&predicate)
            .unwrap();
        assert!(bounds.is_full_scan());
        assert_eq!(bounds.residual, Some(predicate));
        assert!(matches!(
            bounds.fallback,
            Some(BoundError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn errors_surface_without_fallback() {
        let column = ColumnMeta::signed_int("age", 4);
        let predicate = PredicateBuilder::leaf()
            .equals(age(), index_bound_predicate::Operand::Param(0))
            .build();
        let err = IndexBoundPlanner::unparameterized(&column)
            .with_options(BoundOptions::default().fallback_to_full_scan(false))
            .plan(&predicate)
            .unwrap_err();
        assert_eq!(err, BoundError::UnboundParameter { index: 0 });
    }

    #[test]
    fn range_cap_coalesces_and_keeps_a_residual() {
        let column = ColumnMeta::signed_int("age", 4);
        let params = vec![Value::from(1i64), Value::from(5i64), Value::from(9i64)];
        let predicate = PredicateBuilder::leaf()
            .in_list(age(), (0..3).map(index_bound_predicate::Operand::Param))
            .build();
        let planner = IndexBoundPlanner::new(&column, &params)
            .with_options(BoundOptions::default().max_ranges(Some(2)));
        let bounds = planner.plan(&predicate).unwrap();
        assert_eq!(bounds.line.to_string(), "[1, 1] ∪ [5, 9]");
        assert_eq!(bounds.ranges.len(), 2);
        assert_eq!(bounds.residual, Some(predicate));
    }

    #[test]
    fn type_bounds_can_be_disabled() {
        let column = ColumnMeta::unsigned_int("age", 1);
        let predicate = PredicateBuilder::leaf()
            .less_than(age(), Value::from(-5i64))
            .build();
        let bounded = IndexBoundPlanner::unparameterized(&column)
            .plan(&predicate)
            .unwrap();
        assert!(bounded.is_empty());
        assert!(bounded.ranges.is_empty());

        let unbounded = IndexBoundPlanner::unparameterized(&column)
            .with_options(BoundOptions::default().apply_type_bounds(false))
            .plan(&predicate)
            .unwrap();
        assert_eq!(unbounded.line.to_string(), "(-∞, -5)");
    }
}
