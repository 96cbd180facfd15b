use index_bound_predicate::{
    ComparisonOp, Operand, Predicate, PredicateNode, PredicateVisitor, Value, VisitOutcome,
};

use super::{
    comparator::{between_line, comparison_line, in_list_line, null_test_line},
    params::{resolve_operand, Parameters},
    BoundError, ColumnMeta, NumberLine, Result,
};
use crate::observability::log_debug;

/// Bound derived for one column, plus the clauses it does not capture.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnBound {
    /// Scan ranges for the column. Always a superset of the matching keys.
    pub line: NumberLine,
    /// Part of the predicate the ranges do not enforce; `None` when the
    /// ranges are exact.
    pub residual: Option<Predicate>,
}

/// Folds a predicate tree into a [`NumberLine`] for one target column.
///
/// Each outcome's value is a superset of the keys satisfying the visited
/// subtree. An outcome with a residual is not exact: negating it could drop
/// matching rows, so `NOT` over such a child widens to the full domain.
#[derive(Debug)]
pub struct IndexBoundVisitor<'a, P: ?Sized> {
    column: &'a ColumnMeta,
    params: &'a P,
    type_bounds: bool,
}

impl<'a, P> IndexBoundVisitor<'a, P>
where
    P: Parameters + ?Sized,
{
    /// Visitor for `column` with the parameters of the current invocation.
    pub fn new(column: &'a ColumnMeta, params: &'a P) -> Self {
        Self {
            column,
            params,
            type_bounds: true,
        }
    }

    /// Whether the root result is clipped to the column's storage range.
    #[must_use]
    pub fn with_type_bounds(self, type_bounds: bool) -> Self {
        Self {
            type_bounds,
            ..self
        }
    }

    /// Evaluates `predicate`, returning the column's ranges and residual.
    pub fn evaluate(&mut self, predicate: &Predicate) -> Result<ColumnBound> {
        let outcome = predicate.accept(self)?;
        let mut line = outcome.value.unwrap_or_default();
        if self.type_bounds {
            line = line.intersection(&self.column.bounding_line())?;
        }
        Ok(ColumnBound {
            line,
            residual: outcome.residual,
        })
    }

    /// Evaluates `predicate` and keeps only the ranges.
    pub fn number_line(&mut self, predicate: &Predicate) -> Result<NumberLine> {
        Ok(self.evaluate(predicate)?.line)
    }

    fn targets(&self, operand: &Operand) -> bool {
        operand.is_column(self.column.name())
    }

    // Values that cannot belong to the column's storage type mean the planner
    // picked the wrong column or bound the wrong parameter.
    fn check_value(&self, value: &Value) -> Result<()> {
        if self.column.is_integral() && !value.is_null() && !value.is_numeric() {
            return Err(BoundError::malformed(format!(
                "{} value {value} compared with integer column '{}'",
                value.kind_name(),
                self.column.name()
            )));
        }
        Ok(())
    }

    fn resolve<'v>(&'v self, operand: &'v Operand) -> Result<Option<&'v Value>> {
        let value = resolve_operand(operand, self.params)?;
        self.check_value(value)?;
        Ok((!value.is_null()).then_some(value))
    }

    fn inexact(&self, leaf: &PredicateNode, line: NumberLine) -> VisitOutcome<NumberLine> {
        VisitOutcome {
            value: Some(line),
            residual: Some(Predicate::from_node(leaf.clone())),
        }
    }

    // No bound at all; callers read a missing value as the full domain.
    fn unknown(&self, leaf: &PredicateNode, reason: &'static str) -> VisitOutcome<NumberLine> {
        let predicate = Predicate::from_node(leaf.clone());
        log_debug!(
            component = "bound",
            event = "leaf_without_bound",
            column = self.column.name(),
            reason,
            predicate = %predicate,
        );
        VisitOutcome::residual(predicate)
    }

    fn visit_compare(
        &self,
        leaf: &PredicateNode,
        left: &Operand,
        op: ComparisonOp,
        right: &Operand,
    ) -> Result<VisitOutcome<NumberLine>> {
        // Normalise to `column <op> value`.
        let (op, operand) = match (left, right) {
            (Operand::Column(_), Operand::Column(_)) => {
                return Ok(self.unknown(leaf, "column_comparison"))
            }
            (column, other) if self.targets(column) => (op, other),
            (other, column) if self.targets(column) => (op.flipped(), other),
            _ => return Ok(self.unknown(leaf, "other_column")),
        };
        match self.resolve(operand)? {
            Some(value) => Ok(VisitOutcome::value(comparison_line(op, value)?)),
            None => Ok(self.unknown(leaf, "null_operand")),
        }
    }

    fn visit_between(
        &self,
        leaf: &PredicateNode,
        expr: &Operand,
        low: &Operand,
        high: &Operand,
        negated: bool,
    ) -> Result<VisitOutcome<NumberLine>> {
        if !self.targets(expr) {
            return Ok(self.unknown(leaf, "other_column"));
        }
        if references_column(low) || references_column(high) {
            return Ok(self.unknown(leaf, "column_comparison"));
        }
        let (Some(low), Some(high)) = (self.resolve(low)?, self.resolve(high)?) else {
            return Ok(self.unknown(leaf, "null_operand"));
        };
        let line = between_line(low, high)?;
        Ok(VisitOutcome::value(if negated {
            line.complement()
        } else {
            line
        }))
    }

    fn visit_in_list(
        &self,
        leaf: &PredicateNode,
        expr: &Operand,
        list: &[Operand],
        negated: bool,
    ) -> Result<VisitOutcome<NumberLine>> {
        if !self.targets(expr) {
            return Ok(self.unknown(leaf, "other_column"));
        }
        if list.is_empty() {
            return Err(BoundError::malformed(format!(
                "IN list on column '{}' has no candidates",
                self.column.name()
            )));
        }
        if list.iter().any(references_column) {
            return Ok(self.unknown(leaf, "column_comparison"));
        }
        let mut values = Vec::with_capacity(list.len());
        for operand in list {
            if let Some(value) = self.resolve(operand)? {
                values.push(value);
            }
        }
        // NOT IN over a NULL candidate never matches, but an empty range would
        // be unsafe under a further negation.
        if negated && values.len() < list.len() {
            return Ok(self.unknown(leaf, "null_operand"));
        }
        let line = in_list_line(values)?;
        Ok(VisitOutcome::value(if negated {
            line.complement()
        } else {
            line
        }))
    }
}

impl<P> PredicateVisitor for IndexBoundVisitor<'_, P>
where
    P: Parameters + ?Sized,
{
    type Error = BoundError;
    type Value = NumberLine;

    fn visit_leaf(
        &mut self,
        leaf: &PredicateNode,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
        match leaf {
            PredicateNode::True => Ok(VisitOutcome::value(NumberLine::full())),
            PredicateNode::Compare { left, op, right } => {
                self.visit_compare(leaf, left, *op, right)
            }
            PredicateNode::Between {
                expr,
                low,
                high,
                negated,
            } => self.visit_between(leaf, expr, low, high, *negated),
            PredicateNode::InList {
                expr,
                list,
                negated,
            } => self.visit_in_list(leaf, expr, list, *negated),
            PredicateNode::IsNull { expr, negated } => {
                if self.targets(expr) {
                    Ok(self.inexact(leaf, null_test_line(*negated)))
                } else {
                    Ok(self.unknown(leaf, "other_column"))
                }
            }
            PredicateNode::Like { expr, negated, .. } => {
                if self.targets(expr) {
                    Err(BoundError::UnsupportedOperator {
                        op: if *negated { "NOT LIKE" } else { "LIKE" }.to_owned(),
                        column: self.column.name().to_owned(),
                    })
                } else {
                    Ok(self.unknown(leaf, "other_column"))
                }
            }
            PredicateNode::Not(_) | PredicateNode::And(_) | PredicateNode::Or(_) => Err(
                BoundError::malformed("boolean connective visited as a leaf"),
            ),
        }
    }

    fn combine_not(
        &mut self,
        original: &Predicate,
        child: VisitOutcome<Self::Value>,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
        if let (Some(line), None) = (child.value, &child.residual) {
            return Ok(VisitOutcome::value(line.complement()));
        }
        // Complementing a superset could drop matching keys, so the negation
        // is pushed down to the leaves and the rewritten tree bounded instead.
        let PredicateNode::Not(inner) = original.kind() else {
            return Err(BoundError::malformed("negation hook reached without NOT"));
        };
        Predicate::clone(inner).negate().accept(self)
    }

    fn combine_and(
        &mut self,
        _original: &Predicate,
        children: Vec<VisitOutcome<Self::Value>>,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
        if children.is_empty() {
            return Err(BoundError::malformed("AND without clauses"));
        }
        let mut line = NumberLine::full();
        let mut residuals = Vec::new();
        for child in children {
            if let Some(value) = child.value {
                line = line.intersection(&value)?;
            }
            residuals.extend(child.residual);
        }
        Ok(VisitOutcome {
            value: Some(line),
            residual: Predicate::conjunction(residuals),
        })
    }

    fn combine_or(
        &mut self,
        original: &Predicate,
        children: Vec<VisitOutcome<Self::Value>>,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
        if children.is_empty() {
            return Err(BoundError::malformed("OR without clauses"));
        }
        let mut line = NumberLine::empty();
        let mut exact = true;
        for child in children {
            exact &= child.residual.is_none();
            line = match child.value {
                Some(value) => line.union(&value)?,
                None => NumberLine::full(),
            };
        }
        Ok(VisitOutcome {
            value: Some(line),
            residual: (!exact).then(|| original.clone()),
        })
    }
}

fn references_column(operand: &Operand) -> bool {
    matches!(operand, Operand::Column(_))
}
