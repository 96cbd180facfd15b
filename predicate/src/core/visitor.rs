use super::{Predicate, PredicateNode};

/// Result produced while evaluating parts of a predicate tree.
#[derive(Clone, Debug, Default)]
pub struct VisitOutcome<T> {
    /// Computed value for the evaluated portion, when available.
    pub value: Option<T>,
    /// Residual predicate that still needs evaluation elsewhere.
    pub residual: Option<Predicate>,
}

impl<T> VisitOutcome<T> {
    /// Outcome containing only a computed value.
    pub fn value(value: T) -> Self {
        Self {
            value: Some(value),
            residual: None,
        }
    }

    /// Outcome containing only a residual predicate.
    pub fn residual(residual: Predicate) -> Self {
        Self {
            value: None,
            residual: Some(residual),
        }
    }
}

/// Visitor that walks predicate trees and emits custom results plus residual predicates.
///
/// Traversal is bottom-up: every child is visited before its parent's
/// `combine_*` hook runs, and the first error aborts the walk.
pub trait PredicateVisitor {
    /// Error type used when evaluation fails.
    type Error;
    /// Concrete value type produced while walking the predicate.
    type Value;

    /// Evaluates a leaf predicate and returns its result.
    fn visit_leaf(
        &mut self,
        leaf: &PredicateNode,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error>;

    /// Combines the result of a negated child predicate.
    fn combine_not(
        &mut self,
        original: &Predicate,
        child: VisitOutcome<Self::Value>,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error>;

    /// Combines an `AND` clause from the supplied child results.
    ///
    /// `children` is empty when the tree holds a conjunction without clauses;
    /// implementations decide whether that is an error.
    fn combine_and(
        &mut self,
        original: &Predicate,
        children: Vec<VisitOutcome<Self::Value>>,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error>;

    /// Combines an `OR` clause from the supplied child results.
    fn combine_or(
        &mut self,
        original: &Predicate,
        children: Vec<VisitOutcome<Self::Value>>,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error>;

    /// Visits the supplied predicate by walking the expression tree.
    fn visit_predicate(
        &mut self,
        predicate: &Predicate,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
        self.visit_node(predicate.kind(), predicate)
    }

    /// Internal helper that evaluates a predicate node recursively.
    fn visit_node(
        &mut self,
        node: &PredicateNode,
        original: &Predicate,
    ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
        match node {
            PredicateNode::Not(inner) => {
                let child = self.visit_predicate(inner)?;
                self.combine_not(original, child)
            }
            PredicateNode::And(clauses) => {
                let mut children = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    children.push(self.visit_predicate(clause)?);
                }
                self.combine_and(original, children)
            }
            PredicateNode::Or(clauses) => {
                let mut children = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    children.push(self.visit_predicate(clause)?);
                }
                self.combine_or(original, children)
            }
            leaf => self.visit_leaf(leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnRef, ComparisonOp, Operand, Value};

    /// Counts leaves and records the order in which hooks fire.
    #[derive(Default)]
    struct TraceVisitor {
        trace: Vec<&'static str>,
    }

    impl PredicateVisitor for TraceVisitor {
        type Error = &'static str;
        type Value = usize;

        fn visit_leaf(
            &mut self,
            leaf: &PredicateNode,
        ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
            self.trace.push("leaf");
            match leaf {
                PredicateNode::Like { .. } => Err("like"),
                PredicateNode::IsNull { .. } => {
                    Ok(VisitOutcome::residual(Predicate::from_node(leaf.clone())))
                }
                _ => Ok(VisitOutcome::value(1)),
            }
        }

        fn combine_not(
            &mut self,
            _original: &Predicate,
            child: VisitOutcome<Self::Value>,
        ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
            self.trace.push("not");
            Ok(child)
        }

        fn combine_and(
            &mut self,
            _original: &Predicate,
            children: Vec<VisitOutcome<Self::Value>>,
        ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
            self.trace.push("and");
            if children.is_empty() {
                return Err("empty and");
            }
            Ok(VisitOutcome::value(
                children.into_iter().filter_map(|child| child.value).sum(),
            ))
        }

        fn combine_or(
            &mut self,
            _original: &Predicate,
            children: Vec<VisitOutcome<Self::Value>>,
        ) -> Result<VisitOutcome<Self::Value>, Self::Error> {
            self.trace.push("or");
            Ok(VisitOutcome::value(
                children.into_iter().filter_map(|child| child.value).sum(),
            ))
        }
    }

    fn leaf(op: ComparisonOp) -> Predicate {
        Predicate::from_node(PredicateNode::Compare {
            left: Operand::from(ColumnRef::new("a")),
            op,
            right: Operand::from(Value::from(1i64)),
        })
    }

    #[test]
    fn children_are_visited_before_parents() {
        let predicate = Predicate::and([
            leaf(ComparisonOp::Equal),
            Predicate::or([leaf(ComparisonOp::LessThan), leaf(ComparisonOp::GreaterThan)]),
            Predicate::not(leaf(ComparisonOp::NotEqual)),
        ]);
        let mut visitor = TraceVisitor::default();
        let outcome = predicate.accept(&mut visitor).expect("visit succeeds");
        assert_eq!(outcome.value, Some(4));
        assert_eq!(
            visitor.trace,
            vec!["leaf", "leaf", "leaf", "or", "leaf", "not", "and"]
        );
    }

    #[test]
    fn empty_conjunction_reaches_combine_hook() {
        let predicate = Predicate::from_node(PredicateNode::And(Vec::new()));
        let mut visitor = TraceVisitor::default();
        assert_eq!(predicate.accept(&mut visitor).unwrap_err(), "empty and");
    }

    #[test]
    fn leaf_errors_abort_traversal() {
        let like = Predicate::from_node(PredicateNode::Like {
            expr: Operand::from(ColumnRef::new("a")),
            pattern: Operand::from(Value::from("x%")),
            negated: false,
        });
        let predicate = Predicate::or([like, leaf(ComparisonOp::Equal)]);
        let mut visitor = TraceVisitor::default();
        assert_eq!(predicate.accept(&mut visitor).unwrap_err(), "like");
        assert_eq!(visitor.trace, vec!["leaf"]);
    }

    #[test]
    fn residual_outcomes_carry_the_predicate() {
        let is_null = Predicate::from_node(PredicateNode::IsNull {
            expr: Operand::from(ColumnRef::new("a")),
            negated: false,
        });
        let mut visitor = TraceVisitor::default();
        let outcome = is_null.accept(&mut visitor).expect("visit succeeds");
        assert!(outcome.value.is_none());
        assert_eq!(outcome.residual, Some(is_null));
    }
}
