//! Builder for composing predicate trees.

#[cfg(test)]
use super::{ColumnRef, Value};
use super::{ComparisonOp, Operand, Predicate, PredicateNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuilderCombine {
    Leaf,
    Conjunction,
    Disjunction,
}

/// Builder for composing predicates incrementally.
#[derive(Debug)]
pub struct PredicateBuilder {
    combine: BuilderCombine,
    clauses: Vec<Predicate>,
}

impl PredicateBuilder {
    const fn new(combine: BuilderCombine) -> Self {
        Self {
            combine,
            clauses: Vec::new(),
        }
    }

    /// Creates a builder that expects a single clause.
    #[must_use]
    pub fn leaf() -> Self {
        Self::new(BuilderCombine::Leaf)
    }

    /// Creates a builder that emits an `AND` of all clauses.
    #[must_use]
    pub fn and() -> Self {
        Self::new(BuilderCombine::Conjunction)
    }

    /// Creates a builder that emits an `OR` of all clauses.
    #[must_use]
    pub fn or() -> Self {
        Self::new(BuilderCombine::Disjunction)
    }

    /// Adds an existing predicate to the builder.
    #[must_use]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.clauses.push(predicate);
        self
    }

    /// Adds a comparison predicate.
    #[must_use]
    pub fn compare<L, R>(mut self, left: L, op: ComparisonOp, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op,
            right: right.into(),
        });
        self
    }

    /// Adds an equality predicate.
    #[must_use]
    pub fn equals<L, R>(mut self, left: L, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op: ComparisonOp::Equal,
            right: right.into(),
        });
        self
    }

    /// Adds an inequality predicate.
    #[must_use]
    pub fn not_equals<L, R>(mut self, left: L, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op: ComparisonOp::NotEqual,
            right: right.into(),
        });
        self
    }

    /// Adds a `<` comparison predicate.
    #[must_use]
    pub fn less_than<L, R>(mut self, left: L, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op: ComparisonOp::LessThan,
            right: right.into(),
        });
        self
    }

    /// Adds a `<=` comparison predicate.
    #[must_use]
    pub fn less_than_or_equal<L, R>(mut self, left: L, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op: ComparisonOp::LessThanOrEqual,
            right: right.into(),
        });
        self
    }

    /// Adds a `>` comparison predicate.
    #[must_use]
    pub fn greater_than<L, R>(mut self, left: L, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op: ComparisonOp::GreaterThan,
            right: right.into(),
        });
        self
    }

    /// Adds a `>=` comparison predicate.
    #[must_use]
    pub fn greater_than_or_equal<L, R>(mut self, left: L, right: R) -> Self
    where
        L: Into<Operand>,
        R: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Compare {
            left: left.into(),
            op: ComparisonOp::GreaterThanOrEqual,
            right: right.into(),
        });
        self
    }

    /// Adds a `BETWEEN low AND high` predicate.
    #[must_use]
    pub fn between<O, L, H>(mut self, expr: O, low: L, high: H) -> Self
    where
        O: Into<Operand>,
        L: Into<Operand>,
        H: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Between {
            expr: expr.into(),
            low: low.into(),
            high: high.into(),
            negated: false,
        });
        self
    }

    /// Adds a `NOT BETWEEN low AND high` predicate.
    #[must_use]
    pub fn not_between<O, L, H>(mut self, expr: O, low: L, high: H) -> Self
    where
        O: Into<Operand>,
        L: Into<Operand>,
        H: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Between {
            expr: expr.into(),
            low: low.into(),
            high: high.into(),
            negated: true,
        });
        self
    }

    /// Adds an `IN` predicate.
    #[must_use]
    pub fn in_list<O, I, V>(mut self, expr: O, list: I) -> Self
    where
        O: Into<Operand>,
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.push_leaf(PredicateNode::InList {
            expr: expr.into(),
            list: list.into_iter().map(Into::into).collect(),
            negated: false,
        });
        self
    }

    /// Adds a `NOT IN` predicate.
    #[must_use]
    pub fn not_in_list<O, I, V>(mut self, expr: O, list: I) -> Self
    where
        O: Into<Operand>,
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.push_leaf(PredicateNode::InList {
            expr: expr.into(),
            list: list.into_iter().map(Into::into).collect(),
            negated: true,
        });
        self
    }

    /// Adds an `IS NULL` predicate.
    #[must_use]
    pub fn is_null<O>(mut self, expr: O) -> Self
    where
        O: Into<Operand>,
    {
        self.push_leaf(PredicateNode::IsNull {
            expr: expr.into(),
            negated: false,
        });
        self
    }

    /// Adds an `IS NOT NULL` predicate.
    #[must_use]
    pub fn is_not_null<O>(mut self, expr: O) -> Self
    where
        O: Into<Operand>,
    {
        self.push_leaf(PredicateNode::IsNull {
            expr: expr.into(),
            negated: true,
        });
        self
    }

    /// Adds a `LIKE` predicate.
    #[must_use]
    pub fn like<O, P>(mut self, expr: O, pattern: P) -> Self
    where
        O: Into<Operand>,
        P: Into<Operand>,
    {
        self.push_leaf(PredicateNode::Like {
            expr: expr.into(),
            pattern: pattern.into(),
            negated: false,
        });
        self
    }

    fn branch<F>(mut self, combine: BuilderCombine, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        let predicate = build(PredicateBuilder::new(combine)).build();
        self.clauses.push(predicate);
        self
    }

    /// Adds a nested conjunction built by the supplied closure.
    #[must_use]
    pub fn and_group<F>(self, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        self.branch(BuilderCombine::Conjunction, build)
    }

    /// Adds a nested disjunction built by the supplied closure.
    #[must_use]
    pub fn or_group<F>(self, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        self.branch(BuilderCombine::Disjunction, build)
    }

    /// Adds a negated predicate built by the supplied closure.
    #[must_use]
    pub fn not_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(PredicateBuilder) -> PredicateBuilder,
    {
        let predicate = build(PredicateBuilder::and()).build();
        let negated = Predicate::not(predicate).simplify();
        self.clauses.push(negated);
        self
    }

    fn push_leaf(&mut self, leaf: PredicateNode) {
        self.clauses.push(Predicate::from_kind(leaf));
    }

    /// Consumes the builder and returns the composed predicate.
    #[must_use]
    pub fn build(self) -> Predicate {
        assert!(
            !self.clauses.is_empty(),
            "PredicateBuilder requires at least one clause"
        );
        match self.combine {
            BuilderCombine::Leaf => {
                assert!(
                    self.clauses.len() == 1,
                    "PredicateBuilder::leaf must contain exactly one clause"
                );
                self.clauses
                    .into_iter()
                    .next()
                    .expect("length checked for leaf builder")
            }
            BuilderCombine::Conjunction => Predicate::and(self.clauses),
            BuilderCombine::Disjunction => Predicate::or(self.clauses),
        }
    }
}

impl Default for PredicateBuilder {
    fn default() -> Self {
        Self::leaf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "PredicateBuilder requires at least one clause")]
    fn leaf_builder_requires_clause() {
        let _ = PredicateBuilder::leaf().build();
    }

    #[test]
    #[should_panic(expected = "PredicateBuilder::leaf must contain exactly one clause")]
    fn leaf_builder_rejects_multiple_clauses() {
        let column = ColumnRef::new("col");
        let _ = PredicateBuilder::leaf()
            .equals(column.clone(), Value::from(1i64))
            .equals(column, Value::from(2i64))
            .build();
    }

    #[test]
    #[should_panic(expected = "PredicateBuilder requires at least one clause")]
    fn and_builder_requires_clause() {
        let _ = PredicateBuilder::and().build();
    }

    #[test]
    #[should_panic(expected = "PredicateBuilder requires at least one clause")]
    fn or_builder_requires_clause() {
        let _ = PredicateBuilder::or().build();
    }

    #[test]
    fn and_builder_composes_groups() {
        let age = ColumnRef::new("age");
        let predicate = PredicateBuilder::and()
            .greater_than_or_equal(age.clone(), Value::from(18i64))
            .or_group(|builder| {
                builder
                    .less_than(age.clone(), Value::from(30i64))
                    .between(age.clone(), Operand::Param(0), Operand::Param(1))
            })
            .not_group(|builder| builder.in_list(age.clone(), [Value::from(21i64)]))
            .build();
        match predicate.kind() {
            PredicateNode::And(clauses) => {
                assert_eq!(clauses.len(), 3);
                assert!(matches!(clauses[1].kind(), PredicateNode::Or(inner) if inner.len() == 2));
                assert!(matches!(clauses[2].kind(), PredicateNode::Not(_)));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn leaf_builder_yields_single_node() {
        let predicate = PredicateBuilder::leaf()
            .like(ColumnRef::new("name"), Value::from("Al%"))
            .build();
        assert!(matches!(
            predicate.kind(),
            PredicateNode::Like { negated: false, .. }
        ));
    }
}
