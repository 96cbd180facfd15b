#![deny(missing_docs)]
//! Predicate facade for index-bound planning.
//!
//! The tree shape here is what the bound visitor consumes: boolean
//! connectives over comparison, `BETWEEN`, `IN`, `LIKE` and NULL-test leaves.
//! Operands are columns, literals or positional parameters resolved by the
//! caller when a query executes. Values that cannot be ordered natively carry
//! their own [`ExternalComparator`].

mod core;

pub use crate::core::{
    ColumnRef, ComparisonOp, EncodedValue, ExternalComparator, Operand, Orderable, Predicate,
    PredicateBuilder, PredicateNode, PredicateVisitor, Value, VisitOutcome,
};
