#![deny(missing_docs)]
//! Core predicate structures consumed by the bound planner.

mod builder;
mod node;
mod operand;
mod value;
mod visitor;

pub use builder::PredicateBuilder;
pub use node::{ComparisonOp, Predicate, PredicateNode};
pub use operand::{ColumnRef, Operand};
pub use value::{EncodedValue, ExternalComparator, Orderable, Value};
pub use visitor::{PredicateVisitor, VisitOutcome};
