#![deny(missing_docs)]
//! Index-bound planning for range scans.
//!
//! Given a predicate tree and the column an index is keyed on, the planner
//! derives the set of key ranges a scan must cover. Ranges are represented
//! as a [`NumberLine`], a union of disjoint [`Segment`]s, and handed to the
//! storage engine as [`IndexRange`] descriptors.
//!
//! ```
//! use index_bound::{ColumnMeta, IndexBoundPlanner};
//! use index_bound_predicate::{ColumnRef, PredicateBuilder, Value};
//!
//! let column = ColumnMeta::signed_int("age", 4);
//! let predicate = PredicateBuilder::or()
//!     .less_than(ColumnRef::new("age"), Value::from(18i64))
//!     .greater_than_or_equal(ColumnRef::new("age"), Value::from(65i64))
//!     .build();
//! let bounds = IndexBoundPlanner::unparameterized(&column)
//!     .plan(&predicate)
//!     .unwrap();
//! assert_eq!(bounds.ranges.len(), 2);
//! ```

/// Interval algebra, comparator translation and the bound visitor.
pub mod bound;

mod observability;

/// Planner configuration.
pub mod option;

/// Planner entry point.
pub mod planner;

/// Scan-range descriptors.
pub mod scan;

pub use index_bound_predicate as predicate;

pub use crate::{
    bound::{
        BoundError, ColumnBound, ColumnMeta, Endpoint, EndpointOrdering, IndexBoundVisitor,
        NoParameters, NumberLine, Parameters, Result, Segment,
    },
    option::BoundOptions,
    planner::{IndexBoundPlanner, IndexBounds},
    scan::IndexRange,
};
