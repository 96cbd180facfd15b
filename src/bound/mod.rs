//! Interval algebra over an ordered key domain and its translation from
//! predicate trees.
//!
//! A [`NumberLine`] is a finite union of disjoint [`Segment`]s, each bounded by
//! two [`Endpoint`]s. The [`IndexBoundVisitor`] folds a predicate into the
//! number line of keys an index scan on one column has to cover.

mod column;
pub mod comparator;
mod endpoint;
mod error;
mod line;
mod params;
mod segment;
mod visitor;

pub use column::ColumnMeta;
pub use endpoint::{Endpoint, EndpointOrdering};
pub use error::{BoundError, Result};
pub use line::{NumberLine, Segments};
pub use params::{NoParameters, Parameters};
pub use segment::Segment;
pub use visitor::{ColumnBound, IndexBoundVisitor};
