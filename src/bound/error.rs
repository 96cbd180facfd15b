use thiserror::Error;

/// Planning-time failures while deriving index bounds.
///
/// None of these describe bad row data: they mean the bound for this column
/// cannot be trusted, and the caller should scan the whole index instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundError {
    /// Two endpoint values have no common ordering.
    #[error("values {left} and {right} cannot be ordered")]
    IncomparableValues {
        /// Rendering of the left value.
        left: String,
        /// Rendering of the right value.
        right: String,
    },
    /// The operator has no range translation.
    #[error("unsupported operator {op} on column '{column}'")]
    UnsupportedOperator {
        /// Operator as written in the predicate.
        op: String,
        /// Target column.
        column: String,
    },
    /// Arity, shape or operand type violation in the predicate tree.
    #[error("malformed predicate node: {reason}")]
    MalformedPredicateNode {
        /// What was wrong with the node.
        reason: String,
    },
    /// A parameter operand has no binding.
    #[error("parameter ?{index} is not bound")]
    UnboundParameter {
        /// Positional index of the parameter.
        index: usize,
    },
    /// A segment was requested between endpoints that enclose nothing.
    #[error("endpoints {low} and {high} do not enclose any value")]
    DegenerateSegment {
        /// Rendering of the lower endpoint.
        low: String,
        /// Rendering of the upper endpoint.
        high: String,
    },
    /// `insert_segment` was handed a segment that intersects the line.
    #[error("segment {segment} overlaps the number line it is inserted into")]
    OverlappingSegment {
        /// Rendering of the rejected segment.
        segment: String,
    },
}

impl BoundError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        BoundError::MalformedPredicateNode {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the bound planner.
pub type Result<T, E = BoundError> = std::result::Result<T, E>;
