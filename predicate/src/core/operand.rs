use std::{fmt, sync::Arc};

use super::Value;

/// Reference identifying a column used inside predicates.
///
/// Columns are matched by name only; resolving a name against the table
/// mapping happens in the planner, not at predicate construction time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Canonical column name.
    pub name: Arc<str>,
}

impl ColumnRef {
    /// Creates a new column reference from a name.
    #[must_use]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self { name: name.into() }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Operand used by predicate comparisons.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Reference to a column.
    Column(ColumnRef),
    /// Literal value.
    Literal(Value),
    /// Positional parameter bound when the query executes.
    Param(usize),
}

impl Operand {
    /// Returns the referenced column, if this operand is a column.
    #[must_use]
    pub fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Operand::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Returns true when this operand references `column`.
    #[must_use]
    pub fn is_column(&self, column: &str) -> bool {
        self.as_column()
            .is_some_and(|reference| reference.name.as_ref() == column)
    }
}

impl From<ColumnRef> for Operand {
    fn from(value: ColumnRef) -> Self {
        Self::Column(value)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(column) => write!(f, "{column}"),
            Operand::Literal(value) => write!(f, "{value}"),
            Operand::Param(index) => write!(f, "?{index}"),
        }
    }
}
