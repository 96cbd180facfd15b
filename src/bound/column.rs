use std::{fmt, sync::Arc};

use index_bound_predicate::Value;

use super::{Endpoint, NumberLine, Segment};

/// Storage metadata for the column being bounded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMeta {
    name: Arc<str>,
    is_unsigned: bool,
    is_integral: bool,
    int_size: u8,
}

impl ColumnMeta {
    /// A column with no integral storage type; it is bounded only by the domain.
    #[must_use]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            is_unsigned: false,
            is_integral: false,
            int_size: 0,
        }
    }

    /// A signed integer column of `int_size` bytes.
    #[must_use]
    pub fn signed_int<N>(name: N, int_size: u8) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            is_integral: true,
            int_size,
            ..Self::new(name)
        }
    }

    /// An unsigned integer column of `int_size` bytes.
    #[must_use]
    pub fn unsigned_int<N>(name: N, int_size: u8) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            is_unsigned: true,
            is_integral: true,
            int_size,
            ..Self::new(name)
        }
    }

    /// Column name as matched against predicate column references.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the column stores unsigned values.
    #[must_use]
    pub fn is_unsigned(&self) -> bool {
        self.is_unsigned
    }

    /// Whether the column stores integers.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.is_integral
    }

    /// Integer width in bytes; meaningful only for integral columns.
    #[must_use]
    pub fn int_size(&self) -> u8 {
        self.int_size
    }

    /// Range of values the declared storage type can hold.
    ///
    /// Integral columns of width 1, 2, 3, 4 or 8 bytes get closed bounds for
    /// their signedness; anything else is unbounded.
    #[must_use]
    pub fn bounding_segment(&self) -> Segment {
        match self.integral_range() {
            Some((min, max)) => {
                Segment::from_ordered(Endpoint::inclusive(min), Endpoint::inclusive(max))
            }
            None => Segment::full(),
        }
    }

    /// [`bounding_segment`](Self::bounding_segment) as a number line.
    #[must_use]
    pub fn bounding_line(&self) -> NumberLine {
        NumberLine::from_segment(self.bounding_segment())
    }

    fn integral_range(&self) -> Option<(Value, Value)> {
        if !self.is_integral {
            return None;
        }
        let bits = match self.int_size {
            1 | 2 | 3 | 4 | 8 => u32::from(self.int_size) * 8,
            _ => return None,
        };
        if self.is_unsigned {
            let max = u64::MAX >> (64 - bits);
            Some((Value::Int64(0), Value::UInt64(max)))
        } else {
            let max = i64::MAX >> (64 - bits);
            Some((Value::Int64(-max - 1), Value::Int64(max)))
        }
    }
}

impl fmt::Display for ColumnMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_integral {
            return f.write_str(&self.name);
        }
        let sign = if self.is_unsigned { "u" } else { "i" };
        write!(f, "{} {sign}{}", self.name, u32::from(self.int_size) * 8)
    }
}
