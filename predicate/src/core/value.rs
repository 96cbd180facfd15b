use std::{cmp::Ordering, fmt, sync::Arc};

/// Ordering over values the predicate layer cannot compare natively.
///
/// Implementations typically wrap a collation-aware routine owned by the
/// storage engine. Two encoded values are only ordered against each other when
/// their comparators report the same [`name`](ExternalComparator::name).
pub trait ExternalComparator: Send + Sync {
    /// Stable identifier of the ordering (for example a collation name).
    fn name(&self) -> &str;

    /// Orders two encoded byte strings, or `None` when they cannot be ordered.
    fn compare(&self, left: &[u8], right: &[u8]) -> Option<Ordering>;
}

/// Capability to order against a [`Value`].
///
/// This is the only ordering entry point for values: native scalars implement
/// it directly and [`EncodedValue`] implements it by delegating to its
/// comparator.
pub trait Orderable {
    /// Orders `self` relative to `other`, returning `None` when not comparable.
    fn compare(&self, other: &Value) -> Option<Ordering>;
}

/// Opaque value whose ordering is delegated to an [`ExternalComparator`].
#[derive(Clone)]
pub struct EncodedValue {
    bytes: Arc<[u8]>,
    comparator: Arc<dyn ExternalComparator>,
}

impl EncodedValue {
    /// Wraps encoded bytes together with the comparator that orders them.
    pub fn new<B>(bytes: B, comparator: Arc<dyn ExternalComparator>) -> Self
    where
        B: Into<Arc<[u8]>>,
    {
        Self {
            bytes: bytes.into(),
            comparator,
        }
    }

    /// Raw encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Name of the comparator ordering this value.
    #[must_use]
    pub fn comparator_name(&self) -> &str {
        self.comparator.name()
    }

    fn shares_comparator(&self, other: &EncodedValue) -> bool {
        Arc::ptr_eq(&self.comparator, &other.comparator)
            || self.comparator.name() == other.comparator.name()
    }
}

impl Orderable for EncodedValue {
    fn compare(&self, other: &Value) -> Option<Ordering> {
        match other {
            Value::Encoded(rhs) if self.shares_comparator(rhs) => {
                self.comparator.compare(&self.bytes, &rhs.bytes)
            }
            Value::Utf8(rhs) => self.comparator.compare(&self.bytes, rhs.as_bytes()),
            Value::Binary(rhs) => self.comparator.compare(&self.bytes, rhs),
            _ => None,
        }
    }
}

impl fmt::Debug for EncodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedValue")
            .field("bytes", &self.bytes)
            .field("comparator", &self.comparator.name())
            .finish()
    }
}

/// Literal values accepted by predicate operands and bound parameters.
#[derive(Clone, Debug)]
pub enum Value {
    /// Represents SQL `NULL`.
    Null,
    /// Boolean literal.
    Boolean(bool),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string compared bytewise.
    Utf8(String),
    /// Binary blob.
    Binary(Vec<u8>),
    /// Value ordered by an external comparator.
    Encoded(EncodedValue),
}

impl Value {
    /// Returns true when the literal is `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for integer and floating point values.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int64(_) | Value::UInt64(_) | Value::Float64(_)
        )
    }

    /// Short name of the value kind, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int64(_) => "int64",
            Value::UInt64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::Utf8(_) => "utf8",
            Value::Binary(_) => "binary",
            Value::Encoded(_) => "encoded",
        }
    }

    /// Integer payload widened across signed and unsigned variants.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int64(v) => Some(i128::from(*v)),
            Value::UInt64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }
}

impl Orderable for Value {
    fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Encoded(lhs), rhs) => lhs.compare(rhs),
            (lhs, Encoded(rhs)) => rhs.compare(lhs).map(Ordering::reverse),
            (Boolean(lhs), Boolean(rhs)) => Some(lhs.cmp(rhs)),
            (Float64(lhs), Float64(rhs)) => lhs.partial_cmp(rhs),
            (Float64(lhs), rhs) => cmp_int_float(rhs.as_i128()?, *lhs).map(Ordering::reverse),
            (lhs, Float64(rhs)) => cmp_int_float(lhs.as_i128()?, *rhs),
            (Utf8(lhs), Utf8(rhs)) => Some(lhs.cmp(rhs)),
            (Binary(lhs), Binary(rhs)) => Some(lhs.cmp(rhs)),
            (lhs, rhs) => Some(lhs.as_i128()?.cmp(&rhs.as_i128()?)),
        }
    }
}

// Exact integer/float order. Every i64 and u64 lies in [-2^63, 2^64), so floats
// outside that window order without conversion and truncated floats inside it
// fit an i128 exactly.
fn cmp_int_float(int: i128, float: f64) -> Option<Ordering> {
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
    const NEG_TWO_POW_63: f64 = -9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= TWO_POW_64 {
        return Some(Ordering::Less);
    }
    if float < NEG_TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    Some(match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole))?,
        other => other,
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits() || a == b,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(v) => write!(f, "'{v}'"),
            Value::Binary(v) => {
                f.write_str("0x")?;
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::Encoded(v) => write!(f, "<{}:{} bytes>", v.comparator_name(), v.bytes().len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt64(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Utf8(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Utf8(value.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Binary(value.to_vec())
    }
}

impl From<EncodedValue> for Value {
    fn from(value: EncodedValue) -> Self {
        Value::Encoded(value)
    }
}
