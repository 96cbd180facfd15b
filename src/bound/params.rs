use std::collections::HashMap;

use index_bound_predicate::{Operand, Value};

use super::{BoundError, Result};

/// Lookup of positional parameter values for the current query invocation.
pub trait Parameters {
    /// Value bound to parameter `index`, if any.
    fn get(&self, index: usize) -> Option<&Value>;
}

impl Parameters for [Value] {
    fn get(&self, index: usize) -> Option<&Value> {
        <[Value]>::get(self, index)
    }
}

impl Parameters for Vec<Value> {
    fn get(&self, index: usize) -> Option<&Value> {
        self.as_slice().get(index)
    }
}

impl<const N: usize> Parameters for [Value; N] {
    fn get(&self, index: usize) -> Option<&Value> {
        self.as_slice().get(index)
    }
}

impl Parameters for HashMap<usize, Value> {
    fn get(&self, index: usize) -> Option<&Value> {
        HashMap::get(self, &index)
    }
}

/// Parameters for queries that bind none.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoParameters;

impl Parameters for NoParameters {
    fn get(&self, _index: usize) -> Option<&Value> {
        None
    }
}

/// Resolves a literal or parameter operand to the value it stands for.
///
/// Column operands are a shape error here: callers decide which side of a
/// comparison is the column before resolving the other side.
pub(crate) fn resolve_operand<'a, P>(operand: &'a Operand, params: &'a P) -> Result<&'a Value>
where
    P: Parameters + ?Sized,
{
    match operand {
        Operand::Literal(value) => Ok(value),
        Operand::Param(index) => params
            .get(*index)
            .ok_or(BoundError::UnboundParameter { index: *index }),
        Operand::Column(column) => Err(BoundError::malformed(format!(
            "expected a value operand, found column '{column}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use index_bound_predicate::ColumnRef;

    use super::*;

    #[test]
    fn literals_and_parameters_resolve() {
        let params = vec![Value::from(18i64), Value::from(30i64)];
        assert_eq!(
            resolve_operand(&Operand::Param(1), &params).unwrap(),
            &Value::from(30i64)
        );
        assert_eq!(
            resolve_operand(&Operand::Literal(Value::from("SC")), &NoParameters).unwrap(),
            &Value::from("SC")
        );
    }

    #[test]
    fn missing_parameter_is_reported() {
        let params: [Value; 1] = [Value::from(1i64)];
        assert_eq!(
            resolve_operand(&Operand::Param(3), &params).unwrap_err(),
            BoundError::UnboundParameter { index: 3 }
        );
    }

    #[test]
    fn column_operand_is_malformed() {
        let err = resolve_operand(&Operand::Column(ColumnRef::new("age")), &NoParameters)
            .unwrap_err();
        assert!(matches!(err, BoundError::MalformedPredicateNode { .. }));
    }

    #[test]
    fn map_parameters_look_up_by_index() {
        let params = HashMap::from([(7usize, Value::from(true))]);
        assert_eq!(Parameters::get(&params, 7), Some(&Value::from(true)));
        assert_eq!(Parameters::get(&params, 0), None);
    }
}
