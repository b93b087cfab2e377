//! Built-in array methods, dispatched by name from method-call syntax.

use crate::errors::{
    arity_mismatch, index_out_of_range, type_mismatch, unsupported_operation, EvalError,
    EvalResult,
};
use crate::value::{Value, ValueData};

/// Dispatch a method call on an array.
///
/// `push`/`removeAt` mutate in place and yield void; `pop` removes and
/// yields the last element (fatal on empty); `count` yields the length.
pub fn dispatch_array_method(
    method: &str,
    items: &mut Vec<Value>,
    args: Vec<Value>,
) -> EvalResult {
    match method {
        "push" => {
            require_args("push", 1, args.len())?;
            let value = args.into_iter().next().unwrap_or_else(Value::null);
            items.push(value);
            Ok(Value::void())
        }
        "pop" => {
            require_args("pop", 0, args.len())?;
            items
                .pop()
                .ok_or_else(|| unsupported_operation("pop() on an empty array"))
        }
        "removeAt" => {
            require_args("removeAt", 1, args.len())?;
            let index = require_int_arg(&args)?;
            let resolved = resolve_index(index, items.len())?;
            items.remove(resolved);
            Ok(Value::void())
        }
        "count" => {
            require_args("count", 0, args.len())?;
            Ok(Value::int(items.len() as i32).as_const())
        }
        _ => Err(unsupported_operation(format!(
            "unknown method '{method}' for arrays"
        ))),
    }
}

/// Validate expected argument count.
fn require_args(method: &str, expected: usize, actual: usize) -> Result<(), EvalError> {
    if actual == expected {
        Ok(())
    } else {
        Err(arity_mismatch(method, expected, actual))
    }
}

/// Extract the first argument as an i32.
fn require_int_arg(args: &[Value]) -> Result<i32, EvalError> {
    match args.first().map(|v| &v.data) {
        Some(ValueData::Int(v)) => Ok(*v),
        Some(_) => Err(type_mismatch(
            "i32",
            args[0].kind().keyword(),
        )),
        None => Err(type_mismatch("i32", "void")),
    }
}

/// Resolve a possibly-negative index against a length, bounds-checked.
fn resolve_index(index: i32, len: usize) -> Result<usize, EvalError> {
    let resolved = if index < 0 { len as i32 + index } else { index };
    usize::try_from(resolved)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| index_out_of_range(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_appends_and_yields_void() {
        let mut items = vec![Value::int(1)];
        let result = dispatch_array_method("push", &mut items, vec![Value::int(2)]).unwrap();
        assert!(result.is_void());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn pop_removes_last() {
        let mut items = vec![Value::int(1), Value::int(2)];
        let popped = dispatch_array_method("pop", &mut items, vec![]).unwrap();
        assert_eq!(popped, Value::int(2));
        assert_eq!(items, vec![Value::int(1)]);
    }

    #[test]
    fn pop_on_empty_fails() {
        let mut items = Vec::new();
        assert!(dispatch_array_method("pop", &mut items, vec![]).is_err());
    }

    #[test]
    fn remove_at_supports_negative_indices() {
        let mut items = vec![Value::int(1), Value::int(2), Value::int(3)];
        dispatch_array_method("removeAt", &mut items, vec![Value::int(-1)]).unwrap();
        assert_eq!(items, vec![Value::int(1), Value::int(2)]);
    }

    #[test]
    fn remove_at_out_of_range_fails() {
        let mut items = vec![Value::int(1)];
        let err =
            dispatch_array_method("removeAt", &mut items, vec![Value::int(5)]).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::IndexOutOfRange { .. }));
    }

    #[test]
    fn count_is_const_int() {
        let mut items = vec![Value::int(1), Value::int(2)];
        let count = dispatch_array_method("count", &mut items, vec![]).unwrap();
        assert_eq!(count, Value::int(2).as_const());
    }

    #[test]
    fn wrong_arity_fails() {
        let mut items = Vec::new();
        let err = dispatch_array_method("push", &mut items, vec![]).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::ArityMismatch { .. }));
    }

    #[test]
    fn unknown_method_fails() {
        let mut items = Vec::new();
        assert!(dispatch_array_method("sort", &mut items, vec![]).is_err());
    }
}
