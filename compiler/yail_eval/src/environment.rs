//! Variable environment.
//!
//! The language has function-level scoping: one flat binding map per
//! function activation, replaced wholesale on call and restored on
//! return. Nested blocks (if/while/for bodies) share the enclosing
//! function's bindings.

use rustc_hash::FxHashMap;

use crate::errors::{redeclared_variable, undefined_variable, EvalError};
use crate::value::{Value, ValueData};

/// One function activation's bindings.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Environment {
            bindings: FxHashMap::default(),
        }
    }

    /// Strictly declare a new binding; redeclaring is fatal.
    pub fn declare(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.contains_key(name) {
            return Err(redeclared_variable(name));
        }
        self.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Declare-or-assign, used inside loop bodies where the same
    /// declaration node runs once per iteration.
    pub fn declare_or_assign(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Overwrite an existing binding; the caller has already checked
    /// kinds. Fails on unbound names.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        match self.bindings.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined_variable(name)),
        }
    }

    /// Look up a binding.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Look up a binding for in-place mutation (indexed assignment,
    /// array methods).
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.bindings.get_mut(name)
    }

    /// Swap in a fresh environment (function entry), returning the
    /// caller's bindings for restoration on return.
    pub fn replace(&mut self, other: Environment) -> Environment {
        std::mem::replace(self, other)
    }

    /// Resynchronize every reference backed by `container`.
    ///
    /// Re-reads each reference's element at its stored index and updates
    /// the observed payload. Runs after the container mutates; references
    /// whose index no longer resolves keep their last observed value.
    /// This sweep covers local bindings only.
    pub fn resync_references(&mut self, container: &str) {
        let Some(backing) = self.bindings.get(container).cloned() else {
            return;
        };

        let mut updates = Vec::new();
        for (name, value) in &self.bindings {
            if let ValueData::Reference(reference) = &value.data {
                if reference.container == container {
                    if let Some(observed) = read_element(&backing, &reference.index) {
                        updates.push((name.clone(), observed));
                    }
                }
            }
        }

        for (name, observed) in updates {
            if let Some(Value {
                data: ValueData::Reference(reference),
                ..
            }) = self.bindings.get_mut(&name)
            {
                reference.observed = observed;
            }
        }
    }
}

/// Best-effort element read used by the resynchronization sweep.
///
/// Negative array indices address from the end, as in expression-position
/// indexing.
fn read_element(container: &Value, index: &Value) -> Option<Value> {
    match (&container.data, &index.data) {
        (ValueData::Array(items), ValueData::Int(idx)) => {
            let resolved = if *idx < 0 {
                items.len() as i32 + idx
            } else {
                *idx
            };
            usize::try_from(resolved)
                .ok()
                .and_then(|i| items.get(i))
                .cloned()
        }
        (ValueData::Dict(entries), ValueData::Str(key)) => entries.get(key).cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use crate::value::RefValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn declare_then_lookup() {
        let mut env = Environment::new();
        env.declare("x", Value::int(3)).unwrap();
        assert_eq!(env.lookup("x"), Some(&Value::int(3)));
    }

    #[test]
    fn redeclaration_fails() {
        let mut env = Environment::new();
        env.declare("x", Value::int(3)).unwrap();
        let err = env.declare("x", Value::int(4)).unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::RedeclaredVariable { .. }
        ));
    }

    #[test]
    fn assign_to_unbound_fails() {
        let mut env = Environment::new();
        let err = env.assign("missing", Value::int(1)).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::UndefinedVariable { .. }));
    }

    #[test]
    fn declare_or_assign_overwrites() {
        let mut env = Environment::new();
        env.declare_or_assign("x", Value::int(1));
        env.declare_or_assign("x", Value::int(2));
        assert_eq!(env.lookup("x"), Some(&Value::int(2)));
    }

    #[test]
    fn replace_swaps_scopes() {
        let mut env = Environment::new();
        env.declare("caller_local", Value::int(1)).unwrap();
        let saved = env.replace(Environment::new());
        assert_eq!(env.lookup("caller_local"), None);
        env.replace(saved);
        assert_eq!(env.lookup("caller_local"), Some(&Value::int(1)));
    }

    #[test]
    fn resync_updates_observed_payload() {
        let mut env = Environment::new();
        env.declare("a", Value::array(vec![Value::int(1), Value::int(2)]))
            .unwrap();
        env.declare(
            "x",
            Value::new(ValueData::Reference(Box::new(RefValue {
                container: "a".into(),
                index: Value::int(1).as_const(),
                observed: Value::int(2),
            }))),
        )
        .unwrap();

        // mutate the backing array, then resync
        if let Some(Value {
            data: ValueData::Array(items),
            ..
        }) = env.lookup_mut("a")
        {
            items[1] = Value::int(99);
        }
        env.resync_references("a");

        let Some(Value {
            data: ValueData::Reference(reference),
            ..
        }) = env.lookup("x")
        else {
            panic!("reference binding lost");
        };
        assert_eq!(reference.observed, Value::int(99));
    }

    #[test]
    fn resync_ignores_references_to_other_containers() {
        let mut env = Environment::new();
        env.declare("a", Value::array(vec![Value::int(1)])).unwrap();
        env.declare("b", Value::array(vec![Value::int(7)])).unwrap();
        env.declare(
            "x",
            Value::new(ValueData::Reference(Box::new(RefValue {
                container: "b".into(),
                index: Value::int(0).as_const(),
                observed: Value::int(7),
            }))),
        )
        .unwrap();

        env.resync_references("a");

        let Some(Value {
            data: ValueData::Reference(reference),
            ..
        }) = env.lookup("x")
        else {
            panic!("reference binding lost");
        };
        assert_eq!(reference.observed, Value::int(7));
    }
}
