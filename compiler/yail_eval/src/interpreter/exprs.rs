//! Expression evaluation.

use std::collections::BTreeMap;

use yail_ir::{Expr, ExprKind};

use crate::builtins::dispatch_builtin;
use crate::cast::cast_value;
use crate::errors::{
    duplicate_definition, index_out_of_range, key_not_found, type_mismatch,
    undefined_struct, undefined_variable, unsupported_operation, EvalResult,
};
use crate::methods::dispatch_array_method;
use crate::operators::evaluate_binary;
use crate::value::{StructValue, Value, ValueData};

use super::Interpreter;

impl Interpreter {
    /// Evaluate one expression.
    ///
    /// Errors carry the span of the innermost expression that produced
    /// them.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        self.eval_expr_inner(expr)
            .map_err(|e| e.with_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(v) => Ok(Value::int(*v).as_const()),
            ExprKind::Double(v) => Ok(Value::double(*v).as_const()),
            ExprKind::Bool(v) => Ok(Value::boolean(*v).as_const()),
            ExprKind::Str(v) => Ok(Value::string(v.clone()).as_const()),
            ExprKind::Char(v) => Ok(Value::character(*v).as_const()),
            ExprKind::Null => Ok(Value::null().as_const()),

            ExprKind::Ident(name) => {
                let value = self
                    .env
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| undefined_variable(name))?;
                // references read through to their observed element
                if let ValueData::Reference(reference) = value.data {
                    return Ok(reference.observed);
                }
                Ok(value)
            }

            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }

            ExprKind::Not(operand) => {
                let value = self.eval_expr(operand)?;
                let result = match value.data {
                    ValueData::Null => true,
                    ValueData::Bool(b) => !b,
                    _ => false,
                };
                Ok(Value::boolean(result).as_const())
            }

            ExprKind::Cast { value, target } => {
                let value = self.eval_expr(value)?;
                Ok(cast_value(&value, *target))
            }

            ExprKind::Paren(inner) => self.eval_expr(inner),

            ExprKind::Array { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element)?);
                }
                Ok(Value::array(items))
            }

            ExprKind::Dict { entries } => {
                let mut map = BTreeMap::new();
                for (key, value_expr) in entries {
                    let value = self.eval_expr(value_expr)?;
                    if map.insert(key.clone(), value).is_some() {
                        return Err(duplicate_definition(format!(
                            "dictionary key \"{key}\""
                        )));
                    }
                }
                Ok(Value::dict(map))
            }

            ExprKind::Index { target, index } => {
                let target = self.eval_expr(target)?;
                let index = self.eval_expr(index)?;
                index_read(&target, &index)
            }

            ExprKind::Len(value) => {
                let value = self.eval_expr(value)?;
                match &value.data {
                    ValueData::Str(text) => {
                        Ok(Value::int(text.chars().count() as i32).as_const())
                    }
                    ValueData::Array(items) => {
                        Ok(Value::int(items.len() as i32).as_const())
                    }
                    _ => Err(unsupported_operation(format!(
                        "len() does not support {}",
                        value.kind().keyword()
                    ))),
                }
            }

            ExprKind::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg)?);
                }
                // built-ins resolve before user functions and push no
                // call-stack frame
                if let Some(result) =
                    dispatch_builtin(name, &values, &self.print, &self.input)
                {
                    return result;
                }
                let package = self.current_package.clone();
                self.call_user_function(&package, name, values, expr.span)
            }

            ExprKind::NamespacedCall {
                package,
                name,
                args,
            } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg)?);
                }
                let package = package.clone();
                self.call_user_function(&package, name, values, expr.span)
            }

            ExprKind::MethodCall {
                object,
                method,
                args,
            } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg)?);
                }
                let slot = self
                    .env
                    .lookup_mut(object)
                    .ok_or_else(|| undefined_variable(object))?;
                match &mut slot.data {
                    ValueData::Array(items) => dispatch_array_method(method, items, values),
                    _ => Err(unsupported_operation(format!(
                        "'{method}' is not a valid method for type '{}'",
                        slot.kind().keyword()
                    ))),
                }
            }

            ExprKind::New {
                package,
                name,
                ctor,
            } => self.instantiate(package.as_deref(), name, ctor),

            ExprKind::Field { object, field } => {
                let value = self
                    .env
                    .lookup(object)
                    .ok_or_else(|| undefined_variable(object))?;
                let ValueData::Struct(instance) = &value.data else {
                    return Err(unsupported_operation(
                        "this expression is only valid on instances",
                    ));
                };
                instance
                    .fields
                    .get(field)
                    .cloned()
                    .ok_or_else(|| key_not_found(field))
            }
        }
    }

    /// `new [package::]Name() { field = expr; ... }`
    ///
    /// Resolves the definition (bare names default to the caller's
    /// current package; qualified names must exist), clones the default
    /// fields into a fresh instance, then applies the constructor body's
    /// field updates under the usual kind-fixing rule.
    fn instantiate(
        &mut self,
        package: Option<&str>,
        name: &str,
        ctor: &[yail_ir::FieldInit],
    ) -> EvalResult {
        let qualified = format!(
            "{}::{name}",
            package.unwrap_or(self.current_package.as_str())
        );
        let def = self
            .structs
            .get(&qualified)
            .ok_or_else(|| undefined_struct(&qualified))?;

        let mut instance = StructValue {
            type_name: def.qualified_name.clone(),
            fields: def
                .defaults
                .iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
        };

        for init in ctor {
            let value = self.eval_expr(&init.value)?;
            let Some(slot) = instance.fields.get_mut(&init.name) else {
                return Err(key_not_found(&init.name).with_span(init.span));
            };
            if slot.kind() != value.kind() {
                return Err(type_mismatch(
                    slot.kind().keyword(),
                    value.kind().keyword(),
                )
                .with_span(init.span));
            }
            *slot = value;
        }

        Ok(Value::new(ValueData::Struct(instance)))
    }
}

/// Element read shared by index expressions and reference initializers.
///
/// Strings index to const chars, arrays to their elements, dictionaries
/// by string key. Negative indices address from the end.
pub(super) fn index_read(target: &Value, index: &Value) -> EvalResult {
    match (&target.data, &index.data) {
        (ValueData::Str(text), ValueData::Int(raw)) => {
            let chars: Vec<char> = text.chars().collect();
            let i = resolve_index(*raw, chars.len())?;
            Ok(Value::character(chars[i]).as_const())
        }
        (ValueData::Array(items), ValueData::Int(raw)) => {
            let i = resolve_index(*raw, items.len())?;
            Ok(items[i].clone())
        }
        (ValueData::Str(_) | ValueData::Array(_), _) => {
            Err(type_mismatch("i32", index.kind().keyword()))
        }
        (ValueData::Dict(entries), ValueData::Str(key)) => entries
            .get(key)
            .cloned()
            .ok_or_else(|| key_not_found(key)),
        (ValueData::Dict(_), _) => Err(type_mismatch("string", index.kind().keyword())),
        _ => Err(unsupported_operation(format!(
            "index accessor cannot be used on {}",
            target.kind().keyword()
        ))),
    }
}

/// Resolve a possibly-negative index against a length, bounds-checked.
fn resolve_index(raw: i32, len: usize) -> Result<usize, crate::errors::EvalError> {
    let resolved = if raw < 0 { len as i32 + raw } else { raw };
    usize::try_from(resolved)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| index_out_of_range(raw))
}
