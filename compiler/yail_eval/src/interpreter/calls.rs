//! Function call machinery: resolution, visibility, argument binding,
//! scope swap, and return-kind discipline.

use std::rc::Rc;

use yail_ir::{AccessLevel, DataKind, Param, Span, Stmt};

use crate::environment::Environment;
use crate::errors::{
    access_violation, arity_mismatch, type_mismatch, undefined_function, EvalResult,
};
use crate::value::Value;

use super::{Flow, Interpreter};

/// A registered function, keyed in the function table by
/// `package::name`.
///
/// Never mutated after registration except for return-kind inference:
/// a declared `any` return adopts the kind of the first successful
/// return permanently.
pub(crate) struct FnDef {
    pub(crate) name: String,
    pub(crate) package: String,
    pub(crate) access: AccessLevel,
    pub(crate) params: Vec<Param>,
    pub(crate) return_kind: DataKind,
    pub(crate) body: Rc<Vec<Stmt>>,
}

/// One call-stack frame, recorded for private-access checks.
///
/// Only resolved user functions push frames; built-ins do not.
pub(crate) struct Frame {
    pub(crate) package: String,
    pub(crate) access: AccessLevel,
}

impl Interpreter {
    /// Call a user function under `package::name`.
    pub(crate) fn call_user_function(
        &mut self,
        package: &str,
        name: &str,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        let key = format!("{package}::{name}");
        let Some(def) = self.functions.get(&key) else {
            return Err(undefined_function(name).with_span(span));
        };

        // calling a private function requires the caller's package to
        // match, or a public same-package function somewhere on the call
        // stack (transitive trust through a public entry point)
        if !def.access.is_public() {
            let allowed = self.current_package == def.package
                || self
                    .call_stack
                    .iter()
                    .any(|frame| frame.access.is_public() && frame.package == def.package);
            if !allowed {
                return Err(access_violation(name).with_span(span));
            }
        }

        if args.len() != def.params.len() {
            return Err(arity_mismatch(name, def.params.len(), args.len()).with_span(span));
        }

        let body = Rc::clone(&def.body);
        let declared_return = def.return_kind;
        let frame = Frame {
            package: def.package.clone(),
            access: def.access,
        };

        // the callee sees only its bound parameters; no closure over
        // caller locals
        let mut callee_env = Environment::new();
        for (param, arg) in def.params.iter().zip(args) {
            callee_env.declare_or_assign(&param.name, arg);
        }

        let saved_env = self.env.replace(callee_env);
        let saved_inside_loop = std::mem::replace(&mut self.inside_loop, false);
        self.call_stack.push(frame);

        let mut outcome = Ok(Flow::Normal);
        for stmt in body.iter() {
            match self.exec_stmt(stmt) {
                Ok(Flow::Return(value)) => {
                    outcome = Ok(Flow::Return(value));
                    break;
                }
                // break/continue do not cross the function boundary
                Ok(_) => {}
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        self.call_stack.pop();
        self.inside_loop = saved_inside_loop;
        self.env.replace(saved_env);

        let flow = outcome?;

        // a void function discards any produced value
        if declared_return == DataKind::Void {
            return Ok(Value::void());
        }

        let produced = match flow {
            Flow::Return(value) => value,
            _ => {
                return Err(type_mismatch(declared_return.keyword(), "void").with_span(span));
            }
        };

        if declared_return == DataKind::Any {
            // the first return fixes the inferred return kind for good
            let kind = produced.kind();
            if let Some(def) = self.functions.get_mut(&key) {
                def.return_kind = kind;
            }
            return Ok(produced);
        }

        if produced.kind() != declared_return {
            return Err(type_mismatch(
                declared_return.keyword(),
                produced.kind().keyword(),
            )
            .with_span(span));
        }
        Ok(produced)
    }
}
