//! Tree-walking interpreter.
//!
//! A single [`Interpreter`] instance owns all mutable evaluator state:
//! the variable environment, the function and struct tables, the active
//! directive set, the current package, and the call stack used by
//! private-access checks. Nothing is ambient; every tree walk goes
//! through `&mut self`.
//!
//! Statement execution returns a [`Flow`] signal alongside errors, and
//! each loop or function driver consumes the signals addressed to it:
//! loops consume `Break`/`Continue`, the call machinery consumes
//! `Return`. Signals never cross a function boundary.

mod calls;
mod exprs;

pub(crate) use calls::{FnDef, Frame};

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use yail_ir::{DataKind, Expr, OpPosition, Program, SelfOp, Stmt, StmtKind};

use crate::environment::Environment;
use crate::errors::{
    duplicate_definition, key_not_found, type_mismatch, undefined_variable,
    unsupported_operation, EvalError, EvalResult,
};
use crate::operators::{evaluate_binary, floor_divide, power};
use crate::print_handler::{stdin_input, stdout_handler, InputSource, PrintHandlerImpl};
use crate::value::{RefValue, Value, ValueData};

/// Directive name that relaxes assignment kind checks.
pub const DISABLE_TYPE_CHECKING: &str = "disable-type-checking";

/// Control signal produced by executing one statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Fall through to the next statement.
    Normal,
    /// Leave the nearest enclosing loop.
    Break,
    /// Skip to the nearest enclosing loop's next iteration.
    Continue,
    /// Unwind to the function boundary with the produced value.
    Return(Value),
}

/// A struct definition: defaults evaluated once at declaration time.
pub(crate) struct StructDef {
    pub(crate) qualified_name: String,
    pub(crate) defaults: Vec<(String, Value)>,
}

/// The evaluator.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) functions: FxHashMap<String, FnDef>,
    pub(crate) structs: FxHashMap<String, StructDef>,
    pub(crate) directives: FxHashSet<String>,
    pub(crate) usings: FxHashSet<String>,
    pub(crate) current_package: String,
    pub(crate) call_stack: Vec<Frame>,
    /// Relaxes redeclaration checks while a loop body is executing, since
    /// the same declaration node runs once per iteration.
    pub(crate) inside_loop: bool,
    pub(crate) print: PrintHandlerImpl,
    pub(crate) input: InputSource,
}

impl Interpreter {
    /// Create an interpreter wired to stdout/stdin.
    pub fn new() -> Self {
        Self::with_io(stdout_handler(), stdin_input())
    }

    /// Create an interpreter with explicit I/O handlers (tests,
    /// embedding).
    pub fn with_io(print: PrintHandlerImpl, input: InputSource) -> Self {
        Interpreter {
            env: Environment::new(),
            functions: FxHashMap::default(),
            structs: FxHashMap::default(),
            directives: FxHashSet::default(),
            usings: FxHashSet::default(),
            current_package: "main".to_string(),
            call_stack: Vec::new(),
            inside_loop: false,
            print,
            input,
        }
    }

    /// Output captured by a buffer print handler.
    pub fn output(&self) -> String {
        self.print.output()
    }

    /// Package names recorded from `using` statements.
    pub fn usings(&self) -> &FxHashSet<String> {
        &self.usings
    }

    /// Directive names activated so far.
    pub fn active_directives(&self) -> &FxHashSet<String> {
        &self.directives
    }

    /// Run a program to completion or to the first fatal error.
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        for stmt in &program.stmts {
            match self.exec_stmt(stmt)? {
                // a top-level return stops execution; its value is
                // discarded
                Flow::Return(_) => break,
                // loop signals without an enclosing loop have no consumer
                Flow::Normal | Flow::Break | Flow::Continue => {}
            }
        }
        Ok(())
    }

    /// Execute statements in order until one produces a non-normal flow
    /// signal.
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, EvalError> {
        for stmt in stmts {
            let flow = self.exec_stmt(stmt)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Execute one statement.
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Package(name) => {
                self.current_package = name.clone();
                Ok(Flow::Normal)
            }
            StmtKind::Using(name) => {
                self.usings.insert(name.clone());
                Ok(Flow::Normal)
            }
            StmtKind::Directive(name) => {
                self.directives.insert(name.clone());
                Ok(Flow::Normal)
            }
            StmtKind::VarDecl {
                name,
                is_ref,
                value,
            } => self.exec_var_decl(name, *is_ref, value, stmt),
            StmtKind::Assign { name, index, value } => {
                self.exec_assign(name, index.as_ref(), value, stmt)
            }
            StmtKind::OpAssign { name, op, value } => {
                let existing = self
                    .env
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| undefined_variable(name).with_span(stmt.span))?;
                let rhs = self.eval_expr(value)?;
                if !self.type_checks_disabled() && existing.kind() != rhs.kind() {
                    return Err(type_mismatch(
                        existing.kind().keyword(),
                        rhs.kind().keyword(),
                    )
                    .with_span(stmt.span));
                }
                let result =
                    evaluate_binary(existing, rhs, *op).map_err(|e| e.with_span(stmt.span))?;
                self.env.assign(name, result)?;
                Ok(Flow::Normal)
            }
            StmtKind::SelfOp { name, op, position } => {
                self.exec_self_op(name, *op, *position, stmt)
            }
            StmtKind::FieldAssign {
                object,
                field,
                value,
            } => self.exec_field_assign(object, field, value, stmt),
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::void(),
                };
                Ok(Flow::Return(value))
            }
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Continue => Ok(Flow::Continue),
            StmtKind::If { arms, else_body } => {
                for arm in arms {
                    if self.eval_condition(&arm.cond)? {
                        return self.exec_block(&arm.body);
                    }
                }
                match else_body {
                    Some(body) => self.exec_block(body),
                    None => Ok(Flow::Normal),
                }
            }
            StmtKind::While { cond, body } => self.exec_while(cond, body),
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => self.exec_for(init.as_deref(), cond.as_ref(), update.as_deref(), body),
            StmtKind::Foreach {
                var,
                iterable,
                body,
            } => self.exec_foreach(var, iterable, body),
            StmtKind::FnDecl(decl) => {
                let package = self.current_package.clone();
                let key = format!("{package}::{}", decl.name);
                // first registration wins; later declarations of the same
                // qualified name are ignored
                self.functions.entry(key).or_insert_with(|| FnDef {
                    name: decl.name.clone(),
                    package,
                    access: decl.access,
                    params: decl.params.clone(),
                    return_kind: decl.return_kind,
                    body: Rc::new(decl.body.clone()),
                });
                Ok(Flow::Normal)
            }
            StmtKind::StructDecl(decl) => self.exec_struct_decl(decl, stmt),
        }
    }

    fn exec_var_decl(
        &mut self,
        name: &str,
        is_ref: bool,
        value: &Expr,
        stmt: &Stmt,
    ) -> Result<Flow, EvalError> {
        let evaluated = if is_ref {
            self.eval_reference_init(value)?
        } else {
            self.eval_expr(value)?
        };
        // void never participates in storage
        if evaluated.is_void() {
            return Ok(Flow::Normal);
        }
        if self.inside_loop {
            self.env.declare_or_assign(name, evaluated);
        } else {
            self.env
                .declare(name, evaluated)
                .map_err(|e| e.with_span(stmt.span))?;
        }
        Ok(Flow::Normal)
    }

    /// Evaluate a `var ref` initializer.
    ///
    /// An element access on a named container produces a reference value
    /// recording the container and index; any other initializer binds its
    /// plain value.
    fn eval_reference_init(&mut self, init: &Expr) -> EvalResult {
        if let yail_ir::ExprKind::Index { target, index } = &init.kind {
            if let yail_ir::ExprKind::Ident(container) = &target.kind {
                let container_value = self.eval_expr(target)?;
                let index_value = self.eval_expr(index)?;
                let observed = exprs::index_read(&container_value, &index_value)
                    .map_err(|e| e.with_span(init.span))?;
                return Ok(Value::new(ValueData::Reference(Box::new(RefValue {
                    container: container.clone(),
                    index: index_value,
                    observed,
                }))));
            }
        }
        self.eval_expr(init)
    }

    fn exec_assign(
        &mut self,
        name: &str,
        index: Option<&Expr>,
        value: &Expr,
        stmt: &Stmt,
    ) -> Result<Flow, EvalError> {
        let new_value = self.eval_expr(value)?;
        if new_value.is_void() {
            return Ok(Flow::Normal);
        }

        if let Some(index_expr) = index {
            let index_value = self.eval_expr(index_expr)?;
            self.assign_element(name, &index_value, new_value, stmt)?;
            return Ok(Flow::Normal);
        }

        let previous = self
            .env
            .lookup(name)
            .ok_or_else(|| undefined_variable(name).with_span(stmt.span))?;
        // container rebinding skips the kind check, as does the directive
        let skip_check = matches!(
            previous.data,
            ValueData::Array(_) | ValueData::Dict(_)
        ) || self.type_checks_disabled();
        if !skip_check && previous.kind() != new_value.kind() {
            return Err(type_mismatch(
                previous.kind().keyword(),
                new_value.kind().keyword(),
            )
            .with_span(stmt.span));
        }
        self.env.assign(name, new_value)?;
        Ok(Flow::Normal)
    }

    /// `name[index] = value` for arrays and dictionaries, followed by a
    /// reference resynchronization sweep over the scope.
    fn assign_element(
        &mut self,
        name: &str,
        index: &Value,
        value: Value,
        stmt: &Stmt,
    ) -> Result<(), EvalError> {
        let slot = self
            .env
            .lookup_mut(name)
            .ok_or_else(|| undefined_variable(name).with_span(stmt.span))?;
        match (&mut slot.data, &index.data) {
            (ValueData::Array(items), ValueData::Int(raw)) => {
                let resolved = if *raw < 0 {
                    items.len() as i32 + raw
                } else {
                    *raw
                };
                let i = usize::try_from(resolved)
                    .ok()
                    .filter(|i| *i < items.len())
                    .ok_or_else(|| {
                        crate::errors::index_out_of_range(*raw).with_span(stmt.span)
                    })?;
                items[i] = value;
            }
            (ValueData::Array(_), _) => {
                return Err(
                    type_mismatch("i32", index.kind().keyword()).with_span(stmt.span)
                );
            }
            (ValueData::Dict(entries), ValueData::Str(key)) => {
                // keys must exist; there is no insert-on-assign
                if !entries.contains_key(key) {
                    return Err(key_not_found(key).with_span(stmt.span));
                }
                entries.insert(key.clone(), value);
            }
            (ValueData::Dict(_), _) => {
                return Err(
                    type_mismatch("string", index.kind().keyword()).with_span(stmt.span)
                );
            }
            _ => {
                return Err(unsupported_operation(format!(
                    "index accessor cannot be used on {}",
                    slot.kind().keyword()
                ))
                .with_span(stmt.span));
            }
        }
        self.env.resync_references(name);
        Ok(())
    }

    fn exec_self_op(
        &mut self,
        name: &str,
        op: SelfOp,
        _position: OpPosition,
        stmt: &Stmt,
    ) -> Result<Flow, EvalError> {
        let existing = self
            .env
            .lookup(name)
            .cloned()
            .ok_or_else(|| undefined_variable(name).with_span(stmt.span))?;
        if !matches!(existing.kind(), DataKind::Int32 | DataKind::Double) {
            return Err(unsupported_operation(format!(
                "operation '{}' is not supported for type '{}'",
                op.as_symbol(),
                existing.kind().keyword()
            ))
            .with_span(stmt.span));
        }
        let is_double = matches!(existing.data, ValueData::Double(_));
        let operand = move |v: i32| {
            if is_double {
                Value::double(f64::from(v))
            } else {
                Value::int(v)
            }
        };
        let result = match op {
            SelfOp::Increment => evaluate_binary(existing, operand(1), yail_ir::BinaryOp::Add),
            SelfOp::Decrement => evaluate_binary(existing, operand(1), yail_ir::BinaryOp::Sub),
            SelfOp::Square => power(&existing, &operand(2)),
            SelfOp::Halve => floor_divide(&existing, &operand(2)),
        }
        .map_err(|e| e.with_span(stmt.span))?;
        self.env.assign(name, result)?;
        Ok(Flow::Normal)
    }

    fn exec_field_assign(
        &mut self,
        object: &str,
        field: &str,
        value: &Expr,
        stmt: &Stmt,
    ) -> Result<Flow, EvalError> {
        let new_value = self.eval_expr(value)?;
        if new_value.is_void() {
            return Ok(Flow::Normal);
        }
        let slot = self
            .env
            .lookup_mut(object)
            .ok_or_else(|| undefined_variable(object).with_span(stmt.span))?;
        let ValueData::Struct(instance) = &mut slot.data else {
            return Err(
                unsupported_operation("this expression is only valid on instances")
                    .with_span(stmt.span),
            );
        };
        let Some(field_slot) = instance.fields.get_mut(field) else {
            return Err(key_not_found(field).with_span(stmt.span));
        };
        // struct fields are kind-fixed after creation
        if field_slot.kind() != new_value.kind() {
            return Err(type_mismatch(
                field_slot.kind().keyword(),
                new_value.kind().keyword(),
            )
            .with_span(stmt.span));
        }
        *field_slot = new_value;
        Ok(Flow::Normal)
    }

    fn exec_while(&mut self, cond: &Expr, body: &[Stmt]) -> Result<Flow, EvalError> {
        let was_inside = std::mem::replace(&mut self.inside_loop, true);
        let result = loop {
            match self.eval_condition(cond) {
                Ok(true) => {}
                Ok(false) => break Ok(Flow::Normal),
                Err(e) => break Err(e),
            }
            match self.exec_block(body) {
                Ok(Flow::Normal | Flow::Continue) => {}
                Ok(Flow::Break) => break Ok(Flow::Normal),
                Ok(flow @ Flow::Return(_)) => break Ok(flow),
                Err(e) => break Err(e),
            }
        };
        self.inside_loop = was_inside;
        result
    }

    fn exec_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        update: Option<&Stmt>,
        body: &[Stmt],
    ) -> Result<Flow, EvalError> {
        if let Some(init) = init {
            self.exec_stmt(init)?;
        }
        let was_inside = std::mem::replace(&mut self.inside_loop, true);
        let result = loop {
            // a missing condition means "always true"
            match cond.map_or(Ok(true), |c| self.eval_condition(c)) {
                Ok(true) => {}
                Ok(false) => break Ok(Flow::Normal),
                Err(e) => break Err(e),
            }
            match self.exec_block(body) {
                Ok(Flow::Normal | Flow::Continue) => {
                    // the update clause runs on every non-breaking
                    // iteration
                    if let Some(update) = update {
                        if let Err(e) = self.exec_stmt(update) {
                            break Err(e);
                        }
                    }
                }
                Ok(Flow::Break) => break Ok(Flow::Normal),
                Ok(flow @ Flow::Return(_)) => break Ok(flow),
                Err(e) => break Err(e),
            }
        };
        self.inside_loop = was_inside;
        result
    }

    fn exec_foreach(
        &mut self,
        var: &str,
        iterable: &Expr,
        body: &[Stmt],
    ) -> Result<Flow, EvalError> {
        let collection = self.eval_expr(iterable)?;
        let items: Vec<Value> = match &collection.data {
            ValueData::Str(text) => text.chars().map(Value::character).collect(),
            // elements bind by value, not reference
            ValueData::Array(items) => items.clone(),
            _ => {
                return Err(unsupported_operation(
                    "you can only iterate over strings or arrays",
                )
                .with_span(iterable.span));
            }
        };

        let was_inside = std::mem::replace(&mut self.inside_loop, true);
        let mut result = Ok(Flow::Normal);
        for item in items {
            self.env.declare_or_assign(var, item);
            match self.exec_block(body) {
                Ok(Flow::Normal | Flow::Continue) => {}
                Ok(Flow::Break) => break,
                Ok(flow @ Flow::Return(_)) => {
                    result = Ok(flow);
                    break;
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        self.inside_loop = was_inside;
        result
    }

    fn exec_struct_decl(
        &mut self,
        decl: &yail_ir::StructDecl,
        stmt: &Stmt,
    ) -> Result<Flow, EvalError> {
        let qualified = format!("{}::{}", self.current_package, decl.name);
        if self.structs.contains_key(&qualified) {
            return Err(
                duplicate_definition(format!("struct '{qualified}'")).with_span(stmt.span)
            );
        }

        // field defaults evaluate immediately, in declaration order
        let mut defaults: Vec<(String, Value)> = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            if defaults.iter().any(|(name, _)| name == &field.name) {
                continue;
            }
            let value = match &field.default {
                Some(expr) => self.eval_expr(expr)?,
                None => Value::zero(field.kind),
            };
            defaults.push((field.name.clone(), value));
        }

        self.structs.insert(
            qualified.clone(),
            StructDef {
                qualified_name: qualified,
                defaults,
            },
        );
        Ok(Flow::Normal)
    }

    /// Evaluate a loop/branch condition; non-boolean results are fatal.
    fn eval_condition(&mut self, cond: &Expr) -> Result<bool, EvalError> {
        let value = self.eval_expr(cond)?;
        match value.data {
            ValueData::Bool(b) => Ok(b),
            _ => Err(type_mismatch("bool", value.kind().keyword()).with_span(cond.span)),
        }
    }

    /// Whether `#use disable-type-checking` is active.
    pub(crate) fn type_checks_disabled(&self) -> bool {
        self.directives.contains(DISABLE_TYPE_CHECKING)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
