use super::{ActiveCall, Builtin, ErrorKind, EvalError, Evaluator};
use crate::ast::{RESULT, THIS};
use crate::environment::split_member;
use crate::value::{slot, FunctionInfo, Slot, TypeName, Value};
use std::rc::Rc;

impl<'a> Evaluator<'a> {
    /// `funccall target arg...`
    ///
    /// The new frame is seeded in this order, later bindings shadowing
    /// earlier ones: the callee's own name when it was called through a
    /// variable (or `this` for `obj.method`), captured variables, then
    /// parameters.
    pub(crate) fn exec_call(&mut self, target: &str, args: &[String]) -> Result<(), EvalError> {
        if let Some(builtin) = Builtin::from_name(target) {
            return self.call_builtin(builtin, args);
        }

        let (callee, through_variable) = self.resolve_callee(target)?;
        if callee.params.len() != args.len() {
            return Err(self.fail(
                ErrorKind::Name,
                format!(
                    "Mismatched parameter count in call to {}: expected {}, got {}",
                    target,
                    callee.params.len(),
                    args.len()
                ),
            ));
        }

        let mut bindings: Vec<(String, Slot)> = Vec::new();
        match split_member(target) {
            Some((object, _)) => {
                if let Some(receiver) = self.env.get(object) {
                    bindings.push((THIS.to_string(), receiver));
                }
            }
            None if through_variable => {
                if let Some(own) = self.env.get(target) {
                    let value = own.borrow().clone();
                    bindings.push((target.to_string(), slot(value)));
                }
            }
            None => {}
        }

        for capture in &callee.captured {
            bindings.push((capture.name.clone(), slot(capture.value.clone())));
        }

        for (param, actual) in callee.params.iter().zip(args) {
            let source = self.resolve_slot(actual)?;
            let kind = source.borrow().kind();
            if kind != param.ty.kind() {
                return Err(self.fail(
                    ErrorKind::Type,
                    format!(
                        "Mismatched parameter type for {} in call to {}: expected {}, got {}",
                        param.name,
                        target,
                        param.ty,
                        kind
                    ),
                ));
            }
            let bound = if param.ty.is_reference() {
                source
            } else {
                let copy = source.borrow().clone();
                slot(copy)
            };
            bindings.push((param.name.clone(), bound));
        }

        let Some(entry) = callee.entry else {
            // the default `func` value has no body
            self.advance();
            return Ok(());
        };

        tracing::debug!(
            function = %callee.name,
            depth = self.env.depth() + 1,
            "call"
        );
        self.calls.push(ActiveCall {
            function: callee,
            return_to: Some(self.pc + 1),
        });
        self.env.enter_call();
        self.env.import_mappings(bindings);
        self.pc = entry;
        Ok(())
    }

    /// A declared function name, or a variable holding a function value.
    /// The flag is set when the callee came from a variable.
    fn resolve_callee(&self, target: &str) -> Result<(Rc<FunctionInfo>, bool), EvalError> {
        if let Some(info) = self.program.functions.get(target) {
            return Ok((info, false));
        }

        let Some(cell) = self.env.get(target) else {
            if split_member(target).is_some() {
                return Err(self.unknown_variable(target));
            }
            return Err(self.fail(
                ErrorKind::Name,
                format!("Unknown function name {}", target),
            ));
        };

        let value = cell.borrow().clone();
        match value {
            Value::Function(info) => Ok((info, true)),
            other => Err(self.fail(
                ErrorKind::Type,
                format!("{} holds a {}, not a function", target, other.kind()),
            )),
        }
    }

    fn current_function(&self) -> Result<Rc<FunctionInfo>, EvalError> {
        self.calls
            .last()
            .map(|call| Rc::clone(&call.function))
            .ok_or_else(|| self.fail(ErrorKind::Syntax, "return outside of a function"))
    }

    /// `return [expr...]`
    pub(crate) fn exec_return(&mut self, expr: &[String]) -> Result<(), EvalError> {
        let return_type = self.current_function()?.return_type;

        if return_type == TypeName::Void {
            if !expr.is_empty() {
                return Err(self.fail(ErrorKind::Type, "Returning value from void function"));
            }
            return self.return_from_call(None);
        }
        if expr.is_empty() {
            return self.return_from_call(None);
        }

        let value = self.eval_expression(expr)?;
        if value.kind() != return_type.kind() {
            return Err(self.fail(
                ErrorKind::Type,
                format!(
                    "Non-matching return type: expected {}, got {}",
                    return_type,
                    value.kind()
                ),
            ));
        }
        self.return_from_call(Some(value))
    }

    /// Leave the current call. Without an explicit value a non-void
    /// function hands back its return type's default. Returning from
    /// `main` ends the program.
    pub(crate) fn return_from_call(&mut self, value: Option<Value>) -> Result<(), EvalError> {
        let Some(call) = self.calls.pop() else {
            return Err(self.fail(ErrorKind::Syntax, "return outside of a function"));
        };

        let Some(resume) = call.return_to else {
            tracing::debug!("program finished");
            self.terminated = true;
            return Ok(());
        };

        tracing::debug!(function = %call.function.name, "return");
        self.env.exit_call();

        let return_type = call.function.return_type;
        let value = match value {
            Some(value) => Some(value),
            None if return_type != TypeName::Void => Some(return_type.default_value()),
            None => None,
        };
        if let Some(value) = value {
            self.set_result(value);
        }
        self.pc = resume;
        Ok(())
    }

    /// Store `value` in the current frame's `result<suffix>` variable,
    /// created in the frame's outermost block so it outlives nested blocks.
    pub(crate) fn set_result(&mut self, value: Value) {
        let Some(suffix) = value.kind().result_suffix() else {
            return;
        };
        let name = format!("{}{}", RESULT, suffix);
        self.env.create(&name, true);
        self.env.set(&name, value);
    }
}
