use super::{ErrorKind, EvalError, Evaluator};
use crate::environment::split_member;
use crate::value::{Capture, FunctionInfo, Param, TypeName, Value};
use std::ops::Range;
use std::rc::Rc;

impl<'a> Evaluator<'a> {
    /// `lambda p:t... ret`: build a function value for the body that
    /// follows, snapshot the variables it mentions, store it in `resultf`
    /// and continue after the matching `endlambda`.
    pub(crate) fn exec_lambda(&mut self, params: &[Param], return_type: TypeName) -> Result<(), EvalError> {
        let header = self.pc;
        let end = self
            .program
            .jumps
            .partner(header)
            .ok_or_else(|| self.fail(ErrorKind::Syntax, "Missing endlambda"))?;

        let captured = self.capture(header + 1..end);
        tracing::debug!(
            line = header + 1,
            captured = captured.len(),
            "lambda defined"
        );

        let info = FunctionInfo {
            name: format!("lambda@{}", header + 1),
            params: params.to_vec(),
            return_type,
            entry: Some(header + 1),
            captured,
        };
        self.pc = end + 1;
        self.set_result(Value::Function(Rc::new(info)));
        Ok(())
    }

    /// Copy the current value of every variable referenced on `body`,
    /// nested lambda bodies included. `obj.member` tokens capture `obj`.
    fn capture(&self, body: Range<usize>) -> Vec<Capture> {
        let mut captured: Vec<Capture> = Vec::new();

        for line in &self.program.lines[body] {
            for token in &line.tokens {
                let name = split_member(token).map_or(token.as_str(), |(object, _)| object);
                if captured.iter().any(|c| c.name == name) {
                    continue;
                }
                if let Some(cell) = self.env.get(name) {
                    let value = cell.borrow().clone();
                    captured.push(Capture {
                        name: name.to_string(),
                        value,
                    });
                }
            }
        }

        captured
    }
}
