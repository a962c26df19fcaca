use super::{ErrorKind, EvalError, Evaluator};
use crate::value::Value;

impl<'a> Evaluator<'a> {
    /// Evaluate an if/while condition, which must be a bool.
    fn condition(&self, tokens: &[String], keyword: &str) -> Result<bool, EvalError> {
        match self.eval_expression(tokens)? {
            Value::Bool(b) => Ok(b),
            other => Err(self.fail(
                ErrorKind::Type,
                format!("Non-boolean {} expression: {}", keyword, other.kind()),
            )),
        }
    }

    /// Matching delimiter of the statement at the program counter.
    fn partner(&self, expected: &str) -> Result<usize, EvalError> {
        self.program
            .jumps
            .partner(self.pc)
            .ok_or_else(|| self.fail(ErrorKind::Syntax, format!("Missing {}", expected)))
    }

    /// If: true enters the block below; false enters the else branch or
    /// skips past `endif`.
    pub(crate) fn exec_if(&mut self, condition: &[String]) -> Result<(), EvalError> {
        if self.condition(condition, "if")? {
            self.advance();
            self.env.enter_block();
            return Ok(());
        }

        match self.program.jumps.else_of(self.pc) {
            Some(else_line) => {
                self.pc = else_line + 1;
                self.env.enter_block();
            }
            None => {
                let end = self.partner("endif")?;
                self.pc = end + 1;
            }
        }
        Ok(())
    }

    /// Else is only reached by running off the end of the taken branch.
    pub(crate) fn exec_else(&mut self) -> Result<(), EvalError> {
        self.env.exit_block();
        let end = self.partner("endif")?;
        self.pc = end + 1;
        Ok(())
    }

    pub(crate) fn exec_endif(&mut self) {
        self.advance();
        self.env.exit_block();
    }

    /// While: false skips past `endwhile`, true enters the body.
    pub(crate) fn exec_while(&mut self, condition: &[String]) -> Result<(), EvalError> {
        if self.condition(condition, "while")? {
            self.advance();
            self.env.enter_block();
        } else {
            let end = self.partner("endwhile")?;
            self.pc = end + 1;
        }
        Ok(())
    }

    /// Endwhile: drop the body's block and go back to re-test the condition.
    pub(crate) fn exec_endwhile(&mut self) -> Result<(), EvalError> {
        self.env.exit_block();
        self.pc = self.partner("while")?;
        Ok(())
    }
}
