use super::{ErrorKind, EvalError, Evaluator};
use crate::environment::{Declared, Updated};
use crate::value::TypeName;

impl<'a> Evaluator<'a> {
    /// `var type name...`: declare each name in the innermost block with a
    /// fresh default value.
    pub(crate) fn exec_var(&mut self, ty: TypeName, names: &[String]) -> Result<(), EvalError> {
        for name in names {
            if self.env.create(name, false) == Declared::AlreadyExists {
                return Err(self.fail(
                    ErrorKind::Name,
                    format!("Redefinition of variable {}", name),
                ));
            }
            self.env.set(name, ty.default_value());
        }
        self.advance();
        Ok(())
    }

    /// `assign target expr...`
    ///
    /// The target must already exist and keep its kind. An `obj.member`
    /// target is created on first assignment, provided `obj` is an object.
    pub(crate) fn exec_assign(&mut self, target: &str, expr: &[String]) -> Result<(), EvalError> {
        let value = self.eval_expression(expr)?;

        if target.contains('.') {
            match self.env.create_member(target) {
                Some(Declared::Created) => {
                    self.env.set(target, value);
                    self.advance();
                    return Ok(());
                }
                Some(Declared::AlreadyExists) => {}
                None => return Err(self.unknown_variable(target)),
            }
        }

        let cell = self.env.get(target).ok_or_else(|| {
            self.fail(
                ErrorKind::Name,
                format!("Assignment of unknown variable {}", target),
            )
        })?;
        let existing = cell.borrow().kind();
        if existing != value.kind() {
            return Err(self.fail(
                ErrorKind::Type,
                format!(
                    "Trying to assign a variable of {} to a value of {}",
                    existing,
                    value.kind()
                ),
            ));
        }

        if self.env.set(target, value) == Updated::NotFound {
            return Err(self.fail(
                ErrorKind::Name,
                format!("Assignment of unknown variable {}", target),
            ));
        }
        self.advance();
        Ok(())
    }
}
