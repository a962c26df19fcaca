use super::{ErrorKind, EvalError, Evaluator};
use crate::display::concat_values;
use crate::value::Value;

/// Call targets handled by the interpreter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    Input,
    StrToInt,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "print" => Some(Builtin::Print),
            "input" => Some(Builtin::Input),
            "strtoint" => Some(Builtin::StrToInt),
            _ => None,
        }
    }
}

impl<'a> Evaluator<'a> {
    pub(crate) fn call_builtin(&mut self, builtin: Builtin, args: &[String]) -> Result<(), EvalError> {
        match builtin {
            Builtin::Print => {
                if args.is_empty() {
                    return Err(self.fail(ErrorKind::Syntax, "Invalid print call syntax"));
                }
                let text = self.format_args(args)?;
                self.console.output(&text);
            }
            Builtin::Input => {
                if !args.is_empty() {
                    let prompt = self.format_args(args)?;
                    self.console.output(&prompt);
                }
                let line = self.console.get_input()?;
                self.set_result(Value::Str(line));
            }
            Builtin::StrToInt => {
                let [arg] = args else {
                    return Err(self.fail(ErrorKind::Syntax, "Invalid strtoint call syntax"));
                };
                let text = match self.get_value(arg)? {
                    Value::Str(s) => s,
                    other => {
                        return Err(self.fail(
                            ErrorKind::Type,
                            format!("Non-string passed to strtoint: {}", other.kind()),
                        ))
                    }
                };
                let n = text.trim().parse::<i64>().map_err(|_| {
                    self.fail(
                        ErrorKind::Fault,
                        format!("Cannot convert \"{}\" to an integer", text),
                    )
                })?;
                self.set_result(Value::Int(n));
            }
        }
        self.advance();
        Ok(())
    }

    fn format_args(&self, args: &[String]) -> Result<String, EvalError> {
        let values = args
            .iter()
            .map(|arg| self.get_value(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(concat_values(&values))
    }
}
