//! Display formatting for runtime values
//!
//! This is the form `print` writes: bools as `True`/`False`, strings
//! without quotes.

use crate::value::Value;
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Str(s) => f.write_str(s),
            Value::Void => f.write_str("None"),
            Value::Function(info) => write!(f, "<func {}>", info.name),
            Value::Object(object) => write!(f, "<object with {} members>", object.len()),
        }
    }
}

/// Join the display forms of several values without separators.
pub fn concat_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> String {
    values.into_iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_print_capitalised() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
    }

    #[test]
    fn concat_has_no_separator() {
        let values = [Value::Str("x = ".into()), Value::Int(-4)];
        assert_eq!(concat_values(&values), "x = -4");
    }
}
