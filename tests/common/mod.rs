//! Common test utilities for brewin integration tests

#[allow(unused_imports)]
pub use brewin::{parse, BufferedConsole, ErrorKind, EvalError, Interpreter};

/// Run a program and return its output lines, or the error message
#[allow(dead_code)]
pub fn eval(source: &str) -> Result<Vec<String>, String> {
    brewin::run(source).map_err(|e| e.to_string())
}

/// Run a program that is expected to fail
#[allow(dead_code)]
pub fn eval_error(source: &str) -> EvalError {
    match brewin::run(source) {
        Ok(lines) => panic!("expected an error, program printed {:?}", lines),
        Err(e) => e,
    }
}

/// Run a program with scripted input; returns the result and whatever was
/// printed before it finished
#[allow(dead_code)]
pub fn eval_with_input(source: &str, input: &[&str]) -> (Result<(), EvalError>, Vec<String>) {
    let mut interp = Interpreter::new(BufferedConsole::with_input(input.iter().copied()));
    let result = interp.run_source(source);
    (result, interp.into_console().into_lines())
}

/// Wrap statements in a `main` function
#[allow(dead_code)]
pub fn program(body: &str) -> String {
    format!("func main void\n{}\nendfunc\n", body)
}
