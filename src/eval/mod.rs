//! Evaluator for Brewin - line-addressed statement execution
//!
//! The evaluator keeps a program counter over the lines of a loaded
//! [`Program`] and executes one statement per step:
//! - Plain statements do their work and advance to the next line
//! - Control statements move the counter using the load-time jump table
//! - Calls push a call-frame and a return record, returns pop them
//!
//! # Module layout
//!
//! The `impl Evaluator` is split by concern:
//! `expr` (prefix expressions and token resolution), `variables` (`var`,
//! `assign`), `control` (if/while), `call` (call and return protocol),
//! `lambda` (closure capture) and `builtins` (`print`, `input`,
//! `strtoint`).
//!
//! Execution stops at the first error; there is no way to recover from an
//! error inside a Brewin program.

mod builtins;
mod call;
mod control;
mod expr;
mod lambda;
mod variables;

pub use builtins::Builtin;
pub use expr::BinaryOp;

use crate::ast::{Program, Statement, MAIN_FUNC};
use crate::console::{Console, StdConsole};
use crate::environment::Environment;
use crate::parser::{parse, ParseError};
use crate::value::FunctionInfo;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Classification of every failure a program can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Name,
    Type,
    Fault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Fault => "FaultError",
        };
        f.write_str(name)
    }
}

/// Runtime failures. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Syntax error on line {line}: {message}")]
    SyntaxError { line: usize, message: String },
    #[error("Name error on line {line}: {message}")]
    NameError { line: usize, message: String },
    #[error("Type error on line {line}: {message}")]
    TypeError { line: usize, message: String },
    #[error("Fault on line {line}: {message}")]
    FaultError { line: usize, message: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EvalError {
    pub fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Syntax => EvalError::SyntaxError { line, message },
            ErrorKind::Name => EvalError::NameError { line, message },
            ErrorKind::Type => EvalError::TypeError { line, message },
            ErrorKind::Fault => EvalError::FaultError { line, message },
        }
    }

    /// Language-level classification; `None` for host IO failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            EvalError::SyntaxError { .. } => Some(ErrorKind::Syntax),
            EvalError::NameError { .. } => Some(ErrorKind::Name),
            EvalError::TypeError { .. } => Some(ErrorKind::Type),
            EvalError::FaultError { .. } => Some(ErrorKind::Fault),
            EvalError::Parse(e) => Some(e.kind()),
            EvalError::IoError(_) => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            EvalError::SyntaxError { line, .. }
            | EvalError::NameError { line, .. }
            | EvalError::TypeError { line, .. }
            | EvalError::FaultError { line, .. } => Some(*line),
            EvalError::Parse(e) => e.line(),
            EvalError::IoError(_) => None,
        }
    }
}

/// Entry point for running programs.
///
/// Holds the console and run options; every call to [`Interpreter::run`]
/// starts from a fresh environment and call stack.
pub struct Interpreter<C: Console = StdConsole> {
    console: C,
    trace: bool,
}

impl Default for Interpreter<StdConsole> {
    fn default() -> Self {
        Self::new(StdConsole::new())
    }
}

impl<C: Console> Interpreter<C> {
    pub fn new(console: C) -> Self {
        Interpreter {
            console,
            trace: false,
        }
    }

    /// Echo every executed line to stderr as `NNNN: source`.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Parse and run a program.
    pub fn run_source(&mut self, source: &str) -> Result<(), EvalError> {
        let program = parse(source)?;
        self.run(&program)
    }

    /// Run a loaded program from the first line of `main` until `main`
    /// returns.
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        let main = program
            .functions
            .get(MAIN_FUNC)
            .ok_or(ParseError::MissingMain)?;
        let mut evaluator = Evaluator::new(program, &mut self.console, main)?;
        evaluator.trace = self.trace;
        evaluator.run()
    }
}

/// A call in progress.
#[derive(Debug, Clone)]
pub(crate) struct ActiveCall {
    pub(crate) function: Rc<FunctionInfo>,
    /// Line to resume at in the caller; `None` for `main`.
    pub(crate) return_to: Option<usize>,
}

/// Execution state of one run
pub(crate) struct Evaluator<'a> {
    pub(crate) program: &'a Program,
    pub(crate) console: &'a mut dyn Console,
    /// Variables, one frame per active call
    pub(crate) env: Environment,
    /// Return records, parallel to the environment's frames
    pub(crate) calls: Vec<ActiveCall>,
    /// Program counter (zero-based line index)
    pub(crate) pc: usize,
    pub(crate) terminated: bool,
    pub(crate) trace: bool,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        program: &'a Program,
        console: &'a mut dyn Console,
        main: Rc<FunctionInfo>,
    ) -> Result<Self, EvalError> {
        let pc = main.entry.ok_or(ParseError::MissingMain)?;
        Ok(Evaluator {
            program,
            console,
            env: Environment::new(),
            calls: vec![ActiveCall {
                function: main,
                return_to: None,
            }],
            pc,
            terminated: false,
            trace: false,
        })
    }

    pub(crate) fn run(&mut self) -> Result<(), EvalError> {
        while !self.terminated {
            self.step()?;
        }
        Ok(())
    }

    /// Execute the statement at the program counter.
    pub(crate) fn step(&mut self) -> Result<(), EvalError> {
        let program = self.program;
        let line = program
            .line(self.pc)
            .ok_or_else(|| self.fail(ErrorKind::Syntax, "execution ran past the end of the program"))?;

        if self.trace {
            eprintln!("{:04}: {}", self.pc + 1, line.source.trim_end());
        }
        tracing::trace!(line = self.pc + 1, statement = line.statement.keyword(), "dispatch");

        match &line.statement {
            Statement::Blank | Statement::Func { .. } => self.advance(),
            Statement::Var { ty, names } => self.exec_var(*ty, names)?,
            Statement::Assign { target, expr } => self.exec_assign(target, expr)?,
            Statement::Call { target, args } => self.exec_call(target, args)?,
            Statement::Return(expr) => self.exec_return(expr)?,
            Statement::EndFunc | Statement::EndLambda => self.return_from_call(None)?,
            Statement::If(condition) => self.exec_if(condition)?,
            Statement::Else => self.exec_else()?,
            Statement::EndIf => self.exec_endif(),
            Statement::While(condition) => self.exec_while(condition)?,
            Statement::EndWhile => self.exec_endwhile()?,
            Statement::Lambda {
                params,
                return_type,
            } => self.exec_lambda(params, *return_type)?,
        }
        Ok(())
    }

    pub(crate) fn advance(&mut self) {
        self.pc += 1;
    }

    /// Build an error located at the current line.
    pub(crate) fn fail(&self, kind: ErrorKind, message: impl Into<String>) -> EvalError {
        EvalError::new(kind, self.pc + 1, message)
    }
}
