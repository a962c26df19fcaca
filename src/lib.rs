//! Brewin - a line-oriented interpreter for a small scripting language
//!
//! # Overview
//!
//! A Brewin program is a sequence of statements, one per line. Execution
//! starts at the first line of `main` and moves a program counter over the
//! lines; blocks are delimited by keyword pairs rather than braces.
//!
//! ```text
//! func main void
//!   var int n
//!   assign n 5
//!   while > n 0
//!     funccall print n
//!     assign n - n 1
//!   endwhile
//! endfunc
//! ```
//!
//! # Core Concepts
//!
//! ## Prefix Expressions
//!
//! Operators come before their operands: `+ 5 * 6 x` is `5 + (6 * x)`.
//!
//! ## Result Variables
//!
//! Functions and built-ins hand back values through `resulti`, `results`,
//! `resultb`, `resultf` and `resulto` in the caller's frame.
//!
//! ## Closures and Objects
//!
//! `lambda ... endlambda` produces a function value that carries a frozen
//! copy of every variable its body mentions. Objects are built by assigning
//! to dotted names (`assign o.x 5`); a function stored in a member sees the
//! object as `this` when called through it.
//!
//! # Example
//!
//! ```rust
//! let source = "func main void\nfunccall print \"hello\"\nendfunc\n";
//! let output = brewin::run(source).unwrap();
//! assert_eq!(output, vec!["hello"]);
//! ```

pub mod ast;
pub mod console;
pub mod display;
pub mod environment;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{Program, Statement};
pub use console::{BufferedConsole, Console, StdConsole};
pub use environment::Environment;
pub use eval::{ErrorKind, EvalError, Interpreter};
pub use lexer::{tokenize, tokenize_line, LexError};
pub use parser::{parse, ParseError};
pub use value::{FunctionInfo, Kind, TypeName, Value};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to stderr.
///
/// Only takes effect when `RUST_LOG` is set, e.g. `RUST_LOG=brewin=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Run a program with no input and return the lines it printed.
pub fn run(source: &str) -> Result<Vec<String>, EvalError> {
    let mut interp = Interpreter::new(BufferedConsole::new());
    interp.run_source(source)?;
    Ok(interp.into_console().into_lines())
}
