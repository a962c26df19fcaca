use brewin::{Interpreter, StdConsole};
use std::fs;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
    /// First argument we could not make sense of
    pub(crate) unknown: Option<String>,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--trace" => {
                cli.trace = true;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path if !path.starts_with('-') && cli.script.is_none() => {
                cli.script = Some(path.to_string());
            }
            other => {
                if cli.unknown.is_none() {
                    cli.unknown = Some(other.to_string());
                }
            }
        }
    }

    cli
}

/// `BREWIN_TRACE` set to anything but empty or `0` turns tracing on.
pub(crate) fn trace_from_env(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "0")
}

pub(crate) fn print_help() {
    println!(
        r#"brewin {} - interpreter for the Brewin scripting language

USAGE:
    brewin <script>         Run a program, starting at `main`
    brewin --trace <script> Echo every executed line to stderr
    brewin --help           Show this help message
    brewin --version        Show version

ENVIRONMENT:
    BREWIN_TRACE=1          Same as --trace
    RUST_LOG=brewin=debug   Log loads, calls and returns to stderr

STATEMENTS:
    func name p:type... ret     Define a function (ends with endfunc)
    var type name...            Declare variables
    assign target expr          Assign a prefix expression
    funccall target arg...      Call a function, lambda or built-in
    return [expr]               Return from the current function
    if expr / else / endif      Conditional
    while expr / endwhile       Loop
    lambda p:type... ret        Closure (ends with endlambda)

TYPES:
    int string bool void func object refint refstring refbool

BUILT-INS (via funccall):
    print tok...            Print the values side by side
    input [tok...]          Print a prompt, read a line into results
    strtoint tok            Convert a string into resulti

EXIT STATUS:
    0 on success, 1 on any program error, 2 on bad usage
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("brewin {}", VERSION);
}

/// Execute a script file
pub(crate) fn execute_script(path: &str, trace: bool) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut interp = Interpreter::new(StdConsole::new());
    interp.set_trace(trace);

    match interp.run_source(&content) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), line = ?e.line(), "program failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("brewin")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_script_and_flags() {
        let cli = parse_args(&args(&["--trace", "prog.brewin"]));
        assert_eq!(cli.script.as_deref(), Some("prog.brewin"));
        assert!(cli.trace);
        assert!(!cli.help);
        assert!(cli.unknown.is_none());
    }

    #[test]
    fn parse_help_and_version() {
        assert!(parse_args(&args(&["-h"])).help);
        assert!(parse_args(&args(&["--version"])).version);
        assert!(parse_args(&args(&["-V"])).version);
    }

    #[test]
    fn parse_unknown_flag() {
        let cli = parse_args(&args(&["--bogus", "a.brewin"]));
        assert_eq!(cli.unknown.as_deref(), Some("--bogus"));
        assert_eq!(cli.script.as_deref(), Some("a.brewin"));
    }

    #[test]
    fn parse_extra_script_is_unknown() {
        let cli = parse_args(&args(&["a.brewin", "b.brewin"]));
        assert_eq!(cli.script.as_deref(), Some("a.brewin"));
        assert_eq!(cli.unknown.as_deref(), Some("b.brewin"));
    }

    #[test]
    fn trace_env_values() {
        assert!(trace_from_env(Some("1")));
        assert!(trace_from_env(Some("yes")));
        assert!(!trace_from_env(Some("0")));
        assert!(!trace_from_env(Some("")));
        assert!(!trace_from_env(None));
    }
}
