//! brewin - run Brewin programs
//!
//! Usage:
//!   brewin script.brewin          Run a program
//!   brewin --trace script.brewin  Run with a line-by-line trace on stderr

mod cli;

use cli::{execute_script, parse_args, print_help, print_version, trace_from_env};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    brewin::init_tracing();

    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    if let Some(arg) = cli.unknown {
        eprintln!("Error: unexpected argument '{}'", arg);
        eprintln!("Run 'brewin --help' for usage.");
        return ExitCode::from(2);
    }

    let Some(script) = cli.script else {
        eprintln!("Error: no script given");
        eprintln!("Usage: brewin [--trace] <script>");
        return ExitCode::from(2);
    };

    let trace = cli.trace || trace_from_env(env::var("BREWIN_TRACE").ok().as_deref());
    execute_script(&script, trace)
}
