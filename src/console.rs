//! Console boundary used by the `print` and `input` built-ins.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::io;

pub trait Console {
    /// Write one line of program output.
    fn output(&mut self, text: &str);
    /// Read one line of input. End of input reads as an empty line.
    fn get_input(&mut self) -> io::Result<String>;
}

/// Stdout for output, a rustyline editor for input.
#[derive(Default)]
pub struct StdConsole {
    editor: Option<DefaultEditor>,
}

impl StdConsole {
    pub fn new() -> Self {
        StdConsole::default()
    }

    fn editor(&mut self) -> io::Result<&mut DefaultEditor> {
        if self.editor.is_none() {
            self.editor = Some(DefaultEditor::new().map_err(readline_to_io)?);
        }
        self.editor
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "failed to start line editor"))
    }
}

fn readline_to_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(e) => e,
        ReadlineError::Interrupted => io::Error::new(io::ErrorKind::Interrupted, "interrupted"),
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

impl Console for StdConsole {
    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn get_input(&mut self) -> io::Result<String> {
        match self.editor()?.readline("") {
            Ok(line) => Ok(line),
            Err(ReadlineError::Eof) => Ok(String::new()),
            Err(e) => Err(readline_to_io(e)),
        }
    }
}

/// In-memory console: records output and replays scripted input.
#[derive(Debug, Default, Clone)]
pub struct BufferedConsole {
    output: Vec<String>,
    input: VecDeque<String>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        BufferedConsole::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferedConsole {
            output: Vec::new(),
            input: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Every line written so far.
    pub fn lines(&self) -> &[String] {
        &self.output
    }

    pub fn into_lines(self) -> Vec<String> {
        self.output
    }
}

impl Console for BufferedConsole {
    fn output(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn get_input(&mut self) -> io::Result<String> {
        Ok(self.input.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_console_replays_input() {
        let mut console = BufferedConsole::with_input(["first", "second"]);
        assert_eq!(console.get_input().unwrap(), "first");
        assert_eq!(console.get_input().unwrap(), "second");
        assert_eq!(console.get_input().unwrap(), "");
    }

    #[test]
    fn buffered_console_records_output() {
        let mut console = BufferedConsole::new();
        console.output("a");
        console.output("b");
        assert_eq!(console.lines(), ["a", "b"]);
    }
}
