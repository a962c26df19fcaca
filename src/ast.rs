//! Program representation for Brewin
//!
//! A program is a vector of lines. Each line keeps its source text, its
//! tokens and the statement those tokens form; the line index is the
//! program counter the interpreter works with.

use crate::functions::FunctionTable;
use crate::value::{Param, TypeName};

/// Name of the function execution starts in.
pub const MAIN_FUNC: &str = "main";
/// Receiver name bound during `obj.method` calls.
pub const THIS: &str = "this";
/// Prefix of the per-kind return value variables.
pub const RESULT: &str = "result";
pub const TRUE: &str = "True";
pub const FALSE: &str = "False";

/// One statement per source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Empty or comment-only line
    Blank,
    /// `func name p:t ... ret`
    Func {
        name: String,
        params: Vec<Param>,
        return_type: TypeName,
    },
    EndFunc,
    /// `var type name+`
    Var { ty: TypeName, names: Vec<String> },
    /// `assign target expr...`
    Assign { target: String, expr: Vec<String> },
    /// `funccall target arg...`
    Call { target: String, args: Vec<String> },
    /// `return [expr...]`
    Return(Vec<String>),
    If(Vec<String>),
    Else,
    EndIf,
    While(Vec<String>),
    EndWhile,
    /// `lambda p:t ... ret`
    Lambda {
        params: Vec<Param>,
        return_type: TypeName,
    },
    EndLambda,
}

impl Statement {
    /// Keyword that introduces this statement, for diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Blank => "",
            Statement::Func { .. } => "func",
            Statement::EndFunc => "endfunc",
            Statement::Var { .. } => "var",
            Statement::Assign { .. } => "assign",
            Statement::Call { .. } => "funccall",
            Statement::Return(_) => "return",
            Statement::If(_) => "if",
            Statement::Else => "else",
            Statement::EndIf => "endif",
            Statement::While(_) => "while",
            Statement::EndWhile => "endwhile",
            Statement::Lambda { .. } => "lambda",
            Statement::EndLambda => "endlambda",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub source: String,
    pub tokens: Vec<String>,
    pub statement: Statement,
}

/// Matching delimiters, resolved once at load time.
#[derive(Debug, Clone, Default)]
pub struct JumpTable {
    /// If/Else -> EndIf, While -> EndWhile, EndWhile -> While,
    /// Lambda -> EndLambda, Func -> EndFunc
    partner: Vec<Option<usize>>,
    /// If -> its Else, when it has one
    else_branch: Vec<Option<usize>>,
}

impl JumpTable {
    pub fn new(lines: usize) -> Self {
        JumpTable {
            partner: vec![None; lines],
            else_branch: vec![None; lines],
        }
    }

    pub(crate) fn link(&mut self, from: usize, to: usize) {
        self.partner[from] = Some(to);
    }

    pub(crate) fn link_else(&mut self, if_line: usize, else_line: usize) {
        self.else_branch[if_line] = Some(else_line);
    }

    /// The line that closes (or, for `endwhile`, opens) the block at `line`.
    pub fn partner(&self, line: usize) -> Option<usize> {
        self.partner.get(line).copied().flatten()
    }

    pub fn else_of(&self, line: usize) -> Option<usize> {
        self.else_branch.get(line).copied().flatten()
    }
}

/// A loaded program, ready to run.
#[derive(Debug, Clone)]
pub struct Program {
    pub lines: Vec<Line>,
    pub functions: FunctionTable,
    pub jumps: JumpTable,
}

impl Program {
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
