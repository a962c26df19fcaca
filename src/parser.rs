//! Parser for Brewin
//!
//! Turns source text into a [`Program`]: one [`Statement`] per line, the
//! table of named functions, and a jump table pairing every block opener
//! with its terminator. Block matching is done here, once, with a nesting
//! stack, so the interpreter never has to scan for delimiters.

use crate::ast::{JumpTable, Line, Program, Statement, MAIN_FUNC};
use crate::eval::ErrorKind;
use crate::functions::FunctionTable;
use crate::lexer::{tokenize, LexError};
use crate::value::{FunctionInfo, Param, TypeName};
use thiserror::Error;

/// Load-time failures. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Syntax error on line {line}: {error}")]
    Lex { line: usize, error: LexError },
    #[error("Syntax error on line {line}: unknown statement `{word}`")]
    UnknownStatement { line: usize, word: String },
    #[error("Syntax error on line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("Syntax error on line {line}: `{keyword}` without matching `{expected}`")]
    Unmatched {
        line: usize,
        keyword: &'static str,
        expected: &'static str,
    },
    #[error("Type error on line {line}: invalid type `{name}`")]
    InvalidType { line: usize, name: String },
    #[error("Name error on line {line}: function `{name}` is already defined")]
    DuplicateFunction { line: usize, name: String },
    #[error("Name error: no `main` function defined")]
    MissingMain,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lex { .. }
            | ParseError::UnknownStatement { .. }
            | ParseError::Malformed { .. }
            | ParseError::Unmatched { .. } => ErrorKind::Syntax,
            ParseError::InvalidType { .. } => ErrorKind::Type,
            ParseError::DuplicateFunction { .. } | ParseError::MissingMain => ErrorKind::Name,
        }
    }

    /// 1-based line the error was detected on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Lex { line, .. }
            | ParseError::UnknownStatement { line, .. }
            | ParseError::Malformed { line, .. }
            | ParseError::Unmatched { line, .. }
            | ParseError::InvalidType { line, .. }
            | ParseError::DuplicateFunction { line, .. } => Some(*line),
            ParseError::MissingMain => None,
        }
    }
}

/// Parse a complete program.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokenized = tokenize(source).map_err(|(index, error)| ParseError::Lex {
        line: index + 1,
        error,
    })?;

    let lines = source
        .lines()
        .zip(tokenized)
        .enumerate()
        .map(|(index, (text, tokens))| {
            let statement = parse_statement(index, &tokens)?;
            Ok(Line {
                source: text.to_string(),
                tokens,
                statement,
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    let (jumps, functions) = resolve_blocks(&lines)?;
    if !functions.is_function(MAIN_FUNC) {
        return Err(ParseError::MissingMain);
    }

    tracing::debug!(
        lines = lines.len(),
        functions = functions.len(),
        "program loaded"
    );

    Ok(Program {
        lines,
        functions,
        jumps,
    })
}

fn malformed(index: usize, message: impl Into<String>) -> ParseError {
    ParseError::Malformed {
        line: index + 1,
        message: message.into(),
    }
}

fn parse_type(index: usize, name: &str) -> Result<TypeName, ParseError> {
    TypeName::parse(name).ok_or_else(|| ParseError::InvalidType {
        line: index + 1,
        name: name.to_string(),
    })
}

/// Parse `name:type`
fn parse_param(index: usize, token: &str) -> Result<Param, ParseError> {
    let (name, ty) = token
        .split_once(':')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| malformed(index, format!("invalid parameter `{}`", token)))?;
    Ok(Param {
        name: name.to_string(),
        ty: parse_type(index, ty)?,
    })
}

/// Parse a signature tail: zero or more parameters followed by the
/// return type.
fn parse_signature(index: usize, tokens: &[String]) -> Result<(Vec<Param>, TypeName), ParseError> {
    let (return_type, params) = tokens
        .split_last()
        .ok_or_else(|| malformed(index, "missing return type"))?;
    let params = params
        .iter()
        .map(|p| parse_param(index, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((params, parse_type(index, return_type)?))
}

fn parse_statement(index: usize, tokens: &[String]) -> Result<Statement, ParseError> {
    let Some((keyword, args)) = tokens.split_first() else {
        return Ok(Statement::Blank);
    };
    let rest = || args.to_vec();

    let statement = match keyword.as_str() {
        "func" => {
            let (name, signature) = args
                .split_first()
                .ok_or_else(|| malformed(index, "missing function name"))?;
            let (params, return_type) = parse_signature(index, signature)?;
            Statement::Func {
                name: name.clone(),
                params,
                return_type,
            }
        }
        "endfunc" => Statement::EndFunc,
        "var" => {
            if args.len() < 2 {
                return Err(malformed(index, "invalid var definition syntax"));
            }
            let ty = parse_type(index, &args[0])?;
            if let Some(bad) = args[1..].iter().find(|n| n.contains('.')) {
                return Err(malformed(index, format!("invalid variable name `{}`", bad)));
            }
            Statement::Var {
                ty,
                names: args[1..].to_vec(),
            }
        }
        "assign" => {
            if args.len() < 2 {
                return Err(malformed(index, "invalid assignment statement"));
            }
            Statement::Assign {
                target: args[0].clone(),
                expr: args[1..].to_vec(),
            }
        }
        "funccall" => {
            let (target, call_args) = args
                .split_first()
                .ok_or_else(|| malformed(index, "missing function name to call"))?;
            Statement::Call {
                target: target.clone(),
                args: call_args.to_vec(),
            }
        }
        "return" => Statement::Return(rest()),
        "if" => {
            if args.is_empty() {
                return Err(malformed(index, "missing if expression"));
            }
            Statement::If(rest())
        }
        "else" => Statement::Else,
        "endif" => Statement::EndIf,
        "while" => {
            if args.is_empty() {
                return Err(malformed(index, "missing while expression"));
            }
            Statement::While(rest())
        }
        "endwhile" => Statement::EndWhile,
        "lambda" => {
            let (params, return_type) = parse_signature(index, args)?;
            Statement::Lambda {
                params,
                return_type,
            }
        }
        "endlambda" => Statement::EndLambda,
        other => {
            return Err(ParseError::UnknownStatement {
                line: index + 1,
                word: other.to_string(),
            })
        }
    };
    Ok(statement)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Opener {
    If { else_line: Option<usize> },
    While,
    Lambda,
    Func,
}

impl Opener {
    fn keyword(self) -> &'static str {
        match self {
            Opener::If { .. } => "if",
            Opener::While => "while",
            Opener::Lambda => "lambda",
            Opener::Func => "func",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            Opener::If { .. } => "endif",
            Opener::While => "endwhile",
            Opener::Lambda => "endlambda",
            Opener::Func => "endfunc",
        }
    }
}

/// Pair block delimiters and collect named functions.
fn resolve_blocks(lines: &[Line]) -> Result<(JumpTable, FunctionTable), ParseError> {
    let mut jumps = JumpTable::new(lines.len());
    let mut functions = FunctionTable::new();
    let mut open: Vec<(Opener, usize)> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let unmatched = |keyword: &'static str, expected: &'static str| ParseError::Unmatched {
            line: index + 1,
            keyword,
            expected,
        };

        match &line.statement {
            Statement::Func { .. } => {
                if !open.is_empty() {
                    return Err(malformed(index, "function definitions cannot be nested"));
                }
                open.push((Opener::Func, index));
            }
            Statement::If(_) => open.push((Opener::If { else_line: None }, index)),
            Statement::While(_) => open.push((Opener::While, index)),
            Statement::Lambda { .. } => open.push((Opener::Lambda, index)),
            Statement::Else => match open.last_mut() {
                Some((Opener::If { else_line }, if_line)) if else_line.is_none() => {
                    *else_line = Some(index);
                    jumps.link_else(*if_line, index);
                }
                _ => return Err(unmatched("else", "if")),
            },
            Statement::EndIf => match open.pop() {
                Some((Opener::If { else_line }, if_line)) => {
                    jumps.link(if_line, index);
                    if let Some(else_line) = else_line {
                        jumps.link(else_line, index);
                    }
                }
                _ => return Err(unmatched("endif", "if")),
            },
            Statement::EndWhile => match open.pop() {
                Some((Opener::While, while_line)) => {
                    jumps.link(while_line, index);
                    jumps.link(index, while_line);
                }
                _ => return Err(unmatched("endwhile", "while")),
            },
            Statement::EndLambda => match open.pop() {
                Some((Opener::Lambda, lambda_line)) => jumps.link(lambda_line, index),
                _ => return Err(unmatched("endlambda", "lambda")),
            },
            Statement::EndFunc => match open.pop() {
                Some((Opener::Func, func_line)) => {
                    jumps.link(func_line, index);
                    if let Statement::Func {
                        name,
                        params,
                        return_type,
                    } = &lines[func_line].statement
                    {
                        let info = FunctionInfo {
                            name: name.clone(),
                            params: params.clone(),
                            return_type: *return_type,
                            entry: Some(func_line + 1),
                            captured: Vec::new(),
                        };
                        if !functions.insert(info) {
                            return Err(ParseError::DuplicateFunction {
                                line: func_line + 1,
                                name: name.clone(),
                            });
                        }
                    }
                }
                _ => return Err(unmatched("endfunc", "func")),
            },
            _ => {}
        }
    }

    if let Some((opener, index)) = open.pop() {
        return Err(ParseError::Unmatched {
            line: index + 1,
            keyword: opener.keyword(),
            expected: opener.terminator(),
        });
    }

    Ok((jumps, functions))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTDOWN: &str = "\
func main void
  var int x
  assign x + 2 3
  while > x 0
    funccall print x
    assign x - x 1
  endwhile
endfunc
";

    #[test]
    fn parse_statements() {
        let program = parse(COUNTDOWN).unwrap();
        assert!(!program.is_empty());
        assert_eq!(program.len(), 8);
        assert_eq!(
            program.lines[1].statement,
            Statement::Var {
                ty: TypeName::Int,
                names: vec!["x".into()]
            }
        );
        assert_eq!(
            program.lines[2].statement,
            Statement::Assign {
                target: "x".into(),
                expr: vec!["+".into(), "2".into(), "3".into()]
            }
        );
    }

    #[test]
    fn while_is_linked_both_ways() {
        let program = parse(COUNTDOWN).unwrap();
        assert_eq!(program.jumps.partner(3), Some(6));
        assert_eq!(program.jumps.partner(6), Some(3));
        assert_eq!(program.jumps.partner(0), Some(7));
    }

    #[test]
    fn main_is_registered() {
        let program = parse(COUNTDOWN).unwrap();
        let main = program.functions.get(MAIN_FUNC).unwrap();
        assert_eq!(main.entry, Some(1));
        assert_eq!(main.return_type, TypeName::Void);
        assert!(main.params.is_empty());
    }

    #[test]
    fn signature_with_reference_parameters() {
        let src = "func swap a:refint b:refint void\nendfunc\nfunc main void\nendfunc\n";
        let program = parse(src).unwrap();
        let swap = program.functions.get("swap").unwrap();
        assert_eq!(swap.params.len(), 2);
        assert_eq!(swap.params[0].ty, TypeName::RefInt);
        assert_eq!(swap.entry, Some(1));
    }

    #[test]
    fn nested_if_else_links() {
        let src = "\
func main void
  if True
    if False
    else
    endif
  else
  endif
endfunc
";
        let program = parse(src).unwrap();
        assert_eq!(program.jumps.else_of(1), Some(5));
        assert_eq!(program.jumps.partner(1), Some(6));
        assert_eq!(program.jumps.else_of(2), Some(3));
        assert_eq!(program.jumps.partner(2), Some(4));
        assert_eq!(program.jumps.partner(3), Some(4));
        assert_eq!(program.jumps.partner(5), Some(6));
    }

    #[test]
    fn nested_lambdas_link_to_their_own_end() {
        let src = "\
func main void
  lambda int
    lambda int
    endlambda
  endlambda
endfunc
";
        let program = parse(src).unwrap();
        assert_eq!(program.jumps.partner(1), Some(4));
        assert_eq!(program.jumps.partner(2), Some(3));
    }

    #[test]
    fn missing_endif_is_syntax_error() {
        let err = parse("func main void\n  if True\nendfunc\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn missing_endwhile_points_at_while() {
        let err = parse("func main void\n  while True\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unmatched {
                line: 2,
                keyword: "while",
                expected: "endwhile"
            }
        );
    }

    #[test]
    fn stray_endwhile() {
        let err = parse("func main void\n  endwhile\nendfunc\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn unknown_statement() {
        let err = parse("func main void\n  goto 5\nendfunc\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownStatement { line: 2, .. }));
    }

    #[test]
    fn invalid_type_is_type_error() {
        let err = parse("func main void\n  var float x\nendfunc\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn missing_main() {
        let err = parse("func helper void\nendfunc\n").unwrap_err();
        assert_eq!(err, ParseError::MissingMain);
        assert_eq!(err.kind(), ErrorKind::Name);
    }

    #[test]
    fn duplicate_function() {
        let src = "func main void\nendfunc\nfunc main void\nendfunc\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateFunction { line: 3, .. }));
    }

    #[test]
    fn malformed_parameter() {
        let err = parse("func f x int\nendfunc\nfunc main void\nendfunc\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }
}
