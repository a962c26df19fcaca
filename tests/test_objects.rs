//! Integration tests for objects, members and `this`

#[path = "common/mod.rs"]
mod common;
use common::{eval, eval_error, program, ErrorKind};

#[test]
fn test_members_created_on_assignment() {
    let src = program(
        "var object p\nassign p.name \"ada\"\nassign p.age 36\nfunccall print p.name \" \" p.age",
    );
    assert_eq!(eval(&src).unwrap(), vec!["ada 36"]);
}

#[test]
fn test_method_uses_this() {
    let src = r#"
func main void
  var object account
  assign account.balance 100
  lambda amount:int void
    assign this.balance - this.balance amount
  endlambda
  assign account.withdraw resultf
  funccall account.withdraw 30
  funccall account.withdraw 5
  funccall print account.balance
endfunc
"#;
    assert_eq!(eval(src).unwrap(), vec!["65"]);
}

#[test]
fn test_named_function_as_method() {
    let src = r#"
func describe void
  funccall print "point " this.x "," this.y
endfunc

func main void
  var object pt
  assign pt.x 3
  assign pt.y 4
  assign pt.show describe
  funccall pt.show
endfunc
"#;
    assert_eq!(eval(src).unwrap(), vec!["point 3,4"]);
}

#[test]
fn test_method_returns_value() {
    let src = r#"
func main void
  var object c
  assign c.n 2
  lambda int
    return * this.n 10
  endlambda
  assign c.scaled resultf
  funccall c.scaled
  funccall print resulti
endfunc
"#;
    assert_eq!(eval(src).unwrap(), vec!["20"]);
}

#[test]
fn test_objects_passed_to_functions_share_members() {
    let src = r#"
func fill o:object void
  assign o.filled True
endfunc

func main void
  var object box
  funccall fill box
  funccall print box.filled
endfunc
"#;
    assert_eq!(eval(src).unwrap(), vec!["True"]);
}

#[test]
fn test_object_returned_from_function() {
    let src = r#"
func make_point x:int y:int object
  var object p
  assign p.x x
  assign p.y y
  return p
endfunc

func main void
  funccall make_point 7 8
  var object q
  assign q resulto
  var int sum
  assign sum + q.x q.y
  funccall print sum
endfunc
"#;
    assert_eq!(eval(src).unwrap(), vec!["15"]);
}

#[test]
fn test_object_captured_by_lambda_shares_members() {
    let src = r#"
func main void
  var object o
  assign o.v 1
  lambda void
    funccall print o.v
  endlambda
  assign o.v 2
  funccall resultf
endfunc
"#;
    assert_eq!(eval(src).unwrap(), vec!["2"]);
}

#[test]
fn test_member_on_missing_object() {
    let err = eval_error(&program("assign ghost.x 1"));
    assert_eq!(err.kind(), Some(ErrorKind::Name));
}

#[test]
fn test_member_on_non_object() {
    let err = eval_error(&program("var string s\nassign s.len 3"));
    assert_eq!(err.kind(), Some(ErrorKind::Type));
    let err = eval_error(&program("var int n\nfunccall print n.x"));
    assert_eq!(err.kind(), Some(ErrorKind::Type));
}

#[test]
fn test_calling_non_function_member() {
    let err = eval_error(&program("var object o\nassign o.x 1\nfunccall o.x"));
    assert_eq!(err.kind(), Some(ErrorKind::Type));
}

#[test]
fn test_calling_missing_member() {
    let err = eval_error(&program("var object o\nfunccall o.nope"));
    assert_eq!(err.kind(), Some(ErrorKind::Name));
}
