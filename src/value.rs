//! Runtime values and the type vocabulary of Brewin.
//!
//! Variables never hold a `Value` directly: they hold a [`Slot`], a shared
//! mutable cell. Assignment writes into the existing slot, which is what
//! makes reference parameters observe writes made by the callee.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A shared, mutable value cell.
pub type Slot = Rc<RefCell<Value>>;

/// Wrap a value in a fresh slot (new identity).
pub fn slot(value: Value) -> Slot {
    Rc::new(RefCell::new(value))
}

/// The kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Bool,
    String,
    Void,
    Function,
    Object,
}

impl Kind {
    /// Suffix of the `result` variable a returned value of this kind is
    /// stored in (`resulti`, `results`, ...). Void values are never stored.
    pub fn result_suffix(self) -> Option<char> {
        match self {
            Kind::Int => Some('i'),
            Kind::String => Some('s'),
            Kind::Bool => Some('b'),
            Kind::Function => Some('f'),
            Kind::Object => Some('o'),
            Kind::Void => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Int => "int",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Void => "void",
            Kind::Function => "func",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A declared type name as written in `var`, parameter and return
/// annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Int,
    Bool,
    String,
    Void,
    Func,
    Object,
    RefInt,
    RefBool,
    RefString,
}

impl TypeName {
    pub fn parse(name: &str) -> Option<TypeName> {
        match name {
            "int" => Some(TypeName::Int),
            "bool" => Some(TypeName::Bool),
            "string" => Some(TypeName::String),
            "void" => Some(TypeName::Void),
            "func" => Some(TypeName::Func),
            "object" => Some(TypeName::Object),
            "refint" => Some(TypeName::RefInt),
            "refbool" => Some(TypeName::RefBool),
            "refstring" => Some(TypeName::RefString),
            _ => None,
        }
    }

    /// The runtime kind a value must have to satisfy this declaration.
    pub fn kind(self) -> Kind {
        match self {
            TypeName::Int | TypeName::RefInt => Kind::Int,
            TypeName::Bool | TypeName::RefBool => Kind::Bool,
            TypeName::String | TypeName::RefString => Kind::String,
            TypeName::Void => Kind::Void,
            TypeName::Func => Kind::Function,
            TypeName::Object => Kind::Object,
        }
    }

    pub fn is_reference(self) -> bool {
        matches!(
            self,
            TypeName::RefInt | TypeName::RefBool | TypeName::RefString
        )
    }

    /// A fresh default value. Objects get a new empty member store.
    pub fn default_value(self) -> Value {
        match self.kind() {
            Kind::Int => Value::Int(0),
            Kind::Bool => Value::Bool(false),
            Kind::String => Value::Str(String::new()),
            Kind::Void => Value::Void,
            Kind::Function => Value::Function(Rc::new(FunctionInfo::empty())),
            Kind::Object => Value::Object(Object::new()),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeName::Int => "int",
            TypeName::Bool => "bool",
            TypeName::String => "string",
            TypeName::Void => "void",
            TypeName::Func => "func",
            TypeName::Object => "object",
            TypeName::RefInt => "refint",
            TypeName::RefBool => "refbool",
            TypeName::RefString => "refstring",
        };
        f.write_str(name)
    }
}

/// A formal parameter: `name:type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeName,
}

/// A variable snapshotted when a lambda was defined.
#[derive(Debug, Clone)]
pub struct Capture {
    pub name: String,
    pub value: Value,
}

/// Everything needed to invoke a function or lambda.
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeName,
    /// First body line; `None` for the default `func` value, which does
    /// nothing when called.
    pub entry: Option<usize>,
    pub captured: Vec<Capture>,
}

impl FunctionInfo {
    /// The body-less function every `func` variable starts out holding.
    pub fn empty() -> Self {
        FunctionInfo {
            name: String::from("<empty>"),
            params: Vec::new(),
            return_type: TypeName::Void,
            entry: None,
            captured: Vec::new(),
        }
    }
}

/// Member store of an object. Cloning an `Object` clones the handle, so
/// every copy sees the same members.
#[derive(Debug, Clone, Default)]
pub struct Object(Rc<RefCell<HashMap<String, Slot>>>);

impl Object {
    pub fn new() -> Self {
        Object::default()
    }

    pub fn get(&self, member: &str) -> Option<Slot> {
        self.0.borrow().get(member).cloned()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.0.borrow().contains_key(member)
    }

    pub fn insert(&self, member: &str, slot: Slot) {
        self.0.borrow_mut().insert(member.to_string(), slot);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Void,
    Function(Rc<FunctionInfo>),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Bool(_) => Kind::Bool,
            Value::Str(_) => Kind::String,
            Value::Void => Kind::Void,
            Value::Function(_) => Kind::Function,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Void, Value::Void) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
