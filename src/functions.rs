//! Table of the named functions declared in a program.

use crate::value::FunctionInfo;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Rc<FunctionInfo>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        FunctionTable::default()
    }

    /// Register a function. Returns `false`, leaving the table unchanged,
    /// if the name is already taken.
    pub fn insert(&mut self, info: FunctionInfo) -> bool {
        if self.functions.contains_key(&info.name) {
            return false;
        }
        self.functions.insert(info.name.clone(), Rc::new(info));
        true
    }

    pub fn get(&self, name: &str) -> Option<Rc<FunctionInfo>> {
        self.functions.get(name).cloned()
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
