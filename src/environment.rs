//! Variable environment: a stack of call-frames, each a stack of
//! block-scopes.
//!
//! Lookups only ever look at the current call-frame. Data moves between
//! frames exclusively through the bindings imported when a call starts.
//!
//! The environment is policy-free: creating an existing symbol or updating
//! a missing one is reported back to the caller, never raised.

use crate::value::{slot, Slot, Value};
use std::collections::HashMap;

/// Outcome of [`Environment::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    Created,
    AlreadyExists,
}

/// Outcome of [`Environment::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Updated {
    Updated,
    NotFound,
}

/// Split `obj.member` into its two halves. Names with no dot, or more
/// than one, are not member names.
pub fn split_member(name: &str) -> Option<(&str, &str)> {
    let (object, member) = name.split_once('.')?;
    if object.is_empty() || member.is_empty() || member.contains('.') {
        return None;
    }
    Some((object, member))
}

type Block = HashMap<String, Slot>;

#[derive(Debug)]
struct Frame {
    blocks: Vec<Block>,
}

impl Frame {
    fn new() -> Self {
        Frame {
            blocks: vec![Block::new()],
        }
    }

    fn lookup(&self, name: &str) -> Option<Slot> {
        self.blocks
            .iter()
            .rev()
            .find_map(|block| block.get(name).cloned())
    }
}

#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// An environment holding the frame of the entry function.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::new()],
        }
    }

    fn frame(&self) -> &Frame {
        // `exit_call` never removes the last frame
        &self.frames[self.frames.len() - 1]
    }

    fn frame_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Resolve a plain or `obj.member` name in the current call-frame.
    pub fn get(&self, name: &str) -> Option<Slot> {
        if let Some((object, member)) = split_member(name) {
            let holder = self.frame().lookup(object)?;
            let value = holder.borrow();
            return value.as_object()?.get(member);
        }
        self.frame().lookup(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Create `name` holding `Void`, either in the innermost block or, with
    /// `top_of_frame`, in the outermost block of the current call-frame.
    pub fn create(&mut self, name: &str, top_of_frame: bool) -> Declared {
        let frame = self.frame_mut();
        let index = if top_of_frame { 0 } else { frame.blocks.len() - 1 };
        let block = &mut frame.blocks[index];
        if block.contains_key(name) {
            return Declared::AlreadyExists;
        }
        block.insert(name.to_string(), slot(Value::Void));
        Declared::Created
    }

    /// Create the member half of `obj.member` inside the object `obj`
    /// currently resolves to. `None` when `obj` is not a variable holding an
    /// object.
    pub fn create_member(&mut self, name: &str) -> Option<Declared> {
        let (object, member) = split_member(name)?;
        let holder = self.frame().lookup(object)?;
        let value = holder.borrow();
        let store = value.as_object()?;
        if store.contains(member) {
            return Some(Declared::AlreadyExists);
        }
        store.insert(member, slot(Value::Void));
        Some(Declared::Created)
    }

    /// Write `value` into the existing slot for `name`.
    pub fn set(&mut self, name: &str, value: Value) -> Updated {
        match self.get(name) {
            Some(cell) => {
                *cell.borrow_mut() = value;
                Updated::Updated
            }
            None => Updated::NotFound,
        }
    }

    /// Install bindings into the innermost block of the current frame.
    /// Later entries overwrite earlier ones with the same name.
    pub fn import_mappings(&mut self, bindings: impl IntoIterator<Item = (String, Slot)>) {
        let frame = self.frame_mut();
        let last = frame.blocks.len() - 1;
        frame.blocks[last].extend(bindings);
    }

    pub fn enter_block(&mut self) {
        self.frame_mut().blocks.push(Block::new());
    }

    pub fn exit_block(&mut self) {
        let frame = self.frame_mut();
        if frame.blocks.len() > 1 {
            frame.blocks.pop();
        }
    }

    pub fn enter_call(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn exit_call(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of active call-frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of block-scopes in the current call-frame.
    pub fn block_depth(&self) -> usize {
        self.frame().blocks.len()
    }
}
