// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::{heap::Heap, value::Value};

/// a host-provided primitive: an indexed sequence of functions of type
/// `(argbuf: value[]) -> value`. the buffer is already in
/// `INVOKESTATIC`-style order (argument `0` first); see
/// [`crate::interpreter::calling`]. natives additionally get read access to
/// the heap, since several of the C0 standard library's natives (`print`
/// and friends) take a string address and must walk it.
pub type NativeFn = Box<dyn Fn(&[Value], &Heap) -> Result<Value, Trap> + Send + Sync>;

/// the native-function table: read-only process-wide state installed before
/// `execute` runs. `c0vm-runtime` itself never populates this table — doing
/// so is the CLI's job, as an external collaborator.
#[derive(Default)]
pub struct NativeTable {
    functions: Vec<NativeFn>,
}

impl NativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, function: NativeFn) -> u16 {
        let index = self.functions.len() as u16;
        self.functions.push(function);
        index
    }

    pub fn get(&self, index: u16) -> Option<&NativeFn> {
        self.functions.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for NativeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeTable")
            .field("len", &self.functions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_then_get_round_trips() {
        let mut table = NativeTable::new();
        let index = table.push(Box::new(|args: &[Value], _heap: &Heap| Ok(args[0])));
        let function = table.get(index).unwrap();
        let heap = Heap::new();
        assert_eq!(function(&[Value::int(7)], &heap).unwrap(), Value::int(7));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let table = NativeTable::new();
        assert!(table.get(0).is_none());
    }
}
