// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::image::{FunctionEntry, NativeEntry};

/// a small builder for assembling an image's raw bytes, mirroring the
/// `BytecodeWriter` helper this workspace's sibling crates use to construct
/// test fixtures without hand-writing byte arrays. Not part of the engine's
/// contract — image construction is entirely external to it; this builder
/// exists so tests and tools can produce well-formed images to feed
/// [`crate::read_image`].
#[derive(Debug, Default)]
pub struct ImageWriter {
    int_pool: Vec<i32>,
    string_pool: Vec<u8>,
    function_pool: Vec<FunctionEntry>,
    native_pool: Vec<NativeEntry>,
}

impl ImageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_int(mut self, value: i32) -> Self {
        self.int_pool.push(value);
        self
    }

    pub fn with_string(mut self, bytes: &[u8]) -> Self {
        self.string_pool.extend_from_slice(bytes);
        self
    }

    pub fn with_function(mut self, entry: FunctionEntry) -> Self {
        self.function_pool.push(entry);
        self
    }

    pub fn with_native(mut self, entry: NativeEntry) -> Self {
        self.native_pool.push(entry);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BC0\0");
        out.extend_from_slice(&1u16.to_le_bytes());

        out.extend_from_slice(&(self.int_pool.len() as u32).to_le_bytes());
        for value in &self.int_pool {
            out.extend_from_slice(&value.to_le_bytes());
        }

        out.extend_from_slice(&(self.string_pool.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.string_pool);

        out.extend_from_slice(&(self.function_pool.len() as u32).to_le_bytes());
        for function in &self.function_pool {
            out.push(function.num_args);
            out.push(function.num_vars);
            out.extend_from_slice(&(function.code.len() as u32).to_le_bytes());
            out.extend_from_slice(&function.code);
        }

        out.extend_from_slice(&(self.native_pool.len() as u32).to_le_bytes());
        for native in &self.native_pool {
            out.extend_from_slice(&native.num_args.to_le_bytes());
            out.extend_from_slice(&native.function_table_index.to_le_bytes());
        }

        out
    }
}
