// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{error::ImageError, image::{Bc0Image, FunctionEntry, NativeEntry}};

const MAGIC: [u8; 4] = *b"BC0\0";
const FORMAT_VERSION: u16 = 1;

/// a cursor over the raw image bytes, tracking the read offset as it
/// consumes fixed-width fields off the front of the buffer.
struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ImageError> {
        let available = self.bytes.len().saturating_sub(self.offset);
        if available < len {
            return Err(ImageError::UnexpectedEof {
                offset: self.offset,
                needed: len,
                available,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, ImageError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, ImageError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, ImageError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i32(&mut self) -> Result<i32, ImageError> {
        Ok(self.read_u32()? as i32)
    }
}

/// parse a linked bytecode image off raw bytes.
///
/// wire format (little-endian throughout), this crate's own invention:
///
/// ```text
/// magic           [u8; 4]   b"BC0\0"
/// version         u16
/// int_count       u32
/// ints            [i32; int_count]
/// string_count    u32
/// strings         [u8; string_count]
/// function_count  u32
/// functions       [FunctionEntry; function_count]
///   num_args        u8
///   num_vars        u8
///   code_length     u32
///   code            [u8; code_length]
/// native_count    u32
/// natives         [NativeEntry; native_count]
///   num_args             u16
///   function_table_index u16
/// ```
pub fn read_image(bytes: &[u8]) -> Result<Bc0Image, ImageError> {
    let mut cursor = Cursor::new(bytes);

    let magic: [u8; 4] = cursor.take(4)?.try_into().unwrap();
    if magic != MAGIC {
        return Err(ImageError::BadMagic {
            expected: MAGIC,
            found: magic,
        });
    }

    let version = cursor.read_u16()?;
    if version != FORMAT_VERSION {
        return Err(ImageError::UnsupportedVersion(version));
    }

    let int_count = cursor.read_u32()? as usize;
    let mut int_pool = Vec::with_capacity(int_count);
    for _ in 0..int_count {
        int_pool.push(cursor.read_i32()?);
    }

    let string_count = cursor.read_u32()? as usize;
    let string_pool = cursor.take(string_count)?.to_vec();

    let function_count = cursor.read_u32()? as usize;
    let mut function_pool = Vec::with_capacity(function_count);
    for _ in 0..function_count {
        let num_args = cursor.read_u8()?;
        let num_vars = cursor.read_u8()?;
        let code_length = cursor.read_u32()? as usize;
        let code = cursor.take(code_length)?.to_vec();
        function_pool.push(FunctionEntry {
            num_args,
            num_vars,
            code,
        });
    }

    let native_count = cursor.read_u32()? as usize;
    let mut native_pool = Vec::with_capacity(native_count);
    for _ in 0..native_count {
        let num_args = cursor.read_u16()?;
        let function_table_index = cursor.read_u16()?;
        native_pool.push(NativeEntry {
            num_args,
            function_table_index,
        });
    }

    Ok(Bc0Image {
        int_pool,
        string_pool,
        function_pool,
        native_pool,
    })
}
