// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::{
    engine::{ControlFlow, Engine},
    value::Value,
};

/// `BIPUSH b`: sign-extend the signed operand byte to 32 bits and push it.
pub fn bipush(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let byte = engine.fetch_i8()?;
    engine.push(Value::int(byte as i32));
    Ok(ControlFlow::Continue)
}

/// `ILDC h l`: push `int_pool[(h<<8)|l]`.
pub fn ildc(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.fetch_u16()? as usize;
    let value = *engine
        .image
        .int_pool
        .get(index)
        .ok_or_else(|| Trap::arithmetic(format!("int pool index {index} out of range")))?;
    engine.push(Value::int(value));
    Ok(ControlFlow::Continue)
}

/// `ALDC h l`: push the address of string-pool byte `(h<<8)|l`. the string
/// pool was copied into the heap arena at start-up, so this address is a
/// regular heap address the callee can walk with pointer arithmetic.
pub fn aldc(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.fetch_u16()? as usize;
    if index >= engine.image.string_pool.len() {
        return Err(Trap::arithmetic(format!(
            "string pool index {index} out of range"
        )));
    }
    let base = engine.string_pool_base();
    engine.push(Value::ptr(base + index as u32));
    Ok(ControlFlow::Continue)
}

/// `ACONST_NULL`: push the null pointer.
pub fn aconst_null(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    engine.push(Value::null());
    Ok(ControlFlow::Continue)
}
