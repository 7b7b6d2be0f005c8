// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::{
    engine::{ControlFlow, Engine},
    frame::Frame,
    value::Value,
};

/// `INVOKESTATIC h l`: capture the caller's activation, install a fresh one
/// for the callee with its first `num_args` locals populated from the
/// caller's stack (`spec.md` §4.6).
pub fn invoke_static(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.fetch_u16()? as usize;
    let function = engine
        .image
        .function_pool
        .get(index)
        .ok_or_else(|| Trap::arithmetic(format!("function pool index {index} out of range")))?;
    let num_args = function.num_args;

    let mut callee = Frame::new(index);
    for i in (0..num_args).rev() {
        callee.locals[i as usize] = engine.pop()?;
    }

    let caller = std::mem::replace(&mut engine.current, callee);
    engine.call_stack.push(caller);
    Ok(ControlFlow::Continue)
}

/// `RETURN`: at the outermost activation, end execution with the returned
/// integer; otherwise restore the suspended caller and push the return
/// value onto its stack (`spec.md` §4.6).
pub fn ret(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let value = engine.pop()?;
    match engine.call_stack.pop() {
        None => Ok(ControlFlow::Exit(value.as_int())),
        Some(caller) => {
            engine.current = caller;
            engine.push(value);
            Ok(ControlFlow::Continue)
        }
    }
}

/// `INVOKENATIVE h l`: pop `num_args` values into an argument buffer (same
/// reverse-pop order as `INVOKESTATIC`), call the indexed native, push its
/// result. does not touch the call stack (`spec.md` §4.6).
pub fn invoke_native(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.fetch_u16()?;
    let entry = *engine
        .image
        .native_pool
        .get(index as usize)
        .ok_or_else(|| Trap::arithmetic(format!("native pool index {index} out of range")))?;

    let mut args: Vec<Value> = Vec::with_capacity(entry.num_args as usize);
    for _ in 0..entry.num_args {
        args.push(engine.pop()?);
    }
    args.reverse();

    let result = {
        let function = engine
            .natives
            .get(entry.function_table_index)
            .ok_or_else(|| {
                Trap::arithmetic(format!(
                    "native function table index {} out of range",
                    entry.function_table_index
                ))
            })?;
        function(&args, &engine.heap)?
    };
    engine.push(result);
    Ok(ControlFlow::Continue)
}
