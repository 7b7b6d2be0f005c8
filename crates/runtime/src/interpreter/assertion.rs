// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::engine::{ControlFlow, Engine};

/// `ATHROW`: pop a pointer, walk it as a NUL-terminated string, raise a
/// user error carrying that message. the process terminates; there is no
/// catch (`spec.md` §4.8).
pub fn athrow(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let address = engine.pop_ptr()?;
    let message = engine.heap.read_c_string(address)?;
    Err(Trap::user(message))
}

/// `ASSERT`: pop the message pointer, then the condition. a false (`0`)
/// condition raises an assertion failure carrying the message.
pub fn assert_op(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let message_address = engine.pop_ptr()?;
    let condition = engine.pop_int()?;
    if condition == 0 {
        let message = engine.heap.read_c_string(message_address)?;
        return Err(Trap::assertion(message));
    }
    Ok(ControlFlow::Continue)
}
