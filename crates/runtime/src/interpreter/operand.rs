// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::engine::{ControlFlow, Engine};

/// `NOP`: advance past the opcode byte, otherwise do nothing.
pub fn nop(_engine: &mut Engine) -> Result<ControlFlow, Trap> {
    Ok(ControlFlow::Continue)
}

/// `POP`: discard the top of the operand stack. neither this nor `DUP`/
/// `SWAP` examine the tag (`spec.md` §4.2).
pub fn pop(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    engine.pop()?;
    Ok(ControlFlow::Continue)
}

/// `DUP`: duplicate the top value.
pub fn dup(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let top = engine.pop()?;
    engine.push(top);
    engine.push(top);
    Ok(ControlFlow::Continue)
}

/// `SWAP`: exchange the top two values.
pub fn swap(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let a = engine.pop()?;
    let b = engine.pop()?;
    engine.push(a);
    engine.push(b);
    Ok(ControlFlow::Continue)
}
