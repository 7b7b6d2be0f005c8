// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::engine::{ControlFlow, Engine};

/// `VLOAD i`: push `V[i]`. `i` is a single byte indexing the 256-slot
/// local array, so no bounds check is needed (`spec.md` §3).
pub fn vload(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.fetch_u8()?;
    engine.push(engine.local(index));
    Ok(ControlFlow::Continue)
}

/// `VSTORE i`: pop and store into `V[i]`.
pub fn vstore(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.fetch_u8()?;
    let value = engine.pop()?;
    engine.set_local(index, value);
    Ok(ControlFlow::Continue)
}
