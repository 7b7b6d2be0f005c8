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

fn pop_xy(engine: &mut Engine) -> Result<(i32, i32), Trap> {
    let x = engine.pop_int()?;
    let y = engine.pop_int()?;
    Ok((x, y))
}

pub fn iand(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    engine.push(Value::int(y & x));
    Ok(ControlFlow::Continue)
}

pub fn ior(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    engine.push(Value::int(y | x));
    Ok(ControlFlow::Continue)
}

pub fn ixor(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    engine.push(Value::int(y ^ x));
    Ok(ControlFlow::Continue)
}

/// `ISHL`: `y << x`. traps if `x` is outside `[0, 31]` — Rust's own shift
/// panics would be the wrong failure mode (a trap, not a panic), so the
/// range is checked explicitly (`spec.md` §4.3, §8 boundary behaviors).
pub fn ishl(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    if !(0..=31).contains(&x) {
        return Err(Trap::arithmetic(format!("shift amount {x} out of [0,31]")));
    }
    engine.push(Value::int(y << x));
    Ok(ControlFlow::Continue)
}

/// `ISHR`: arithmetic (sign-extending) right shift, same range check as
/// `ISHL`.
pub fn ishr(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    if !(0..=31).contains(&x) {
        return Err(Trap::arithmetic(format!("shift amount {x} out of [0,31]")));
    }
    engine.push(Value::int(y >> x));
    Ok(ControlFlow::Continue)
}
