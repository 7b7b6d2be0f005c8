// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::{
    engine::{ControlFlow, Engine},
    value::val_equal,
};

/// every branch opcode here is three bytes: the opcode itself plus a
/// 16-bit signed displacement. the jump target is the address of the
/// *opcode* plus the displacement, not the address after the instruction
/// (`spec.md` §4.5) — so this reads the displacement (which also advances
/// `pc` past it), then reconstructs the opcode's own address to add the
/// displacement to.
fn branch_target(engine: &mut Engine) -> Result<usize, Trap> {
    let opcode_start = engine.current.pc - 1;
    let displacement = engine.fetch_i16()?;
    Ok((opcode_start as i64 + displacement as i64) as usize)
}

fn branch_if(engine: &mut Engine, taken: bool) -> Result<ControlFlow, Trap> {
    let target = branch_target(engine)?;
    if taken {
        engine.current.pc = target;
    }
    Ok(ControlFlow::Continue)
}

/// `IF_CMPEQ`: pop two values, compare with `val_equal`.
pub fn if_cmp_eq(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let x = engine.pop()?;
    let y = engine.pop()?;
    let taken = val_equal(y, x);
    branch_if(engine, taken)
}

/// `IF_CMPNE`: pop two values, compare with `val_equal`, negated.
pub fn if_cmp_ne(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let x = engine.pop()?;
    let y = engine.pop()?;
    let taken = !val_equal(y, x);
    branch_if(engine, taken)
}

/// `IF_ICMPLT`: pop `y` (top), then `x` (second); branch if `x < y`.
pub fn if_icmp_lt(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let y = engine.pop_int()?;
    let x = engine.pop_int()?;
    branch_if(engine, x < y)
}

pub fn if_icmp_ge(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let y = engine.pop_int()?;
    let x = engine.pop_int()?;
    branch_if(engine, x >= y)
}

pub fn if_icmp_gt(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let y = engine.pop_int()?;
    let x = engine.pop_int()?;
    branch_if(engine, x > y)
}

pub fn if_icmp_le(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let y = engine.pop_int()?;
    let x = engine.pop_int()?;
    branch_if(engine, x <= y)
}

/// `GOTO`: unconditional branch.
pub fn goto(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let target = branch_target(engine)?;
    engine.current.pc = target;
    Ok(ControlFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{native::NativeTable, value::Value};
    use c0vm_image::{Bc0Image, FunctionEntry};
    use pretty_assertions::assert_eq;

    fn engine_for(code: Vec<u8>) -> (Bc0Image, NativeTable) {
        let mut image = Bc0Image::new();
        image.function_pool.push(FunctionEntry {
            num_args: 0,
            num_vars: 0,
            code,
        });
        (image, NativeTable::new())
    }

    #[test]
    fn goto_jumps_relative_to_its_own_address() {
        // opcode at pc=0, displacement = +6 -> target = 6.
        let (image, natives) = engine_for(vec![0xa7, 0x00, 0x06]);
        let mut engine = crate::engine::Engine::new(&image, &natives).unwrap();
        engine.current.pc = 1; // as if the opcode byte was already consumed
        goto(&mut engine).unwrap();
        assert_eq!(engine.current.pc, 6);
    }

    #[test]
    fn if_icmp_ge_branches_on_true() {
        let (image, natives) = engine_for(vec![0xa2, 0x00, 0x06]);
        let mut engine = crate::engine::Engine::new(&image, &natives).unwrap();
        engine.current.pc = 1;
        engine.push(Value::int(1)); // x
        engine.push(Value::int(1)); // y
        if_icmp_ge(&mut engine).unwrap();
        assert_eq!(engine.current.pc, 6);
    }
}
