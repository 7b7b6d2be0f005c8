// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

use crate::{
    engine::{ControlFlow, Engine},
    value::{Value, NULL},
};

/// `NEW s`: allocate `s` zero-initialized bytes, push the address.
pub fn new(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let size = engine.fetch_u8()?;
    let address = engine.heap.alloc(size as usize);
    engine.push(Value::ptr(address));
    Ok(ControlFlow::Continue)
}

/// `NEWARRAY s`: pop `n`, trap if negative, else allocate a
/// `{count, elt_size, elems}` descriptor and push its address.
pub fn new_array(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let elt_size = engine.fetch_u8()?;
    let count = engine.pop_int()?;
    if count < 0 {
        return Err(Trap::arithmetic("negative size array"));
    }
    let address = engine.heap.alloc_array(count, elt_size);
    engine.push(Value::ptr(address));
    Ok(ControlFlow::Continue)
}

/// `ARRAYLENGTH`: null-safe by design — `spec.md` §4.7 has this return `0`
/// for a null descriptor rather than trap.
pub fn array_length(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let descriptor = engine.pop_ptr()?;
    let len = if descriptor == NULL {
        0
    } else {
        engine.heap.array_len(descriptor)?
    };
    engine.push(Value::int(len));
    Ok(ControlFlow::Continue)
}

/// `AADDF f`: pop a pointer *to* a pointer; trap if null; dereference once
/// to get the record base, then add the field offset. this double
/// indirection is deliberate: the operand is the address of the slot
/// holding the record, not the record itself.
pub fn aaddf(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let offset = engine.fetch_u8()?;
    let slot = engine.pop_ptr()?;
    if slot == NULL {
        return Err(Trap::memory("AADDF on null"));
    }
    let base = engine.heap.read_u32(slot)?;
    engine.push(Value::ptr(base + offset as u32));
    Ok(ControlFlow::Continue)
}

/// `AADDS`: pop index, then array descriptor; trap on null descriptor or
/// out-of-range index; push the address of element `i`.
pub fn aadds(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let index = engine.pop_int()?;
    let descriptor = engine.pop_ptr()?;
    if descriptor == NULL {
        return Err(Trap::memory("AADDS on null array"));
    }
    let count = engine.heap.array_len(descriptor)?;
    if index < 0 || index >= count {
        return Err(Trap::memory(format!(
            "array index {index} out of bounds (len {count})"
        )));
    }
    let address = engine.heap.array_element_address(descriptor, index)?;
    engine.push(Value::ptr(address));
    Ok(ControlFlow::Continue)
}

pub fn imload(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let address = engine.pop_ptr()?;
    if address == NULL {
        return Err(Trap::memory("IMLOAD on null"));
    }
    let value = engine.heap.read_i32(address)?;
    engine.push(Value::int(value));
    Ok(ControlFlow::Continue)
}

pub fn imstore(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let value = engine.pop_int()?;
    let address = engine.pop_ptr()?;
    if address == NULL {
        return Err(Trap::memory("IMSTORE on null"));
    }
    engine.heap.write_i32(address, value)?;
    Ok(ControlFlow::Continue)
}

pub fn amload(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let address = engine.pop_ptr()?;
    if address == NULL {
        return Err(Trap::memory("AMLOAD on null"));
    }
    let value = engine.heap.read_u32(address)?;
    engine.push(Value::ptr(value));
    Ok(ControlFlow::Continue)
}

/// `AMSTORE`: the source pops the value as `void**`; this is an opaque
/// pointer-sized bit-pattern move, not a typed store (`spec.md` §9).
pub fn amstore(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let value = engine.pop_ptr()?;
    let address = engine.pop_ptr()?;
    if address == NULL {
        return Err(Trap::memory("AMSTORE on null"));
    }
    engine.heap.write_u32(address, value)?;
    Ok(ControlFlow::Continue)
}

pub fn cmload(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let address = engine.pop_ptr()?;
    if address == NULL {
        return Err(Trap::memory("CMLOAD on null"));
    }
    let byte = engine.heap.read_u8(address)?;
    engine.push(Value::int(byte as i32));
    Ok(ControlFlow::Continue)
}

/// `CMSTORE`: masks the stored integer to 7 bits unconditionally, matching
/// `*a = x & 0x7f` in the source (`spec.md` §4.7, `SPEC_FULL.md` §12).
pub fn cmstore(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let value = engine.pop_int()?;
    let address = engine.pop_ptr()?;
    if address == NULL {
        return Err(Trap::memory("CMSTORE on null"));
    }
    engine.heap.write_u8(address, (value & 0x7f) as u8)?;
    Ok(ControlFlow::Continue)
}
