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

/// pop `x` (top) then `y` (second), the order every arithmetic opcode in
/// `spec.md` §4.3 shares.
fn pop_xy(engine: &mut Engine) -> Result<(i32, i32), Trap> {
    let x = engine.pop_int()?;
    let y = engine.pop_int()?;
    Ok((x, y))
}

pub fn iadd(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    engine.push(Value::int(y.wrapping_add(x)));
    Ok(ControlFlow::Continue)
}

pub fn isub(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    engine.push(Value::int(y.wrapping_sub(x)));
    Ok(ControlFlow::Continue)
}

pub fn imul(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    engine.push(Value::int(y.wrapping_mul(x)));
    Ok(ControlFlow::Continue)
}

/// `IDIV`: `y / x` truncated toward zero. traps on divide-by-zero and on
/// the one case Rust's `wrapping_div` would otherwise silently wrap,
/// `INT_MIN / -1` (`spec.md` §4.3, §8 boundary behaviors).
pub fn idiv(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    if x == 0 {
        return Err(Trap::arithmetic("division by zero"));
    }
    if y == i32::MIN && x == -1 {
        return Err(Trap::arithmetic("INT_MIN / -1 overflows"));
    }
    engine.push(Value::int(y / x));
    Ok(ControlFlow::Continue)
}

/// `IREM`: `y - (y/x)*x`, same trap conditions as `IDIV`.
pub fn irem(engine: &mut Engine) -> Result<ControlFlow, Trap> {
    let (x, y) = pop_xy(engine)?;
    if x == 0 {
        return Err(Trap::arithmetic("division by zero"));
    }
    if y == i32::MIN && x == -1 {
        return Err(Trap::arithmetic("INT_MIN / -1 overflows"));
    }
    engine.push(Value::int(y % x));
    Ok(ControlFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::NativeTable;
    use c0vm_image::{Bc0Image, FunctionEntry};
    use pretty_assertions::assert_eq;

    fn test_engine(image: &Bc0Image, natives: &NativeTable) -> crate::engine::Engine<'_> {
        crate::engine::Engine::new(image, natives).unwrap()
    }

    fn single_function_image() -> Bc0Image {
        let mut image = Bc0Image::new();
        image.function_pool.push(FunctionEntry {
            num_args: 0,
            num_vars: 0,
            code: vec![],
        });
        image
    }

    #[test]
    fn idiv_traps_on_int_min_div_neg_one() {
        let image = single_function_image();
        let natives = NativeTable::new();
        let mut engine = test_engine(&image, &natives);
        engine.push(Value::int(i32::MIN)); // y
        engine.push(Value::int(-1)); // x
        let err = idiv(&mut engine).unwrap_err();
        assert!(matches!(err, Trap::Arithmetic(_)));
    }

    #[test]
    fn idiv_traps_on_zero_divisor() {
        let image = single_function_image();
        let natives = NativeTable::new();
        let mut engine = test_engine(&image, &natives);
        engine.push(Value::int(10)); // y
        engine.push(Value::int(0)); // x
        let err = idiv(&mut engine).unwrap_err();
        assert!(matches!(err, Trap::Arithmetic(_)));
    }

    #[test]
    fn iadd_wraps_on_overflow() {
        let image = single_function_image();
        let natives = NativeTable::new();
        let mut engine = test_engine(&image, &natives);
        engine.push(Value::int(1));
        engine.push(Value::int(i32::MAX));
        iadd(&mut engine).unwrap();
        assert_eq!(engine.pop().unwrap(), Value::int(i32::MIN));
    }

    #[test]
    fn isub_computes_y_minus_x() {
        let image = single_function_image();
        let natives = NativeTable::new();
        let mut engine = test_engine(&image, &natives);
        engine.push(Value::int(10)); // y
        engine.push(Value::int(3)); // x
        isub(&mut engine).unwrap();
        assert_eq!(engine.pop().unwrap(), Value::int(7));
    }
}
