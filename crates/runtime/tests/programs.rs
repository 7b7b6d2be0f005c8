// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! end-to-end scenarios assembling small images by hand and driving them
//! through `execute`, mirroring the worked examples this engine is built
//! against.

use c0vm_image::{Bc0Image, FunctionEntry};
use c0vm_runtime::{execute, NativeTable, Trap};
use pretty_assertions::assert_eq;

fn image_with_main(code: Vec<u8>) -> Bc0Image {
    let mut image = Bc0Image::new();
    image.function_pool.push(FunctionEntry {
        num_args: 0,
        num_vars: 0,
        code,
    });
    image
}

#[test]
fn constant_return() {
    // BIPUSH 42; RETURN
    let image = image_with_main(vec![0x10, 42, 0xb1]);
    let natives = NativeTable::new();
    assert_eq!(execute(&image, &natives).unwrap(), 42);
}

#[test]
fn arithmetic() {
    // BIPUSH 6; BIPUSH 7; IMUL; RETURN
    let image = image_with_main(vec![0x10, 6, 0x10, 7, 0x68, 0xb1]);
    let natives = NativeTable::new();
    assert_eq!(execute(&image, &natives).unwrap(), 42);
}

#[test]
fn branch() {
    // BIPUSH 1; BIPUSH 1; IF_ICMPGE +6; BIPUSH 0; RETURN; BIPUSH 1; RETURN
    let code = vec![
        0x10, 1, // BIPUSH 1
        0x10, 1, // BIPUSH 1
        0xa2, 0x00, 0x06, // IF_ICMPGE +6 (relative to its own opcode address)
        0x10, 0, 0xb1, // BIPUSH 0; RETURN
        0x10, 1, 0xb1, // BIPUSH 1; RETURN
    ];
    let image = image_with_main(code);
    let natives = NativeTable::new();
    assert_eq!(execute(&image, &natives).unwrap(), 1);
}

#[test]
fn function_call() {
    let mut image = Bc0Image::new();
    // function 0 (main): BIPUSH 3; BIPUSH 4; INVOKESTATIC 0 1; RETURN
    image.function_pool.push(FunctionEntry {
        num_args: 0,
        num_vars: 0,
        code: vec![0x10, 3, 0x10, 4, 0xb7, 0x00, 0x01, 0xb1],
    });
    // function 1 (args=2): VLOAD 0; VLOAD 1; IADD; RETURN
    image.function_pool.push(FunctionEntry {
        num_args: 2,
        num_vars: 2,
        code: vec![0x15, 0, 0x15, 1, 0x60, 0xb1],
    });
    let natives = NativeTable::new();
    assert_eq!(execute(&image, &natives).unwrap(), 7);
}

#[test]
fn array_round_trip() {
    // NEWARRAY 4 (int elements); DUP; BIPUSH 2; AADDS; BIPUSH 99; IMSTORE;
    // BIPUSH 2; AADDS; IMLOAD; RETURN
    //
    // NEWARRAY pops the element count off the stack first.
    let code = vec![
        0x10, 3, // BIPUSH 3 (count)
        0xbc, 4, // NEWARRAY elt_size=4
        0x59, // DUP
        0x10, 2, // BIPUSH 2 (index)
        0x63, // AADDS
        0x10, 99, // BIPUSH 99
        0x4f, // IMSTORE
        0x10, 2, // BIPUSH 2 (index)
        0x63, // AADDS
        0x2e, // IMLOAD
        0xb1, // RETURN
    ];
    let image = image_with_main(code);
    let natives = NativeTable::new();
    assert_eq!(execute(&image, &natives).unwrap(), 99);
}

#[test]
fn division_by_zero_traps_arithmetic() {
    // BIPUSH 1; BIPUSH 0; IDIV; RETURN
    let code = vec![0x10, 1, 0x10, 0, 0x6c, 0xb1];
    let image = image_with_main(code);
    let natives = NativeTable::new();
    let err = execute(&image, &natives).unwrap_err();
    assert!(matches!(err, Trap::Arithmetic(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn assert_failure_carries_message() {
    let mut image = image_with_main(vec![
        0x10, 0, // BIPUSH 0 (false condition)
        0x14, 0x00, 0x00, // ALDC 0 (message)
        0xcf, // ASSERT
        0x10, 0, 0xb1, // unreachable
    ]);
    image.string_pool = b"boom\0".to_vec();
    let natives = NativeTable::new();
    let err = execute(&image, &natives).unwrap_err();
    assert!(matches!(err, Trap::Assertion(message) if message == "boom"));
}
