// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! the execution engine: the operand-stack interpreter, call-frame
//! discipline, heap/array object model, and trap semantics. everything a
//! linked bytecode image needs in order to run.

mod engine;
mod frame;
mod heap;
mod interpreter;
mod native;
mod stack;
mod value;

use c0vm_image::Bc0Image;

pub use c0vm_types::Trap;
pub use engine::{ControlFlow, Engine};
pub use frame::Frame;
pub use heap::Heap;
pub use native::{NativeFn, NativeTable};
pub use stack::Stack;
pub use value::{val_equal, Value, NULL};

/// run `image`'s entry function (function pool index 0) to completion with
/// the given native table, returning the integer `main` computed or the
/// trap that ended execution early (`spec.md` §1: "executes its `main`
/// function, and returns `main`'s integer result as the process exit
/// status").
pub fn execute(image: &Bc0Image, natives: &NativeTable) -> Result<i32, Trap> {
    let mut engine = Engine::new(image, natives)?;
    engine.run()
}
