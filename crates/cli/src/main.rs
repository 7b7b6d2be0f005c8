// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::process::ExitCode;

use c0vm_runtime::{Heap, NativeTable, Value};
use clap::Parser;
use log::error;

/// run a linked bytecode image and report its result.
#[derive(Debug, Parser)]
#[command(name = "c0vm", version, about)]
struct Args {
    /// path to the linked bytecode image file
    bytecode: std::path::PathBuf,

    /// raise the default log level to `info`
    #[arg(short, long)]
    verbose: bool,

    /// shorthand for `RUST_LOG=trace`, logs every dispatched instruction
    #[arg(long)]
    trace: bool,
}

/// the minimal native-function table a runnable binary needs:
/// `print`, `printint`, `printbool`, `printchar`. anything beyond these
/// four is out of scope — the full C0 standard library (file I/O, string
/// conversions) is not part of this engine.
fn default_native_table() -> NativeTable {
    let mut natives = NativeTable::new();

    natives.push(Box::new(|args: &[Value], heap: &Heap| {
        let address = args.first().copied().unwrap_or(Value::null()).as_ptr();
        println!("{}", heap.read_c_string(address)?);
        Ok(Value::int(0))
    }));

    natives.push(Box::new(|args: &[Value], _heap: &Heap| {
        let value = args.first().copied().unwrap_or(Value::int(0)).as_int();
        println!("{value}");
        Ok(Value::int(0))
    }));

    natives.push(Box::new(|args: &[Value], _heap: &Heap| {
        let value = args.first().copied().unwrap_or(Value::int(0)).as_int();
        println!("{}", value != 0);
        Ok(Value::int(0))
    }));

    natives.push(Box::new(|args: &[Value], _heap: &Heap| {
        let value = args.first().copied().unwrap_or(Value::int(0)).as_int();
        let byte = (value & 0x7f) as u8 as char;
        println!("{byte}");
        Ok(Value::int(0))
    }));

    natives
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.trace {
        "trace"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let file = match std::fs::File::open(&args.bytecode) {
        Ok(file) => file,
        Err(err) => {
            error!("failed to open {}: {err}", args.bytecode.display());
            return ExitCode::FAILURE;
        }
    };

    // SAFETY: the file is not modified by another process for the
    // lifetime of this mapping; `c0vm` is a short-lived CLI tool reading a
    // file the caller just supplied.
    let mapping = match unsafe { memmap2::Mmap::map(&file) } {
        Ok(mapping) => mapping,
        Err(err) => {
            error!("failed to map {}: {err}", args.bytecode.display());
            return ExitCode::FAILURE;
        }
    };

    let image = match c0vm_image::read_image(&mapping) {
        Ok(image) => image,
        Err(err) => {
            error!("failed to parse bytecode image: {err}");
            return ExitCode::FAILURE;
        }
    };

    let natives = default_native_table();
    match c0vm_runtime::execute(&image, &natives) {
        Ok(code) => ExitCode::from(code as u8),
        Err(trap) => {
            eprintln!("{trap}");
            ExitCode::from(trap.exit_code() as u8)
        }
    }
}
