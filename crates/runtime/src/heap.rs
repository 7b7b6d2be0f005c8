// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use c0vm_types::Trap;

/// byte offset of the array-descriptor header (`count: i32`, `elt_size: u8`)
/// before the element buffer. see `spec.md` §3, "Heap array".
const ARRAY_HEADER_SIZE: u32 = 8;

/// the VM heap: a single growable byte arena, bump-allocated and never
/// freed (`spec.md` §5: "the heap is append-only from the engine's
/// perspective... no free happens during execution"; `spec.md` §9: "a
/// production rewrite may switch to an arena whose lifetime equals the
/// engine's"). address 0 is permanently reserved as the null sentinel, so
/// every real allocation starts at address 1 or later.
///
/// the string pool is copied into this same arena at start-up (see
/// [`Heap::load_string_pool`]), so `ALDC` addresses and `NEW`/`NEWARRAY`
/// addresses share one address space and the same read/write path — in
/// particular `ATHROW`'s C-string walk works identically whether the string
/// came from the pool or was built on the heap.
#[derive(Debug, Default)]
pub struct Heap {
    data: Vec<u8>,
}

impl Heap {
    pub fn new() -> Self {
        Self { data: vec![0u8] }
    }

    /// copy the image's string pool into the arena, returning the address
    /// of its first byte. `ALDC i` then pushes `base + i`.
    pub fn load_string_pool(&mut self, bytes: &[u8]) -> u32 {
        let base = self.data.len() as u32;
        self.data.extend_from_slice(bytes);
        base
    }

    /// `NEW s`: allocate `len` zero-initialized bytes, return the address.
    pub fn alloc(&mut self, len: usize) -> u32 {
        let addr = self.data.len() as u32;
        self.data.resize(self.data.len() + len, 0);
        addr
    }

    /// `NEWARRAY s`: allocate a `{count, elt_size, elems}` descriptor whose
    /// element buffer immediately follows its header, return the address of
    /// the descriptor (not the element buffer).
    pub fn alloc_array(&mut self, count: i32, elt_size: u8) -> u32 {
        let addr = self.alloc(ARRAY_HEADER_SIZE as usize + count as usize * elt_size as usize);
        self.write_u32(addr, count as u32)
            .expect("just-allocated region is in bounds");
        self.write_u8(addr + 4, elt_size)
            .expect("just-allocated region is in bounds");
        addr
    }

    /// `ARRAYLENGTH`: read the `count` field of an array descriptor. the
    /// caller is responsible for the null check (`spec.md` §4.7:
    /// `ARRAYLENGTH(null)` yields `0`, it does not trap).
    pub fn array_len(&self, descriptor: u32) -> Result<i32, Trap> {
        Ok(self.read_u32(descriptor)? as i32)
    }

    pub fn array_elt_size(&self, descriptor: u32) -> Result<u8, Trap> {
        self.read_u8(descriptor + 4)
    }

    /// address of element `index` of the array described at `descriptor`.
    /// does not bounds-check; callers must check against [`Heap::array_len`]
    /// first (`AADDS`'s contract in `spec.md` §4.7).
    pub fn array_element_address(&self, descriptor: u32, index: i32) -> Result<u32, Trap> {
        let elt_size = self.array_elt_size(descriptor)? as u32;
        Ok(descriptor + ARRAY_HEADER_SIZE + index as u32 * elt_size)
    }

    fn bounds_check(&self, addr: u32, width: usize) -> Result<(), Trap> {
        let end = addr as usize + width;
        if end > self.data.len() {
            return Err(Trap::memory(format!(
                "address 0x{addr:x} (width {width}) out of bounds (heap size {})",
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn read_u8(&self, addr: u32) -> Result<u8, Trap> {
        self.bounds_check(addr, 1)?;
        Ok(self.data[addr as usize])
    }

    pub fn write_u8(&mut self, addr: u32, value: u8) -> Result<(), Trap> {
        self.bounds_check(addr, 1)?;
        self.data[addr as usize] = value;
        Ok(())
    }

    pub fn read_u32(&self, addr: u32) -> Result<u32, Trap> {
        self.bounds_check(addr, 4)?;
        let a = addr as usize;
        Ok(u32::from_le_bytes(
            self.data[a..a + 4].try_into().unwrap(),
        ))
    }

    pub fn write_u32(&mut self, addr: u32, value: u32) -> Result<(), Trap> {
        self.bounds_check(addr, 4)?;
        let a = addr as usize;
        self.data[a..a + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn read_i32(&self, addr: u32) -> Result<i32, Trap> {
        Ok(self.read_u32(addr)? as i32)
    }

    pub fn write_i32(&mut self, addr: u32, value: i32) -> Result<(), Trap> {
        self.write_u32(addr, value as u32)
    }

    /// read a NUL-terminated byte string starting at `addr`, used by
    /// `ATHROW` to turn a popped message pointer into a diagnostic.
    pub fn read_c_string(&self, addr: u32) -> Result<String, Trap> {
        let mut bytes = Vec::new();
        let mut cursor = addr;
        loop {
            let b = self.read_u8(cursor)?;
            if b == 0 {
                break;
            }
            bytes.push(b);
            cursor += 1;
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn address_zero_is_reserved() {
        let heap = Heap::new();
        // reading address 0 succeeds (it's the reserved sentinel byte) but
        // no allocation ever returns it.
        assert_eq!(heap.read_u8(0).unwrap(), 0);
    }

    #[test]
    fn alloc_returns_increasing_nonzero_addresses() {
        let mut heap = Heap::new();
        let a = heap.alloc(4);
        let b = heap.alloc(8);
        assert!(a >= 1);
        assert!(b > a);
    }

    #[test]
    fn alloc_is_zero_initialized() {
        let mut heap = Heap::new();
        let addr = heap.alloc(4);
        assert_eq!(heap.read_u32(addr).unwrap(), 0);
    }

    #[test]
    fn array_round_trips_count_and_elements() {
        let mut heap = Heap::new();
        let descriptor = heap.alloc_array(3, 4);
        assert_eq!(heap.array_len(descriptor).unwrap(), 3);
        let elt1 = heap.array_element_address(descriptor, 1).unwrap();
        heap.write_i32(elt1, 99).unwrap();
        assert_eq!(heap.read_i32(elt1).unwrap(), 99);
    }

    #[test]
    fn string_pool_is_addressable_from_base() {
        let mut heap = Heap::new();
        let base = heap.load_string_pool(b"hi\0");
        assert_eq!(heap.read_c_string(base).unwrap(), "hi");
    }

    #[test]
    fn out_of_bounds_read_traps_memory() {
        let heap = Heap::new();
        assert!(matches!(heap.read_u32(1000), Err(Trap::Memory(_))));
    }
}
