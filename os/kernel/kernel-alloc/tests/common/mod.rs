#![allow(dead_code)]

use kernel_memory_addresses::PhysicalAddress;
use kernel_sync::Hart;
use std::alloc::{Layout, alloc, dealloc};
use std::cell::Cell;

pub const PAGE: usize = 4096;

thread_local! {
    static CPU: Cell<usize> = const { Cell::new(0) };
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Each test thread plays one hart; `on_cpu` picks which.
pub struct TestHart;

impl TestHart {
    pub fn on_cpu(id: usize) {
        CPU.set(id);
    }

    pub fn depth() -> usize {
        DEPTH.get()
    }
}

impl Hart for TestHart {
    fn id(&self) -> usize {
        assert!(DEPTH.get() > 0, "hart id read with interrupts enabled");
        CPU.get()
    }

    fn push_off(&self) {
        DEPTH.set(DEPTH.get() + 1);
    }

    fn pop_off(&self) {
        let depth = DEPTH.get();
        assert!(depth > 0, "pop_off without push_off");
        DEPTH.set(depth - 1);
    }
}

/// Page-aligned heap block standing in for physical RAM.
pub struct Arena {
    ptr: *mut u8,
    layout: Layout,
}

// The arena is only ever touched through the allocator under test.
unsafe impl Send for Arena {}
unsafe impl Sync for Arena {}

impl Arena {
    pub fn new(bytes: usize) -> Self {
        let layout = Layout::from_size_align(bytes, PAGE).unwrap();
        let ptr = unsafe { alloc(layout) };
        assert!(!ptr.is_null(), "test arena allocation failed");
        Self { ptr, layout }
    }

    pub fn pages(count: usize) -> Self {
        Self::new(count * PAGE)
    }

    pub fn start(&self) -> PhysicalAddress {
        PhysicalAddress::from_ptr(self.ptr)
    }

    pub fn end(&self) -> PhysicalAddress {
        self.start() + self.layout.size() as u64
    }

    pub fn bytes_at(&self, pa: PhysicalAddress) -> &[u8] {
        assert!(pa >= self.start() && pa + PAGE as u64 <= self.end());
        unsafe { std::slice::from_raw_parts(pa.as_mut_ptr::<u8>(), PAGE) }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        unsafe { dealloc(self.ptr, self.layout) };
    }
}
