//! # Kernel Configuration
//!
//! Compile-time constants shared by every kernel crate: the physical memory
//! layout of the QEMU `virt` board and the fixed-size table parameters.
//!
//! ## Physical Memory Layout
//!
//! ```text
//! 0x0000_0000 ┌─────────────────────────────────┐
//!             │   Boot ROM, CLINT, PLIC         │
//! UART0       ├─────────────────────────────────┤ 0x1000_0000
//!             │   16550 UART registers          │
//!             ├─────────────────────────────────┤
//!             │   VirtIO MMIO                   │
//! KERNBASE    ├─────────────────────────────────┤ 0x8000_0000
//!             │   Kernel Text, Data, BSS        │
//! end         ├─────────────────────────────────┤ (linker symbol)
//!             │   Free frames                   │
//!             │   (managed by kernel-alloc)     │
//! PHYSTOP     └─────────────────────────────────┘ KERNBASE + 128 MiB
//! ```
//!
//! The frame allocator owns `[PGROUNDUP(end), PHYSTOP)`. Everything below
//! `end` belongs to the kernel image and is never handed out.
//!
//! ## Parameters
//!
//! The [`param`] module holds the table sizes that are fixed at build time:
//! the number of harts, the number of mapping slots per process and the
//! number of open files per process. None of them are resized at runtime.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod memory;
pub mod param;
