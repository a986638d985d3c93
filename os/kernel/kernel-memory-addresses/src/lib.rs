//! # Virtual and Physical Memory Address Types
//!
//! Strongly typed wrappers for raw addresses and page bases used by the frame
//! allocator and the mapping code.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`MemoryAddress`] | A raw 64-bit address, either physical or virtual. |
//! | [`PhysicalAddress`] / [`PhysicalPage<S>`] | Physical memory (identity-mapped RAM or MMIO). |
//! | [`VirtualAddress`] / [`VirtualPage<S>`] | User virtual memory, translated by the Sv39 page table. |
//!
//! Page granularity is expressed with the sealed [`PageSize`] marker trait;
//! [`Size4K`] is the only implementation.
//!
//! `PGROUNDUP` and `PGROUNDDOWN` are `align_up` and `align_down`:
//!
//! ```rust
//! # use kernel_memory_addresses::*;
//! let end = PhysicalAddress::new(0x8002_1230);
//! assert_eq!(end.align_up::<Size4K>(), PhysicalAddress::new(0x8002_2000));
//! assert_eq!(end.align_down::<Size4K>(), PhysicalAddress::new(0x8002_1000));
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

mod memory_address;
mod page_size;
mod physical_address;
mod physical_page;
mod virtual_address;
mod virtual_page;

pub use memory_address::MemoryAddress;
pub use page_size::{PageSize, Size4K};
pub use physical_address::PhysicalAddress;
pub use physical_page::PhysicalPage;
pub use virtual_address::VirtualAddress;
pub use virtual_page::VirtualPage;
