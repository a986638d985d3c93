//! # Physical Frame Allocation
//!
//! Owns every 4 KiB frame between the end of the kernel image and `PHYSTOP`
//! and hands them out one at a time.
//!
//! ## Layout
//!
//! ```text
//!            hart 0            hart 1                 hart N-1
//!        ┌────────────┐    ┌────────────┐         ┌────────────┐
//! kmem   │ lock, head │    │ lock, head │   ...   │ lock, head │
//!        └─────┬──────┘    └─────┬──────┘         └─────┬──────┘
//!              ▼                 ▼                      ▼
//!          [frame]──►        [frame]──►              (empty)
//!          [frame]──►        null
//!          null
//! ```
//!
//! The list links live inside the free frames themselves ([`free_list`]), so
//! the allocator needs no memory of its own beyond one lock and one pointer
//! per hart.
//!
//! ## Policy
//!
//! * **Free** pushes onto the list of the hart doing the free, whoever
//!   allocated the frame originally.
//! * **Alloc** pops the local list. If it is empty the hart scans its peers
//!   in index order and takes exactly one frame from the first that has any.
//! * **Init** sweeps the whole range through free, so everything starts on
//!   the boot hart's list and spreads out through stealing and frees.
//!
//! The hart id is read with interrupts disabled and only used to choose a
//! list; the list itself is protected by its lock, taken with interrupts
//! masked. At most one lock is held at any point, so there is no lock order
//! to get wrong.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kernel_alloc::kmem;
//!
//! # #[cfg(target_arch = "riscv64")]
//! let _ = unsafe { kmem::kinit() };
//! if let Some(frame) = kmem::kalloc() {
//!     // ... use the frame ...
//!     unsafe { kmem::kfree(frame.base()) };
//! }
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod frame_alloc;
mod free_list;
pub mod kmem;

pub use frame_alloc::{FrameAllocator, JUNK};
