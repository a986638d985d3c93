//! # Kernel synchronization primitives
//!
//! * [`SpinLock`]: test-and-test-and-set lock with an RAII guard.
//! * [`Hart`]: identity of the executing hart plus the nesting
//!   `push_off`/`pop_off` interrupt switch.
//! * [`PushOff`]: RAII form of `push_off`/`pop_off`.
//! * [`SpinLock::lock_irq`]: acquire with interrupts masked on this hart.
//! * [`SyncOnceCell`]: write-once global slot.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod hart;
pub mod irq;
mod spin_lock;
mod sync_once_cell;

#[cfg(target_arch = "riscv64")]
pub use hart::RiscvHart;
pub use hart::{Hart, current_hart_id};
pub use irq::{IrqSpinLockGuard, PushOff};
pub use spin_lock::{SpinLock, SpinLockGuard};
pub use sync_once_cell::SyncOnceCell;
