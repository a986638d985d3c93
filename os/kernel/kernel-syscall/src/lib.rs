//! # System-call surface
//!
//! User code traps with the call number in `a7` and up to six arguments in
//! `a0..a5`; the result goes back in `a0`. [`syscall`] decodes the number and
//! hands the current [`Process`] to the matching `sys_*` function, which
//! fetches its own arguments from the saved [`TrapFrame`].
//!
//! Handlers return `Result`; only [`syscall`] turns an error into the
//! `(uint64)-1` user code sees.

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod args;
mod error;
mod mmap;
mod process;
mod sysno;
mod trap_frame;

pub use args::{argaddr, argfd, argint};
pub use error::SyscallError;
pub use mmap::{sys_mmap, sys_munmap};
pub use process::Process;
pub use sysno::Sysno;
pub use trap_frame::TrapFrame;

use kernel_vma::FsLog;

/// What user code reads back in `a0` when a call fails.
pub const SYSCALL_ERROR: u64 = u64::MAX;

/// Runs the system call recorded in `p`'s trap frame and stores its result
/// in `a0`.
pub fn syscall<P: Process + ?Sized>(p: &mut P, log: &dyn FsLog) {
    let num = p.trap_frame().a7;
    let result = match Sysno::try_from(num) {
        Ok(Sysno::Mmap) => sys_mmap(p, log),
        Ok(Sysno::Munmap) => sys_munmap(p, log),
        Err(e) => Err(e),
    };
    p.trap_frame_mut().a0 = match result {
        Ok(value) => value,
        Err(SyscallError::UnknownSyscall(num)) => {
            log::warn!("pid {}: unknown sys call {num}", p.pid());
            SYSCALL_ERROR
        }
        Err(e) => {
            log::debug!("pid {}: sys call {num} failed: {e}", p.pid());
            SYSCALL_ERROR
        }
    };
}
