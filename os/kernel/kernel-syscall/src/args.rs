use crate::{Process, SyscallError};
use alloc::sync::Arc;
use kernel_info::param::NOFILE;
use kernel_memory_addresses::VirtualAddress;
use kernel_vma::File;

/// Argument `n` as a C `int`.
#[allow(clippy::cast_possible_truncation)]
pub fn argint<P: Process + ?Sized>(p: &P, n: usize) -> i32 {
    p.trap_frame().arg(n) as i32
}

/// Argument `n` as a user virtual address. Not checked; the copy routines
/// do that.
pub fn argaddr<P: Process + ?Sized>(p: &P, n: usize) -> VirtualAddress {
    VirtualAddress::new(p.trap_frame().arg(n))
}

/// Argument `n` as a file descriptor, with the open file it names.
///
/// The returned `Arc` is a new reference; dropping it undoes the `filedup`.
///
/// # Errors
/// [`SyscallError::BadFileDescriptor`] when `fd` is out of range or not open.
pub fn argfd<P: Process + ?Sized>(p: &P, n: usize) -> Result<(i32, Arc<dyn File>), SyscallError> {
    let fd = argint(p, n);
    let file = usize::try_from(fd)
        .ok()
        .filter(|&i| i < NOFILE)
        .and_then(|i| p.file(i))
        .ok_or(SyscallError::BadFileDescriptor(fd))?;
    Ok((fd, Arc::clone(file)))
}
