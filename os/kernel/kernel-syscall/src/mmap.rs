use crate::{Process, SyscallError, argaddr, argfd, argint};
use kernel_vma::{FsLog, MapFlags, MmapRequest, Prot};

/// `void *mmap(void *addr, int length, int prot, int flags, int fd, int offset)`
///
/// # Errors
/// Negative `length` or `offset`, a bad descriptor, or anything
/// [`VmaTable::mmap`](kernel_vma::VmaTable::mmap) rejects.
#[allow(clippy::cast_sign_loss)]
pub fn sys_mmap<P: Process + ?Sized>(p: &mut P, log: &dyn FsLog) -> Result<u64, SyscallError> {
    let hint = argaddr(p, 0);
    let length = argint(p, 1);
    let prot = argint(p, 2);
    let flags = argint(p, 3);
    let (_, file) = argfd(p, 4)?;
    let offset = argint(p, 5);

    let length = u64::try_from(length).map_err(|_| SyscallError::Negative("length"))?;
    let offset = u64::try_from(offset).map_err(|_| SyscallError::Negative("offset"))?;

    let req = MmapRequest {
        hint,
        length,
        prot: Prot::from_bits_truncate(prot as u32),
        flags: MapFlags::from_bits_truncate(flags as u32),
        file,
        offset,
    };
    let (table, space) = p.vm();
    let addr = table.mmap(space, log, req)?;
    Ok(addr.as_u64())
}

/// `int munmap(void *addr, int length)`
///
/// # Errors
/// Negative `length`, or anything
/// [`VmaTable::munmap`](kernel_vma::VmaTable::munmap) rejects.
pub fn sys_munmap<P: Process + ?Sized>(p: &mut P, log: &dyn FsLog) -> Result<u64, SyscallError> {
    let addr = argaddr(p, 0);
    let length = u64::try_from(argint(p, 1)).map_err(|_| SyscallError::Negative("length"))?;
    let (table, space) = p.vm();
    table.munmap(space, log, addr, length)?;
    Ok(0)
}
