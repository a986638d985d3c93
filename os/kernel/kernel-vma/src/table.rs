use crate::vma::{Trim, Vma};
use crate::{
    AddressSpace, AddressSpaceError, File, FsLog, LockedInode, LogOp, MapFlags, Prot, Sharing,
    VmaError,
};
use alloc::sync::Arc;
use kernel_info::memory::MAXVA;
use kernel_info::param::NVMA;
use kernel_memory_addresses::{PageSize, Size4K, VirtualAddress};

/// Bytes moved between file and user memory per step; one disk block.
const CHUNK: usize = 1024;

/// Arguments of one `mmap` call.
pub struct MmapRequest {
    /// Requested address. Ignored: mappings always go at the top of the image.
    pub hint: VirtualAddress,
    pub length: u64,
    pub prot: Prot,
    pub flags: MapFlags,
    /// The caller's reference; the mapping keeps it on success.
    pub file: Arc<dyn File>,
    pub offset: u64,
}

/// The `NVMA` mapping slots of one process.
///
/// No lock: only the owning process touches its table, which `&mut self`
/// expresses. Cloning the table (fork) takes a new file reference for every
/// live mapping.
#[derive(Clone, Debug)]
pub struct VmaTable {
    slots: [Option<Vma>; NVMA],
}

impl Default for VmaTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VmaTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; NVMA],
        }
    }

    /// Maps `req.length` bytes of `req.file` starting at `req.offset`.
    ///
    /// The mapping starts at `PGROUNDUP(space.size())`; the image grows to
    /// the end of its last page and the file contents are read in before
    /// returning. Bytes past end of file read as zero.
    ///
    /// # Errors
    /// See [`VmaError`]. On error the table and the image are unchanged and
    /// the request's file reference has been dropped.
    pub fn mmap<A: AddressSpace + ?Sized>(
        &mut self,
        space: &mut A,
        log: &dyn FsLog,
        req: MmapRequest,
    ) -> Result<VirtualAddress, VmaError> {
        if req.length == 0 {
            return Err(VmaError::InvalidLength);
        }
        let sharing = Sharing::from_flags(req.flags).ok_or(VmaError::InvalidFlags)?;
        let inode = req.file.inode().ok_or(VmaError::NotMappable)?;
        if !req.file.readable() {
            return Err(VmaError::PermissionDenied);
        }
        if sharing == Sharing::Shared && req.prot.contains(Prot::WRITE) && !req.file.writable() {
            return Err(VmaError::PermissionDenied);
        }
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(VmaError::NoFreeSlot)?;

        if req.hint != VirtualAddress::zero() {
            log::trace!("mmap: ignoring address hint {}", req.hint);
        }

        let old_size = space.size();
        let addr = VirtualAddress::new(old_size)
            .checked_align_up::<Size4K>()
            .ok_or(AddressSpaceError::TooLarge)?;
        let length = round_up_len(req.length).ok_or(AddressSpaceError::TooLarge)?;
        let grown = (addr - VirtualAddress::new(old_size))
            .checked_add(length)
            .filter(|&g| old_size.checked_add(g).is_some_and(|top| top <= MAXVA))
            .ok_or(AddressSpaceError::TooLarge)?;
        space.grow(grown)?;

        let filled = {
            let _op = LogOp::begin(log);
            let ip = LockedInode::lock(inode);
            fill(space, &ip, addr, req.offset, req.length)
        };
        if let Err(e) = filled {
            space.shrink(grown);
            return Err(e);
        }

        log::debug!(
            "mmap: {addr}+{length:#x} {:?} {sharing:?} offset {:#x}",
            req.prot,
            req.offset
        );
        self.slots[slot] = Some(Vma {
            addr,
            length,
            prot: req.prot,
            sharing,
            file: req.file,
            offset: req.offset,
        });
        Ok(addr)
    }

    /// Removes `[addr, addr + length)` from the mapping containing `addr`.
    ///
    /// `length` is rounded up to whole pages. The range must end inside the
    /// same mapping and either start where it starts or end where it ends.
    /// Shared mappings of writable files are written back first; the pages are then
    /// unmapped and their frames freed. Removing the whole mapping releases
    /// its file reference.
    ///
    /// # Errors
    /// See [`VmaError`].
    ///
    /// # Panics
    /// Panics if the range lies strictly inside the mapping, which would
    /// split it in two.
    pub fn munmap<A: AddressSpace + ?Sized>(
        &mut self,
        space: &mut A,
        log: &dyn FsLog,
        addr: VirtualAddress,
        length: u64,
    ) -> Result<(), VmaError> {
        if !addr.is_aligned::<Size4K>() {
            return Err(VmaError::Misaligned(addr));
        }
        if length == 0 {
            return Err(VmaError::InvalidLength);
        }
        let length = round_up_len(length).ok_or(VmaError::InvalidRange)?;
        let end = addr.checked_add(length).ok_or(VmaError::InvalidRange)?;

        let (slot, vma) = self
            .slots
            .iter_mut()
            .enumerate()
            .find_map(|(i, s)| s.as_mut().filter(|v| v.contains(addr)).map(|v| (i, v)))
            .ok_or(VmaError::NotMapped(addr))?;
        if end > vma.end() {
            return Err(VmaError::InvalidRange);
        }
        let Some(trim) = vma.trim(addr, end) else {
            panic!("munmap: [{addr}, {end}) would punch a hole into {vma:?}");
        };

        if vma.writes_back() {
            write_back(space, log, vma, addr, length)?;
        }
        space.unmap(addr, length / Size4K::SIZE, true);

        log::debug!("munmap: {addr}+{length:#x} {trim:?} of {vma:?}");
        match trim {
            Trim::Tail => vma.length = addr - vma.addr,
            Trim::Head => {
                vma.addr = end;
                vma.offset += length;
                vma.length -= length;
            }
            Trim::Full => {
                // dropping the slot drops its file reference
                self.slots[slot] = None;
            }
        }
        Ok(())
    }

    /// Unmaps everything, as process exit does.
    ///
    /// Every slot is released and its pages unmapped and freed, even if
    /// writing one of them back fails.
    ///
    /// # Errors
    /// Returns the first write-back failure.
    pub fn release_all<A: AddressSpace + ?Sized>(
        &mut self,
        space: &mut A,
        log: &dyn FsLog,
    ) -> Result<(), VmaError> {
        let mut result = Ok(());
        for vma in self.slots.iter_mut().filter_map(Option::take) {
            if vma.writes_back() {
                let written = write_back(space, log, &vma, vma.addr, vma.length);
                result = result.and(written);
            }
            space.unmap(vma.addr, vma.length / Size4K::SIZE, true);
            log::debug!("exit: released {vma:?}");
        }
        result
    }

    /// The mapping containing `va`.
    #[must_use]
    pub fn find(&self, va: VirtualAddress) -> Option<&Vma> {
        self.iter().find(|v| v.contains(va))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vma> {
        self.slots.iter().flatten()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn used(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used() == 0
    }
}

fn round_up_len(length: u64) -> Option<u64> {
    VirtualAddress::new(length)
        .checked_align_up::<Size4K>()
        .map(VirtualAddress::as_u64)
}

#[allow(clippy::cast_possible_truncation)]
fn chunk_len(remaining: u64) -> usize {
    remaining.min(CHUNK as u64) as usize
}

/// Copies up to `length` file bytes from `offset` to user memory at `addr`.
fn fill<A: AddressSpace + ?Sized>(
    space: &mut A,
    ip: &LockedInode<'_>,
    addr: VirtualAddress,
    offset: u64,
    length: u64,
) -> Result<(), VmaError> {
    let mut buf = [0u8; CHUNK];
    let mut done = 0;
    while done < length {
        let want = chunk_len(length - done);
        let got = ip.read_at(offset + done, &mut buf[..want])?;
        if got == 0 {
            break;
        }
        space.copy_out(addr + done, &buf[..got])?;
        done += got as u64;
        if got < want {
            break;
        }
    }
    Ok(())
}

/// Writes `[addr, addr + length)` of `vma` back to its file.
///
/// One journal operation per chunk so a large mapping never outgrows the
/// log. Nothing is written at or past the current end of file.
fn write_back<A: AddressSpace + ?Sized>(
    space: &A,
    log: &dyn FsLog,
    vma: &Vma,
    addr: VirtualAddress,
    length: u64,
) -> Result<(), VmaError> {
    let inode = vma.file.inode().ok_or(VmaError::NotMappable)?;
    let base = vma.offset + (addr - vma.addr);
    let mut buf = [0u8; CHUNK];
    let mut done = 0;
    while done < length {
        let _op = LogOp::begin(log);
        let ip = LockedInode::lock(inode);
        let pos = base + done;
        let size = ip.size();
        if pos >= size {
            break;
        }
        let n = chunk_len((length - done).min(size - pos));
        space.copy_in(&mut buf[..n], addr + done)?;
        ip.write_all_at(pos, &buf[..n])?;
        done += n as u64;
    }
    Ok(())
}
