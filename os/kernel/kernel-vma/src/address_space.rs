use kernel_memory_addresses::VirtualAddress;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressSpaceError {
    #[error("out of memory")]
    OutOfMemory,
    #[error("address space exhausted")]
    TooLarge,
    #[error("access to unmapped address {0}")]
    Unmapped(VirtualAddress),
}

/// The user half of one process's memory.
///
/// The image is a single range `[0, size)` that only moves at the top;
/// `unmap` may leave holes below `size` that stay holes.
pub trait AddressSpace {
    /// Current image size in bytes (`p->sz`).
    fn size(&self) -> u64;

    /// Extends the image by `bytes`, backing the new pages with zeroed
    /// frames (`growproc(n)`, `n > 0`).
    ///
    /// # Errors
    /// On failure nothing has changed.
    fn grow(&mut self, bytes: u64) -> Result<(), AddressSpaceError>;

    /// Undoes the most recent [`grow`](Self::grow) of `bytes`
    /// (`growproc(-n)`).
    fn shrink(&mut self, bytes: u64);

    /// Removes `npages` mappings starting at page-aligned `va`, returning
    /// their frames to the allocator when `free` is set (`uvmunmap`).
    ///
    /// # Panics
    /// Implementations panic if a page in the range is not mapped.
    fn unmap(&mut self, va: VirtualAddress, npages: u64, free: bool);

    /// Copies `src` into user memory at `dst` (`copyout`).
    ///
    /// # Errors
    /// Fails if any destination page is unmapped.
    fn copy_out(&mut self, dst: VirtualAddress, src: &[u8]) -> Result<(), AddressSpaceError>;

    /// Copies user memory at `src` into `dst` (`copyin`).
    ///
    /// # Errors
    /// Fails if any source page is unmapped.
    fn copy_in(&self, dst: &mut [u8], src: VirtualAddress) -> Result<(), AddressSpaceError>;
}
