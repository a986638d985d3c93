use crate::{File, Prot, Sharing};
use alloc::sync::Arc;
use core::fmt;
use kernel_memory_addresses::VirtualAddress;

/// One mapped range of a file.
///
/// # Invariants
/// - `addr` is page aligned and `length` is a positive multiple of the page
///   size.
/// - `offset` is the file position backing `addr`.
#[derive(Clone)]
pub struct Vma {
    pub(crate) addr: VirtualAddress,
    pub(crate) length: u64,
    pub(crate) prot: Prot,
    pub(crate) sharing: Sharing,
    pub(crate) file: Arc<dyn File>,
    pub(crate) offset: u64,
}

/// How an unmap range relates to the mapping it falls in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Trim {
    /// The whole mapping goes.
    Full,
    /// A prefix goes; the mapping now starts later.
    Head,
    /// A suffix goes; the mapping now ends earlier.
    Tail,
}

impl Vma {
    #[must_use]
    pub const fn addr(&self) -> VirtualAddress {
        self.addr
    }

    #[must_use]
    pub const fn length(&self) -> u64 {
        self.length
    }

    /// One past the last mapped byte.
    #[must_use]
    pub const fn end(&self) -> VirtualAddress {
        VirtualAddress::new(self.addr.as_u64() + self.length)
    }

    #[must_use]
    pub const fn prot(&self) -> Prot {
        self.prot
    }

    #[must_use]
    pub const fn sharing(&self) -> Sharing {
        self.sharing
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn file(&self) -> &Arc<dyn File> {
        &self.file
    }

    #[must_use]
    pub fn contains(&self, va: VirtualAddress) -> bool {
        va >= self.addr && va < self.end()
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.addr < other.end() && other.addr < self.end()
    }

    /// Whether stores to this mapping must reach the file on unmap.
    ///
    /// User pages are always writable, so any shared mapping of a file
    /// opened for writing qualifies, whatever `prot` says.
    #[must_use]
    pub fn writes_back(&self) -> bool {
        self.sharing == Sharing::Shared && self.file.writable()
    }

    /// Classifies removing `[start, end)`, which must lie inside this
    /// mapping. `None` means the range is strictly interior.
    pub(crate) fn trim(&self, start: VirtualAddress, end: VirtualAddress) -> Option<Trim> {
        debug_assert!(start >= self.addr && end <= self.end() && start < end);
        match (start == self.addr, end == self.end()) {
            (true, true) => Some(Trim::Full),
            (true, false) => Some(Trim::Head),
            (false, true) => Some(Trim::Tail),
            (false, false) => None,
        }
    }
}

impl fmt::Debug for Vma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vma")
            .field("addr", &self.addr)
            .field("length", &self.length)
            .field("prot", &self.prot)
            .field("sharing", &self.sharing)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}
