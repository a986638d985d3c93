use crate::{AddressSpaceError, FsError};
use kernel_memory_addresses::VirtualAddress;

/// Why an `mmap` or `munmap` request was refused.
///
/// The system-call layer turns every variant into `-1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VmaError {
    #[error("mapping length must be positive")]
    InvalidLength,
    #[error("exactly one of MAP_SHARED and MAP_PRIVATE is required")]
    InvalidFlags,
    #[error("file cannot be mapped")]
    NotMappable,
    #[error("permission denied")]
    PermissionDenied,
    #[error("no free mapping slot")]
    NoFreeSlot,
    #[error("address {0} is not page aligned")]
    Misaligned(VirtualAddress),
    #[error("no mapping contains {0}")]
    NotMapped(VirtualAddress),
    #[error("range runs past the end of its mapping")]
    InvalidRange,
    #[error("file I/O failed: {0}")]
    Fs(#[from] FsError),
    #[error("address space: {0}")]
    AddressSpace(#[from] AddressSpaceError),
}
