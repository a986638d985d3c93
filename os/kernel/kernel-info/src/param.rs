//! # Table Sizes

/// Maximum number of harts the kernel brings up.
pub const NCPU: usize = 8;

/// Mapping slots per process.
pub const NVMA: usize = 16;

/// Open files per process.
pub const NOFILE: usize = 16;

const _: () = {
    assert!(NCPU > 0);
    assert!(NVMA > 0);
    assert!(NOFILE > 0);
};
