//! # File-Backed Memory Mappings
//!
//! Per-process table of virtual memory areas (VMAs) created by `mmap` and
//! torn down by `munmap`.
//!
//! ## Model
//!
//! A mapping is placed at the top of the process image, which is grown to
//! cover it, and is filled from the file right away. There is no fault path:
//! once `mmap` returns, the bytes are in memory.
//!
//! ```text
//!   0 ┌──────────────┐
//!     │ text, data,  │
//!     │ heap         │
//!  sz ├──────────────┤ ◄─ PGROUNDUP(sz) is where the next mapping goes
//!     │ mapping A    │    (file bytes, zero past EOF)
//!     ├──────────────┤
//!     │ mapping B    │
//!     └──────────────┘ ◄─ new sz
//! ```
//!
//! `munmap` may remove a mapping entirely or trim it from either end; it
//! never splits one in two. `MAP_SHARED` mappings of a file opened for
//! writing write their bytes back before the pages go away; `MAP_PRIVATE`
//! changes are dropped.
//!
//! ## Collaborators
//!
//! The table does not own memory, files or the journal. It drives them
//! through traits:
//!
//! | Trait | Kernel counterpart |
//! |-------|-------------------|
//! | [`AddressSpace`] | `p->sz`, `growproc`, `uvmunmap`, `copyout`/`copyin` |
//! | [`File`] | open file (`struct file`); `Arc` clone/drop is `filedup`/`fileclose` |
//! | [`Inode`] | `ilock`/`iunlock`, `readi`/`writei` |
//! | [`FsLog`] | `begin_op`/`end_op` |
//!
//! Each VMA holds its own `Arc<dyn File>`, so a file stays open as long as
//! any mapping of it exists.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod address_space;
mod error;
mod flags;
mod fs;
mod table;
mod vma;

pub use address_space::{AddressSpace, AddressSpaceError};
pub use error::VmaError;
pub use flags::{MapFlags, Prot, Sharing};
pub use fs::{File, FsError, FsLog, Inode, LockedInode, LogOp};
pub use table::{MmapRequest, VmaTable};
pub use vma::Vma;
