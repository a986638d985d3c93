//! The kernel's frame allocator instance.
//!
//! Boot code calls [`kinit`] (or [`init`] with an explicit range) once on the
//! boot hart. Everything else (kernel stacks, page-table pages, pipe buffers,
//! user pages) goes through [`kalloc`] and [`kfree`].

use crate::frame_alloc::FrameAllocator;
use kernel_memory_addresses::{PhysicalAddress, PhysicalPage, Size4K};
use kernel_sync::{Hart, SyncOnceCell};

pub type KernelFrameAllocator = FrameAllocator<&'static dyn Hart>;

static KMEM: SyncOnceCell<KernelFrameAllocator> = SyncOnceCell::new();

/// Installs the global allocator over `[end, top)` and fills it.
///
/// # Safety
/// See [`FrameAllocator::init`].
///
/// # Panics
/// Panics if the global allocator was already installed.
pub unsafe fn init(
    hart: &'static dyn Hart,
    end: PhysicalAddress,
    top: PhysicalAddress,
) -> &'static KernelFrameAllocator {
    let Ok(kmem) = KMEM.set(FrameAllocator::new(hart, end, top)) else {
        panic!("kinit: frame allocator initialized twice");
    };
    unsafe { kmem.init() };
    kmem
}

/// Installs the global allocator over `[end, PHYSTOP)`, taking `end` from
/// the linker script.
///
/// # Safety
/// Boot hart only, before any other hart runs, with RAM identity-mapped.
#[cfg(target_arch = "riscv64")]
pub unsafe fn kinit() -> &'static KernelFrameAllocator {
    use kernel_info::memory::PHYSTOP;
    use kernel_sync::RiscvHart;

    static HART: RiscvHart = RiscvHart::new();

    unsafe extern "C" {
        /// First address after the kernel image, defined by `kernel.ld`.
        static end: u8;
    }

    let end = PhysicalAddress::from_ptr(&raw const end);
    unsafe { init(&HART, end, PhysicalAddress::new(PHYSTOP)) }
}

/// The installed allocator, if any.
pub fn allocator() -> Option<&'static KernelFrameAllocator> {
    KMEM.get()
}

fn installed() -> &'static KernelFrameAllocator {
    let Some(kmem) = KMEM.get() else {
        panic!("kmem: allocator used before kinit");
    };
    kmem
}

/// Allocates one frame. See [`FrameAllocator::alloc_frame`].
pub fn kalloc() -> Option<PhysicalPage<Size4K>> {
    installed().alloc_frame()
}

/// Allocates one zero-filled frame.
pub fn kalloc_zeroed() -> Option<PhysicalPage<Size4K>> {
    installed().alloc_zeroed()
}

/// Frees one frame. See [`FrameAllocator::free_frame`].
///
/// # Safety
/// `frame` must have come from [`kalloc`] and must not be used afterwards.
pub unsafe fn kfree(frame: PhysicalAddress) {
    unsafe { installed().free_frame(frame) }
}
