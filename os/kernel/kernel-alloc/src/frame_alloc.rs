//! Per-hart physical frame allocator.

use crate::free_list::{FreeList, FreeNode};
use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicBool, Ordering};
use kernel_info::param::NCPU;
use kernel_memory_addresses::{PageSize, PhysicalAddress, PhysicalPage, Size4K};
use kernel_sync::{Hart, SpinLock, current_hart_id};

/// Byte written over every freed frame so stale readers see garbage.
pub const JUNK: u8 = 0x01;

#[allow(clippy::cast_possible_truncation)]
const FRAME_BYTES: usize = Size4K::SIZE as usize;

/// Hands out 4 KiB frames from `[PGROUNDUP(end), top)`.
///
/// Each of the `N` harts owns one free list behind its own lock. Frees go to
/// the freeing hart's list; allocations try the local list first and then
/// take a single frame from the first peer (in index order) that has one.
/// No call ever holds more than one list lock.
///
/// `N` defaults to [`NCPU`]; tests pick smaller machines.
pub struct FrameAllocator<H: Hart, const N: usize = NCPU> {
    hart: H,
    /// First byte past the kernel image. Frees below this address are bugs.
    end: PhysicalAddress,
    /// One past the last managed byte (`PHYSTOP`).
    top: PhysicalAddress,
    kmem: [SpinLock<FreeList>; N],
    initialized: AtomicBool,
}

impl<H: Hart, const N: usize> FrameAllocator<H, N> {
    /// Describes the managed range. No memory is touched until [`init`](Self::init).
    ///
    /// # Panics
    /// Panics if `N` is zero or `end` lies above `top`.
    #[must_use]
    pub const fn new(hart: H, end: PhysicalAddress, top: PhysicalAddress) -> Self {
        assert!(N > 0, "frame allocator needs at least one hart");
        assert!(end.as_u64() <= top.as_u64(), "kernel image ends above PHYSTOP");
        Self {
            hart,
            end,
            top,
            kmem: [const { SpinLock::named("kmem", FreeList::new()) }; N],
            initialized: AtomicBool::new(false),
        }
    }

    /// Puts every frame of the managed range on the calling hart's list.
    ///
    /// # Safety
    /// `[end, top)` must be RAM that nothing else uses, writable through the
    /// identity mapping, for the lifetime of the allocator.
    ///
    /// # Panics
    /// Panics when called a second time.
    pub unsafe fn init(&self) {
        assert!(
            !self.initialized.swap(true, Ordering::AcqRel),
            "kinit: frame allocator initialized twice"
        );

        let first = self.end.align_up::<Size4K>();
        let mut frame = first;
        let mut count = 0_usize;
        while frame.as_u64() + Size4K::SIZE <= self.top.as_u64() {
            unsafe { self.free_frame(frame) };
            frame += Size4K::SIZE;
            count += 1;
        }

        log::debug!(
            "kinit: {count} frames in [{first}, {}) on hart {}",
            self.top,
            current_hart_id(&self.hart)
        );
    }

    /// Returns `frame` to the calling hart's free list.
    ///
    /// The whole frame is overwritten with [`JUNK`] first.
    ///
    /// # Safety
    /// `frame` must have come from [`alloc_frame`](Self::alloc_frame) (or be
    /// part of the range during [`init`](Self::init)) and must not be used
    /// again by the caller.
    ///
    /// # Panics
    /// Panics if `frame` is not page-aligned, lies below the kernel end, or
    /// at or above `top`.
    pub unsafe fn free_frame(&self, frame: PhysicalAddress) {
        assert!(
            frame.is_aligned::<Size4K>() && frame >= self.end && frame < self.top,
            "kfree: bad frame {frame}"
        );

        let Some(node) = NonNull::new(frame.as_mut_ptr::<FreeNode>()) else {
            panic!("kfree: null frame");
        };
        unsafe { ptr::write_bytes(node.as_ptr().cast::<u8>(), JUNK, FRAME_BYTES) };

        let cpu = current_hart_id(&self.hart);
        let mut list = self.list(cpu).lock_irq(&self.hart);
        unsafe { list.push(node) };
    }

    /// Takes one frame, preferring the calling hart's list.
    ///
    /// The contents are whatever the previous owner (or the junk fill) left;
    /// use [`alloc_zeroed`](Self::alloc_zeroed) when that matters. Returns
    /// `None` only when every list is empty.
    pub fn alloc_frame(&self) -> Option<PhysicalPage<Size4K>> {
        let cpu = current_hart_id(&self.hart);
        let local = self.list(cpu).lock_irq(&self.hart).pop();
        let node = match local {
            Some(node) => node,
            None => self.steal(cpu)?,
        };
        Some(PhysicalPage::containing_address(PhysicalAddress::from_ptr(
            node.as_ptr(),
        )))
    }

    /// Like [`alloc_frame`](Self::alloc_frame), but the frame is zero-filled.
    pub fn alloc_zeroed(&self) -> Option<PhysicalPage<Size4K>> {
        let frame = self.alloc_frame()?;
        // SAFETY: the frame was just unlinked; nobody else can reach it
        unsafe { ptr::write_bytes(frame.as_mut_ptr::<u8>(), 0, FRAME_BYTES) };
        Some(frame)
    }

    /// Pops one frame off the first peer list that has any.
    fn steal(&self, thief: usize) -> Option<NonNull<FreeNode>> {
        (0..N).filter(|&victim| victim != thief).find_map(|victim| {
            let list = self.list(victim);
            let node = list.lock_irq(&self.hart).pop()?;
            log::trace!("{}: hart {thief} took a frame from hart {victim}", list.name());
            Some(node)
        })
    }

    fn list(&self, cpu: usize) -> &SpinLock<FreeList> {
        match self.kmem.get(cpu) {
            Some(list) => list,
            None => panic!("kalloc: hart {cpu} exceeds configured {N}"),
        }
    }

    /// Frames currently on hart `cpu`'s list.
    ///
    /// # Panics
    /// Panics if `cpu >= N`.
    pub fn free_frames(&self, cpu: usize) -> usize {
        self.list(cpu).lock_irq(&self.hart).len()
    }

    /// Frames on all lists. Not a snapshot: lists are visited one at a time.
    pub fn total_free(&self) -> usize {
        (0..N).map(|cpu| self.free_frames(cpu)).sum()
    }

    /// Number of whole frames in `[PGROUNDUP(end), top)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn managed_frames(&self) -> usize {
        let first = self.end.align_up::<Size4K>().as_u64();
        if first >= self.top.as_u64() {
            return 0;
        }
        ((self.top.as_u64() - first) / Size4K::SIZE) as usize
    }

    /// Whether `frame` lies in the range this allocator accepts back.
    #[must_use]
    pub fn contains(&self, frame: PhysicalAddress) -> bool {
        frame >= self.end && frame < self.top
    }

    #[must_use]
    pub const fn hart(&self) -> &H {
        &self.hart
    }

    #[must_use]
    pub const fn end(&self) -> PhysicalAddress {
        self.end
    }

    #[must_use]
    pub const fn top(&self) -> PhysicalAddress {
        self.top
    }
}
