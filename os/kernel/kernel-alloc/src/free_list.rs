use core::ptr::{self, NonNull};

/// Link stored in the first bytes of every **free** frame.
///
/// ```text
/// +-----------+--------------------------------------+
/// | FreeNode  |  0x01 poison (rest of the 4 KiB)     |
/// +-----------+--------------------------------------+
/// ^ frame base
/// ```
///
/// Allocated frames carry no header; the node only exists while the frame
/// sits on a list.
#[repr(C)]
pub(crate) struct FreeNode {
    next: *mut FreeNode,
}

/// Intrusive LIFO stack of free frames belonging to one hart.
///
/// # Invariants
/// - Every node is the base of a frame that is on this list and no other.
/// - `len` equals the number of nodes reachable from `head`.
pub(crate) struct FreeList {
    head: *mut FreeNode,
    len: usize,
}

// Safety: the list is only reached through its SpinLock; nodes are frames
// the allocator owns exclusively.
unsafe impl Send for FreeList {}

impl FreeList {
    pub(crate) const fn new() -> Self {
        Self {
            head: ptr::null_mut(),
            len: 0,
        }
    }

    /// Pushes `node` on top of the stack.
    ///
    /// # Safety
    /// `node` must point to a writable, suitably aligned frame that is not
    /// on any list and not referenced by anyone else.
    pub(crate) unsafe fn push(&mut self, node: NonNull<FreeNode>) {
        let node = node.as_ptr();
        unsafe { node.write(FreeNode { next: self.head }) };
        self.head = node;
        self.len += 1;
    }

    /// Unlinks and returns the most recently pushed frame.
    pub(crate) fn pop(&mut self) -> Option<NonNull<FreeNode>> {
        let head = NonNull::new(self.head)?;
        // SAFETY: list invariant, head is a live FreeNode owned by this list
        self.head = unsafe { head.as_ptr().read().next };
        self.len -= 1;
        Some(head)
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }
}
