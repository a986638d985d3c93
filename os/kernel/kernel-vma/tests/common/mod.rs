#![allow(dead_code)]

use kernel_alloc::FrameAllocator;
use kernel_memory_addresses::{
    PageSize, PhysicalAddress, PhysicalPage, Size4K, VirtualAddress, VirtualPage,
};
use kernel_sync::Hart;
use kernel_vma::{AddressSpace, AddressSpaceError, File, FsError, FsLog, Inode};
use std::alloc::{Layout, alloc, dealloc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PAGE: u64 = Size4K::SIZE;

/// Single-hart stand-in; these tests never migrate.
pub struct OneHart;

impl Hart for OneHart {
    fn id(&self) -> usize {
        0
    }
    fn push_off(&self) {}
    fn pop_off(&self) {}
}

pub type Frames = FrameAllocator<OneHart, 1>;

/// Page-aligned heap block posing as physical RAM, with an allocator on top.
pub struct Machine {
    ptr: *mut u8,
    layout: Layout,
    pub frames: Frames,
}

impl Machine {
    pub fn with_frames(count: usize) -> Self {
        let layout = Layout::from_size_align(count * PAGE as usize, PAGE as usize).unwrap();
        let ptr = unsafe { alloc(layout) };
        assert!(!ptr.is_null());
        let start = PhysicalAddress::from_ptr(ptr);
        let frames = FrameAllocator::new(OneHart, start, start + layout.size() as u64);
        unsafe { frames.init() };
        Self {
            ptr,
            layout,
            frames,
        }
    }
}

impl Drop for Machine {
    fn drop(&mut self) {
        unsafe { dealloc(self.ptr, self.layout) };
    }
}

/// A user image backed by frames from the test allocator.
pub struct PagedSpace<'m> {
    frames: &'m Frames,
    size: u64,
    pages: BTreeMap<VirtualPage<Size4K>, PhysicalPage<Size4K>>,
}

impl<'m> PagedSpace<'m> {
    pub fn new(frames: &'m Frames) -> Self {
        Self {
            frames,
            size: 0,
            pages: BTreeMap::new(),
        }
    }

    /// A process whose image already holds `bytes` of text and data.
    pub fn with_image(frames: &'m Frames, bytes: u64) -> Self {
        let mut space = Self::new(frames);
        space.grow(bytes).unwrap();
        space
    }

    pub fn read(&self, va: VirtualAddress, len: usize) -> Vec<u8> {
        let mut buf = vec![0; len];
        self.copy_in(&mut buf, va).unwrap();
        buf
    }

    pub fn write(&mut self, va: VirtualAddress, bytes: &[u8]) {
        self.copy_out(va, bytes).unwrap();
    }

    pub fn is_mapped(&self, va: VirtualAddress) -> bool {
        self.pages.contains_key(&va.page::<Size4K>())
    }

    pub fn mapped_pages(&self) -> usize {
        self.pages.len()
    }

    fn frame_bytes(&self, va: VirtualAddress) -> Result<*mut u8, AddressSpaceError> {
        let frame = self
            .pages
            .get(&va.page::<Size4K>())
            .ok_or(AddressSpaceError::Unmapped(va))?;
        Ok(unsafe { frame.as_mut_ptr::<u8>().add(va.page_offset::<Size4K>() as usize) })
    }

    fn release(&mut self, page: VirtualPage<Size4K>, free: bool) {
        let frame = self
            .pages
            .remove(&page)
            .unwrap_or_else(|| panic!("uvmunmap: {page:?} not mapped"));
        if free {
            unsafe { self.frames.free_frame(frame.base()) };
        }
    }
}

impl AddressSpace for PagedSpace<'_> {
    fn size(&self) -> u64 {
        self.size
    }

    fn grow(&mut self, bytes: u64) -> Result<(), AddressSpaceError> {
        let first = VirtualAddress::new(self.size).align_up::<Size4K>().page::<Size4K>();
        let new_size = self.size + bytes;
        let count = (VirtualAddress::new(new_size).align_up::<Size4K>() - first.base()) / PAGE;
        let mut added = Vec::new();
        for page in first.range(count) {
            let Some(frame) = self.frames.alloc_zeroed() else {
                for p in added {
                    self.release(p, true);
                }
                return Err(AddressSpaceError::OutOfMemory);
            };
            self.pages.insert(page, frame);
            added.push(page);
        }
        self.size = new_size;
        Ok(())
    }

    fn shrink(&mut self, bytes: u64) {
        let new_size = self.size - bytes;
        let first = VirtualAddress::new(new_size).align_up::<Size4K>().page::<Size4K>();
        let stale: Vec<_> = self.pages.range(first..).map(|(p, _)| *p).collect();
        for page in stale {
            self.release(page, true);
        }
        self.size = new_size;
    }

    fn unmap(&mut self, va: VirtualAddress, npages: u64, free: bool) {
        assert!(va.is_aligned::<Size4K>(), "uvmunmap: not aligned");
        for page in va.page::<Size4K>().range(npages) {
            self.release(page, free);
        }
    }

    fn copy_out(&mut self, dst: VirtualAddress, src: &[u8]) -> Result<(), AddressSpaceError> {
        for (i, byte) in src.iter().enumerate() {
            let p = self.frame_bytes(dst + i as u64)?;
            unsafe { p.write(*byte) };
        }
        Ok(())
    }

    fn copy_in(&self, dst: &mut [u8], src: VirtualAddress) -> Result<(), AddressSpaceError> {
        for (i, byte) in dst.iter_mut().enumerate() {
            let p = self.frame_bytes(src + i as u64)?;
            *byte = unsafe { p.read() };
        }
        Ok(())
    }
}

/// In-memory inode that insists on being locked around every access.
#[derive(Default)]
pub struct MemInode {
    data: Mutex<Vec<u8>>,
    locked: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemInode {
    pub fn with_contents(bytes: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(bytes.to_vec()),
            ..Self::default()
        })
    }

    /// Reads the file the way a fresh `open` + `read` would.
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }

    fn assert_locked(&self) {
        assert!(self.locked.load(Ordering::SeqCst), "inode accessed without ilock");
    }
}

impl Inode for MemInode {
    fn lock(&self) {
        assert!(!self.locked.swap(true, Ordering::SeqCst), "ilock: already locked");
    }

    fn unlock(&self) {
        assert!(self.locked.swap(false, Ordering::SeqCst), "iunlock: not locked");
    }

    fn size(&self) -> u64 {
        self.assert_locked();
        self.data.lock().unwrap().len() as u64
    }

    fn read_at(&self, offset: u64, dst: &mut [u8]) -> Result<usize, FsError> {
        self.assert_locked();
        let data = self.data.lock().unwrap();
        let offset = offset as usize;
        if offset >= data.len() {
            return Ok(0);
        }
        let n = dst.len().min(data.len() - offset);
        dst[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(n)
    }

    fn write_at(&self, offset: u64, src: &[u8]) -> Result<usize, FsError> {
        self.assert_locked();
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FsError::Io);
        }
        let mut data = self.data.lock().unwrap();
        let offset = offset as usize;
        if data.len() < offset + src.len() {
            data.resize(offset + src.len(), 0);
        }
        data[offset..offset + src.len()].copy_from_slice(src);
        Ok(src.len())
    }
}

pub struct MemFile {
    pub readable: bool,
    pub writable: bool,
    pub inode: Option<Arc<MemInode>>,
}

impl MemFile {
    pub fn open(inode: &Arc<MemInode>, readable: bool, writable: bool) -> Arc<Self> {
        Arc::new(Self {
            readable,
            writable,
            inode: Some(Arc::clone(inode)),
        })
    }

    /// Something like a pipe: readable, writable, but no inode.
    pub fn pipe() -> Arc<Self> {
        Arc::new(Self {
            readable: true,
            writable: true,
            inode: None,
        })
    }
}

impl File for MemFile {
    fn readable(&self) -> bool {
        self.readable
    }

    fn writable(&self) -> bool {
        self.writable
    }

    fn inode(&self) -> Option<&dyn Inode> {
        self.inode.as_deref().map(|i| i as &dyn Inode)
    }
}

/// Journal that checks `begin_op`/`end_op` pair up.
#[derive(Default)]
pub struct CountingLog {
    outstanding: AtomicUsize,
    pub ops: AtomicUsize,
}

impl CountingLog {
    pub fn idle(&self) -> bool {
        self.outstanding.load(Ordering::SeqCst) == 0
    }

    pub fn ops(&self) -> usize {
        self.ops.load(Ordering::SeqCst)
    }
}

impl FsLog for CountingLog {
    fn begin_op(&self) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.ops.fetch_add(1, Ordering::SeqCst);
    }

    fn end_op(&self) {
        let prev = self.outstanding.fetch_sub(1, Ordering::SeqCst);
        assert!(prev > 0, "end_op without begin_op");
    }
}
