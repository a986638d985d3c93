/// Failure reported by the inode layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsError {
    #[error("disk I/O failed")]
    Io,
    #[error("short transfer: {done} of {wanted} bytes")]
    Short { done: usize, wanted: usize },
}

/// An open file as seen by the mapping code.
///
/// Files are shared as `Arc<dyn File>`; cloning the `Arc` is `filedup` and
/// dropping the last clone closes the file.
pub trait File: Send + Sync {
    fn readable(&self) -> bool;

    fn writable(&self) -> bool;

    /// The backing inode, or `None` for pipes and devices, which cannot be
    /// mapped.
    fn inode(&self) -> Option<&dyn Inode>;
}

/// On-disk file contents.
///
/// [`size`](Self::size), [`read_at`](Self::read_at) and
/// [`write_at`](Self::write_at) may only be called between
/// [`lock`](Self::lock) and [`unlock`](Self::unlock). Use [`LockedInode`] to
/// get that right.
pub trait Inode: Send + Sync {
    /// `ilock`; may sleep.
    fn lock(&self);

    /// `iunlock`.
    fn unlock(&self);

    /// Current file size in bytes.
    fn size(&self) -> u64;

    /// `readi`: copies up to `dst.len()` bytes starting at `offset`.
    /// Returns the number of bytes read; `0` at or past end of file.
    ///
    /// # Errors
    /// Propagates disk failures.
    fn read_at(&self, offset: u64, dst: &mut [u8]) -> Result<usize, FsError>;

    /// `writei`: copies `src` to the file starting at `offset`.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// Propagates disk failures.
    fn write_at(&self, offset: u64, src: &[u8]) -> Result<usize, FsError>;
}

/// The file system journal.
pub trait FsLog: Sync {
    /// Reserve room for one operation; may sleep until the log has space.
    fn begin_op(&self);

    /// Finish an operation, committing if it was the last outstanding one.
    fn end_op(&self);
}

/// RAII form of `begin_op`/`end_op`.
#[must_use = "the operation ends when the guard is dropped"]
pub struct LogOp<'a> {
    log: &'a dyn FsLog,
}

impl<'a> LogOp<'a> {
    pub fn begin(log: &'a dyn FsLog) -> Self {
        log.begin_op();
        Self { log }
    }
}

impl Drop for LogOp<'_> {
    fn drop(&mut self) {
        self.log.end_op();
    }
}

/// An inode held locked for the guard's lifetime.
#[must_use = "the inode is unlocked when the guard is dropped"]
pub struct LockedInode<'a> {
    inode: &'a dyn Inode,
}

impl<'a> LockedInode<'a> {
    pub fn lock(inode: &'a dyn Inode) -> Self {
        inode.lock();
        Self { inode }
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.inode.size()
    }

    /// Reads until `dst` is full or end of file, whichever comes first.
    ///
    /// # Errors
    /// Propagates disk failures.
    pub fn read_at(&self, offset: u64, dst: &mut [u8]) -> Result<usize, FsError> {
        self.inode.read_at(offset, dst)
    }

    /// Writes all of `src`.
    ///
    /// # Errors
    /// Fails on disk errors and on short writes.
    pub fn write_all_at(&self, offset: u64, src: &[u8]) -> Result<(), FsError> {
        let done = self.inode.write_at(offset, src)?;
        if done == src.len() {
            Ok(())
        } else {
            Err(FsError::Short {
                done,
                wanted: src.len(),
            })
        }
    }
}

impl Drop for LockedInode<'_> {
    fn drop(&mut self) {
        self.inode.unlock();
    }
}
