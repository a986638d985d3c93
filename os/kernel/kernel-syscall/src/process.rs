use crate::TrapFrame;
use alloc::sync::Arc;
use kernel_vma::{AddressSpace, File, VmaTable};

/// The calling process, as seen by system-call handlers.
pub trait Process {
    type Space: AddressSpace + ?Sized;

    fn pid(&self) -> u32;

    fn trap_frame(&self) -> &TrapFrame;

    fn trap_frame_mut(&mut self) -> &mut TrapFrame;

    /// The open file at descriptor `fd`, if any. `fd` is already known to be
    /// below `NOFILE`.
    fn file(&self, fd: usize) -> Option<&Arc<dyn File>>;

    /// The mapping table together with the image it maps into.
    fn vm(&mut self) -> (&mut VmaTable, &mut Self::Space);
}
