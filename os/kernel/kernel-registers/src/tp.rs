/// Thread pointer (`tp`), which the boot code loads with the hart id.
///
/// Machine-mode firmware leaves `mhartid` in `a0` on entry; the kernel's
/// `start` routine copies it to `tp` before dropping to supervisor mode and
/// never writes `tp` again. Supervisor code cannot read `mhartid`, so `tp` is
/// the only source of the current hart's identity.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tp(u64);

impl Tp {
    #[must_use]
    pub const fn from_hart_id(id: usize) -> Self {
        Self(id as u64)
    }

    /// The hart id held in the register.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hart_id(self) -> usize {
        self.0 as usize
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::LoadRegisterUnsafe for Tp {
    unsafe fn load_unsafe() -> Self {
        let v: u64;
        unsafe {
            core::arch::asm!("mv {}, tp", out(reg) v, options(nomem, nostack, preserves_flags));
        }
        Self(v)
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::StoreRegisterUnsafe for Tp {
    unsafe fn store_unsafe(self) {
        let v = self.0;
        unsafe {
            core::arch::asm!("mv tp, {}", in(reg) v, options(nomem, nostack, preserves_flags));
        }
    }
}
