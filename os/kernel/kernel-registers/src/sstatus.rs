use bitfield_struct::bitfield;

/// Supervisor status register (`sstatus`) on RV64.
///
/// Only [`sie`](Self::sie) matters to the lock code; the remaining fields
/// are modeled so a loaded value round-trips unchanged through
/// [`StoreRegisterUnsafe`](crate::StoreRegisterUnsafe).
#[bitfield(u64, order = Lsb)]
pub struct Sstatus {
    #[bits(default = false)]
    _wpri0: bool, // 0

    /// Supervisor Interrupt Enable.
    pub sie: bool, // 1

    #[bits(3)]
    _wpri2: u8, // 2–4

    /// Interrupt enable state before the last trap into S-mode.
    pub spie: bool, // 5

    /// User-mode big-endian memory accesses.
    pub ube: bool, // 6

    _wpri7: bool, // 7

    /// Privilege the hart trapped from (0 = user, 1 = supervisor).
    pub spp: bool, // 8

    /// Vector unit state.
    #[bits(2)]
    pub vs: u8, // 9–10

    #[bits(2)]
    _wpri11: u8, // 11–12

    /// Floating-point unit state.
    #[bits(2)]
    pub fs: u8, // 13–14

    /// Additional extension state.
    #[bits(2)]
    pub xs: u8, // 15–16

    _wpri17: bool, // 17

    /// Permit Supervisor User Memory access.
    pub sum: bool, // 18

    /// Make eXecutable Readable.
    pub mxr: bool, // 19

    #[bits(12)]
    _wpri20: u16, // 20–31

    /// XLEN of U-mode (2 = 64 bit).
    #[bits(2)]
    pub uxl: u8, // 32–33

    #[bits(29)]
    _wpri34: u32, // 34–62

    /// Some dirty extension state (read-only summary bit).
    pub sd: bool, // 63
}

impl Sstatus {
    /// Mask of the `SIE` bit for `csrs`/`csrc`.
    pub const SIE_MASK: u64 = 1 << 1;
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::LoadRegisterUnsafe for Sstatus {
    unsafe fn load_unsafe() -> Self {
        let bits: u64;
        unsafe {
            core::arch::asm!("csrr {}, sstatus", out(reg) bits, options(nomem, nostack));
        }
        Self::from_bits(bits)
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::StoreRegisterUnsafe for Sstatus {
    unsafe fn store_unsafe(self) {
        let bits = self.into_bits();
        unsafe {
            core::arch::asm!("csrw sstatus, {}", in(reg) bits, options(nostack));
        }
    }
}

/// Disables supervisor interrupts on this hart (`csrc sstatus, SIE`).
///
/// # Safety
/// Supervisor mode only.
#[cfg(all(feature = "asm", target_arch = "riscv64"))]
#[inline]
pub unsafe fn disable_interrupts() {
    unsafe {
        core::arch::asm!("csrc sstatus, {}", in(reg) Sstatus::SIE_MASK, options(nostack));
    }
}

/// Enables supervisor interrupts on this hart (`csrs sstatus, SIE`).
///
/// # Safety
/// Supervisor mode only; pending interrupts are taken immediately.
#[cfg(all(feature = "asm", target_arch = "riscv64"))]
#[inline]
pub unsafe fn enable_interrupts() {
    unsafe {
        core::arch::asm!("csrs sstatus, {}", in(reg) Sstatus::SIE_MASK, options(nostack));
    }
}
