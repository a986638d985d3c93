use crate::irq::PushOff;

/// The hart (hardware thread) executing the caller.
///
/// Implementations answer two questions the allocator needs: *which* hart
/// is running, and how to keep it from being interrupted while that answer
/// is being used. `push_off`/`pop_off` nest; interrupts come back on only
/// when the outermost `pop_off` runs and only if they were on before the
/// outermost `push_off`.
///
/// The id is only stable while interrupts are off. Read it through
/// [`PushOff::hart_id`] or [`current_hart_id`] rather than calling
/// [`Hart::id`] bare.
pub trait Hart: Sync {
    /// Index of the current hart, `0..NCPU`.
    fn id(&self) -> usize;

    /// Disable interrupts, incrementing the nesting depth.
    fn push_off(&self);

    /// Undo one `push_off`.
    ///
    /// # Panics
    /// Implementations panic when called without a matching `push_off`.
    fn pop_off(&self);
}

impl<H: Hart + ?Sized> Hart for &H {
    #[inline]
    fn id(&self) -> usize {
        (**self).id()
    }

    #[inline]
    fn push_off(&self) {
        (**self).push_off();
    }

    #[inline]
    fn pop_off(&self) {
        (**self).pop_off();
    }
}

/// Reads the current hart id with interrupts briefly disabled.
///
/// The caller may be migrated as soon as this returns; the value is a hint
/// for choosing a per-hart structure, which must still be locked.
#[inline]
pub fn current_hart_id<H: Hart + ?Sized>(hart: &H) -> usize {
    PushOff::new(hart).hart_id()
}

#[cfg(target_arch = "riscv64")]
mod riscv {
    use super::Hart;
    use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use kernel_info::param::NCPU;
    use kernel_registers::LoadRegisterUnsafe;
    use kernel_registers::sstatus::{Sstatus, disable_interrupts, enable_interrupts};
    use kernel_registers::tp::Tp;

    struct CpuState {
        /// Depth of `push_off` nesting.
        noff: AtomicUsize,
        /// Were interrupts enabled before the outermost `push_off`?
        intena: AtomicBool,
    }

    /// The hart running this code, identified through `tp`.
    pub struct RiscvHart {
        cpus: [CpuState; NCPU],
    }

    impl RiscvHart {
        #[must_use]
        pub const fn new() -> Self {
            Self {
                cpus: [const {
                    CpuState {
                        noff: AtomicUsize::new(0),
                        intena: AtomicBool::new(false),
                    }
                }; NCPU],
            }
        }

        fn interrupts_enabled() -> bool {
            unsafe { Sstatus::load_unsafe() }.sie()
        }

        fn this_cpu(&self) -> &CpuState {
            &self.cpus[self.id()]
        }
    }

    impl Default for RiscvHart {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Hart for RiscvHart {
        #[inline]
        fn id(&self) -> usize {
            unsafe { Tp::load_unsafe() }.hart_id()
        }

        fn push_off(&self) {
            let old = Self::interrupts_enabled();
            unsafe { disable_interrupts() };
            // Interrupts are off: this hart's state is ours alone.
            let cpu = self.this_cpu();
            if cpu.noff.load(Ordering::Relaxed) == 0 {
                cpu.intena.store(old, Ordering::Relaxed);
            }
            cpu.noff.fetch_add(1, Ordering::Relaxed);
        }

        fn pop_off(&self) {
            assert!(!Self::interrupts_enabled(), "pop_off: interruptible");
            let cpu = self.this_cpu();
            let depth = cpu.noff.load(Ordering::Relaxed);
            assert!(depth >= 1, "pop_off: not pushed");
            cpu.noff.store(depth - 1, Ordering::Relaxed);
            if depth == 1 && cpu.intena.load(Ordering::Relaxed) {
                unsafe { enable_interrupts() };
            }
        }
    }
}

#[cfg(target_arch = "riscv64")]
pub use riscv::RiscvHart;
