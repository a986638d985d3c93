use crate::{Hart, SpinLock, SpinLockGuard};
use core::ops::{Deref, DerefMut};

/// RAII guard around [`Hart::push_off`] / [`Hart::pop_off`].
///
/// While the guard lives, the holder cannot be interrupted and therefore
/// cannot be moved to another hart, so [`PushOff::hart_id`] is accurate.
///
/// # Examples
///
/// ```no_run
/// # use kernel_sync::{Hart, PushOff};
/// # fn demo(hart: &dyn Hart) {
/// let id = {
///     let off = PushOff::new(hart);
///     off.hart_id()
/// };
/// // interrupts restored here; `id` is now only a hint
/// # let _ = id;
/// # }
/// ```
pub struct PushOff<'a, H: Hart + ?Sized> {
    hart: &'a H,
}

impl<'a, H: Hart + ?Sized> PushOff<'a, H> {
    #[inline]
    #[must_use]
    pub fn new(hart: &'a H) -> Self {
        hart.push_off();
        Self { hart }
    }

    /// The id of the hart holding this guard.
    #[inline]
    #[must_use]
    pub fn hart_id(&self) -> usize {
        self.hart.id()
    }
}

impl<H: Hart + ?Sized> Drop for PushOff<'_, H> {
    fn drop(&mut self) {
        self.hart.pop_off();
    }
}

/// A spin lock guard that also keeps interrupts off on the holding hart.
///
/// Created by [`SpinLock::lock_irq`]. Interrupts are disabled before the
/// lock is taken and restored only after it is released, so an interrupt
/// handler on the same hart can never spin on a lock its own hart holds.
pub struct IrqSpinLockGuard<'a, T, H: Hart + ?Sized> {
    // Field order is drop order: release the lock, then pop_off.
    guard: SpinLockGuard<'a, T>,
    _off: PushOff<'a, H>,
}

impl<T> SpinLock<T> {
    /// Acquires the lock with interrupts disabled for the guard's lifetime.
    #[inline]
    pub fn lock_irq<'a, H: Hart + ?Sized>(&'a self, hart: &'a H) -> IrqSpinLockGuard<'a, T, H> {
        let off = PushOff::new(hart);
        let guard = self.lock();
        IrqSpinLockGuard { guard, _off: off }
    }
}

impl<T, H: Hart + ?Sized> Deref for IrqSpinLockGuard<'_, T, H> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T, H: Hart + ?Sized> DerefMut for IrqSpinLockGuard<'_, T, H> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
