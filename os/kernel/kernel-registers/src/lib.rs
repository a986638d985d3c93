//! # Typed RISC-V Registers
//!
//! Register models are plain [`bitfield`](bitfield_struct::bitfield) structs
//! that can be built and inspected on any host. The instructions that move
//! them in and out of the hart are only compiled with the `asm` feature on a
//! `riscv64` target.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(feature = "sstatus")]
pub mod sstatus;

#[cfg(feature = "tp")]
pub mod tp;

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require
    /// supervisor mode.
    unsafe fn load_unsafe() -> Self;
}

pub trait StoreRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require
    /// supervisor mode.
    unsafe fn store_unsafe(self);
}

pub trait LoadRegister {
    fn load() -> Self;
}

pub trait StoreRegister {
    fn store(self);
}

impl<T> LoadRegisterUnsafe for T
where
    T: LoadRegister,
{
    #[inline]
    unsafe fn load_unsafe() -> Self {
        <Self as LoadRegister>::load()
    }
}

impl<T> StoreRegisterUnsafe for T
where
    T: StoreRegister,
{
    #[inline]
    unsafe fn store_unsafe(self) {
        <Self as StoreRegister>::store(self);
    }
}
