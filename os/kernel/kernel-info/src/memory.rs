//! # Memory Layout

/// Size of a physical frame and of a virtual page, in bytes.
pub const PAGE_SIZE: u64 = 4096;

/// Number of low address bits covered by a page offset.
pub const PAGE_SHIFT: u32 = 12;

/// Physical address of the 16550 UART on the QEMU `virt` board.
pub const UART0: u64 = 0x1000_0000;

/// Where the kernel image is loaded and executes.
///
/// # Kernel Build
/// The linker script places `.text` here; `-kernel` in QEMU jumps to it.
const KERNBASE: u64 = 0x8000_0000;

/// Amount of RAM the kernel assumes the board provides.
const RAM_SIZE: u64 = 128 * 1024 * 1024;

/// First physical address past usable RAM.
pub const PHYSTOP: u64 = KERNBASE + RAM_SIZE;

/// Highest user virtual address plus one (Sv39, one bit short to avoid
/// sign-extension).
pub const MAXVA: u64 = 1 << (9 + 9 + 9 + 12 - 1);

const _: () = {
    assert!(PAGE_SIZE == 1 << PAGE_SHIFT);
    assert!(KERNBASE.is_multiple_of(PAGE_SIZE));
    assert!(PHYSTOP.is_multiple_of(PAGE_SIZE));
    assert!(PHYSTOP > KERNBASE);
    assert!(UART0 < KERNBASE);
};
