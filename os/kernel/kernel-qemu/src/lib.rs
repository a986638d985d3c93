//! # QEMU `virt` console output
//!
//! Early-boot and log output for kernels running on QEMU's RISC-V `virt`
//! machine. Bytes go to the 16550-compatible UART at
//! [`UART0`](kernel_info::memory::UART0), which QEMU connects to its serial
//! backend (`-nographic` puts it on stdio).
//!
//! ```text
//! log::info!(..) ──► QemuLogger ──┐
//!                                 ├──► QemuSink (fmt::Write) ──► uart_putc ──► THR @ UART0
//! qemu_trace!(..) ────────────────┘
//! ```
//!
//! ## Features
//!
//! * `enabled` (default): compile the UART driver in. Without it, or when not
//!   building for `riscv64`, every write is a no-op, which is what host tests
//!   see.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kernel_qemu::QemuLogger;
//! use log::LevelFilter;
//!
//! static LOGGER: QemuLogger = QemuLogger::new(LevelFilter::Debug);
//!
//! LOGGER.init().expect("logger installed twice");
//! log::info!("hart 0 starting");
//! ```
//!
//! ```rust,ignore
//! use kernel_qemu::qemu_trace;
//!
//! qemu_trace!("kinit: {} frames free\n", free);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;

pub use logger::QemuLogger;

#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt::{self, Write};

    #[cfg(all(feature = "enabled", target_arch = "riscv64"))]
    mod uart {
        use kernel_info::memory::UART0;

        /// Transmit holding register.
        const THR: usize = 0;
        /// Line status register.
        const LSR: usize = 5;
        /// THR can accept another byte.
        const LSR_TX_IDLE: u8 = 1 << 5;

        #[inline]
        fn reg(offset: usize) -> *mut u8 {
            core::ptr::with_exposed_provenance_mut::<u8>(UART0 as usize + offset)
        }

        /// Busy-waits for the transmitter and writes one byte.
        pub fn putc(c: u8) {
            // SAFETY: UART0 is the MMIO base of the virt machine's 16550,
            // identity-mapped for the kernel.
            unsafe {
                while reg(LSR).read_volatile() & LSR_TX_IDLE == 0 {
                    core::hint::spin_loop();
                }
                reg(THR).write_volatile(c);
            }
        }
    }

    /// Write a single byte to the console.
    #[inline]
    pub fn uart_putc(c: u8) {
        #[cfg(all(feature = "enabled", target_arch = "riscv64"))]
        uart::putc(c);
        #[cfg(not(all(feature = "enabled", target_arch = "riscv64")))]
        let _ = c;
    }

    pub struct QemuSink;

    impl Write for QemuSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                uart_putc(b);
            }
            Ok(())
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(args: fmt::Arguments) {
        // best-effort debug output
        let _ = fmt::write(&mut QemuSink, args);
    }
}

/// `print!`-style output straight to the UART, bypassing `log`.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
