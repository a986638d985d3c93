/// User registers saved on trap entry that system calls look at.
///
/// The trampoline saves the full register file; only the argument registers
/// matter here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct TrapFrame {
    pub a0: u64,
    pub a1: u64,
    pub a2: u64,
    pub a3: u64,
    pub a4: u64,
    pub a5: u64,
    pub a6: u64,
    pub a7: u64,
}

impl TrapFrame {
    /// Raw value of argument register `a<n>`.
    ///
    /// # Panics
    /// Panics for `n > 5`; calls take at most six arguments.
    #[must_use]
    pub const fn arg(&self, n: usize) -> u64 {
        match n {
            0 => self.a0,
            1 => self.a1,
            2 => self.a2,
            3 => self.a3,
            4 => self.a4,
            5 => self.a5,
            _ => panic!("argraw: no such argument"),
        }
    }
}
