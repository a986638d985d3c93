use crate::SyscallError;

/// System-call numbers, as placed in `a7` by the user-space stubs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u64)]
pub enum Sysno {
    Mmap = 22,
    Munmap = 23,
}

impl TryFrom<u64> for Sysno {
    type Error = SyscallError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            22 => Ok(Self::Mmap),
            23 => Ok(Self::Munmap),
            n => Err(SyscallError::UnknownSyscall(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for s in [Sysno::Mmap, Sysno::Munmap] {
            assert_eq!(Sysno::try_from(s as u64), Ok(s));
        }
        assert_eq!(Sysno::try_from(0), Err(SyscallError::UnknownSyscall(0)));
    }
}
