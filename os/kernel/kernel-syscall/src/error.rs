use kernel_vma::VmaError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyscallError {
    #[error("unknown system call {0}")]
    UnknownSyscall(u64),
    #[error("bad file descriptor {0}")]
    BadFileDescriptor(i32),
    #[error("negative {0}")]
    Negative(&'static str),
    #[error(transparent)]
    Vma(#[from] VmaError),
}
