//! Shared limits and the handler result type.

use trapgate_abi::error::FdError;
use trapgate_abi::trap::TrapFrame;
use trapgate_mm::UserPtrError;

/// Longest path (or command line) copied out of user memory, terminator
/// excluded. Longer strings are truncated, and the file system rejects
/// what it cannot name.
pub const USER_PATH_MAX: usize = 128;

/// Kernel-side staging buffer for `read`/`write`. Larger user requests
/// are moved in chunks of this size.
pub const USER_IO_MAX_BYTES: usize = 512;

/// The `-1` failure value as user code sees it in the return register.
pub const SYSCALL_ERR: u64 = u64::MAX;

/// What the interrupt glue should do after a syscall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallFlow {
    /// Return to the calling process.
    Resume,
    /// The calling process is dead; schedule away with this exit status.
    Exit(i32),
    /// `halt`: stop the machine.
    Halt,
}

/// Protocol violations. Any of these kills the calling process; the
/// dispatcher owns the conversion into the termination path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// A user-supplied address failed validation.
    BadAddress(UserPtrError),
    /// A path argument was the null pointer.
    NullPath,
    /// A descriptor argument named a reserved, empty, or out-of-range slot.
    BadDescriptor(FdError),
    /// The number on the user stack is not in the syscall table.
    UnknownSyscall(u64),
}

pub type SyscallResult = Result<SyscallFlow, Fault>;

impl From<UserPtrError> for Fault {
    fn from(err: UserPtrError) -> Self {
        Fault::BadAddress(err)
    }
}

impl From<FdError> for Fault {
    fn from(err: FdError) -> Self {
        Fault::BadDescriptor(err)
    }
}

/// Deliver `value` to the caller and resume it.
pub fn syscall_return_ok(frame: &mut TrapFrame, value: u64) -> SyscallResult {
    frame.rax = value;
    Ok(SyscallFlow::Resume)
}

/// Sign-extending variant for handlers with signed results (`wait`).
pub fn syscall_return_signed(frame: &mut TrapFrame, value: i32) -> SyscallResult {
    syscall_return_ok(frame, value as i64 as u64)
}

/// Deliver the `-1` failure value and resume the caller.
pub fn syscall_return_err(frame: &mut TrapFrame) -> SyscallResult {
    syscall_return_ok(frame, SYSCALL_ERR)
}
