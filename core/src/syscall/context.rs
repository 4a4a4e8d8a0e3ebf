//! Everything a handler can touch, bundled for one dispatch.

use trapgate_abi::addr::VirtAddr;
use trapgate_abi::console_traits::Console;
use trapgate_abi::fs_traits::FileSystem;
use trapgate_abi::proc_traits::ProcessControl;
use trapgate_abi::syscall::SYSCALL_MAX_ARGS;
use trapgate_abi::trap::TrapFrame;
use trapgate_mm::AddressSpace;

use crate::process::{self, Process};
use crate::syscall::common::SyscallResult;

/// Kernel subsystems the handlers delegate to, as trait objects so the
/// gateway compiles without any of their implementations.
pub struct SyscallServices<'a> {
    pub vm: &'a dyn AddressSpace,
    pub fs: &'a mut dyn FileSystem,
    pub proc: &'a mut dyn ProcessControl,
    pub console: &'a mut dyn Console,
}

/// One in-flight syscall.
///
/// Fields are public so handlers can borrow them independently (the
/// descriptor table out of `process` alongside the file system out of
/// `services`).
pub struct SyscallContext<'a, 'b> {
    pub process: &'a mut Process,
    pub frame: &'a mut TrapFrame,
    pub services: &'a mut SyscallServices<'b>,
}

impl SyscallContext<'_, '_> {
    /// Kill the calling process with `status`; see [`process::terminate`].
    pub fn terminate(&mut self, status: i32) -> SyscallResult {
        Ok(process::terminate(
            self.process,
            self.services.fs,
            self.services.console,
            status,
        ))
    }
}

/// Argument words decoded from the user stack, zero-filled beyond the
/// syscall's arity.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyscallArgs {
    pub(crate) words: [u64; SYSCALL_MAX_ARGS],
}

impl SyscallArgs {
    pub const fn zero() -> Self {
        Self {
            words: [0; SYSCALL_MAX_ARGS],
        }
    }

    pub fn word(&self, index: usize) -> u64 {
        self.words[index]
    }

    /// Argument interpreted as a user pointer.
    pub fn ptr(&self, index: usize) -> VirtAddr {
        VirtAddr::new(self.words[index])
    }

    /// Argument interpreted as a signed 32-bit value (`exit` status).
    pub fn signed(&self, index: usize) -> i32 {
        self.words[index] as i32
    }
}
