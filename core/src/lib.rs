//! Syscall gateway.
//!
//! Everything between the interrupt stub and the kernel subsystems: the
//! stack decoder, the dispatcher, the per-syscall handlers, and the one
//! termination path that every protocol violation funnels into. The
//! subsystems themselves (paging, file system, process management,
//! console) are reached through the collaborator traits in `trapgate-abi`.

#![cfg_attr(not(test), no_std)]

pub mod process;
pub mod syscall;

pub use process::Process;
pub use syscall::dispatch::syscall_handle;
