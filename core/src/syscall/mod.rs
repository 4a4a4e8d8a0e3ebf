pub mod common;
pub mod context;
pub mod decode;
pub mod dispatch;
pub mod fs;
pub mod proc;

mod macros;

#[cfg(test)]
mod tests;

pub use common::{Fault, SyscallFlow, SyscallResult};
pub use context::{SyscallArgs, SyscallContext, SyscallServices};
pub use dispatch::syscall_handle;
