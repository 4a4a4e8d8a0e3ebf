//! The dispatcher: decode, route, and absorb faults.

use trapgate_abi::syscall::SyscallNumber;
use trapgate_abi::task::FAULT_EXIT_STATUS;
use trapgate_lib::{klog_debug, klog_trace, klog_warn};

use crate::process;
use crate::syscall::common::{Fault, SyscallFlow, SyscallResult};
use crate::syscall::context::{SyscallArgs, SyscallContext};
use crate::syscall::{decode, fs, proc};

/// Entry point for the interrupt glue.
///
/// Never returns an error: a faulting process is terminated here, and
/// the glue only sees the resulting [`SyscallFlow::Exit`].
pub fn syscall_handle(ctx: &mut SyscallContext<'_, '_>) -> SyscallFlow {
    match dispatch(ctx) {
        Ok(flow) => flow,
        Err(fault) => {
            klog_debug!(
                "pid {} ({}): killed on {:?}",
                ctx.process.pid(),
                ctx.process.name(),
                fault
            );
            process::terminate(
                ctx.process,
                ctx.services.fs,
                ctx.services.console,
                FAULT_EXIT_STATUS,
            )
        }
    }
}

fn dispatch(ctx: &mut SyscallContext<'_, '_>) -> SyscallResult {
    let raw = decode::read_syscall_number(ctx.services.vm, ctx.frame)?;
    let Some(number) = SyscallNumber::from_raw(raw) else {
        klog_warn!("pid {}: unknown syscall {}", ctx.process.pid(), raw);
        return Err(Fault::UnknownSyscall(raw));
    };
    let args = decode::decode_args(ctx.services.vm, ctx.frame, number.arg_count())?;
    klog_trace!("pid {}: {}", ctx.process.pid(), number.name());
    invoke(ctx, number, &args)
}

fn invoke(
    ctx: &mut SyscallContext<'_, '_>,
    number: SyscallNumber,
    args: &SyscallArgs,
) -> SyscallResult {
    match number {
        SyscallNumber::Halt => proc::sys_halt(ctx, args),
        SyscallNumber::Exit => proc::sys_exit(ctx, args),
        SyscallNumber::Exec => proc::sys_exec(ctx, args),
        SyscallNumber::Wait => proc::sys_wait(ctx, args),
        SyscallNumber::Create => fs::sys_create(ctx, args),
        SyscallNumber::Remove => fs::sys_remove(ctx, args),
        SyscallNumber::Open => fs::sys_open(ctx, args),
        SyscallNumber::Filesize => fs::sys_filesize(ctx, args),
        SyscallNumber::Read => fs::sys_read(ctx, args),
        SyscallNumber::Write => fs::sys_write(ctx, args),
        SyscallNumber::Seek => fs::sys_seek(ctx, args),
        SyscallNumber::Tell => fs::sys_tell(ctx, args),
        SyscallNumber::Close => fs::sys_close(ctx, args),
    }
}
