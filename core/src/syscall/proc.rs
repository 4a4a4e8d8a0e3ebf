//! Process syscalls: `halt`, `exit`, `exec`, `wait`.

use trapgate_abi::task::INVALID_PROCESS_ID;
use trapgate_mm::user_copy::copy_user_cstr;

use crate::syscall::common::{
    Fault, SyscallFlow, USER_PATH_MAX, syscall_return_err, syscall_return_ok,
    syscall_return_signed,
};
use crate::syscall::macros::define_syscall;

define_syscall!(sys_halt(_ctx, _args) {
    Ok(SyscallFlow::Halt)
});

define_syscall!(sys_exit(ctx, args) {
    ctx.terminate(args.signed(0))
});

define_syscall!(
    /// Spawn a process from a command line. The pointer is validated
    /// even though the rest of loading is the process manager's problem;
    /// a bad pointer is this process's fault, not a load failure.
    sys_exec(ctx, args) {
        let cmd_ptr = args.ptr(0);
        if cmd_ptr.is_null() {
            return Err(Fault::NullPath);
        }
        let mut buf = [0u8; USER_PATH_MAX];
        let command_line = copy_user_cstr(ctx.services.vm, &mut buf, cmd_ptr)?;
        let pid = ctx.services.proc.spawn(command_line);
        if pid == INVALID_PROCESS_ID {
            syscall_return_err(ctx.frame)
        } else {
            syscall_return_ok(ctx.frame, pid as u64)
        }
    }
);

define_syscall!(sys_wait(ctx, args) {
    let pid = args.word(0) as u32;
    let status = ctx.services.proc.wait(pid);
    syscall_return_signed(ctx.frame, status)
});
