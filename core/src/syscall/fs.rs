//! File syscalls: `create`, `remove`, `open`, `filesize`, `read`,
//! `write`, `seek`, `tell`, `close`.
//!
//! User buffers for `read`/`write` are validated in full before any
//! bytes move, then staged through a fixed kernel buffer one chunk at a
//! time. Descriptors resolve through the process's table; every lookup
//! failure is fatal to the caller.

use trapgate_abi::addr::PageAccess;
use trapgate_abi::error::FdError;
use trapgate_abi::task::{FD_STDERR, FD_STDIN, FD_STDOUT};
use trapgate_fs::OPEN_LOCK;
use trapgate_lib::klog_debug;
use trapgate_mm::user_copy::{copy_from_user, copy_to_user, copy_user_cstr};
use trapgate_mm::user_ptr::{UserPtrError, check_user_range};

use crate::syscall::common::{
    Fault, SyscallFlow, USER_IO_MAX_BYTES, USER_PATH_MAX, syscall_return_err, syscall_return_ok,
};
use crate::syscall::macros::define_syscall;

define_syscall!(sys_create(ctx, args) {
    let path_ptr = args.ptr(0);
    if path_ptr.is_null() {
        return Err(Fault::NullPath);
    }
    let mut buf = [0u8; USER_PATH_MAX];
    let path = copy_user_cstr(ctx.services.vm, &mut buf, path_ptr)?;
    let created = ctx.services.fs.create(path, args.word(1) as u32);
    syscall_return_ok(ctx.frame, created as u64)
});

define_syscall!(sys_remove(ctx, args) {
    let path_ptr = args.ptr(0);
    if path_ptr.is_null() {
        return Err(Fault::NullPath);
    }
    let mut buf = [0u8; USER_PATH_MAX];
    let path = copy_user_cstr(ctx.services.vm, &mut buf, path_ptr)?;
    let removed = ctx.services.fs.remove(path);
    syscall_return_ok(ctx.frame, removed as u64)
});

define_syscall!(
    /// Open a file and bind it to the lowest free descriptor slot.
    ///
    /// The file-system lookup and the slot allocation happen under
    /// [`OPEN_LOCK`]. A miss and an exhausted table both come back to the
    /// caller as `-1`; exhaustion additionally logs, and the surplus
    /// handle goes straight back to the file system.
    sys_open(ctx, args) {
        let path_ptr = args.ptr(0);
        if path_ptr.is_null() {
            return Err(Fault::NullPath);
        }
        let mut buf = [0u8; USER_PATH_MAX];
        let path = copy_user_cstr(ctx.services.vm, &mut buf, path_ptr)?;

        let _guard = OPEN_LOCK.lock();
        let Some(handle) = ctx.services.fs.open(path) else {
            return syscall_return_err(ctx.frame);
        };
        match ctx.process.fd_table.allocate(handle) {
            Ok(fd) => syscall_return_ok(ctx.frame, fd as u64),
            Err(handle) => {
                klog_debug!(
                    "pid {}: open: {:?}",
                    ctx.process.pid(),
                    FdError::TableFull
                );
                ctx.services.fs.close(handle);
                syscall_return_err(ctx.frame)
            }
        }
    }
);

define_syscall!(sys_filesize(ctx, args) {
    let handle = ctx.process.fd_table.get(args.word(0) as usize)?;
    let length = ctx.services.fs.length(handle);
    syscall_return_ok(ctx.frame, length as u64)
});

define_syscall!(
    /// Read into a user buffer, from the console (fd 0) or a file.
    ///
    /// The whole destination is validated writable up front, so a fault
    /// cannot strike after bytes have already landed.
    sys_read(ctx, args) {
        let fd = args.word(0);
        let dst = args.ptr(1);
        let len = args.word(2) as usize;
        check_user_range(ctx.services.vm, dst, len, PageAccess::WRITE)?;

        match fd {
            FD_STDIN => {
                let mut at = dst;
                for _ in 0..len {
                    let byte = [ctx.services.console.read_byte()];
                    copy_to_user(ctx.services.vm, at, &byte)?;
                    at = at.checked_offset(1).ok_or(UserPtrError::Overflow)?;
                }
                syscall_return_ok(ctx.frame, len as u64)
            }
            FD_STDOUT | FD_STDERR => Err(Fault::BadDescriptor(FdError::Reserved)),
            _ => {
                let handle = ctx.process.fd_table.get(fd as usize)?;
                let mut tmp = [0u8; USER_IO_MAX_BYTES];
                let mut moved = 0usize;
                while moved < len {
                    let chunk = (len - moved).min(USER_IO_MAX_BYTES);
                    let n = ctx.services.fs.read(handle, &mut tmp[..chunk]);
                    if n < 0 {
                        if moved == 0 {
                            return syscall_return_err(ctx.frame);
                        }
                        break;
                    }
                    let n = n as usize;
                    if n == 0 {
                        break;
                    }
                    copy_to_user(ctx.services.vm, dst.offset(moved as u64), &tmp[..n])?;
                    moved += n;
                    if n < chunk {
                        break;
                    }
                }
                syscall_return_ok(ctx.frame, moved as u64)
            }
        }
    }
);

define_syscall!(
    /// Write from a user buffer, to the console (fd 1) or a file.
    sys_write(ctx, args) {
        let fd = args.word(0);
        let src = args.ptr(1);
        let len = args.word(2) as usize;
        check_user_range(ctx.services.vm, src, len, PageAccess::READ)?;

        match fd {
            FD_STDOUT => {
                let mut tmp = [0u8; USER_IO_MAX_BYTES];
                let mut moved = 0usize;
                while moved < len {
                    let chunk = (len - moved).min(USER_IO_MAX_BYTES);
                    copy_from_user(ctx.services.vm, &mut tmp[..chunk], src.offset(moved as u64))?;
                    ctx.services.console.write(&tmp[..chunk]);
                    moved += chunk;
                }
                syscall_return_ok(ctx.frame, len as u64)
            }
            FD_STDIN | FD_STDERR => Err(Fault::BadDescriptor(FdError::Reserved)),
            _ => {
                let handle = ctx.process.fd_table.get(fd as usize)?;
                let mut tmp = [0u8; USER_IO_MAX_BYTES];
                let mut moved = 0usize;
                while moved < len {
                    let chunk = (len - moved).min(USER_IO_MAX_BYTES);
                    copy_from_user(ctx.services.vm, &mut tmp[..chunk], src.offset(moved as u64))?;
                    let n = ctx.services.fs.write(handle, &tmp[..chunk]);
                    if n < 0 {
                        if moved == 0 {
                            return syscall_return_err(ctx.frame);
                        }
                        break;
                    }
                    let n = n as usize;
                    moved += n;
                    if n < chunk {
                        break;
                    }
                }
                syscall_return_ok(ctx.frame, moved as u64)
            }
        }
    }
);

define_syscall!(sys_seek(ctx, args) {
    let handle = ctx.process.fd_table.get(args.word(0) as usize)?;
    ctx.services.fs.seek(handle, args.word(1) as u32);
    Ok(SyscallFlow::Resume)
});

define_syscall!(sys_tell(ctx, args) {
    let handle = ctx.process.fd_table.get(args.word(0) as usize)?;
    let position = ctx.services.fs.tell(handle);
    syscall_return_ok(ctx.frame, position as u64)
});

define_syscall!(sys_close(ctx, args) {
    let handle = ctx.process.fd_table.release(args.word(0) as usize)?;
    ctx.services.fs.close(handle);
    Ok(SyscallFlow::Resume)
});
