//! Process context seen by the gateway, and the termination path.

use core::fmt::Write;

use trapgate_abi::console_traits::Console;
use trapgate_abi::fs_traits::FileSystem;
use trapgate_abi::task::PROCESS_NAME_MAX_LEN;
use trapgate_fs::FdTable;
use trapgate_lib::string::FixedWriter;

use crate::syscall::common::SyscallFlow;

/// Per-process state the syscall gateway reads and mutates.
///
/// The scheduler owns the rest of the process (address space, kernel
/// stack, parent/child links); the gateway only needs the identity, the
/// descriptor table, and the exit bookkeeping.
pub struct Process {
    pid: u32,
    name: [u8; PROCESS_NAME_MAX_LEN],
    name_len: usize,
    exit_status: i32,
    terminated: bool,
    pub fd_table: FdTable,
}

impl Process {
    pub fn new(pid: u32, name: &str) -> Self {
        let mut buf = [0u8; PROCESS_NAME_MAX_LEN];
        let take = name.len().min(PROCESS_NAME_MAX_LEN);
        buf[..take].copy_from_slice(&name.as_bytes()[..take]);
        Self {
            pid,
            name: buf,
            name_len: take,
            exit_status: 0,
            terminated: false,
            fd_table: FdTable::new(),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Program name as passed to `new`, truncated to the name buffer.
    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or("?")
    }

    pub fn exit_status(&self) -> i32 {
        self.exit_status
    }

    pub fn has_terminated(&self) -> bool {
        self.terminated
    }
}

/// Terminate `process` with `status`.
///
/// The single exit path: `exit` calls it directly and the dispatcher
/// calls it for every fault. The first call latches the status and emits
/// the exit record; later calls keep the original status. Descriptors
/// are closed on every call, which makes teardown idempotent.
pub fn terminate(
    process: &mut Process,
    fs: &mut dyn FileSystem,
    console: &mut dyn Console,
    status: i32,
) -> SyscallFlow {
    let first = !process.terminated;
    if first {
        process.terminated = true;
        process.exit_status = status;
    }
    process.fd_table.close_all(fs);
    if first {
        // One console call, so the record never interleaves with other
        // process output.
        let mut line: FixedWriter<64> = FixedWriter::new();
        let _ = write!(line, "{}: exit({})\n", process.name(), process.exit_status);
        console.write(line.as_bytes());
    }
    SyscallFlow::Exit(process.exit_status)
}
