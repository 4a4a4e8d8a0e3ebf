use std::collections::{BTreeMap, VecDeque};

use trapgate_abi::addr::USER_SPACE_TOP;
use trapgate_abi::fs_traits::{FileHandle, FileSystem};
use trapgate_abi::proc_traits::ProcessControl;
use trapgate_abi::syscall::SyscallNumber;
use trapgate_abi::task::{INVALID_PROCESS_ID, MAX_OPEN_FILES};
use trapgate_abi::trap::TrapFrame;
use trapgate_mm::testing::FixedAddressSpace;

use crate::process::Process;
use crate::syscall::common::{SYSCALL_ERR, SyscallFlow};
use crate::syscall::context::{SyscallContext, SyscallServices};
use crate::syscall::dispatch::syscall_handle;

const BASE: u64 = 0x4000_0000;
const PAGES: usize = 16 * 4096;
const STACK: u64 = BASE + 14 * 4096;
const USER_BUF: u64 = BASE + 4096;

struct OpenFile {
    name: Vec<u8>,
    pos: usize,
}

/// In-memory file system with per-handle positions.
#[derive(Default)]
struct RamFs {
    files: BTreeMap<Vec<u8>, Vec<u8>>,
    open: BTreeMap<u32, OpenFile>,
    next_handle: u32,
    closes: usize,
}

impl FileSystem for RamFs {
    fn create(&mut self, path: &[u8], initial_size: u32) -> bool {
        if self.files.contains_key(path) {
            return false;
        }
        self.files
            .insert(path.to_vec(), vec![0; initial_size as usize]);
        true
    }

    fn remove(&mut self, path: &[u8]) -> bool {
        self.files.remove(path).is_some()
    }

    fn open(&mut self, path: &[u8]) -> Option<FileHandle> {
        if !self.files.contains_key(path) {
            return None;
        }
        self.next_handle += 1;
        self.open.insert(
            self.next_handle,
            OpenFile {
                name: path.to_vec(),
                pos: 0,
            },
        );
        Some(FileHandle::new(self.next_handle))
    }

    fn close(&mut self, handle: FileHandle) {
        self.open.remove(&handle.raw());
        self.closes += 1;
    }

    fn length(&mut self, handle: &FileHandle) -> u32 {
        let file = &self.open[&handle.raw()];
        self.files[&file.name].len() as u32
    }

    fn read(&mut self, handle: &FileHandle, buf: &mut [u8]) -> isize {
        let Some(file) = self.open.get_mut(&handle.raw()) else {
            return -1;
        };
        let data = &self.files[&file.name];
        let n = buf.len().min(data.len().saturating_sub(file.pos));
        buf[..n].copy_from_slice(&data[file.pos..file.pos + n]);
        file.pos += n;
        n as isize
    }

    fn write(&mut self, handle: &FileHandle, buf: &[u8]) -> isize {
        let Some(file) = self.open.get_mut(&handle.raw()) else {
            return -1;
        };
        let data = self.files.get_mut(&file.name).unwrap();
        if file.pos + buf.len() > data.len() {
            data.resize(file.pos + buf.len(), 0);
        }
        data[file.pos..file.pos + buf.len()].copy_from_slice(buf);
        file.pos += buf.len();
        buf.len() as isize
    }

    fn seek(&mut self, handle: &FileHandle, position: u32) {
        self.open.get_mut(&handle.raw()).unwrap().pos = position as usize;
    }

    fn tell(&mut self, handle: &FileHandle) -> u32 {
        self.open[&handle.raw()].pos as u32
    }
}

#[derive(Default)]
struct ScriptedProc {
    spawned: Vec<Vec<u8>>,
    fail_next_spawn: bool,
    children: BTreeMap<u32, i32>,
    next_pid: u32,
}

impl ProcessControl for ScriptedProc {
    fn spawn(&mut self, command_line: &[u8]) -> u32 {
        self.spawned.push(command_line.to_vec());
        if self.fail_next_spawn {
            self.fail_next_spawn = false;
            return INVALID_PROCESS_ID;
        }
        self.next_pid += 1;
        self.next_pid
    }

    fn wait(&mut self, pid: u32) -> i32 {
        self.children.remove(&pid).unwrap_or(-1)
    }
}

#[derive(Default)]
struct MockConsole {
    output: Vec<u8>,
    input: VecDeque<u8>,
}

impl trapgate_abi::console_traits::Console for MockConsole {
    fn write(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    fn read_byte(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(0)
    }
}

/// A process, its address space, and mock collaborators, wired the way
/// the interrupt glue would wire the real ones.
struct TestKernel {
    space: FixedAddressSpace<PAGES>,
    fs: RamFs,
    proc_ctl: ScriptedProc,
    console: MockConsole,
    process: Process,
    frame: TrapFrame,
}

impl TestKernel {
    fn new() -> Self {
        Self {
            space: FixedAddressSpace::new(BASE),
            fs: RamFs::default(),
            proc_ctl: ScriptedProc::default(),
            console: MockConsole::default(),
            process: Process::new(1, "grep"),
            frame: TrapFrame::zero(),
        }
    }

    fn run(&mut self) -> SyscallFlow {
        let mut services = SyscallServices {
            vm: &self.space,
            fs: &mut self.fs,
            proc: &mut self.proc_ctl,
            console: &mut self.console,
        };
        let mut ctx = SyscallContext {
            process: &mut self.process,
            frame: &mut self.frame,
            services: &mut services,
        };
        syscall_handle(&mut ctx)
    }

    /// Lay out the syscall number and arguments on the user stack, point
    /// `rsp` at them, and dispatch.
    fn call(&mut self, number: u64, args: &[u64]) -> SyscallFlow {
        self.frame.rsp = STACK;
        self.space.write(STACK, &number.to_le_bytes());
        for (i, arg) in args.iter().enumerate() {
            self.space
                .write(STACK + 8 * (i as u64 + 1), &arg.to_le_bytes());
        }
        self.run()
    }

    fn syscall(&mut self, number: SyscallNumber, args: &[u64]) -> SyscallFlow {
        self.call(number as u64, args)
    }

    fn rax(&self) -> u64 {
        self.frame.rax
    }

    fn put_cstr(&mut self, addr: u64, s: &[u8]) {
        self.space.write(addr, s);
        self.space.write(addr + s.len() as u64, &[0]);
    }

    fn console_text(&self) -> String {
        String::from_utf8(self.console.output.clone()).unwrap()
    }

    /// Open `name` (creating it first if needed) and return the fd.
    fn open_file(&mut self, name: &[u8]) -> u64 {
        let path = BASE + 64;
        self.put_cstr(path, name);
        self.fs
            .create(name, 0);
        assert_eq!(self.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
        self.rax()
    }
}

#[test]
fn halt_stops_the_machine() {
    let mut k = TestKernel::new();
    assert_eq!(k.syscall(SyscallNumber::Halt, &[]), SyscallFlow::Halt);
}

#[test]
fn exit_emits_record_and_closes_descriptors() {
    let mut k = TestKernel::new();
    k.open_file(b"a");
    k.open_file(b"b");
    assert_eq!(k.syscall(SyscallNumber::Exit, &[42]), SyscallFlow::Exit(42));
    assert!(k.process.has_terminated());
    assert_eq!(k.process.exit_status(), 42);
    assert_eq!(k.console_text(), "grep: exit(42)\n");
    assert_eq!(k.fs.closes, 2);
}

#[test]
fn exit_status_is_latched_on_first_termination() {
    let mut k = TestKernel::new();
    assert_eq!(k.syscall(SyscallNumber::Exit, &[42]), SyscallFlow::Exit(42));
    // A dead process re-entering the gateway stays dead with its
    // original status, and the record is not emitted twice.
    assert_eq!(k.syscall(SyscallNumber::Exit, &[7]), SyscallFlow::Exit(42));
    assert_eq!(k.console_text(), "grep: exit(42)\n");
}

#[test]
fn unmapped_stack_pointer_terminates() {
    let mut k = TestKernel::new();
    k.frame.rsp = BASE - 4096;
    assert_eq!(k.run(), SyscallFlow::Exit(-1));
    assert_eq!(k.console_text(), "grep: exit(-1)\n");
}

#[test]
fn kernel_stack_pointer_terminates() {
    let mut k = TestKernel::new();
    k.frame.rsp = USER_SPACE_TOP + 8;
    assert_eq!(k.run(), SyscallFlow::Exit(-1));
}

#[test]
fn unknown_syscall_number_terminates() {
    let mut k = TestKernel::new();
    assert_eq!(k.call(99, &[]), SyscallFlow::Exit(-1));
    assert_eq!(k.console_text(), "grep: exit(-1)\n");
}

#[test]
fn read_into_kernel_buffer_terminates() {
    let mut k = TestKernel::new();
    let fd = k.open_file(b"a");
    assert_eq!(
        k.syscall(SyscallNumber::Read, &[fd, USER_SPACE_TOP, 16]),
        SyscallFlow::Exit(-1)
    );
}

#[test]
fn read_into_unmapped_buffer_terminates() {
    let mut k = TestKernel::new();
    let fd = k.open_file(b"a");
    let past_end = BASE + PAGES as u64;
    assert_eq!(
        k.syscall(SyscallNumber::Read, &[fd, past_end, 16]),
        SyscallFlow::Exit(-1)
    );
}

#[test]
fn descriptors_are_handed_out_from_three() {
    let mut k = TestKernel::new();
    assert_eq!(k.open_file(b"a"), 3);
    let path = BASE + 64;
    k.put_cstr(path, b"a");
    assert_eq!(k.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 4);
    assert_eq!(k.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 5);
}

#[test]
fn open_of_missing_file_fails_without_killing() {
    let mut k = TestKernel::new();
    let path = BASE + 64;
    k.put_cstr(path, b"nope");
    assert_eq!(k.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), SYSCALL_ERR);
    assert!(!k.process.has_terminated());
}

#[test]
fn open_with_null_path_terminates() {
    let mut k = TestKernel::new();
    assert_eq!(k.syscall(SyscallNumber::Open, &[0]), SyscallFlow::Exit(-1));
}

#[test]
fn create_with_null_path_terminates() {
    let mut k = TestKernel::new();
    assert_eq!(
        k.syscall(SyscallNumber::Create, &[0, 16]),
        SyscallFlow::Exit(-1)
    );
}

#[test]
fn closed_descriptor_use_terminates() {
    let mut k = TestKernel::new();
    let fd = k.open_file(b"a");
    assert_eq!(k.syscall(SyscallNumber::Close, &[fd]), SyscallFlow::Resume);
    assert_eq!(
        k.syscall(SyscallNumber::Filesize, &[fd]),
        SyscallFlow::Exit(-1)
    );
}

#[test]
fn reserved_descriptor_lookup_terminates() {
    let mut k = TestKernel::new();
    assert_eq!(
        k.syscall(SyscallNumber::Filesize, &[0]),
        SyscallFlow::Exit(-1)
    );
}

#[test]
fn out_of_range_descriptor_terminates() {
    let mut k = TestKernel::new();
    assert_eq!(
        k.syscall(SyscallNumber::Filesize, &[MAX_OPEN_FILES as u64 + 50]),
        SyscallFlow::Exit(-1)
    );
}

#[test]
fn exhausted_table_fails_open_and_returns_the_handle() {
    let mut k = TestKernel::new();
    let capacity = (MAX_OPEN_FILES - 3) as u64;
    let path = BASE + 64;
    k.put_cstr(path, b"a");
    k.fs.create(b"a", 0);
    for i in 0..capacity {
        assert_eq!(k.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
        assert_eq!(k.rax(), 3 + i);
    }
    assert_eq!(k.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), SYSCALL_ERR);
    assert!(!k.process.has_terminated());
    // The surplus handle went straight back to the file system.
    assert_eq!(k.fs.closes, 1);
    assert_eq!(k.fs.open.len(), capacity as usize);
}

#[test]
fn stdout_write_echoes_exact_byte_counts() {
    for n in [0usize, 1, 4096] {
        let mut k = TestKernel::new();
        let pattern: Vec<u8> = (0..n).map(|i| (i % 251) as u8).collect();
        k.space.write(USER_BUF, &pattern);
        assert_eq!(
            k.syscall(SyscallNumber::Write, &[1, USER_BUF, n as u64]),
            SyscallFlow::Resume
        );
        assert_eq!(k.rax(), n as u64, "write(1, ..) of {n} bytes");
        assert_eq!(k.console.output, pattern);
    }
}

#[test]
fn stdin_read_delivers_typed_bytes() {
    let mut k = TestKernel::new();
    k.console.input.extend(b"hi\n");
    assert_eq!(
        k.syscall(SyscallNumber::Read, &[0, USER_BUF, 3]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 3);
    let mut got = [0u8; 3];
    k.space.read(USER_BUF, &mut got);
    assert_eq!(&got, b"hi\n");
}

#[test]
fn console_descriptors_reject_the_wrong_direction() {
    for (number, fd) in [
        (SyscallNumber::Read, 1u64),
        (SyscallNumber::Read, 2),
        (SyscallNumber::Write, 0),
        (SyscallNumber::Write, 2),
    ] {
        let mut k = TestKernel::new();
        assert_eq!(
            k.syscall(number, &[fd, USER_BUF, 8]),
            SyscallFlow::Exit(-1),
            "{} on fd {fd}",
            number.name()
        );
    }
}

#[test]
fn file_lifecycle_roundtrip() {
    let mut k = TestKernel::new();
    let path = BASE + 64;
    k.put_cstr(path, b"data");

    assert_eq!(
        k.syscall(SyscallNumber::Create, &[path, 0]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 1);
    // Second create of the same name fails.
    assert_eq!(
        k.syscall(SyscallNumber::Create, &[path, 0]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 0);

    assert_eq!(k.syscall(SyscallNumber::Open, &[path]), SyscallFlow::Resume);
    let fd = k.rax();
    assert_eq!(fd, 3);

    k.space.write(USER_BUF, b"hello world");
    assert_eq!(
        k.syscall(SyscallNumber::Write, &[fd, USER_BUF, 11]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 11);
    assert_eq!(k.syscall(SyscallNumber::Filesize, &[fd]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 11);

    assert_eq!(k.syscall(SyscallNumber::Seek, &[fd, 6]), SyscallFlow::Resume);
    assert_eq!(k.syscall(SyscallNumber::Tell, &[fd]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 6);

    assert_eq!(
        k.syscall(SyscallNumber::Read, &[fd, USER_BUF + 64, 5]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 5);
    let mut got = [0u8; 5];
    k.space.read(USER_BUF + 64, &mut got);
    assert_eq!(&got, b"world");

    // Read at end of file returns zero, not an error.
    assert_eq!(
        k.syscall(SyscallNumber::Read, &[fd, USER_BUF + 64, 5]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 0);

    assert_eq!(k.syscall(SyscallNumber::Close, &[fd]), SyscallFlow::Resume);
    assert_eq!(k.syscall(SyscallNumber::Remove, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 1);
}

#[test]
fn large_transfers_survive_the_staging_buffer() {
    let mut k = TestKernel::new();
    let fd = k.open_file(b"big");
    let pattern: Vec<u8> = (0..2000).map(|i| (i % 107) as u8).collect();
    k.space.write(USER_BUF, &pattern);

    assert_eq!(
        k.syscall(SyscallNumber::Write, &[fd, USER_BUF, 2000]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 2000);

    // Wipe the user region, then read the file back into it.
    k.space.write(USER_BUF, &vec![0u8; 2000]);
    assert_eq!(k.syscall(SyscallNumber::Seek, &[fd, 0]), SyscallFlow::Resume);
    assert_eq!(
        k.syscall(SyscallNumber::Read, &[fd, USER_BUF, 2000]),
        SyscallFlow::Resume
    );
    assert_eq!(k.rax(), 2000);
    let mut got = vec![0u8; 2000];
    k.space.read(USER_BUF, &mut got);
    assert_eq!(got, pattern);
}

#[test]
fn exec_passes_the_command_line() {
    let mut k = TestKernel::new();
    let path = BASE + 64;
    k.put_cstr(path, b"echo hi");
    assert_eq!(k.syscall(SyscallNumber::Exec, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 1);
    assert_eq!(k.proc_ctl.spawned, vec![b"echo hi".to_vec()]);
}

#[test]
fn exec_load_failure_returns_minus_one() {
    let mut k = TestKernel::new();
    k.proc_ctl.fail_next_spawn = true;
    let path = BASE + 64;
    k.put_cstr(path, b"broken");
    assert_eq!(k.syscall(SyscallNumber::Exec, &[path]), SyscallFlow::Resume);
    assert_eq!(k.rax(), SYSCALL_ERR);
    assert!(!k.process.has_terminated());
}

#[test]
fn exec_with_null_pointer_terminates() {
    let mut k = TestKernel::new();
    assert_eq!(k.syscall(SyscallNumber::Exec, &[0]), SyscallFlow::Exit(-1));
}

#[test]
fn wait_returns_the_stored_status_once() {
    let mut k = TestKernel::new();
    k.proc_ctl.children.insert(5, 17);
    assert_eq!(k.syscall(SyscallNumber::Wait, &[5]), SyscallFlow::Resume);
    assert_eq!(k.rax(), 17);
    assert_eq!(k.syscall(SyscallNumber::Wait, &[5]), SyscallFlow::Resume);
    assert_eq!(k.rax(), SYSCALL_ERR);
}

#[test]
fn wait_on_unknown_pid_returns_minus_one() {
    let mut k = TestKernel::new();
    assert_eq!(k.syscall(SyscallNumber::Wait, &[999]), SyscallFlow::Resume);
    assert_eq!(k.rax(), SYSCALL_ERR);
}
