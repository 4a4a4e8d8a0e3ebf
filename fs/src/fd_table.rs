//! Per-process file descriptor table.
//!
//! One fixed-size slot array per process, indices `[0, MAX_OPEN_FILES)`.
//! Slots 0..3 are reserved for the console streams and never hold a
//! handle; file slots are handed out lowest-free-first starting at
//! [`FD_FIRST_FILE`]. The table owns the [`FileHandle`]s it stores:
//! releasing a slot moves the handle back out, and nothing else can
//! observe it in between.

use spin::Mutex;
use trapgate_abi::error::FdError;
use trapgate_abi::fs_traits::{FileHandle, FileSystem};
use trapgate_abi::task::{FD_FIRST_FILE, MAX_OPEN_FILES};

/// Serializes `open` across processes.
///
/// The file-system collaborator is not required to tolerate concurrent
/// opens, so the open handler holds this for the lookup-plus-allocate
/// window. Everything else on the table is per-process state.
pub static OPEN_LOCK: Mutex<()> = Mutex::new(());

pub struct FdTable {
    slots: [Option<FileHandle>; MAX_OPEN_FILES],
}

impl FdTable {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; MAX_OPEN_FILES],
        }
    }

    /// Store `handle` in the lowest free file slot and return its index.
    ///
    /// On exhaustion the handle comes back to the caller, which still
    /// owes the file system a close for it.
    pub fn allocate(&mut self, handle: FileHandle) -> Result<usize, FileHandle> {
        for fd in FD_FIRST_FILE..MAX_OPEN_FILES {
            if self.slots[fd].is_none() {
                self.slots[fd] = Some(handle);
                return Ok(fd);
            }
        }
        Err(handle)
    }

    /// Borrow the handle stored at `fd`.
    pub fn get(&self, fd: usize) -> Result<&FileHandle, FdError> {
        match self.slots.get(fd) {
            None => Err(FdError::OutOfRange),
            Some(_) if fd < FD_FIRST_FILE => Err(FdError::Reserved),
            Some(None) => Err(FdError::Unoccupied),
            Some(Some(handle)) => Ok(handle),
        }
    }

    /// Empty the slot at `fd`, returning the handle it held.
    pub fn release(&mut self, fd: usize) -> Result<FileHandle, FdError> {
        // Same taxonomy as `get`, but the handle moves out.
        match self.slots.get_mut(fd) {
            None => Err(FdError::OutOfRange),
            Some(_) if fd < FD_FIRST_FILE => Err(FdError::Reserved),
            Some(slot) => slot.take().ok_or(FdError::Unoccupied),
        }
    }

    /// Close every live handle against `fs` and empty the table.
    ///
    /// Safe to call on an already-empty table; process teardown runs it
    /// unconditionally.
    pub fn close_all(&mut self, fs: &mut dyn FileSystem) {
        for slot in self.slots.iter_mut() {
            if let Some(handle) = slot.take() {
                fs.close(handle);
            }
        }
    }

    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}
