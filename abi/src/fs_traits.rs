//! File-system collaborator boundary.
//!
//! The trait is defined in `abi` (no dependencies) so that:
//! - `fs` can own the descriptor table without knowing the file system
//! - `core` can call through a trait object from the handlers
//! - the kernel binary wires a real implementation in at boot
//!
//! The gateway never looks inside a [`FileHandle`]; it only stores one
//! per descriptor slot and hands it back for each operation.

/// Opaque token for an open file, minted by the file-system collaborator.
///
/// Deliberately not `Copy`/`Clone`: exactly one descriptor slot owns each
/// handle, and closing consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct FileHandle(u32);

impl FileHandle {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Operations the gateway needs from the file system.
///
/// Paths are raw bytes copied out of user memory with the trailing NUL
/// stripped; the file system decides what constitutes a valid name.
/// `read`/`write` return the byte count moved, or a negative value on
/// failure.
pub trait FileSystem {
    fn create(&mut self, path: &[u8], initial_size: u32) -> bool;
    fn remove(&mut self, path: &[u8]) -> bool;
    fn open(&mut self, path: &[u8]) -> Option<FileHandle>;
    fn close(&mut self, handle: FileHandle);
    fn length(&mut self, handle: &FileHandle) -> u32;
    fn read(&mut self, handle: &FileHandle, buf: &mut [u8]) -> isize;
    fn write(&mut self, handle: &FileHandle, buf: &[u8]) -> isize;
    fn seek(&mut self, handle: &FileHandle, position: u32);
    fn tell(&mut self, handle: &FileHandle) -> u32;
}
