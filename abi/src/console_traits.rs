//! Console collaborator boundary.

/// The console device behind descriptor slots 0 and 1.
pub trait Console {
    /// Write a run of bytes; each call is atomic with respect to other
    /// console output (the write handler never interleaves two lines
    /// inside one call).
    fn write(&mut self, bytes: &[u8]);

    /// Read one byte of console input, blocking until one is available.
    fn read_byte(&mut self) -> u8;
}
