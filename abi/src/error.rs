//! Error types shared across the gateway crates.

/// Descriptor-table lookup and release failures.
///
/// `TableFull` never reaches user code as anything other than the `-1`
/// open failure, but keeping it distinct lets the open path log table
/// exhaustion separately from a file-system miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FdError {
    /// Slot index at or beyond the table capacity.
    OutOfRange,
    /// Slot 0, 1, or 2; the table never stores into these.
    Reserved,
    /// In-range slot with no live handle.
    Unoccupied,
    /// No free slot in `[FD_FIRST_FILE, MAX_OPEN_FILES)`.
    TableFull,
}
