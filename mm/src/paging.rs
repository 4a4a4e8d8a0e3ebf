//! Page-mapping collaborator boundary.
//!
//! The gateway needs exactly one paging operation: turn a user virtual
//! address into a kernel-accessible pointer, or learn that the page is
//! not there. Everything else about the paging design stays with the
//! memory subsystem that implements this trait.

use core::ptr::NonNull;

use trapgate_abi::addr::{PageAccess, VirtAddr};

/// The active page mapping of one process.
pub trait AddressSpace {
    /// Translate `addr` to a kernel-accessible pointer.
    ///
    /// Returns `None` unless the page containing `addr` is present,
    /// user-accessible, and permits `access`. The returned pointer is
    /// valid for the remainder of the 4KB page containing `addr`; a
    /// caller touching more than one page must translate each page.
    fn translate(&self, addr: VirtAddr, access: PageAccess) -> Option<NonNull<u8>>;
}
