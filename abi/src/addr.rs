//! Virtual address type and user/kernel split constants.
//!
//! The newtype keeps raw user-supplied integers from being confused with
//! addresses the kernel has already vetted. It is a zero-cost abstraction
//! (`#[repr(transparent)]`) over a raw u64.

use bitflags::bitflags;

/// Size of a 4KB page.
pub const PAGE_SIZE_4KB: u64 = 4096;

/// First address above the user half of the address space.
///
/// Everything at or above this belongs exclusively to the kernel; a user
/// program handing the gateway such an address is a fault, never a valid
/// request.
pub const USER_SPACE_TOP: u64 = 0x0000_8000_0000_0000;

bitflags! {
    /// Access intent for a user-memory validation or translation.
    ///
    /// The gateway distinguishes the read side (kernel reads user bytes,
    /// e.g. `write`/`exec` arguments) from the write side (kernel stores
    /// into user memory, e.g. the `read` destination buffer) so a mapping
    /// collaborator can refuse stores into read-only pages.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PageAccess: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// A virtual memory address, kernel- or user-half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(pub u64);

impl VirtAddr {
    /// The null virtual address.
    pub const NULL: Self = Self(0);

    /// Create a new virtual address from a raw u64 value.
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw u64 value of this address.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true if this is the null address.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Add an offset to this address (wrapping on overflow).
    #[inline]
    pub const fn offset(self, off: u64) -> Self {
        Self(self.0.wrapping_add(off))
    }

    /// Add an offset, returning None on overflow.
    #[inline]
    pub const fn checked_offset(self, off: u64) -> Option<Self> {
        match self.0.checked_add(off) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Returns the page-aligned base address (4KB pages).
    #[inline]
    pub const fn page_base(self) -> Self {
        Self(self.0 & !(PAGE_SIZE_4KB - 1))
    }

    /// Returns the offset within a 4KB page.
    #[inline]
    pub const fn page_offset(self) -> u64 {
        self.0 & (PAGE_SIZE_4KB - 1)
    }

    /// Check if this address is in user space (lower half).
    #[inline]
    pub const fn is_user_space(self) -> bool {
        self.0 < USER_SPACE_TOP
    }
}

impl From<u64> for VirtAddr {
    #[inline]
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl From<VirtAddr> for u64 {
    #[inline]
    fn from(addr: VirtAddr) -> Self {
        addr.0
    }
}

impl core::fmt::LowerHex for VirtAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::LowerHex::fmt(&self.0, f)
    }
}
