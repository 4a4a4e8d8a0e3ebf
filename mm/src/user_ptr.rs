//! User-pointer validation.
//!
//! This is the single chokepoint between raw user-supplied addresses and
//! kernel dereferences. Every byte the gateway touches on behalf of a
//! user program goes through [`check_user_addr`], directly or via the
//! range walk. A failure here is fatal to the calling process; the
//! dispatcher turns the error into the one termination path.

use core::ptr::NonNull;

use trapgate_abi::addr::{PAGE_SIZE_4KB, PageAccess, VirtAddr};

use crate::paging::AddressSpace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserPtrError {
    /// Address zero.
    NullPointer,
    /// Address at or above the user/kernel split.
    KernelRange,
    /// In the user half, but the mapping has no accessible page there.
    NotMapped,
    /// Range arithmetic wrapped the address space.
    Overflow,
}

/// Validate a single user address and translate it.
///
/// The address must lie below the kernel split *and* be backed by a
/// present, user-accessible page permitting `access`. On success the
/// returned pointer is safe to dereference up to the end of its page;
/// this function never yields a pointer for an invalid address.
pub fn check_user_addr(
    space: &dyn AddressSpace,
    addr: VirtAddr,
    access: PageAccess,
) -> Result<NonNull<u8>, UserPtrError> {
    if addr.is_null() {
        return Err(UserPtrError::NullPointer);
    }
    if !addr.is_user_space() {
        return Err(UserPtrError::KernelRange);
    }
    space
        .translate(addr, access)
        .ok_or(UserPtrError::NotMapped)
}

/// Validate every byte of `[addr, addr + len)`.
///
/// Walks the range one page step at a time, so a buffer spanning many
/// pages is only as valid as its worst page; no single-page assumption.
pub fn check_user_range(
    space: &dyn AddressSpace,
    addr: VirtAddr,
    len: usize,
    access: PageAccess,
) -> Result<(), UserPtrError> {
    if len == 0 {
        return Ok(());
    }
    let last = addr
        .checked_offset(len as u64 - 1)
        .ok_or(UserPtrError::Overflow)?;
    if !last.is_user_space() {
        return Err(UserPtrError::KernelRange);
    }

    let mut probe = addr;
    loop {
        check_user_addr(space, probe, access)?;
        let next_page = probe.page_base().offset(PAGE_SIZE_4KB);
        if next_page.as_u64() > last.as_u64() {
            return Ok(());
        }
        probe = next_page;
    }
}
