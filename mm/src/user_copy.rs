//! Page-wise copies between kernel buffers and validated user memory.
//!
//! Each page is validated immediately before it is touched; a copy never
//! dereferences an address [`check_user_addr`] has not vetted. Copies do
//! not partially succeed from the caller's point of view: any invalid
//! page aborts with the validator's error before the gateway acts on the
//! data.

use core::ptr;

use trapgate_abi::addr::{PAGE_SIZE_4KB, PageAccess, VirtAddr};

use crate::paging::AddressSpace;
use crate::user_ptr::{UserPtrError, check_user_addr};

/// Copy `dst.len()` bytes from user memory at `src` into a kernel buffer.
pub fn copy_from_user(
    space: &dyn AddressSpace,
    dst: &mut [u8],
    src: VirtAddr,
) -> Result<(), UserPtrError> {
    let mut copied = 0usize;
    let mut at = src;
    while copied < dst.len() {
        let kptr = check_user_addr(space, at, PageAccess::READ)?;
        let page_left = (PAGE_SIZE_4KB - at.page_offset()) as usize;
        let chunk = page_left.min(dst.len() - copied);
        unsafe {
            ptr::copy_nonoverlapping(kptr.as_ptr(), dst[copied..].as_mut_ptr(), chunk);
        }
        copied += chunk;
        at = at
            .checked_offset(chunk as u64)
            .ok_or(UserPtrError::Overflow)?;
    }
    Ok(())
}

/// Copy a kernel buffer into user memory at `dst`.
pub fn copy_to_user(
    space: &dyn AddressSpace,
    dst: VirtAddr,
    src: &[u8],
) -> Result<(), UserPtrError> {
    let mut copied = 0usize;
    let mut at = dst;
    while copied < src.len() {
        let kptr = check_user_addr(space, at, PageAccess::WRITE)?;
        let page_left = (PAGE_SIZE_4KB - at.page_offset()) as usize;
        let chunk = page_left.min(src.len() - copied);
        unsafe {
            ptr::copy_nonoverlapping(src[copied..].as_ptr(), kptr.as_ptr(), chunk);
        }
        copied += chunk;
        at = at
            .checked_offset(chunk as u64)
            .ok_or(UserPtrError::Overflow)?;
    }
    Ok(())
}

/// Read one argument word from the user stack.
///
/// The word may straddle a page boundary (user stacks are not required
/// to keep arguments aligned), so it goes through the page-wise copy.
pub fn read_user_word(space: &dyn AddressSpace, addr: VirtAddr) -> Result<u64, UserPtrError> {
    let mut word = [0u8; 8];
    copy_from_user(space, &mut word, addr)?;
    Ok(u64::from_le_bytes(word))
}

/// Copy a NUL-terminated string out of user memory, one byte at a time.
///
/// Stops at the terminator and returns the bytes before it, so a short
/// string near the end of a mapped region never trips over the page
/// after it. A string longer than `dst` is truncated to the buffer.
pub fn copy_user_cstr<'a>(
    space: &dyn AddressSpace,
    dst: &'a mut [u8],
    src: VirtAddr,
) -> Result<&'a [u8], UserPtrError> {
    for i in 0..dst.len() {
        let at = src
            .checked_offset(i as u64)
            .ok_or(UserPtrError::Overflow)?;
        let kptr = check_user_addr(space, at, PageAccess::READ)?;
        let byte = unsafe { kptr.as_ptr().read() };
        if byte == 0 {
            return Ok(&dst[..i]);
        }
        dst[i] = byte;
    }
    Ok(dst)
}
