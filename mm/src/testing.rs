//! Test fixture: an array-backed [`AddressSpace`].
//!
//! Maps one contiguous window of user memory onto an in-crate byte
//! array, with an optional unmapped hole and an optional read-only tail.
//! The dispatcher and descriptor tests drive the whole gateway against
//! this instead of real page tables.
//!
//! `N` and the window base must be multiples of [`PAGE_SIZE_4KB`]; the
//! per-page translation contract depends on it.

use core::cell::UnsafeCell;
use core::ptr::NonNull;

use trapgate_abi::addr::{PAGE_SIZE_4KB, PageAccess, VirtAddr};

use crate::paging::AddressSpace;

pub struct FixedAddressSpace<const N: usize> {
    base: VirtAddr,
    read_only_from: usize,
    hole: Option<(usize, usize)>,
    bytes: UnsafeCell<[u8; N]>,
}

impl<const N: usize> FixedAddressSpace<N> {
    pub fn new(base: u64) -> Self {
        debug_assert!(base % PAGE_SIZE_4KB == 0, "window base must be page-aligned");
        debug_assert!(N as u64 % PAGE_SIZE_4KB == 0, "window must be whole pages");
        Self {
            base: VirtAddr::new(base),
            read_only_from: N,
            hole: None,
            bytes: UnsafeCell::new([0; N]),
        }
    }

    /// Pages at or beyond `offset` refuse WRITE access.
    pub fn set_read_only_from(&mut self, offset: usize) {
        debug_assert!(offset as u64 % PAGE_SIZE_4KB == 0);
        self.read_only_from = offset;
    }

    /// Unmap `[offset, offset + len)`.
    pub fn punch_hole(&mut self, offset: usize, len: usize) {
        debug_assert!(offset as u64 % PAGE_SIZE_4KB == 0);
        debug_assert!(len as u64 % PAGE_SIZE_4KB == 0);
        self.hole = Some((offset, len));
    }

    pub fn base(&self) -> VirtAddr {
        self.base
    }

    /// Seed the backing store directly (test setup, not a translation).
    pub fn write(&mut self, addr: u64, data: &[u8]) {
        let offset = (addr - self.base.as_u64()) as usize;
        self.bytes.get_mut()[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Read the backing store directly (test assertions).
    pub fn read(&mut self, addr: u64, out: &mut [u8]) {
        let offset = (addr - self.base.as_u64()) as usize;
        out.copy_from_slice(&self.bytes.get_mut()[offset..offset + out.len()]);
    }
}

impl<const N: usize> AddressSpace for FixedAddressSpace<N> {
    fn translate(&self, addr: VirtAddr, access: PageAccess) -> Option<NonNull<u8>> {
        let offset = addr.as_u64().checked_sub(self.base.as_u64())? as usize;
        if offset >= N {
            return None;
        }
        if let Some((hole_at, hole_len)) = self.hole {
            if offset >= hole_at && offset < hole_at + hole_len {
                return None;
            }
        }
        if access.contains(PageAccess::WRITE) && offset >= self.read_only_from {
            return None;
        }
        let base = self.bytes.get() as *mut u8;
        NonNull::new(base.wrapping_add(offset))
    }
}
