//! Decoding the syscall number and arguments off the user stack.
//!
//! Layout at entry: the number word at `[rsp]`, argument words above it
//! at `[rsp + 8]`, `[rsp + 16]`, `[rsp + 24]`. Every word is read
//! through the validated copy path, so a process pointing its stack at
//! a bad page faults here, before any handler runs.

use trapgate_abi::addr::VirtAddr;
use trapgate_abi::syscall::SYSCALL_WORD_SIZE;
use trapgate_abi::trap::TrapFrame;
use trapgate_mm::user_copy::read_user_word;
use trapgate_mm::{AddressSpace, UserPtrError};

use crate::syscall::context::SyscallArgs;

pub fn read_syscall_number(
    space: &dyn AddressSpace,
    frame: &TrapFrame,
) -> Result<u64, UserPtrError> {
    read_user_word(space, VirtAddr::new(frame.rsp))
}

/// Read `count` argument words. Only the words the syscall's arity
/// demands are touched; trailing stack garbage stays unread.
pub fn decode_args(
    space: &dyn AddressSpace,
    frame: &TrapFrame,
    count: usize,
) -> Result<SyscallArgs, UserPtrError> {
    let mut args = SyscallArgs::zero();
    let stack = VirtAddr::new(frame.rsp);
    for (i, word) in args.words.iter_mut().take(count).enumerate() {
        let at = stack
            .checked_offset((i as u64 + 1) * SYSCALL_WORD_SIZE)
            .ok_or(UserPtrError::Overflow)?;
        *word = read_user_word(space, at)?;
    }
    Ok(args)
}
