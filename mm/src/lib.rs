#![cfg_attr(not(test), no_std)]

pub mod paging;
pub mod testing;
pub mod user_copy;
pub mod user_ptr;


pub use paging::AddressSpace;
pub use user_ptr::UserPtrError;
