#![cfg_attr(not(test), no_std)]

pub mod fd_table;


pub use fd_table::{FdTable, OPEN_LOCK};
