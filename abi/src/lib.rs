//! Trapgate Kernel-Userland ABI Types
//!
//! This crate provides the canonical definitions for everything shared
//! between the syscall gateway and its collaborators. Having a single
//! source of truth eliminates:
//! - Duplicate type definitions
//! - ABI mismatches between kernel and userland
//! - Circular dependencies between subsystem crates
//!
//! The collaborator traits (file system, process management, console)
//! live here so that `mm`, `fs`, and `core` can all depend on them
//! without depending on each other's implementations.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod addr;
pub mod console_traits;
pub mod error;
pub mod fs_traits;
pub mod proc_traits;
pub mod syscall;
pub mod task;
pub mod trap;

pub use addr::*;
pub use console_traits::*;
pub use error::*;
pub use fs_traits::*;
pub use proc_traits::*;
pub use syscall::*;
pub use task::*;
pub use trap::*;
