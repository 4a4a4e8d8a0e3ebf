#![cfg_attr(not(test), no_std)]

pub mod init_flag;
pub mod klog;
pub mod string;

pub use init_flag::InitFlag;
pub use klog::KlogLevel;
pub use string::FixedWriter;
