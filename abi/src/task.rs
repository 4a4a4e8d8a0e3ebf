//! Process-related constants shared between the gateway and its
//! collaborators.
//!
//! These are the canonical definitions; `fs` sizes its descriptor table
//! from them and `core` builds the process context around them.

pub const PROCESS_NAME_MAX_LEN: usize = 32;
pub const INVALID_PROCESS_ID: u32 = 0xFFFF_FFFF;

/// Capacity of the per-process descriptor table, indices `[0, 131)`.
pub const MAX_OPEN_FILES: usize = 131;

// Reserved descriptor slots. The table never stores into these; the
// read/write handlers treat 0 and 1 as the console streams and 2 as an
// unused error channel.
pub const FD_STDIN: u64 = 0;
pub const FD_STDOUT: u64 = 1;
pub const FD_STDERR: u64 = 2;

/// First slot the descriptor table hands out.
pub const FD_FIRST_FILE: usize = 3;

/// Exit status recorded when the gateway kills a process for a protocol
/// violation (bad address, bad descriptor, null path).
pub const FAULT_EXIT_STATUS: i32 = -1;
