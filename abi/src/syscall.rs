//! Syscall numbers and the arity table.
//!
//! The number is a closed enumeration: anything `from_raw` rejects is not
//! a syscall, and the dispatcher treats it as a protocol violation rather
//! than a silent no-op.

/// Size of one argument word on the user stack.
pub const SYSCALL_WORD_SIZE: u64 = 8;

/// Largest argument count any syscall takes (`read`/`write`).
pub const SYSCALL_MAX_ARGS: usize = 3;

#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallNumber {
    Halt = 0,
    Exit = 1,
    Exec = 2,
    Wait = 3,
    Create = 4,
    Remove = 5,
    Open = 6,
    Filesize = 7,
    Read = 8,
    Write = 9,
    Seek = 10,
    Tell = 11,
    Close = 12,
}

impl SyscallNumber {
    /// Map a raw number from the user stack onto the closed enumeration.
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::Halt),
            1 => Some(Self::Exit),
            2 => Some(Self::Exec),
            3 => Some(Self::Wait),
            4 => Some(Self::Create),
            5 => Some(Self::Remove),
            6 => Some(Self::Open),
            7 => Some(Self::Filesize),
            8 => Some(Self::Read),
            9 => Some(Self::Write),
            10 => Some(Self::Seek),
            11 => Some(Self::Tell),
            12 => Some(Self::Close),
            _ => None,
        }
    }

    /// Number of argument words decoded from the user stack.
    pub const fn arg_count(self) -> usize {
        match self {
            Self::Halt => 0,
            Self::Exit | Self::Exec | Self::Wait | Self::Remove | Self::Open => 1,
            Self::Filesize | Self::Tell | Self::Close => 1,
            Self::Create | Self::Seek => 2,
            Self::Read | Self::Write => 3,
        }
    }

    /// Handler name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Halt => "halt",
            Self::Exit => "exit",
            Self::Exec => "exec",
            Self::Wait => "wait",
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Open => "open",
            Self::Filesize => "filesize",
            Self::Read => "read",
            Self::Write => "write",
            Self::Seek => "seek",
            Self::Tell => "tell",
            Self::Close => "close",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_covers_table() {
        for raw in 0..13u64 {
            let number = SyscallNumber::from_raw(raw).expect("table entry");
            assert_eq!(number as u64, raw);
        }
    }

    #[test]
    fn from_raw_rejects_out_of_table() {
        assert!(SyscallNumber::from_raw(13).is_none());
        assert!(SyscallNumber::from_raw(128).is_none());
        assert!(SyscallNumber::from_raw(u64::MAX).is_none());
    }

    #[test]
    fn arity_matches_handlers() {
        assert_eq!(SyscallNumber::Halt.arg_count(), 0);
        assert_eq!(SyscallNumber::Exit.arg_count(), 1);
        assert_eq!(SyscallNumber::Create.arg_count(), 2);
        assert_eq!(SyscallNumber::Seek.arg_count(), 2);
        assert_eq!(SyscallNumber::Read.arg_count(), 3);
        assert_eq!(SyscallNumber::Write.arg_count(), 3);
    }
}
