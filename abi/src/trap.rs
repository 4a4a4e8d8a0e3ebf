//! Trap frame exposed to the syscall gateway by the interrupt layer.

/// Register state captured at the user/kernel boundary.
///
/// The gateway reads the user stack pointer out of `rsp` (the syscall
/// number word lives at `[rsp]`, arguments above it) and writes the
/// handler's return value into `rax` before the frame is restored.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TrapFrame {
    pub rax: u64,
    pub rsp: u64,
    pub rip: u64,
    pub rflags: u64,
    pub cs: u64,
    pub ss: u64,
}

impl TrapFrame {
    /// Create a zeroed trap frame.
    pub const fn zero() -> Self {
        Self {
            rax: 0,
            rsp: 0,
            rip: 0,
            rflags: 0,
            cs: 0,
            ss: 0,
        }
    }
}
