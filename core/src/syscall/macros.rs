/// Declares one syscall handler with the uniform signature the
/// dispatcher calls through.
macro_rules! define_syscall {
    ($(#[$meta:meta])* $name:ident($ctx:ident, $args:ident) $body:block) => {
        $(#[$meta])*
        pub fn $name(
            $ctx: &mut $crate::syscall::context::SyscallContext<'_, '_>,
            $args: &$crate::syscall::context::SyscallArgs,
        ) -> $crate::syscall::common::SyscallResult {
            $body
        }
    };
}

pub(crate) use define_syscall;
