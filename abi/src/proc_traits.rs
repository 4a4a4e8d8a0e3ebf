//! Process-management collaborator boundary.

/// Operations the `exec` and `wait` handlers delegate to.
pub trait ProcessControl {
    /// Start a new process from a command line.
    ///
    /// May block until the child has finished loading, so that failure is
    /// knowable here. Returns the new process id, or
    /// [`INVALID_PROCESS_ID`](crate::task::INVALID_PROCESS_ID) if the
    /// load failed.
    fn spawn(&mut self, command_line: &[u8]) -> u32;

    /// Block until the given child terminates and return its exit status.
    ///
    /// A child that already terminated returns its stored status without
    /// blocking. A pid that is not a waitable child of the caller (or has
    /// already been waited on) returns -1.
    fn wait(&mut self, pid: u32) -> i32;
}
