//! Fixed-capacity formatting buffer.
//!
//! Lets callers build a complete line on the stack and emit it with a
//! single sink call, which is what keeps console records atomic.

use core::fmt;

pub struct FixedWriter<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedWriter<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<const N: usize> Default for FixedWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for FixedWriter<N> {
    /// Copies as much as fits; overflow truncates rather than erroring so
    /// a long process name cannot break the exit record path.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = N - self.len;
        let take = s.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn formats_into_buffer() {
        let mut w: FixedWriter<32> = FixedWriter::new();
        write!(w, "{}: exit({})", "grep", -1).unwrap();
        assert_eq!(w.as_bytes(), b"grep: exit(-1)");
    }

    #[test]
    fn truncates_on_overflow() {
        let mut w: FixedWriter<4> = FixedWriter::new();
        write!(w, "abcdef").unwrap();
        assert_eq!(w.as_bytes(), b"abcd");
        w.clear();
        assert_eq!(w.as_bytes(), b"");
    }
}
