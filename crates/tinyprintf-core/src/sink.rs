//! Output sinks.
//!
//! Every character the engine produces goes through [`Output::put`], which
//! advances a zero-based index unconditionally. Whether the character is
//! physically kept depends on the [`Sink`] variant, so the final index is the
//! full logical length even when a bounded buffer truncated it.

/// Destination for formatted characters.
pub enum Sink<'a> {
    /// Store into a caller buffer while the position is below the limit.
    Buffer(&'a mut [u8]),
    /// Store nothing; only the length is computed.
    Discard,
    /// Hand each character to a consumer. NUL is never forwarded.
    Callback(&'a mut dyn FnMut(u8)),
}

impl core::fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Buffer(buf) => f.debug_tuple("Buffer").field(&buf.len()).finish(),
            Self::Discard => f.write_str("Discard"),
            Self::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// A sink plus the running write index.
#[derive(Debug)]
pub struct Output<'a> {
    sink: Sink<'a>,
    limit: usize,
    idx: usize,
}

impl<'a> Output<'a> {
    /// Bounded buffer: characters at positions `>= buf.len()` are dropped.
    #[must_use]
    pub fn buffer(buf: &'a mut [u8]) -> Self {
        let limit = buf.len();
        Self {
            sink: Sink::Buffer(buf),
            limit,
            idx: 0,
        }
    }

    /// Buffer without a logical size limit. The slice bounds still apply to
    /// storage, but the terminator is placed as if the buffer were endless.
    #[must_use]
    pub fn unbounded_buffer(buf: &'a mut [u8]) -> Self {
        Self {
            sink: Sink::Buffer(buf),
            limit: usize::MAX,
            idx: 0,
        }
    }

    #[must_use]
    pub fn discard() -> Self {
        Self {
            sink: Sink::Discard,
            limit: 0,
            idx: 0,
        }
    }

    #[must_use]
    pub fn callback(f: &'a mut dyn FnMut(u8)) -> Self {
        Self {
            sink: Sink::Callback(f),
            limit: usize::MAX,
            idx: 0,
        }
    }

    /// Logical capacity (`usize::MAX` for unbounded sinks).
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Characters produced so far, stored or not.
    #[must_use]
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Write one character at the current index and advance.
    #[inline]
    pub fn put(&mut self, ch: u8) {
        self.store(ch, self.idx);
        self.idx += 1;
    }

    /// Write `ch` `count` times.
    pub fn repeat(&mut self, ch: u8, count: usize) {
        for _ in 0..count {
            self.put(ch);
        }
    }

    /// Place the terminating NUL without advancing.
    ///
    /// Lands at the current index, or on the last slot when the output was
    /// truncated. A zero-capacity buffer receives nothing.
    pub fn terminate(&mut self) {
        if self.limit == 0 {
            return;
        }
        let pos = if self.idx < self.limit {
            self.idx
        } else {
            self.limit - 1
        };
        self.store(0, pos);
    }

    fn store(&mut self, ch: u8, pos: usize) {
        match &mut self.sink {
            Sink::Buffer(buf) => {
                if pos < self.limit
                    && let Some(slot) = buf.get_mut(pos)
                {
                    *slot = ch;
                }
            }
            Sink::Discard => {}
            Sink::Callback(f) => {
                if ch != 0 {
                    (*f)(ch);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_buffer_counts_past_capacity() {
        let mut buf = [b'?'; 3];
        let mut out = Output::buffer(&mut buf);
        for &c in b"hello" {
            out.put(c);
        }
        assert_eq!(out.index(), 5);
        out.terminate();
        assert_eq!(&buf, b"he\0");
    }

    #[test]
    fn terminator_follows_short_output() {
        let mut buf = [b'?'; 8];
        let mut out = Output::buffer(&mut buf);
        out.put(b'a');
        out.terminate();
        assert_eq!(&buf[..3], b"a\0?");
    }

    #[test]
    fn zero_capacity_buffer_stays_untouched() {
        let mut buf: [u8; 0] = [];
        let mut out = Output::buffer(&mut buf);
        out.put(b'x');
        out.terminate();
        assert_eq!(out.index(), 1);
    }

    #[test]
    fn unbounded_buffer_never_overruns_slice() {
        let mut buf = [0u8; 2];
        let mut out = Output::unbounded_buffer(&mut buf);
        out.repeat(b'z', 4);
        out.terminate();
        assert_eq!(out.index(), 4);
        assert_eq!(&buf, b"zz");
    }

    #[test]
    fn discard_only_counts() {
        let mut out = Output::discard();
        out.repeat(b' ', 7);
        out.terminate();
        assert_eq!(out.index(), 7);
    }

    #[test]
    fn callback_skips_nul() {
        let mut seen = [0u8; 4];
        let mut n = 0;
        let mut push = |c: u8| {
            seen[n] = c;
            n += 1;
        };
        let mut out = Output::callback(&mut push);
        out.put(b'o');
        out.put(0);
        out.put(b'k');
        out.terminate();
        assert_eq!(out.index(), 3);
        drop(out);
        assert_eq!(n, 2);
        assert_eq!(&seen[..2], b"ok");
    }
}
