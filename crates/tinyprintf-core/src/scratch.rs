//! Fixed-capacity reversed digit buffer.
//!
//! Converters build their output least-significant character first, then the
//! emit stage reverses it. Pushing into a full buffer is a silent no-op, so an
//! oversized width or precision truncates instead of overrunning.

/// Stack-resident scratch space for one conversion.
#[derive(Clone)]
pub struct Scratch<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Scratch<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Append one cell. Returns `false` (and stores nothing) when full.
    #[inline]
    pub fn push(&mut self, value: u8) -> bool {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = value;
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Push `value` until the length reaches `target` or the buffer fills.
    pub fn fill_to(&mut self, value: u8, target: usize) {
        while self.len < target && self.push(value) {}
    }

    /// Drop up to `count` cells from the high end.
    pub fn truncate_by(&mut self, count: usize) {
        self.len = self.len.saturating_sub(count);
    }

    /// The most recently pushed cell.
    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.as_slice().last().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl<const N: usize> Default for Scratch<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for Scratch<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scratch")
            .field("len", &self.len)
            .field("capacity", &N)
            .finish()
    }
}
