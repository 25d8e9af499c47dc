//! Typed argument list and the cursor the parser pulls from.
//!
//! The engine performs no validation: a directive takes whatever argument is
//! next and reinterprets it. Integers of any kind convert into each other,
//! chars and pointers read as integers, and a missing or float/integer
//! mismatched argument reads as zero (or an empty string).

/// One formatting argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument<'a> {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Char(u8),
    Str(&'a [u8]),
    Pointer(usize),
}

impl<'a> Argument<'a> {
    /// Address of any value, for `%p`.
    #[must_use]
    pub fn pointer<T: ?Sized>(value: &T) -> Self {
        Self::Pointer(core::ptr::from_ref(value).cast::<u8>() as usize)
    }

    /// Raw 64-bit integer view.
    #[must_use]
    pub fn as_bits(&self) -> u64 {
        match *self {
            Self::Signed(v) => v as u64,
            Self::Unsigned(v) => v,
            Self::Char(c) => u64::from(c),
            Self::Pointer(p) => p as u64,
            Self::Float(_) | Self::Str(_) => 0,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Float(v) => v,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            Self::Str(s) => s,
            _ => &[],
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Argument<'_> {
            fn from(v: $t) -> Self {
                Self::Signed(v as i64)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Argument<'_> {
            fn from(v: $t) -> Self {
                Self::Unsigned(v as u64)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f64> for Argument<'_> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Argument<'_> {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<char> for Argument<'_> {
    fn from(c: char) -> Self {
        Self::Char(u8::try_from(c).unwrap_or(b'?'))
    }
}

impl From<bool> for Argument<'_> {
    fn from(b: bool) -> Self {
        Self::Signed(i64::from(b))
    }
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Argument<'a> {
    fn from(s: &'a [u8]) -> Self {
        Self::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Argument<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Self::Str(s)
    }
}

impl<T> From<*const T> for Argument<'_> {
    fn from(p: *const T) -> Self {
        Self::Pointer(p as usize)
    }
}

impl<T> From<*mut T> for Argument<'_> {
    fn from(p: *mut T) -> Self {
        Self::Pointer(p as usize)
    }
}

/// Build an argument array: `args![42, "text", 1.5]`.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Argument::from($arg)),*]
    };
}

/// Position in an argument list.
///
/// Pulling always advances, even past the end, so argument consumption stays
/// in lock-step with the format string.
#[derive(Debug, Clone)]
pub struct ArgCursor<'a, 'b> {
    args: &'b [Argument<'a>],
    pos: usize,
}

impl<'a, 'b> ArgCursor<'a, 'b> {
    #[must_use]
    pub fn new(args: &'b [Argument<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    /// Number of arguments pulled so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.args.len().saturating_sub(self.pos)
    }

    /// Skip `n` arguments without reading them.
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    /// Pull the next argument, if there is one.
    pub fn next_arg(&mut self) -> Option<Argument<'a>> {
        let arg = self.args.get(self.pos).copied();
        self.pos = self.pos.saturating_add(1);
        arg
    }

    /// Next argument as a signed integer truncated to `bytes` and
    /// sign-extended back to 64 bits.
    pub fn next_signed(&mut self, bytes: u8) -> i64 {
        let bits = self.next_arg().map_or(0, |a| a.as_bits());
        sign_extend(bits, bytes)
    }

    /// Next argument as an unsigned integer truncated to `bytes`.
    pub fn next_unsigned(&mut self, bytes: u8) -> u64 {
        let bits = self.next_arg().map_or(0, |a| a.as_bits());
        zero_extend(bits, bytes)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.next_arg().map_or(0.0, |a| a.as_f64())
    }

    pub fn next_str(&mut self) -> &'a [u8] {
        match self.next_arg() {
            Some(arg) => arg.as_bytes(),
            None => &[],
        }
    }
}

fn shift_for(bytes: u8) -> u32 {
    64 - u32::from(bytes.clamp(1, 8)) * 8
}

/// Keep the low `bytes` bytes of `bits`, sign-extending from the top one.
#[must_use]
pub fn sign_extend(bits: u64, bytes: u8) -> i64 {
    let shift = shift_for(bytes);
    ((bits << shift) as i64) >> shift
}

/// Keep the low `bytes` bytes of `bits`.
#[must_use]
pub fn zero_extend(bits: u64, bytes: u8) -> u64 {
    let shift = shift_for(bytes);
    (bits << shift) >> shift
}
