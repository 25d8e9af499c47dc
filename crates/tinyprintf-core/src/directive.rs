//! Format string parsing.
//!
//! [`FormatParser`] walks the format one segment at a time: a run of literal
//! bytes, a fully resolved [`FormatDirective`], an unknown conversion letter
//! (emitted literally by the caller), or the end of the format. `*` width and
//! precision pull from the argument cursor while parsing, so argument
//! consumption stays in format-string order.

use crate::args::ArgCursor;
use crate::config::DataModel;
use crate::flags::ConversionFlags;
use crate::ntoa::Base;

/// What a directive converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    SignedInt,
    UnsignedInt(Base),
    FloatFixed,
    FloatExponential,
    Char,
    String,
    Pointer,
    Percent,
}

/// One `%...` specification with its resolved parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDirective {
    pub flags: ConversionFlags,
    pub width: usize,
    /// Meaningful only when `flags` contains `PRECISION`.
    pub precision: usize,
    pub kind: ConversionKind,
}

impl FormatDirective {
    /// Byte width of the integer argument this directive reads.
    #[must_use]
    pub fn int_bytes(&self, model: &DataModel) -> u8 {
        let flags = self.flags;
        if flags.contains(ConversionFlags::CHAR) {
            1
        } else if flags.contains(ConversionFlags::SHORT) {
            2
        } else if flags.contains(ConversionFlags::LONG_LONG) {
            model.long_long_bytes
        } else if flags.contains(ConversionFlags::LONG) {
            model.long_bytes
        } else {
            model.int_bytes
        }
    }
}

/// One step of the format walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'f> {
    /// Bytes copied through unchanged. Never contains `%` or NUL.
    Literal(&'f [u8]),
    Directive(FormatDirective),
    /// Unrecognized conversion letter; no argument was consumed for it.
    Unknown(u8),
}

/// Cursor over a format string.
#[derive(Debug, Clone)]
pub struct FormatParser<'f> {
    fmt: &'f [u8],
    pos: usize,
}

impl<'f> FormatParser<'f> {
    #[must_use]
    pub fn new(fmt: &'f [u8]) -> Self {
        Self { fmt, pos: 0 }
    }

    /// Bytes of the format consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.fmt.get(self.pos).copied().filter(|&c| c != 0)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Decimal literal, saturating on overflow.
    fn number(&mut self) -> usize {
        let mut n = 0usize;
        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            n = n.saturating_mul(10).saturating_add(usize::from(c - b'0'));
            self.bump();
        }
        n
    }

    /// Next segment, or `None` at the end of the format (its length, a NUL,
    /// or a directive cut short).
    pub fn next_segment(
        &mut self,
        args: &mut ArgCursor<'_, '_>,
        model: &DataModel,
    ) -> Option<Segment<'f>> {
        let first = self.peek()?;
        if first != b'%' {
            let start = self.pos;
            while self.peek().is_some_and(|c| c != b'%') {
                self.bump();
            }
            return self.fmt.get(start..self.pos).map(Segment::Literal);
        }
        self.bump();
        self.directive(args, model)
    }

    fn directive(
        &mut self,
        args: &mut ArgCursor<'_, '_>,
        model: &DataModel,
    ) -> Option<Segment<'f>> {
        let mut flags = ConversionFlags::empty();
        loop {
            let flag = match self.peek()? {
                b'0' => ConversionFlags::ZERO_PAD,
                b'-' => ConversionFlags::LEFT,
                b'+' => ConversionFlags::PLUS,
                b' ' => ConversionFlags::SPACE,
                b'#' => ConversionFlags::HASH,
                _ => break,
            };
            flags |= flag;
            self.bump();
        }

        let mut width = if self.eat(b'*') {
            let w = args.next_signed(model.int_bytes);
            if w < 0 {
                flags |= ConversionFlags::LEFT;
            }
            usize::try_from(w.unsigned_abs()).unwrap_or(usize::MAX)
        } else {
            self.number()
        };

        let mut precision = 0;
        if self.eat(b'.') {
            flags |= ConversionFlags::PRECISION;
            if self.eat(b'*') {
                let p = args.next_signed(model.int_bytes);
                precision = usize::try_from(p).unwrap_or(0);
            } else {
                precision = self.number();
            }
        }

        match self.peek()? {
            b'l' => {
                self.bump();
                flags |= if self.eat(b'l') {
                    ConversionFlags::LONG_LONG
                } else {
                    ConversionFlags::LONG
                };
            }
            b'h' => {
                self.bump();
                flags |= if self.eat(b'h') {
                    ConversionFlags::CHAR
                } else {
                    ConversionFlags::SHORT
                };
            }
            #[cfg(feature = "ptrdiff")]
            b't' => {
                self.bump();
                flags |= wide_flag(model.ptrdiff_bytes, model);
            }
            b'j' => {
                self.bump();
                flags |= wide_flag(model.intmax_bytes, model);
            }
            b'z' => {
                self.bump();
                flags |= wide_flag(model.size_bytes, model);
            }
            _ => {}
        }

        let letter = self.peek()?;
        self.bump();

        let kind = match letter {
            b'd' | b'i' => ConversionKind::SignedInt,
            b'u' => ConversionKind::UnsignedInt(Base::Decimal),
            b'x' | b'X' => ConversionKind::UnsignedInt(Base::Hex),
            b'o' => ConversionKind::UnsignedInt(Base::Octal),
            b'b' => ConversionKind::UnsignedInt(Base::Binary),
            b'f' | b'F' => ConversionKind::FloatFixed,
            b'e' | b'E' | b'g' | b'G' => ConversionKind::FloatExponential,
            b'c' => ConversionKind::Char,
            b's' => ConversionKind::String,
            b'p' => ConversionKind::Pointer,
            b'%' => ConversionKind::Percent,
            other => return Some(Segment::Unknown(other)),
        };

        if matches!(letter, b'X' | b'F' | b'E' | b'G') {
            flags |= ConversionFlags::UPPERCASE;
        }
        if matches!(letter, b'g' | b'G') {
            flags |= ConversionFlags::ADAPT_EXP;
        }

        match kind {
            ConversionKind::SignedInt | ConversionKind::UnsignedInt(_) => {
                if matches!(kind, ConversionKind::UnsignedInt(_)) {
                    flags.remove(ConversionFlags::PLUS | ConversionFlags::SPACE);
                }
                if matches!(
                    kind,
                    ConversionKind::SignedInt | ConversionKind::UnsignedInt(Base::Decimal)
                ) {
                    flags.remove(ConversionFlags::HASH);
                }
                if flags.contains(ConversionFlags::PRECISION) {
                    flags.remove(ConversionFlags::ZERO_PAD);
                }
            }
            ConversionKind::Pointer => {
                width = usize::from(model.pointer_bytes) * 2;
                flags.remove(ConversionFlags::PLUS | ConversionFlags::SPACE);
                flags |= ConversionFlags::ZERO_PAD | ConversionFlags::UPPERCASE;
            }
            _ => {}
        }

        Some(Segment::Directive(FormatDirective {
            flags,
            width,
            precision,
            kind,
        }))
    }
}

/// `t` / `j` / `z` read as `long` when the type is exactly that wide.
fn wide_flag(bytes: u8, model: &DataModel) -> ConversionFlags {
    if bytes == model.long_bytes {
        ConversionFlags::LONG
    } else {
        ConversionFlags::LONG_LONG
    }
}
