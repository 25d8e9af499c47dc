//! Integer to text without wide division.
//!
//! The magnitude is shifted out bit by bit (most significant first) into an
//! accumulator whose cells are digits of the target base: double the
//! accumulator, add the bit, repeat. Only shifts, adds and compares on single
//! bytes are needed, so 64-bit values convert on targets with no wide divide.
//!
//! The accumulator ends up least-significant digit first, which is exactly the
//! order [`emit_reversed`] expects.

use crate::config::NTOA_BUFFER_SIZE;
use crate::emit::emit_reversed;
use crate::flags::ConversionFlags;
use crate::scratch::Scratch;
use crate::sink::Output;

/// Most digits any magnitude can produce (64 bits in base 2).
pub const MAX_DIGITS: usize = 64;

/// Target radix of an integer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl Base {
    #[must_use]
    pub const fn radix(self) -> u8 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }
}

/// Unsigned value held as little-endian bytes with a fixed byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magnitude {
    bytes: [u8; 8],
    width: u8,
}

impl Magnitude {
    /// Keep the low `width` bytes of `value`. Width is clamped to `1..=8`.
    #[must_use]
    pub fn new(value: u64, width: u8) -> Self {
        let width = width.clamp(1, 8);
        let mut bytes = value.to_le_bytes();
        for b in &mut bytes[width as usize..] {
            *b = 0;
        }
        Self { bytes, width }
    }

    /// Smallest of 1, 2, 4 or 8 bytes that holds `value`.
    #[must_use]
    pub fn compact(value: u64) -> Self {
        let width = if value <= u64::from(u8::MAX) {
            1
        } else if value <= u64::from(u16::MAX) {
            2
        } else if value <= u64::from(u32::MAX) {
            4
        } else {
            8
        };
        Self::new(value, width)
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.live().iter().all(|&b| b == 0)
    }

    #[must_use]
    pub fn to_u64(&self) -> u64 {
        u64::from_le_bytes(self.bytes)
    }

    fn live(&self) -> &[u8] {
        &self.bytes[..self.width as usize]
    }

    fn high_bit_set(&self) -> bool {
        self.live().last().is_some_and(|&b| b & 0x80 != 0)
    }

    fn shift_left(&mut self) {
        let mut carry = 0u8;
        for b in &mut self.bytes[..self.width as usize] {
            let next = *b >> 7;
            *b = (*b << 1) | carry;
            carry = next;
        }
    }
}

/// Layout parameters for one integer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub base: Base,
    pub precision: usize,
    pub width: usize,
    pub flags: ConversionFlags,
}

fn acc_double<const N: usize>(acc: &mut Scratch<N>, radix: u8) {
    let mut carry = false;
    for cell in acc.as_mut_slice() {
        *cell = (*cell << 1) + u8::from(carry);
        carry = *cell >= radix;
        if carry {
            *cell -= radix;
        }
    }
    if carry {
        acc.push(1);
    }
}

fn acc_increment<const N: usize>(acc: &mut Scratch<N>, radix: u8) {
    for cell in acc.as_mut_slice() {
        *cell += 1;
        if *cell != radix {
            return;
        }
        *cell = 0;
    }
    acc.push(1);
}

/// Append the digits of `magnitude` to `dst`, least significant first.
///
/// Zero yields a single `0`. Digits above 9 use `a`-`f` or `A`-`F`.
pub fn push_digits<const N: usize>(
    dst: &mut Scratch<N>,
    mut magnitude: Magnitude,
    base: Base,
    uppercase: bool,
) {
    let radix = base.radix();
    let mut acc = Scratch::<MAX_DIGITS>::new();
    acc.push(0);

    if !magnitude.is_zero() {
        for _ in 0..u32::from(magnitude.width()) * 8 {
            acc_double(&mut acc, radix);
            if magnitude.high_bit_set() {
                acc_increment(&mut acc, radix);
            }
            magnitude.shift_left();
        }
    }

    let alpha = if uppercase { b'A' } else { b'a' };
    for &cell in acc.as_slice() {
        let ch = if cell < 10 {
            b'0' + cell
        } else {
            alpha + (cell - 10)
        };
        if !dst.push(ch) {
            break;
        }
    }
}

/// Convert and emit an integer. Returns the output index after the write.
///
/// With an explicit precision, a zero value produces no digits at all, only
/// whatever padding precision and width ask for.
pub fn ntoa(out: &mut Output<'_>, magnitude: Magnitude, negative: bool, fmt: NumberFormat) -> usize {
    let mut flags = fmt.flags;
    let mut buf = Scratch::<NTOA_BUFFER_SIZE>::new();

    let is_zero = magnitude.is_zero();
    if is_zero {
        flags.remove(ConversionFlags::HASH);
    }

    if !flags.contains(ConversionFlags::PRECISION) || !is_zero {
        push_digits(
            &mut buf,
            magnitude,
            fmt.base,
            flags.contains(ConversionFlags::UPPERCASE),
        );
    }

    ntoa_format(out, buf, negative, NumberFormat { flags, ..fmt })
}

fn ntoa_format(
    out: &mut Output<'_>,
    mut buf: Scratch<NTOA_BUFFER_SIZE>,
    negative: bool,
    fmt: NumberFormat,
) -> usize {
    let flags = fmt.flags;
    let mut width = fmt.width;

    buf.fill_to(b'0', fmt.precision);

    let mut width_zeros = 0;
    if flags.pads_zeros() {
        if width > 0 && flags.reserves_sign(negative) {
            width -= 1;
        }
        let before = buf.len();
        buf.fill_to(b'0', width);
        width_zeros = buf.len() - before;
    }

    if flags.contains(ConversionFlags::HASH) {
        match fmt.base {
            Base::Octal => {
                if buf.last() != Some(b'0') {
                    buf.push(b'0');
                }
            }
            Base::Hex | Base::Binary => {
                // The prefix takes the place of width zeros, never of digits.
                buf.truncate_by(width_zeros.min(2));
                let marker = match fmt.base {
                    Base::Binary => b'b',
                    _ if flags.contains(ConversionFlags::UPPERCASE) => b'X',
                    _ => b'x',
                };
                buf.push(marker);
                buf.push(b'0');
            }
            Base::Decimal => {}
        }
    }

    if let Some(sign) = flags.sign_char(negative) {
        buf.push(sign);
    }

    emit_reversed(out, buf.as_slice(), width, flags)
}
