//! Fixed-notation float conversion (`%f` / `%F`).
//!
//! The value is split into a whole part and a fraction scaled by
//! `10^precision`; both are turned into digits by the shift/add converter.
//! At most [`MAX_FRACTION_DIGITS`] fractional digits are computed, any further
//! requested precision is emitted as trailing zeros.

use crate::config::{FTOA_BUFFER_SIZE, FormatConfig, MAX_FRACTION_DIGITS};
use crate::emit::emit_reversed;
use crate::flags::ConversionFlags;
use crate::ntoa::{Base, Magnitude, push_digits};
use crate::scratch::Scratch;
use crate::sink::Output;

const POW10: [f64; MAX_FRACTION_DIGITS + 1] = [
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
];

/// Layout parameters for one float conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    pub precision: usize,
    pub width: usize,
    pub flags: ConversionFlags,
}

/// Emit `nan` / `inf` tokens. Returns `None` for finite values.
///
/// Tokens are always lowercase. `+` is honored for positive infinity, the
/// space flag is not.
pub(crate) fn emit_special(
    out: &mut Output<'_>,
    value: f64,
    width: usize,
    flags: ConversionFlags,
) -> Option<usize> {
    // Buffers are reversed.
    let token: &[u8] = if value.is_nan() {
        b"nan"
    } else if value < -f64::MAX {
        b"fni-"
    } else if value > f64::MAX {
        if flags.contains(ConversionFlags::PLUS) {
            b"fni+"
        } else {
            b"fni"
        }
    } else {
        return None;
    };
    Some(emit_reversed(out, token, width, flags))
}

/// Round a non-negative value to `precision` (at most 9) fractional digits.
///
/// Returns the whole part and the fraction as an integer below
/// `10^precision`. Above one half rounds up, carrying into the whole part. An
/// exact half rounds up only when the retained fraction is odd or zero; with
/// no fractional digits an exact half rounds the whole part to even.
#[must_use]
pub fn split_rounded(value: f64, precision: usize) -> (u64, u32) {
    let precision = precision.min(MAX_FRACTION_DIGITS);
    let mut whole = value as u64;

    if precision == 0 {
        let diff = value - whole as f64;
        if diff > 0.5 || (diff == 0.5 && whole & 1 == 1) {
            whole = whole.saturating_add(1);
        }
        return (whole, 0);
    }

    let scale = POW10[precision];
    let tmp = (value - whole as f64) * scale;
    let mut frac = tmp as u32;
    let diff = tmp - f64::from(frac);

    if diff > 0.5 || (diff == 0.5 && (frac == 0 || frac & 1 == 1)) {
        frac += 1;
        // 0.99 at one digit is 1.0
        if f64::from(frac) >= scale {
            frac = 0;
            whole = whole.saturating_add(1);
        }
    }
    (whole, frac)
}

/// Convert and emit a float in fixed notation.
///
/// Magnitudes above `config.max_float` go to exponential notation when the
/// `exponential` feature is built in, and produce nothing otherwise.
pub fn ftoa(out: &mut Output<'_>, value: f64, fmt: FloatFormat, config: &FormatConfig) -> usize {
    if let Some(idx) = emit_special(out, value, fmt.width, fmt.flags) {
        return idx;
    }

    if value > config.max_float || value < -config.max_float {
        #[cfg(feature = "exponential")]
        return crate::etoa::etoa(out, value, fmt, config);
        #[cfg(not(feature = "exponential"))]
        return out.index();
    }

    let negative = value < 0.0;
    let magnitude = if negative { -value } else { value };
    let precision = if fmt.flags.contains(ConversionFlags::PRECISION) {
        fmt.precision
    } else {
        config.default_float_precision
    };
    fixed(out, magnitude, negative, FloatFormat { precision, ..fmt })
}

/// Fixed-notation body. `magnitude` is finite and non-negative, the sign
/// comes in separately and `fmt.precision` is already resolved.
pub(crate) fn fixed(out: &mut Output<'_>, magnitude: f64, negative: bool, fmt: FloatFormat) -> usize {
    let flags = fmt.flags;
    let mut width = fmt.width;
    let mut buf = Scratch::<FTOA_BUFFER_SIZE>::new();

    let mut precision = fmt.precision;
    while precision > MAX_FRACTION_DIGITS && buf.push(b'0') {
        precision -= 1;
    }
    let precision = precision.min(MAX_FRACTION_DIGITS);

    let (whole, frac) = split_rounded(magnitude, precision);

    if precision > 0 {
        let start = buf.len();
        push_digits(&mut buf, Magnitude::compact(u64::from(frac)), Base::Decimal, false);
        buf.fill_to(b'0', start + precision);
        buf.push(b'.');
    } else if flags.contains(ConversionFlags::HASH) {
        buf.push(b'.');
    }

    push_digits(&mut buf, Magnitude::compact(whole), Base::Decimal, false);

    if flags.pads_zeros() {
        if width > 0 && flags.reserves_sign(negative) {
            width -= 1;
        }
        buf.fill_to(b'0', width);
    }

    if let Some(sign) = flags.sign_char(negative) {
        buf.push(sign);
    }

    emit_reversed(out, buf.as_slice(), width, flags)
}
