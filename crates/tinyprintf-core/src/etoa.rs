//! Exponential and adaptive float conversion (`%e` / `%E` / `%g` / `%G`).
//!
//! The decimal exponent is estimated from the binary exponent and mantissa
//! with a short series, then corrected against the actual scale. The mantissa
//! goes through the fixed-notation body, the exponent through the integer
//! converter.

use crate::config::{FormatConfig, MAX_FRACTION_DIGITS};
use crate::flags::ConversionFlags;
use crate::ftoa::{FloatFormat, emit_special, fixed, split_rounded};
use crate::ntoa::{Base, Magnitude, NumberFormat, ntoa};
use crate::sink::Output;

const MANTISSA_MASK: u64 = (1 << 52) - 1;
const EXPONENT_BIAS: i32 = 1023;

/// `%g` prints in fixed notation inside this range.
const ADAPTIVE_LOW: f64 = 1e-4;
const ADAPTIVE_HIGH: f64 = 1e6;

/// Decades the exponent estimate may be walked after the series.
const MAX_CORRECTION: usize = 3;

/// Decimal exponent of `value` and `10^exponent`, for finite `value > 0`.
/// Zero yields `(0, 1.0)`.
#[must_use]
pub fn decimal_exponent(value: f64) -> (i32, f64) {
    if value == 0.0 {
        return (0, 1.0);
    }

    let bits = value.to_bits();
    let exp2 = ((bits >> 52) & 0x7FF) as i32 - EXPONENT_BIAS;
    // Mantissa normalized into [1, 2).
    let mantissa = f64::from_bits((bits & MANTISSA_MASK) | ((EXPONENT_BIAS as u64) << 52));

    // log10(x) ~ log10(2) * exp2 + log10(1.5) + (m - 1.5) / (1.5 * ln 10)
    let estimate = 0.176_091_259_055_8
        + f64::from(exp2) * 0.301_029_995_663_981
        + (mantissa - 1.5) * 0.289_529_654_602_168;
    // Floor, not truncation: negative estimates must round down.
    let mut exp10 = estimate as i32;
    if f64::from(exp10) > estimate {
        exp10 -= 1;
    }

    // 10^exp10 = 2^pow2 * e^z, with e^z from a continued fraction.
    let pow2 = (f64::from(exp10) * 3.321_928_094_887_362 + 0.5) as i32;
    let z = f64::from(exp10) * 2.302_585_092_994_046 - f64::from(pow2) * 0.693_147_180_559_945_3;
    let z2 = z * z;
    let biased = (pow2 + EXPONENT_BIAS).clamp(1, 2046) as u64;
    let mut scale = f64::from_bits(biased << 52);
    scale *= 1.0 + 2.0 * z / (2.0 - z + (z2 / (6.0 + (z2 / (10.0 + z2 / 14.0)))));

    for _ in 0..MAX_CORRECTION {
        if value < scale {
            exp10 -= 1;
            scale /= 10.0;
        } else if value >= scale * 10.0 {
            exp10 += 1;
            scale *= 10.0;
        } else {
            break;
        }
    }
    (exp10, scale)
}

/// Convert and emit a float in exponential notation, or in `%g` style when
/// `ADAPT_EXP` is set.
pub fn etoa(out: &mut Output<'_>, value: f64, fmt: FloatFormat, config: &FormatConfig) -> usize {
    let mut flags = fmt.flags;
    if let Some(idx) = emit_special(out, value, fmt.width, flags) {
        return idx;
    }

    let negative = value < 0.0;
    let mut magnitude = if negative { -value } else { value };
    let mut precision = if flags.contains(ConversionFlags::PRECISION) {
        fmt.precision
    } else {
        config.default_float_precision
    };

    let (mut exponent, scale) = decimal_exponent(magnitude);
    let mut has_exponent = true;

    if flags.contains(ConversionFlags::ADAPT_EXP) {
        if (ADAPTIVE_LOW..ADAPTIVE_HIGH).contains(&magnitude) {
            let keep = precision as i64 - i64::from(exponent) - 1;
            precision = usize::try_from(keep).unwrap_or(0);
            has_exponent = false;
            exponent = 0;
        } else {
            // Precision counts significant digits, one of which is the
            // leading mantissa digit.
            precision = precision.saturating_sub(1);
        }
    }
    flags.insert(ConversionFlags::PRECISION);
    flags.remove(ConversionFlags::ADAPT_EXP);

    if has_exponent {
        // `scale` is within a few ulps of 10^exponent, so past about 1e±280
        // a mantissa sitting on a rounding tie can move by one in the last digit.
        magnitude /= scale;
        if split_rounded(magnitude, precision.min(MAX_FRACTION_DIGITS)).0 >= 10 {
            magnitude /= 10.0;
            exponent += 1;
        }
    }

    let exp_width: usize = match (has_exponent, exponent.unsigned_abs()) {
        (false, _) => 0,
        (true, e) if e < 100 => 4,
        _ => 5,
    };

    let width = fmt.width;
    let mut mantissa_width = width.saturating_sub(exp_width);
    if width <= exp_width || (flags.contains(ConversionFlags::LEFT) && exp_width > 0) {
        mantissa_width = 0;
    }

    let start = out.index();
    let mut idx = fixed(
        out,
        magnitude,
        negative,
        FloatFormat {
            precision,
            width: mantissa_width,
            flags,
        },
    );

    if has_exponent {
        out.put(if flags.contains(ConversionFlags::UPPERCASE) {
            b'E'
        } else {
            b'e'
        });
        idx = ntoa(
            out,
            Magnitude::compact(u64::from(exponent.unsigned_abs())),
            exponent < 0,
            NumberFormat {
                base: Base::Decimal,
                precision: 0,
                width: exp_width - 1,
                flags: ConversionFlags::ZERO_PAD | ConversionFlags::PLUS,
            },
        );
        if flags.contains(ConversionFlags::LEFT) {
            out.repeat(b' ', width.saturating_sub(idx - start));
            idx = out.index();
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    fn render_with(
        value: f64,
        precision: Option<usize>,
        width: usize,
        flags: ConversionFlags,
    ) -> String {
        let mut flags = flags;
        if precision.is_some() {
            flags |= ConversionFlags::PRECISION;
        }
        let fmt = FloatFormat {
            precision: precision.unwrap_or(0),
            width,
            flags,
        };
        let mut buf = [0u8; 128];
        let n = {
            let mut out = Output::buffer(&mut buf);
            etoa(&mut out, value, fmt, &FormatConfig::DEFAULT)
        };
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    fn e(value: f64) -> String {
        render_with(value, None, 0, ConversionFlags::empty())
    }

    fn g(value: f64) -> String {
        render_with(value, None, 0, ConversionFlags::ADAPT_EXP)
    }

    #[test]
    fn exponent_estimate_between_powers_of_ten() {
        assert_eq!(decimal_exponent(0.0), (0, 1.0));
        assert_eq!(decimal_exponent(9.5).0, 0);
        assert_eq!(decimal_exponent(12_345.0).0, 4);
        assert_eq!(decimal_exponent(0.05).0, -2);
        assert_eq!(decimal_exponent(3e-5).0, -5);
        assert_eq!(decimal_exponent(4.2e150).0, 150);
        for k in -40..=40 {
            let v: f64 = std::format!("5e{k}").parse().unwrap();
            let (exp, scale) = decimal_exponent(v);
            assert_eq!(exp, k, "5e{k}");
            assert!(v / scale > 4.99 && v / scale < 5.01);
        }
    }

    #[test]
    fn mantissa_near_ten_below_one() {
        assert_eq!(e(0.000_98), "9.800000e-04");
        assert_eq!(e(0.000_99), "9.900000e-04");
        assert_eq!(e(9.8e-7), "9.800000e-07");
        assert_eq!(e(1.0 / 1024.0), "9.765625e-04");
        assert_eq!(e(-1.0 / 1024.0), "-9.765625e-04");
        assert_eq!(g(0.000_98), "0.000980000");
        assert_eq!(g(9.8e-7), "9.80000e-07");
        for k in -1022..=1023 {
            let v = f64::from_bits(((k + EXPONENT_BIAS) as u64) << 52);
            let (exp, scale) = decimal_exponent(v);
            let m = v / scale;
            assert!((1.0..10.0).contains(&m), "2^{k}: exponent {exp}, mantissa {m}");
        }
    }

    #[test]
    fn basic_exponential() {
        assert_eq!(e(1234.5678), "1.234568e+03");
        assert_eq!(e(0.001234), "1.234000e-03");
        assert_eq!(e(-2.5), "-2.500000e+00");
        assert_eq!(e(0.0), "0.000000e+00");
    }

    #[test]
    fn uppercase_marker() {
        assert_eq!(
            render_with(1234.5678, Some(2), 0, ConversionFlags::UPPERCASE),
            "1.23E+03"
        );
    }

    #[test]
    fn three_digit_exponent() {
        assert_eq!(render_with(1e100, Some(1), 0, ConversionFlags::empty()), "1.0e+100");
        assert_eq!(render_with(1e-100, Some(1), 0, ConversionFlags::empty()), "1.0e-100");
    }

    #[test]
    fn mantissa_rollover_bumps_exponent() {
        assert_eq!(render_with(9.999, Some(2), 0, ConversionFlags::empty()), "1.00e+01");
        assert_eq!(render_with(99_999.0, Some(0), 0, ConversionFlags::empty()), "1e+05");
    }

    #[test]
    fn width_covers_whole_field() {
        assert_eq!(render_with(1234.5678, None, 15, ConversionFlags::empty()), "   1.234568e+03");
        assert_eq!(render_with(1234.5678, None, 15, ConversionFlags::LEFT), "1.234568e+03   ");
        assert_eq!(
            render_with(-1.5, Some(1), 10, ConversionFlags::ZERO_PAD),
            "-001.5e+00"
        );
    }

    #[test]
    fn adaptive_uses_fixed_inside_range() {
        assert_eq!(g(1234.5678), "1234.57");
        assert_eq!(g(100.0), "100.000");
        assert_eq!(g(0.5), "0.500000");
    }

    #[test]
    fn adaptive_uses_exponent_outside_range() {
        assert_eq!(g(1e6), "1.00000e+06");
        assert_eq!(g(123_456_789.0), "1.23457e+08");
        assert_eq!(g(0.0), "0.00000e+00");
        assert_eq!(g(0.00001), "1.00000e-05");
    }

    #[test]
    fn special_values_pass_through() {
        assert_eq!(e(f64::NAN), "nan");
        assert_eq!(e(f64::NEG_INFINITY), "-inf");
        assert_eq!(render_with(f64::INFINITY, None, 5, ConversionFlags::empty()), "  inf");
    }
}
