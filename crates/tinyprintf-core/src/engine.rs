//! Directive loop: parse, pull arguments, dispatch to a converter.
//!
//! Literal text goes straight to the sink. Each directive reads exactly the
//! arguments its conversion needs, in format order, even when the conversion
//! is compiled out and emits nothing.

use crate::args::ArgCursor;
use crate::config::FormatConfig;
use crate::directive::{ConversionKind, FormatDirective, FormatParser, Segment};
use crate::emit::emit_padded;
use crate::flags::ConversionFlags;
use crate::ntoa::{Base, Magnitude, NumberFormat, ntoa};
use crate::sink::Output;

#[cfg(feature = "float")]
use crate::ftoa::FloatFormat;

/// Run the whole format through `out`. Returns the final output index.
///
/// No terminator is written here; bounded entry points add it afterwards.
pub fn format(
    out: &mut Output<'_>,
    fmt: &[u8],
    args: &mut ArgCursor<'_, '_>,
    config: &FormatConfig,
) -> usize {
    let mut parser = FormatParser::new(fmt);
    while let Some(segment) = parser.next_segment(args, &config.data_model) {
        match segment {
            Segment::Literal(bytes) => {
                for &ch in bytes {
                    out.put(ch);
                }
            }
            Segment::Unknown(ch) => out.put(ch),
            Segment::Directive(directive) => convert(out, &directive, args, config),
        }
    }
    out.index()
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn convert(
    out: &mut Output<'_>,
    d: &FormatDirective,
    args: &mut ArgCursor<'_, '_>,
    config: &FormatConfig,
) {
    let model = &config.data_model;
    match d.kind {
        ConversionKind::SignedInt => {
            let bytes = d.int_bytes(model);
            let value = args.next_signed(bytes);
            if wide_disabled(d) {
                return;
            }
            ntoa(
                out,
                Magnitude::new(value.unsigned_abs(), bytes),
                value < 0,
                number_format(d, Base::Decimal),
            );
        }
        ConversionKind::UnsignedInt(base) => {
            let bytes = d.int_bytes(model);
            let value = args.next_unsigned(bytes);
            if wide_disabled(d) {
                return;
            }
            ntoa(out, Magnitude::new(value, bytes), false, number_format(d, base));
        }
        ConversionKind::Pointer => {
            let mut bytes = model.pointer_bytes;
            if !cfg!(feature = "long-long") {
                bytes = bytes.min(model.long_bytes);
            }
            let value = args.next_unsigned(bytes);
            ntoa(out, Magnitude::new(value, bytes), false, number_format(d, Base::Hex));
        }
        ConversionKind::FloatFixed => {
            let value = args.next_f64();
            fixed_float(out, value, d, config);
        }
        ConversionKind::FloatExponential => {
            let value = args.next_f64();
            exponential_float(out, value, d, config);
        }
        ConversionKind::Char => {
            let ch = args.next_unsigned(model.int_bytes) as u8;
            emit_padded(out, &[ch], d.width, d.flags.contains(ConversionFlags::LEFT));
        }
        ConversionKind::String => {
            let s = args.next_str();
            let mut len = s.iter().position(|&c| c == 0).unwrap_or(s.len());
            if d.flags.contains(ConversionFlags::PRECISION) {
                len = len.min(d.precision);
            }
            let s = s.get(..len).unwrap_or_default();
            emit_padded(out, s, d.width, d.flags.contains(ConversionFlags::LEFT));
        }
        ConversionKind::Percent => out.put(b'%'),
    }
}

fn number_format(d: &FormatDirective, base: Base) -> NumberFormat {
    NumberFormat {
        base,
        precision: d.precision,
        width: d.width,
        flags: d.flags,
    }
}

/// `ll` without 64-bit support: the argument is consumed, nothing printed.
fn wide_disabled(d: &FormatDirective) -> bool {
    !cfg!(feature = "long-long") && d.flags.contains(ConversionFlags::LONG_LONG)
}

#[cfg(feature = "float")]
fn float_format(d: &FormatDirective) -> FloatFormat {
    FloatFormat {
        precision: d.precision,
        width: d.width,
        flags: d.flags,
    }
}

#[cfg(feature = "float")]
fn fixed_float(out: &mut Output<'_>, value: f64, d: &FormatDirective, config: &FormatConfig) {
    crate::ftoa::ftoa(out, value, float_format(d), config);
}

#[cfg(not(feature = "float"))]
fn fixed_float(_: &mut Output<'_>, _: f64, _: &FormatDirective, _: &FormatConfig) {}

#[cfg(feature = "exponential")]
fn exponential_float(out: &mut Output<'_>, value: f64, d: &FormatDirective, config: &FormatConfig) {
    crate::etoa::etoa(out, value, float_format(d), config);
}

#[cfg(not(feature = "exponential"))]
fn exponential_float(_: &mut Output<'_>, _: f64, _: &FormatDirective, _: &FormatConfig) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Argument;
    use crate::config::DataModel;
    use std::string::String;

    fn run_with(fmt: &str, list: &[Argument<'_>], config: &FormatConfig) -> String {
        let mut buf = [0u8; 256];
        let n = {
            let mut out = Output::buffer(&mut buf);
            let mut cursor = ArgCursor::new(list);
            format(&mut out, fmt.as_bytes(), &mut cursor, config)
        };
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    fn run(fmt: &str, list: &[Argument<'_>]) -> String {
        run_with(fmt, list, &FormatConfig::DEFAULT)
    }

    #[test]
    fn literal_text_passes_through() {
        assert_eq!(run("plain text", &[]), "plain text");
        assert_eq!(run("100%%", &[]), "100%");
    }

    #[test]
    fn integers() {
        assert_eq!(run("%d", &crate::args![-42]), "-42");
        assert_eq!(run("%5d|%-5d|", &crate::args![42, 42]), "   42|42   |");
        assert_eq!(run("%+d % d", &crate::args![5, 5]), "+5  5");
        assert_eq!(run("%x %X %o %b", &crate::args![255, 255, 8, 5]), "ff FF 10 101");
        assert_eq!(run("%#x %#o", &crate::args![255, 8]), "0xff 010");
        assert_eq!(run("%.3d", &crate::args![7]), "007");
        assert_eq!(run("%08.3d", &crate::args![7]), "     007");
    }

    #[test]
    fn length_modifiers_truncate() {
        assert_eq!(run("%hhd", &crate::args![300]), "44");
        assert_eq!(run("%hhu", &crate::args![-1]), "255");
        assert_eq!(run("%hd", &crate::args![70_000]), "4464");
        assert_eq!(run("%u", &crate::args![-1]), "4294967295");
        assert_eq!(run("%llu", &crate::args![u64::MAX]), "18446744073709551615");
        assert_eq!(run("%lld", &crate::args![i64::MIN]), "-9223372036854775808");
    }

    #[test]
    fn mos_int_is_sixteen_bits() {
        let mos = FormatConfig::DEFAULT.with_data_model(DataModel::MOS);
        assert_eq!(run_with("%d", &crate::args![40_000], &mos), "-25536");
        assert_eq!(run_with("%ld", &crate::args![40_000], &mos), "40000");
        assert_eq!(run_with("%p", &crate::args![0xBEEFusize], &mos), "BEEF");
        assert_eq!(run_with("%p", &crate::args![0x12usize], &mos), "0012");
    }

    #[test]
    fn chars_and_strings() {
        assert_eq!(run("%c%c", &crate::args!['o', 'k']), "ok");
        assert_eq!(run("[%3c][%-3c]", &crate::args!['a', 'b']), "[  a][b  ]");
        assert_eq!(run("%s!", &crate::args!["hi"]), "hi!");
        assert_eq!(run("%.2s", &crate::args!["hello"]), "he");
        assert_eq!(run("[%6s][%-6s]", &crate::args!["ab", "cd"]), "[    ab][cd    ]");
        assert_eq!(run("%s", &crate::args![b"ab\0cd"]), "ab");
    }

    #[test]
    fn star_width_consumes_argument_first() {
        assert_eq!(run("%*d", &crate::args![5, 42]), "   42");
        assert_eq!(run("%*d|", &crate::args![-5, 42]), "42   |");
        assert_eq!(run("%.*f", &crate::args![2, 3.14159]), "3.14");
    }

    #[test]
    fn unknown_conversion_is_literal_and_consumes_nothing() {
        assert_eq!(run("%q%d", &crate::args![9]), "q9");
    }

    #[test]
    fn trailing_percent_stops_output() {
        assert_eq!(run("abc%", &[]), "abc");
        assert_eq!(run("abc%-5", &[]), "abc");
    }

    #[test]
    fn floats_dispatch() {
        assert_eq!(run("%f", &crate::args![1.5]), "1.500000");
        assert_eq!(run("%.2f", &crate::args![-0.125]), "-0.12");
        assert_eq!(run("%e", &crate::args![1234.5678]), "1.234568e+03");
        assert_eq!(run("%G", &crate::args![1e-10]), "1.00000E-10");
        assert_eq!(run("%F", &crate::args![f64::INFINITY]), "inf");
    }

    #[test]
    fn missing_arguments_read_as_zero() {
        assert_eq!(run("%d %s|", &[]), "0 |");
    }
}
