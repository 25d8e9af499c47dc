//! Integration test: printf engine properties
//!
//! Checks the engine-wide guarantees over generated corpora: integer
//! round-trips in every base and width, field width arithmetic, the fixed
//! rounding tie rule, bounded-buffer truncation, `%g` notation selection, and
//! agreement between the discard and bounded sinks.
//!
//! Run: cargo test -p tinyprintf-core --test conformance_test

use tinyprintf_core::{Argument, args, format_len, snprintf};

#[derive(Clone, Copy, Debug)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn gen_range(&mut self, low: usize, high_inclusive: usize) -> usize {
        assert!(low <= high_inclusive);
        let span = high_inclusive - low + 1;
        low + (self.next_u64() as usize % span)
    }
}

fn render(fmt: &str, list: &[Argument<'_>]) -> String {
    let mut buf = vec![0u8; 1024];
    let n = snprintf(&mut buf, fmt, list);
    assert!(n < buf.len(), "output for {fmt:?} exceeded test buffer");
    String::from_utf8(buf[..n].to_vec()).expect("engine output is ASCII")
}

// -----------------------------------------------------------------
// 1. Integer round-trip per base and width
// -----------------------------------------------------------------

/// (length modifier, byte width) on the native data model.
const WIDTHS: [(&str, u32); 4] = [("hh", 1), ("h", 2), ("", 4), ("ll", 8)];

/// (conversion letter, radix)
const BASES: [(char, u32); 5] = [('b', 2), ('o', 8), ('u', 10), ('x', 16), ('X', 16)];

fn mask(bytes: u32) -> u64 {
    if bytes == 8 {
        u64::MAX
    } else {
        (1u64 << (bytes * 8)) - 1
    }
}

fn corpus(rng: &mut XorShift64, bytes: u32) -> Vec<u64> {
    let m = mask(bytes);
    let mut values = vec![0, 1, m, m >> 1, (m >> 1) + 1, m - 1];
    values.extend((0..64).map(|_| rng.next_u64() & m));
    values
}

#[test]
fn unsigned_round_trip_every_base_and_width() {
    let mut rng = XorShift64::new(0x5EED_0001);
    for (modifier, bytes) in WIDTHS {
        for value in corpus(&mut rng, bytes) {
            for (letter, radix) in BASES {
                let fmt = format!("%{modifier}{letter}");
                let text = render(&fmt, &args![value]);
                let parsed = u64::from_str_radix(&text, radix)
                    .unwrap_or_else(|e| panic!("{fmt} of {value:#x} gave {text:?}: {e}"));
                assert_eq!(parsed, value, "{fmt} of {value:#x}");
            }
        }
    }
}

#[test]
fn signed_round_trip_every_width() {
    let mut rng = XorShift64::new(0x5EED_0002);
    for (modifier, bytes) in WIDTHS {
        let shift = 64 - bytes * 8;
        for raw in corpus(&mut rng, bytes) {
            let value = ((raw << shift) as i64) >> shift;
            for v in [value, value.wrapping_neg() >> 1, -1, 1] {
                let fmt = format!("%{modifier}d");
                let text = render(&fmt, &args![v]);
                let expected = ((v as u64) << shift) as i64 >> shift;
                assert_eq!(text.parse::<i64>().ok(), Some(expected), "{fmt} of {v}");
            }
        }
    }
}

#[test]
fn alternate_form_round_trip() {
    let mut rng = XorShift64::new(0x5EED_0003);
    for _ in 0..200 {
        let v = rng.next_u64();
        let hex = render("%#llx", &args![v]);
        let bin = render("%#llb", &args![v]);
        let oct = render("%#llo", &args![v]);
        if v == 0 {
            assert_eq!(hex, "0");
            continue;
        }
        assert_eq!(u64::from_str_radix(hex.trim_start_matches("0x"), 16), Ok(v));
        assert_eq!(u64::from_str_radix(bin.trim_start_matches("0b"), 2), Ok(v));
        assert!(oct.starts_with('0'));
        assert_eq!(u64::from_str_radix(&oct, 8), Ok(v));
    }
}

// -----------------------------------------------------------------
// 2. Field width
// -----------------------------------------------------------------

#[test]
fn field_width_is_max_of_width_and_content() {
    let mut rng = XorShift64::new(0x5EED_0004);
    for _ in 0..500 {
        let width = rng.gen_range(0, 40);
        let value = rng.next_u64() as i64 >> rng.gen_range(0, 63);
        let natural = render("%lld", &args![value]);

        let plain = render(&format!("%{width}lld"), &args![value]);
        let zero = render(&format!("%0{width}lld"), &args![value]);
        let left = render(&format!("%-{width}lld"), &args![value]);

        let expected_len = width.max(natural.len());
        for out in [&plain, &zero, &left] {
            assert_eq!(out.len(), expected_len, "width {width} value {value}");
        }

        let pad = expected_len - natural.len();
        assert!(plain.starts_with(&" ".repeat(pad)));
        assert!(plain.ends_with(&natural));
        assert!(left.starts_with(&natural));
        assert!(left.ends_with(&" ".repeat(pad)));

        let digits = natural.trim_start_matches('-');
        assert!(zero.ends_with(digits));
        let body = zero.trim_start_matches('-');
        assert!(body.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(zero.starts_with('-'), value < 0);
    }
}

#[test]
fn width_applies_to_strings_and_chars() {
    for width in 0..12 {
        let s = render(&format!("%{width}s"), &args!["abc"]);
        assert_eq!(s.len(), width.max(3));
        let c = render(&format!("%-{width}c|"), &args!['q']);
        assert_eq!(c.len(), width.max(1) + 1);
        assert!(c.starts_with('q'));
    }
}

// -----------------------------------------------------------------
// 3. Fixed-notation rounding
// -----------------------------------------------------------------

#[test]
fn whole_number_ties() {
    assert_eq!(render("%.0f", &args![2.5]), "2");
    assert_eq!(render("%.0f", &args![1.5]), "2");
    assert_eq!(render("%.0f", &args![0.5]), "0");
    assert_eq!(render("%.0f", &args![-3.5]), "-4");
}

#[test]
fn fixed_matches_native_away_from_ties() {
    let mut rng = XorShift64::new(0x5EED_0005);
    for _ in 0..500 {
        let whole = rng.gen_range(0, 1_000_000) as f64;
        // The 0.0002 offset keeps every value away from a tie at 3 digits.
        let frac = rng.gen_range(0, 999) as f64 / 1000.0 + 0.0002;
        let v = whole + frac;
        let ours = render("%.3f", &args![v]);
        assert_eq!(ours, format!("{v:.3}"), "{v}");
    }
}

// -----------------------------------------------------------------
// 4. Truncation
// -----------------------------------------------------------------

#[test]
fn bounded_buffer_truncation() {
    let mut buf = [0xFFu8; 4];
    assert_eq!(snprintf(&mut buf, "hello", &[]), 5);
    assert_eq!(&buf, b"hel\0");

    let mut buf = [0xFFu8; 4];
    assert_eq!(snprintf(&mut buf, "%s", &args!["hello"]), 5);
    assert_eq!(&buf, b"hel\0");
}

#[test]
fn every_capacity_keeps_a_prefix() {
    let fmt = "%-8s|%+06d|%#x|%.2e";
    let list = args!["name", 42, 0xbeefu32, 12345.678];
    let full = render(fmt, &list);
    for cap in 0..full.len() + 3 {
        let mut buf = vec![0xFFu8; cap];
        let n = snprintf(&mut buf, fmt, &list);
        assert_eq!(n, full.len());
        if cap == 0 {
            continue;
        }
        let kept = full.len().min(cap - 1);
        assert_eq!(&buf[..kept], &full.as_bytes()[..kept]);
        assert_eq!(buf[kept], 0);
    }
}

// -----------------------------------------------------------------
// 5. Exponential and adaptive notation
// -----------------------------------------------------------------

#[test]
fn exponential_default_precision() {
    assert_eq!(render("%e", &args![1234.5678]), "1.234568e+03");
    assert_eq!(render("%E", &args![-0.000_123_4]), "-1.234000E-04");
}

#[test]
fn exponential_matches_native_mantissa_and_exponent() {
    let mut rng = XorShift64::new(0x5EED_0006);
    for _ in 0..300 {
        let mantissa = 1.0 + rng.gen_range(0, 8_999) as f64 / 1000.0 + 0.000_3;
        let exp = rng.gen_range(0, 120) as i32 - 60;
        let v: f64 = format!("{mantissa}e{exp}").parse().expect("valid float literal");
        let ours = render("%.2e", &args![v]);
        let native = format!("{v:.2e}");
        let (m, e) = native.split_once('e').expect("native exponent");
        let e: i32 = e.parse().expect("native exponent digits");
        let sign = if e < 0 { '-' } else { '+' };
        assert_eq!(ours, format!("{m}e{sign}{:02}", e.abs()), "{v}");
    }
}

#[test]
fn powers_of_two_are_normalized() {
    for k in -1022..=1023 {
        let v = 2f64.powi(k);
        let ours = render("%e", &args![v]);
        let (m, e) = ours.split_once('e').expect("exponent marker");
        let native = format!("{v:.6e}");
        let (nm, ne) = native.split_once('e').expect("native exponent");
        assert!(matches!(m.as_bytes()[0], b'1'..=b'9'), "2^{k} gave {ours}");
        assert_eq!(e.parse::<i32>().ok(), ne.parse::<i32>().ok(), "2^{k} gave {ours}");
        let m: f64 = m.parse().expect("mantissa digits");
        let nm: f64 = nm.parse().expect("native mantissa digits");
        assert!((m - nm).abs() < 2e-6, "2^{k} gave {ours}, native {native}");
    }
}

/// Significant digits in fixed-notation `%g` output.
fn significant_digits(text: &str) -> usize {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .skip_while(|&b| b == b'0')
        .count()
}

#[test]
fn adaptive_keeps_six_significant_digits_below_one() {
    for v in [0.000_98, 0.000_99, 0.000_5, 0.009_9, 0.099, 0.99] {
        let text = render("%g", &args![v]);
        assert_eq!(significant_digits(&text), 6, "%g of {v} gave {text}");
    }
    assert_eq!(render("%g", &args![0.000_98]), "0.000980000");
    assert_eq!(render("%e", &args![0.000_98]), "9.800000e-04");
    assert_eq!(render("%e", &args![9.8e-7]), "9.800000e-07");
}

#[test]
fn adaptive_notation_follows_magnitude() {
    let mut rng = XorShift64::new(0x5EED_0007);
    for _ in 0..500 {
        let exp = rng.gen_range(0, 40) as i32 - 20;
        let mantissa = 1.0 + rng.gen_range(0, 8_999) as f64 / 1000.0;
        let v: f64 = format!("{mantissa}e{exp}").parse().expect("valid float literal");
        for fmt in ["%g", "%G"] {
            let text = render(fmt, &args![v]);
            let has_exp = text.contains(['e', 'E']);
            let in_range = (1e-4..1e6).contains(&v);
            assert_eq!(has_exp, !in_range, "{fmt} of {v} gave {text}");
        }
    }
}

// -----------------------------------------------------------------
// 6. Discard sink agrees with bounded sink
// -----------------------------------------------------------------

#[test]
fn discard_length_matches_bounded_length() {
    const FLAGS: [&str; 6] = ["", "-", "0", "+", " ", "#"];
    const CONVS: [&str; 13] = [
        "d", "u", "x", "X", "o", "b", "c", "s", "f", "e", "g", "p", "%",
    ];
    let mut rng = XorShift64::new(0x5EED_0008);
    let pointee = 0u8;
    for _ in 0..2_000 {
        let flag = FLAGS[rng.gen_range(0, FLAGS.len() - 1)];
        let conv = CONVS[rng.gen_range(0, CONVS.len() - 1)];
        let width = rng.gen_range(0, 30);
        let fmt = if rng.gen_range(0, 1) == 0 {
            format!("<%{flag}{width}{conv}>")
        } else {
            format!("<%{flag}{width}.{}{conv}>", rng.gen_range(0, 12))
        };
        let arg = match conv {
            "c" => Argument::from('k'),
            "s" => Argument::from("some text"),
            "f" | "e" | "g" => Argument::from(rng.next_u64() as i32 as f64 / 7.0),
            "p" => Argument::pointer(&pointee),
            _ => Argument::from(rng.next_u64() as i32),
        };
        let list = [arg];
        let mut buf = vec![0u8; 512];
        let bounded = snprintf(&mut buf, &fmt, &list);
        assert_eq!(format_len(&fmt, &list), bounded, "{fmt}");
    }
}
