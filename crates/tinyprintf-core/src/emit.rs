//! Padding and reversal: the last stage of every numeric conversion.

use crate::flags::ConversionFlags;
use crate::sink::Output;

/// Emit a reversed buffer in reading order, padded with spaces to `width`.
///
/// Leading spaces are written only when neither left alignment nor zero
/// padding is requested; zero padding was already pushed into `rev` by the
/// converter. Trailing spaces are written for left alignment. Returns the
/// output index after the write.
pub fn emit_reversed(
    out: &mut Output<'_>,
    rev: &[u8],
    width: usize,
    flags: ConversionFlags,
) -> usize {
    let start = out.index();

    if !flags.intersects(ConversionFlags::LEFT | ConversionFlags::ZERO_PAD) {
        out.repeat(b' ', width.saturating_sub(rev.len()));
    }

    for &ch in rev.iter().rev() {
        out.put(ch);
    }

    if flags.contains(ConversionFlags::LEFT) {
        out.repeat(b' ', width.saturating_sub(out.index() - start));
    }

    out.index()
}

/// Emit already-ordered bytes padded with spaces to `width`.
pub fn emit_padded(out: &mut Output<'_>, content: &[u8], width: usize, left: bool) -> usize {
    let pad = width.saturating_sub(content.len());
    if !left {
        out.repeat(b' ', pad);
    }
    for &ch in content {
        out.put(ch);
    }
    if left {
        out.repeat(b' ', pad);
    }
    out.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rev: &[u8], width: usize, flags: ConversionFlags) -> ([u8; 16], usize) {
        let mut buf = [0u8; 16];
        let n = {
            let mut out = Output::buffer(&mut buf);
            emit_reversed(&mut out, rev, width, flags)
        };
        (buf, n)
    }

    #[test]
    fn reverses_without_padding() {
        let (buf, n) = render(b"321", 0, ConversionFlags::empty());
        assert_eq!(&buf[..n], b"123");
    }

    #[test]
    fn right_aligns_with_spaces() {
        let (buf, n) = render(b"21", 5, ConversionFlags::empty());
        assert_eq!(&buf[..n], b"   12");
    }

    #[test]
    fn left_aligns_with_trailing_spaces() {
        let (buf, n) = render(b"21", 5, ConversionFlags::LEFT);
        assert_eq!(&buf[..n], b"12   ");
    }

    #[test]
    fn zero_pad_flag_suppresses_leading_spaces() {
        let (buf, n) = render(b"21", 5, ConversionFlags::ZERO_PAD);
        assert_eq!(&buf[..n], b"12");
    }

    #[test]
    fn content_wider_than_field_is_not_cut() {
        let (buf, n) = render(b"54321", 2, ConversionFlags::LEFT);
        assert_eq!(&buf[..n], b"12345");
    }

    #[test]
    fn padded_forward_content() {
        let mut buf = [0u8; 8];
        let n = {
            let mut out = Output::buffer(&mut buf);
            emit_padded(&mut out, b"ab", 4, false)
        };
        assert_eq!(&buf[..n], b"  ab");
    }
}
