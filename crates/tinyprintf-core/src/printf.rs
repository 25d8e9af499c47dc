//! Public entry points.
//!
//! Every function returns the number of characters the full output has,
//! excluding the terminator, whether or not the destination kept them all.
//! Compare the result against the buffer length to detect truncation.

use crate::args::{ArgCursor, Argument};
use crate::config::FormatConfig;
use crate::engine::format;
use crate::sink::Output;

/// Entry points bound to one [`FormatConfig`].
///
/// The free functions at the crate root use [`FormatConfig::DEFAULT`]; build a
/// `Formatter` to run with another data model, float ceiling or default
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(FormatConfig::DEFAULT)
    }

    #[must_use]
    pub const fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Stream to a character consumer. NUL characters are not forwarded.
    pub fn printf<F>(&self, putchar: &mut dyn FnMut(u8), fmt: &F, args: &[Argument<'_>]) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        self.vprintf(putchar, fmt, &mut ArgCursor::new(args))
    }

    pub fn vprintf<F>(
        &self,
        putchar: &mut dyn FnMut(u8),
        fmt: &F,
        args: &mut ArgCursor<'_, '_>,
    ) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        let mut out = Output::callback(putchar);
        format(&mut out, fmt.as_ref(), args, &self.config)
    }

    /// Like [`Formatter::printf`], taking the consumer by value.
    pub fn fctprintf<C, F>(&self, mut consumer: C, fmt: &F, args: &[Argument<'_>]) -> usize
    where
        C: FnMut(u8),
        F: AsRef<[u8]> + ?Sized,
    {
        self.vprintf(&mut consumer, fmt, &mut ArgCursor::new(args))
    }

    /// Write into `buf` as if it had no size limit.
    ///
    /// Nothing is stored past the end of `buf`; the terminator is written
    /// right after the content when it fits.
    pub fn sprintf<F>(&self, buf: &mut [u8], fmt: &F, args: &[Argument<'_>]) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        self.vsprintf(buf, fmt, &mut ArgCursor::new(args))
    }

    pub fn vsprintf<F>(&self, buf: &mut [u8], fmt: &F, args: &mut ArgCursor<'_, '_>) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        let mut out = Output::unbounded_buffer(buf);
        let len = format(&mut out, fmt.as_ref(), args, &self.config);
        out.terminate();
        len
    }

    /// Write at most `buf.len() - 1` characters plus a terminator.
    ///
    /// An empty `buf` receives nothing.
    pub fn snprintf<F>(&self, buf: &mut [u8], fmt: &F, args: &[Argument<'_>]) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        self.vsnprintf(buf, fmt, &mut ArgCursor::new(args))
    }

    pub fn vsnprintf<F>(&self, buf: &mut [u8], fmt: &F, args: &mut ArgCursor<'_, '_>) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        let mut out = Output::buffer(buf);
        let len = format(&mut out, fmt.as_ref(), args, &self.config);
        out.terminate();
        len
    }

    /// Length of the output without storing it.
    pub fn format_len<F>(&self, fmt: &F, args: &[Argument<'_>]) -> usize
    where
        F: AsRef<[u8]> + ?Sized,
    {
        let mut out = Output::discard();
        format(&mut out, fmt.as_ref(), &mut ArgCursor::new(args), &self.config)
    }
}

// ---------------------------------------------------------------------------
// Default-config shorthands
// ---------------------------------------------------------------------------

const DEFAULT: Formatter = Formatter::new();

pub fn printf<F>(putchar: &mut dyn FnMut(u8), fmt: &F, args: &[Argument<'_>]) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.printf(putchar, fmt, args)
}

pub fn vprintf<F>(putchar: &mut dyn FnMut(u8), fmt: &F, args: &mut ArgCursor<'_, '_>) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.vprintf(putchar, fmt, args)
}

pub fn fctprintf<C, F>(consumer: C, fmt: &F, args: &[Argument<'_>]) -> usize
where
    C: FnMut(u8),
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.fctprintf(consumer, fmt, args)
}

pub fn sprintf<F>(buf: &mut [u8], fmt: &F, args: &[Argument<'_>]) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.sprintf(buf, fmt, args)
}

pub fn vsprintf<F>(buf: &mut [u8], fmt: &F, args: &mut ArgCursor<'_, '_>) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.vsprintf(buf, fmt, args)
}

pub fn snprintf<F>(buf: &mut [u8], fmt: &F, args: &[Argument<'_>]) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.snprintf(buf, fmt, args)
}

pub fn vsnprintf<F>(buf: &mut [u8], fmt: &F, args: &mut ArgCursor<'_, '_>) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.vsnprintf(buf, fmt, args)
}

pub fn format_len<F>(fmt: &F, args: &[Argument<'_>]) -> usize
where
    F: AsRef<[u8]> + ?Sized,
{
    DEFAULT.format_len(fmt, args)
}
