//! # tinyprintf-core
//!
//! Allocation-free `printf` engine for small `no_std` targets.
//!
//! Integers are converted with shift-and-add digit accumulation instead of
//! wide division, floats with a bounded fixed-point split and a table-free
//! decimal exponent estimate. All scratch space lives on the stack of the
//! call; there is no global state and no allocation, so every entry point is
//! reentrant.
//!
//! ```
//! use tinyprintf_core::{args, snprintf};
//!
//! let mut buf = [0u8; 32];
//! let n = snprintf(&mut buf, "%-6s|%5.2f|%#x", &args!["pi", 3.14159, 255]);
//! assert_eq!(&buf[..n], b"pi    | 3.14|0xff");
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod args;
pub mod config;
pub mod directive;
pub mod emit;
pub mod engine;
#[cfg(feature = "exponential")]
pub mod etoa;
pub mod flags;
#[cfg(feature = "float")]
pub mod ftoa;
pub mod ntoa;
pub mod printf;
pub mod scratch;
pub mod sink;

pub use args::{ArgCursor, Argument};
pub use config::{DataModel, FormatConfig};
pub use flags::ConversionFlags;
pub use printf::{
    Formatter, fctprintf, format_len, printf, snprintf, sprintf, vprintf, vsnprintf, vsprintf,
};
pub use sink::{Output, Sink};
