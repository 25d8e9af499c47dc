//! Build-time and per-call engine configuration.
//!
//! Feature toggles (`float`, `exponential`, `long-long`, `ptrdiff`) are Cargo
//! features and are resolved once per build. Everything that can differ
//! between two calls in the same build lives in [`FormatConfig`].

/// Capacity of the integer conversion scratch buffer.
///
/// Must hold one converted number including precision and width zero padding.
pub const NTOA_BUFFER_SIZE: usize = 510;

/// Capacity of the float conversion scratch buffer.
pub const FTOA_BUFFER_SIZE: usize = 510;

/// Default precision for `%f`, `%e` and `%g` when none is given.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest magnitude printed in fixed notation; larger values switch to `%e`.
pub const DEFAULT_MAX_FLOAT: f64 = 1e9;

/// Fractional digits computed from the scaled fraction. Excess precision is
/// emitted as literal trailing zeros.
pub const MAX_FRACTION_DIGITS: usize = 9;

/// Byte widths of the C integer types on the target.
///
/// The data model decides how wide an argument is once a length modifier has
/// been applied, how many bytes the digit converter scans, and how wide `%p`
/// is padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataModel {
    pub int_bytes: u8,
    pub long_bytes: u8,
    pub long_long_bytes: u8,
    pub pointer_bytes: u8,
    pub size_bytes: u8,
    pub ptrdiff_bytes: u8,
    pub intmax_bytes: u8,
}

impl DataModel {
    /// 6502-family (llvm-mos) model: 16-bit `int`, pointers and `size_t`.
    pub const MOS: Self = Self {
        int_bytes: 2,
        long_bytes: 4,
        long_long_bytes: 8,
        pointer_bytes: 2,
        size_bytes: 2,
        ptrdiff_bytes: 2,
        intmax_bytes: 8,
    };

    /// 32-bit `int`, `long` as wide as a pointer (ILP32 / LP64).
    pub const NATIVE: Self = {
        let ptr = core::mem::size_of::<usize>() as u8;
        Self {
            int_bytes: 4,
            long_bytes: ptr,
            long_long_bytes: 8,
            pointer_bytes: ptr,
            size_bytes: ptr,
            ptrdiff_bytes: ptr,
            intmax_bytes: 8,
        }
    };

    /// Look up a model by name (case-insensitive). Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("mos") || name.eq_ignore_ascii_case("6502") {
            Some(Self::MOS)
        } else if name.eq_ignore_ascii_case("native") || name.eq_ignore_ascii_case("host") {
            Some(Self::NATIVE)
        } else {
            None
        }
    }
}

impl Default for DataModel {
    fn default() -> Self {
        Self::NATIVE
    }
}

/// Per-call engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatConfig {
    pub data_model: DataModel,
    pub default_float_precision: usize,
    /// Fixed-notation ceiling. Values beyond it are printed with `%e`
    /// (or not at all without the `exponential` feature).
    pub max_float: f64,
}

impl FormatConfig {
    pub const DEFAULT: Self = Self {
        data_model: DataModel::NATIVE,
        default_float_precision: DEFAULT_FLOAT_PRECISION,
        max_float: DEFAULT_MAX_FLOAT,
    };

    #[must_use]
    pub const fn with_data_model(mut self, data_model: DataModel) -> Self {
        self.data_model = data_model;
        self
    }

    #[must_use]
    pub const fn with_max_float(mut self, max_float: f64) -> Self {
        self.max_float = max_float;
        self
    }

    #[must_use]
    pub const fn with_default_float_precision(mut self, precision: usize) -> Self {
        self.default_float_precision = precision;
        self
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
