//! Conversion flags shared by the parser and the converters.

bitflags::bitflags! {
    /// Flags accumulated while parsing one directive.
    ///
    /// Several flags are active at once. Combinations that make no sense for a
    /// conversion (e.g. `+` on `%x`) are cleared by the parser, not here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ConversionFlags: u16 {
        /// `0`
        const ZERO_PAD = 1 << 0;
        /// `-`
        const LEFT = 1 << 1;
        /// `+`
        const PLUS = 1 << 2;
        /// ` `
        const SPACE = 1 << 3;
        /// `#`
        const HASH = 1 << 4;
        const UPPERCASE = 1 << 5;
        /// `hh`
        const CHAR = 1 << 6;
        /// `h`
        const SHORT = 1 << 7;
        /// `l`
        const LONG = 1 << 8;
        /// `ll`
        const LONG_LONG = 1 << 9;
        /// A `.` was seen.
        const PRECISION = 1 << 10;
        /// `%g` / `%G`
        const ADAPT_EXP = 1 << 11;
    }
}

impl ConversionFlags {
    /// The sign character to emit for a value, if any. `+` wins over space.
    #[must_use]
    pub fn sign_char(self, negative: bool) -> Option<u8> {
        if negative {
            Some(b'-')
        } else if self.contains(Self::PLUS) {
            Some(b'+')
        } else if self.contains(Self::SPACE) {
            Some(b' ')
        } else {
            None
        }
    }

    /// True when zero padding applies (zero flag without left alignment).
    #[must_use]
    pub fn pads_zeros(self) -> bool {
        self.contains(Self::ZERO_PAD) && !self.contains(Self::LEFT)
    }

    /// True when a sign column must be reserved for `value`.
    #[must_use]
    pub fn reserves_sign(self, negative: bool) -> bool {
        negative || self.intersects(Self::PLUS | Self::SPACE)
    }
}
