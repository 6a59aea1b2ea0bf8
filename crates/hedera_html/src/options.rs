//! Parse options
//!
//! The bit positions are fixed so masks can be stored or exchanged as plain integers.
use bitflags::bitflags;

bitflags! {
    /// Independently combinable parse directives
    pub struct ParseOptions: u32 {
        /// Relaxed parsing: malformed bytes are replaced instead of failing the parse
        const RECOVER = 1 << 0;
        /// Do not insert a default doctype if none is found
        const NODEFDTD = 1 << 2;
        /// Suppress error reports
        const NOERROR = 1 << 5;
        /// Suppress warning reports
        const NOWARNING = 1 << 6;
        /// Pedantic error reporting
        const PEDANTIC = 1 << 7;
        /// Remove blank text nodes
        const NOBLANKS = 1 << 8;
        /// Forbid network access
        const NONET = 1 << 11;
        /// Do not add implied html/head/body elements
        const NOIMPLIED = 1 << 13;
        /// Compact small text nodes
        const COMPACT = 1 << 16;
    }
}

/// Default parsing options: relaxed parsing, quiet and without network access
pub const DEFAULT_PARSE_OPTIONS: ParseOptions = ParseOptions::from_bits_truncate(
    ParseOptions::RECOVER.bits()
        | ParseOptions::NONET.bits()
        | ParseOptions::NOERROR.bits()
        | ParseOptions::NOWARNING.bits(),
);

impl Default for ParseOptions {
    fn default() -> Self {
        DEFAULT_PARSE_OPTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ParseOptions::RECOVER, 1)]
    #[test_case(ParseOptions::NODEFDTD, 4)]
    #[test_case(ParseOptions::NOERROR, 32)]
    #[test_case(ParseOptions::NOWARNING, 64)]
    #[test_case(ParseOptions::PEDANTIC, 128)]
    #[test_case(ParseOptions::NOBLANKS, 256)]
    #[test_case(ParseOptions::NONET, 2048)]
    #[test_case(ParseOptions::NOIMPLIED, 8192)]
    #[test_case(ParseOptions::COMPACT, 65536)]
    fn fixed_bit_positions(option: ParseOptions, bits: u32) {
        assert_eq!(option.bits(), bits);
    }

    #[test]
    fn default_is_relaxed_and_quiet() {
        let options = ParseOptions::default();
        assert_eq!(options.bits(), 1 | 32 | 64 | 2048);
        assert!(options.contains(ParseOptions::RECOVER | ParseOptions::NONET));
        assert!(!options.contains(ParseOptions::NOBLANKS));
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let options = ParseOptions::from_bits_truncate(1 | 2 | 8192);
        assert_eq!(options, ParseOptions::RECOVER | ParseOptions::NOIMPLIED);
    }
}
