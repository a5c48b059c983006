//! Limits for bounded decoding.

/// Limits enforced while decoding untrusted bytes.
///
/// Length prefixes are checked against these limits before any allocation.
/// Declared schema bounds (`string<32>`, `int<8>`) are enforced separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum nesting of composite values (structs, unions, arrays, optionals).
    pub max_depth: usize,
    /// Maximum length of a string or opaque block in bytes.
    pub max_opaque_len: usize,
    /// Maximum number of elements in an array.
    pub max_array_len: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_opaque_len: 16 * 1024 * 1024,
            max_array_len: 1024 * 1024,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_depth: 8,
            max_opaque_len: 1024,
            max_array_len: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_opaque_len: usize::MAX,
            max_array_len: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = CodecLimits::default();
        assert!(limits.max_depth >= 16);
        assert!(limits.max_opaque_len >= 64 * 1024);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();
        assert!(test_limits.max_depth < default_limits.max_depth);
        assert!(test_limits.max_array_len < default_limits.max_array_len);
    }

    #[test]
    fn unlimited_limits() {
        let limits = CodecLimits::unlimited();
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(limits.max_opaque_len, usize::MAX);
    }
}
