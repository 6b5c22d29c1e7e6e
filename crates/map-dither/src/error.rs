//! Error types for quantization.

use std::fmt;

/// Error returned by [`quantize`](crate::quantize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizeError {
    /// Pixel buffer length does not equal `width * height`.
    DimensionMismatch {
        /// `width * height`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} entries, expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for QuantizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = QuantizeError::DimensionMismatch {
            expected: 16,
            actual: 12,
        };
        assert_eq!(err.to_string(), "pixel buffer has 12 entries, expected 16");
    }
}
