// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the theory core and the progression layer.

use thiserror::Error;

/// Input-validation failures raised while building notes, scales and chords.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// The string could not be read as a note name.
    #[error("invalid note name `{0}`")]
    InvalidNoteName(String),

    /// Inversion outside the legal range.
    #[error("invalid inversion {0} (expected 0-3)")]
    InvalidInversion(u8),

    /// A slash note and a nonzero inversion were both requested.
    #[error("cannot invert a slash chord")]
    InvalidSlashInversion,

    #[error("unknown chord type `{0}`")]
    UnknownChordType(String),

    #[error("unknown scale type `{0}`")]
    UnknownScaleType(String),

    #[error("unknown mode `{0}`")]
    UnknownMode(String),

    /// Scale degrees are 1-based.
    #[error("invalid scale degree {0}")]
    InvalidDegree(u8),

    /// Transposition would leave the representable octave or accidental range.
    #[error("pitch out of range: {0}")]
    PitchOutOfRange(String),

    /// Scale offsets must start at 0 and rise strictly within one octave.
    #[error("invalid formula `{name}`: {reason}")]
    InvalidFormula { name: String, reason: &'static str },

    /// A declared but unsupported feature was requested.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Failures raised by progression and session actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Generic (scale-degree) input needs a selected scale.
    #[error("no scale selected")]
    NoScaleSelected,

    #[error(transparent)]
    Theory(#[from] TheoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TheoryError::InvalidNoteName("H".to_string()).to_string(),
            "invalid note name `H`"
        );
        assert_eq!(
            TheoryError::InvalidSlashInversion.to_string(),
            "cannot invert a slash chord"
        );
        assert_eq!(
            ProgressionError::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "index 4 out of range for 2 entries"
        );
    }

    #[test]
    fn test_theory_error_converts() {
        let err: ProgressionError = TheoryError::InvalidInversion(7).into();
        assert_eq!(err, ProgressionError::Theory(TheoryError::InvalidInversion(7)));
        assert_eq!(err.to_string(), "invalid inversion 7 (expected 0-3)");
    }
}
