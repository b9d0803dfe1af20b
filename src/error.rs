//! Error types for notation parsing, the composition library, and audio I/O.

use thiserror::Error;

use crate::notation::Fraction;

/// Result type for fallible crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading notation: pitches, durations, signatures, tempo.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    /// The token is not `<letter><accidentals><octave>`.
    #[error("invalid pitch format: {0:?}")]
    InvalidPitchFormat(String),

    /// A symbol other than `#`, `b` or `x` sits in the accidental position.
    #[error("unrecognized accidental {symbol:?} in {token:?}")]
    UnrecognizedAccidental { token: String, symbol: char },

    /// Time signature is not `<positive>/<positive>`.
    #[error("invalid time signature: {0:?}")]
    InvalidTimeSignature(String),

    /// Duration expression could not be read as `+`-joined positive terms.
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// Tempo must be a positive, finite number of beats per minute.
    #[error("tempo must be positive, got {0}")]
    InvalidTempo(f64),
}

/// Non-fatal measure-length findings. Reported to the caller or logged,
/// never propagated as a failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureDiagnostic {
    #[error("measure holds {actual} but the signature expects {expected}")]
    MeasureDurationMismatch { expected: Fraction, actual: Fraction },

    #[error("measure holds {actual}, exceeding {expected}; overflow of {overflow} added as rest")]
    MeasureOverflow {
        expected: Fraction,
        actual: Fraction,
        overflow: Fraction,
    },

    #[error("measure length cannot be represented exactly (expected {expected})")]
    MeasureUnrepresentable { expected: Fraction },
}

/// Errors from loading or saving the composition library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("library I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("library YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no composition named {0:?}")]
    NotFound(String),
}

/// Live playback errors.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No audio output device found.
    #[error("no audio output device found")]
    NoOutputDevice,
    /// Failed to query device configuration.
    #[error("device config error: {0}")]
    DeviceConfig(String),
    /// Failed to build the audio stream.
    #[error("stream build error: {0}")]
    StreamBuild(String),
    /// Failed to start or pause the audio stream.
    #[error("stream play error: {0}")]
    StreamPlay(String),
}

/// Top-level error for operations that cross module boundaries.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
