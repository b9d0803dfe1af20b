//! Notewave: text music notation rendered to audio.
//!
//! Notation such as `"C4/4 E4/4 G4/2 | rest/4 Fx4/4+8 G4/8"` is parsed into
//! measures, expanded into timed events, synthesized with one of a set of
//! instrument models, and either played live or written to WAV.

pub mod audio;
pub mod compose;
pub mod config;
pub mod effects;
pub mod error;
pub mod library;
pub mod notation;
pub mod pitch;
pub mod synth;
pub mod timeline;
pub mod wave;

pub use compose::{compose, compose_until, Renderer};
pub use config::Config;
pub use error::{Error, Result};
pub use library::{Composition, Library};
pub use notation::{Fraction, Measure, TimeSignature};
pub use pitch::PitchResolver;
pub use synth::{Instrument, Synthesizer};
pub use timeline::{Tempo, TimedEvent, Timeline};
pub use wave::WaveBuffer;
