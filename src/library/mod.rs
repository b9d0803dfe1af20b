//! Composition library: named pieces with their signature, tempo and
//! preferred instruments, stored as a YAML list.

pub mod persistence;

use serde::{Deserialize, Serialize};
use tracing::error;

pub use persistence::{default_library_path, load_or_builtin};

use crate::error::{LibraryError, NotationError};
use crate::notation::TimeSignature;
use crate::timeline::Tempo;

/// Instrument used when a composition names none.
pub const DEFAULT_INSTRUMENT: &str = "organ";

/// Volume used when a composition's own is missing or out of range.
pub const DEFAULT_VOLUME: f64 = 0.5;

/// `volume` when it lies in (0, 1], otherwise [`DEFAULT_VOLUME`].
pub fn volume_or_default(volume: Option<f64>) -> f64 {
    match volume {
        Some(v) if v > 0.0 && v <= 1.0 => v,
        _ => DEFAULT_VOLUME,
    }
}

const BUILTIN_YAML: &str = include_str!("assets/library.yaml");

fn default_signature() -> String {
    TimeSignature::COMMON.to_string()
}

fn default_tempo() -> f64 {
    120.0
}

/// One named piece of notation with its playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub name: String,
    pub notes: String,
    #[serde(default = "default_signature")]
    pub signature: String,
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    /// Preferred instruments, first is the default.
    #[serde(default)]
    pub instruments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Composition {
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
            signature: default_signature(),
            tempo: default_tempo(),
            instruments: Vec::new(),
            volume: None,
        }
    }

    /// First listed instrument, or `organ` when none is given.
    pub fn instrument(&self) -> &str {
        self.instruments
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_INSTRUMENT)
    }

    /// The stored volume when it lies in (0, 1], otherwise 0.5.
    pub fn volume(&self) -> f64 {
        volume_or_default(self.volume)
    }

    pub fn tempo(&self) -> Result<Tempo, NotationError> {
        Tempo::new(self.tempo)
    }

    pub fn time_signature(&self) -> Result<TimeSignature, NotationError> {
        self.signature.parse()
    }
}

/// An ordered collection of compositions with unique names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    compositions: Vec<Composition>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// The compositions shipped with the crate.
    pub fn builtin() -> Self {
        match Self::from_yaml(BUILTIN_YAML) {
            Ok(library) => library,
            Err(err) => {
                error!(%err, "built-in library failed to parse");
                Self::default()
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, LibraryError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String, LibraryError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LibraryError> {
        persistence::load_library(path.as_ref())
    }

    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), LibraryError> {
        persistence::save_library(path.as_ref(), self)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Composition> {
        self.compositions.iter().find(|c| c.name == name)
    }

    /// Like [`Library::get`], but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<&Composition, LibraryError> {
        self.get(name)
            .ok_or_else(|| LibraryError::NotFound(name.to_string()))
    }

    /// Add a composition, replacing (and returning) any existing one with the
    /// same name. Replacements keep their original position.
    pub fn add(&mut self, composition: Composition) -> Option<Composition> {
        match self
            .compositions
            .iter_mut()
            .find(|c| c.name == composition.name)
        {
            Some(slot) => Some(std::mem::replace(slot, composition)),
            None => {
                self.compositions.push(composition);
                None
            }
        }
    }

    pub fn all(&self) -> &[Composition] {
        &self.compositions
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.compositions.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.compositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }
}
