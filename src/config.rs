//! User configuration from the optional `~/.notewave/config.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::NotationError;
use crate::library::{default_library_path, volume_or_default};
use crate::notation::TimeSignature;
use crate::pitch::PitchResolver;
use crate::synth::{Instrument, Synthesizer};
use crate::timeline::Tempo;

/// Defaults for tuning, rendering and the library location.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// MIDI number of the reference pitch.
    pub a4_midi: i32,
    /// Frequency of the reference pitch in Hz.
    pub a4_freq: f64,
    /// Noise seed; unset means a fresh seed per run.
    pub seed: Option<u64>,
    pub instrument: String,
    pub volume: f64,
    pub tempo: f64,
    pub time_signature: String,
    pub library_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            a4_midi: 69,
            a4_freq: 440.0,
            seed: None,
            instrument: "organ".to_string(),
            volume: 0.5,
            tempo: 120.0,
            time_signature: TimeSignature::COMMON.to_string(),
            library_path: None,
        }
    }
}

/// Get the config file path.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".notewave").join("config.yaml"))
}

impl Config {
    /// Load `~/.notewave/config.yaml`, falling back to defaults.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// A missing file gives the defaults; an unreadable or malformed one is
    /// reported and also gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config, using defaults");
                return Self::default();
            }
        };
        match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed config, using defaults");
                Self::default()
            }
        }
    }

    pub fn resolver(&self) -> PitchResolver {
        PitchResolver::new(self.a4_midi, self.a4_freq)
    }

    pub fn synthesizer(&self) -> Synthesizer {
        match self.seed {
            Some(seed) => Synthesizer::new(seed),
            None => Synthesizer::from_entropy(),
        }
    }

    pub fn instrument(&self) -> Instrument {
        Instrument::from_name(&self.instrument)
    }

    /// Configured volume, with the same (0, 1] rule as library entries.
    pub fn volume(&self) -> f64 {
        volume_or_default(Some(self.volume))
    }

    pub fn tempo(&self) -> Result<Tempo, NotationError> {
        Tempo::new(self.tempo)
    }

    pub fn time_signature(&self) -> Result<TimeSignature, NotationError> {
        self.time_signature.parse()
    }

    pub fn library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(default_library_path)
    }
}
