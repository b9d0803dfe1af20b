//! Library persistence: YAML load/save.

use std::path::{Path, PathBuf};

use tracing::info;

use super::Library;
use crate::error::LibraryError;

/// Default path for the user's library.
pub fn default_library_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".notewave");
    path.push("library.yaml");
    path
}

/// Load a library from a YAML file.
pub fn load_library(path: &Path) -> Result<Library, LibraryError> {
    let content = std::fs::read_to_string(path)?;
    let library = Library::from_yaml(&content)?;
    info!(path = %path.display(), compositions = library.len(), "loaded library");
    Ok(library)
}

/// Load `path` when it exists, otherwise fall back to the built-in library.
pub fn load_or_builtin(path: &Path) -> Result<Library, LibraryError> {
    if !path.exists() {
        return Ok(Library::builtin());
    }
    load_library(path)
}

/// Save a library to a YAML file, creating parent directories as needed.
pub fn save_library(path: &Path, library: &Library) -> Result<(), LibraryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, library.to_yaml()?)?;
    info!(path = %path.display(), compositions = library.len(), "saved library");
    Ok(())
}
