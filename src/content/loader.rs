//! Loader for movement tuning files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Serialization format of a tuning file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningFormat {
    Ron,
    Json,
}

impl TuningFormat {
    /// `.json` files are JSON; everything else is read as RON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TuningFormat::Json,
            _ => TuningFormat::Ron,
        }
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from an in-memory document. Missing fields take their defaults.
pub fn parse_movement_tuning(
    contents: &str,
    format: TuningFormat,
    file_name: &str,
) -> Result<MovementTuning, ContentLoadError> {
    match format {
        TuningFormat::Ron => ron_options()
            .from_str(contents)
            .map_err(|e| ContentLoadError {
                file: file_name.to_string(),
                message: format!("Parse error: {}", e),
            }),
        TuningFormat::Json => serde_json::from_str(contents).map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        }),
    }
}

/// Load movement tuning from a RON or JSON file.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_tuning(&contents, TuningFormat::from_path(path), &file_name)
}
