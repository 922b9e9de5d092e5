//! Optional user settings: `~/.config/mameres/settings.toml`.
//!
//! ```toml
//! [output]
//! dir = "/path/to/es-resources"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OutputSettings {
    pub dir: Option<PathBuf>,
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("mameres").join("settings.toml")
}

impl Settings {
    pub(crate) fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// A missing file yields defaults; a broken one is reported and ignored.
    pub(crate) fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

/// Resolve the output directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `output.dir` in `settings.toml`
/// 3. Current working directory
pub(crate) fn resolve_output_dir(cli_override: Option<PathBuf>, settings: &Settings) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = settings.output.dir.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return p.clone();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
