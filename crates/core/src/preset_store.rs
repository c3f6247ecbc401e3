//! Reading presets from the `configs` resource directory.
//!
//! Each preset is a `<name>.json` file. Listing never fails: a missing
//! directory simply has no presets.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use itertools::Itertools;
use log::{debug, warn};

use crate::config::ResourceLayout;
use crate::error::{Error, Result};
use crate::preset::Preset;

const PRESET_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct PresetStore {
    configs_dir: PathBuf,
}

impl PresetStore {
    pub fn new(configs_dir: impl Into<PathBuf>) -> Self {
        Self {
            configs_dir: configs_dir.into(),
        }
    }

    #[must_use]
    pub fn from_layout(layout: &ResourceLayout) -> Self {
        Self::new(layout.configs_dir())
    }

    #[must_use]
    pub fn preset_path(&self, name: &str) -> PathBuf {
        self.configs_dir.join(format!("{name}.{PRESET_EXTENSION}"))
    }

    /// Names of the available presets, sorted.
    ///
    /// Returns an empty list when the directory does not exist.
    #[must_use]
    pub fn list_presets(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.configs_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Preset directory `{}` is not readable: {}",
                    self.configs_dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|extension| extension == PRESET_EXTENSION)
            })
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .sorted()
            .collect()
    }

    /// Loads the named preset and applies its default prompts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the file cannot be read or is not a valid
    /// preset.
    pub fn load_preset(&self, name: &str) -> Result<Preset> {
        let path = self.preset_path(name);
        let path_string = path.display().to_string();
        debug!("Loading preset `{}` from `{}`", name, path_string);

        let reader = File::open(&path).map_err(|e| Error::load_error(name, path_string.clone(), e))?;

        let mut preset: Preset = serde_json::from_reader(BufReader::new(reader))
            .map_err(|e| Error::load_error(name, path_string, e))?;

        preset.apply_default_prompts();

        Ok(preset)
    }
}
