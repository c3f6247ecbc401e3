//! Settings resolution and resource directory layout.
//!
//! Every setting is resolved from the command line first, then the optional
//! settings YAML file, then the built-in defaults below. Paths may contain
//! `~`, which is expanded.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.sd-configurator/settings.yml";
/// Default resource base directory holding `configs`, `model`, `vae`, `lora` and `embedding`
const DEFAULT_BASE_PATH: &str = "~/.sd-configurator";
/// Default generator executable, looked up on `PATH`
const DEFAULT_EXECUTABLE: &str = "sd";

/// Baseline additional arguments handed to the generator
pub const DEFAULT_ADDITIONAL_ARGS: &str = "-s -1 --diffusion-fa";
/// File name proposed for the generated image, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "output.png";

const CONFIGS_DIR: &str = "configs";
const MODEL_DIR: &str = "model";
const VAE_DIR: &str = "vae";
const LORA_DIR: &str = "lora";
const EMBEDDING_DIR: &str = "embedding";

/// Contents of the settings YAML file. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SettingsFile {
    pub base_path: Option<String>,
    pub executable: Option<String>,
    pub additional_args: Option<String>,
    pub language: Option<String>,
}

/// Values given on the command line, which win over the settings file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_path: Option<String>,
    pub executable: Option<String>,
    pub language: Option<String>,
}

/// Fully resolved settings for one run of the configurator.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub layout: ResourceLayout,
    pub executable: String,
    pub additional_args: String,
    /// `None` means the user is asked at startup.
    pub language: Option<String>,
}

impl Settings {
    /// Merges command-line overrides, the settings file and defaults.
    #[must_use]
    pub fn resolve(overrides: &SettingsOverrides, file: Option<SettingsFile>) -> Self {
        let file = file.unwrap_or_default();

        let base_path = overrides
            .base_path
            .clone()
            .or(file.base_path)
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());

        let executable = overrides
            .executable
            .clone()
            .or(file.executable)
            .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string());

        Self {
            layout: ResourceLayout::new(expand_path(&base_path)),
            executable: shellexpand::tilde(&executable).to_string(),
            additional_args: file
                .additional_args
                .unwrap_or_else(|| DEFAULT_ADDITIONAL_ARGS.to_string()),
            language: overrides.language.clone().or(file.language),
        }
    }
}

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use sd_configurator_core::config::get_settings_path;
///
/// let custom_path = get_settings_path(&Some("/path/to/settings.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/settings.yml");
/// ```
pub fn get_settings_path(settings_path_arg: &Option<String>) -> String {
    let settings_path = match settings_path_arg {
        Some(settings_path) => settings_path,
        None => DEFAULT_SETTINGS_PATH,
    };

    shellexpand::tilde(settings_path).to_string()
}

/// Reads the settings file. A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid YAML.
pub fn load_settings_file(settings_path: &str) -> Result<Option<SettingsFile>> {
    if !Path::new(settings_path).exists() {
        debug!("No settings file at `{}`, using defaults", settings_path);
        return Ok(None);
    }

    let reader = File::open(settings_path)
        .map_err(|e| Error::io_error("settings".to_string(), settings_path.to_string(), e))?;

    let settings: SettingsFile = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            settings_path.to_string(),
            e,
        )
    })?;

    Ok(Some(settings))
}

/// The proposed output image path: [`DEFAULT_OUTPUT_FILE`] in `working_directory`.
#[must_use]
pub fn default_output_path(working_directory: &Path) -> PathBuf {
    working_directory.join(DEFAULT_OUTPUT_FILE)
}

/// Checks that the directory an output file would be written into exists.
/// A bare file name refers to the working directory.
///
/// # Errors
///
/// Returns [`Error::InvalidDirectory`] when the path is empty or the parent
/// directory is missing.
pub fn validate_output_path(output_path: &str) -> Result<()> {
    if output_path.trim().is_empty() {
        return Err(Error::InvalidDirectory {
            path: output_path.to_string(),
        });
    }

    let parent = match Path::new(output_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidDirectory {
            path: parent.display().to_string(),
        })
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Location of the resource subdirectories under one base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    base_path: PathBuf,
}

impl ResourceLayout {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn configs_dir(&self) -> PathBuf {
        self.base_path.join(CONFIGS_DIR)
    }

    #[must_use]
    pub fn model_path(&self, file_name: &str) -> PathBuf {
        self.base_path.join(MODEL_DIR).join(file_name)
    }

    #[must_use]
    pub fn vae_path(&self, file_name: &str) -> PathBuf {
        self.base_path.join(VAE_DIR).join(file_name)
    }

    #[must_use]
    pub fn lora_dir(&self) -> PathBuf {
        self.base_path.join(LORA_DIR)
    }

    #[must_use]
    pub fn embedding_dir(&self) -> PathBuf {
        self.base_path.join(EMBEDDING_DIR)
    }

    /// Names (file stems) of the LORA files available for prompts.
    #[must_use]
    pub fn list_loras(&self) -> Vec<String> {
        list_file_stems(&self.lora_dir())
    }

    /// Names (file stems) of the embedding files available for prompts.
    #[must_use]
    pub fn list_embeddings(&self) -> Vec<String> {
        list_file_stems(&self.embedding_dir())
    }
}

/// Sorted stems of the regular files in `dir`. Unreadable or missing
/// directories give an empty list.
fn list_file_stems(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Could not list `{}`: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Skipping unreadable entry in `{}`: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file())
        .filter_map(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .sorted()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_get_settings_path_with_custom_path() {
        let custom_path = Some("/custom/path/settings.yml".to_string());
        assert_eq!(get_settings_path(&custom_path), "/custom/path/settings.yml");
    }

    #[test]
    fn test_get_settings_path_with_none() {
        let result = get_settings_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with("settings.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let settings = Settings::resolve(&SettingsOverrides::default(), None);

        assert_eq!(settings.executable, "sd");
        assert_eq!(settings.additional_args, DEFAULT_ADDITIONAL_ARGS);
        assert!(settings.language.is_none());
        assert!(!settings.layout.base_path().starts_with("~"));
        assert!(settings.layout.base_path().ends_with(".sd-configurator"));
    }

    #[test]
    fn test_resolve_prefers_overrides_over_file() {
        let file = SettingsFile {
            base_path: Some("/from/file".to_string()),
            executable: Some("/opt/sd/bin/sd".to_string()),
            additional_args: Some("--seed 7".to_string()),
            language: Some("ru".to_string()),
        };
        let overrides = SettingsOverrides {
            base_path: Some("/from/args".to_string()),
            executable: None,
            language: Some("en".to_string()),
        };

        let settings = Settings::resolve(&overrides, Some(file));

        assert_eq!(settings.layout.base_path(), Path::new("/from/args"));
        assert_eq!(settings.executable, "/opt/sd/bin/sd");
        assert_eq!(settings.additional_args, "--seed 7");
        assert_eq!(settings.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_load_settings_file_missing_is_none() {
        let result = load_settings_file("/this/path/does/not/exist.yml").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_settings_file_partial_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "base_path: /srv/sd\nlanguage: ru\n").unwrap();

        let settings = load_settings_file(temp_file.path().to_str().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(settings.base_path.as_deref(), Some("/srv/sd"));
        assert_eq!(settings.language.as_deref(), Some("ru"));
        assert!(settings.executable.is_none());
    }

    #[test]
    fn test_load_settings_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "base_path: [unclosed").unwrap();

        let result = load_settings_file(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/work")),
            PathBuf::from("/work/output.png")
        );
    }

    #[test]
    fn test_validate_output_path() {
        let dir = tempdir().unwrap();
        let inside = dir.path().join("image.png");
        let missing_parent = dir.path().join("missing").join("image.png");

        assert!(validate_output_path(inside.to_str().unwrap()).is_ok());
        assert!(validate_output_path("image.png").is_ok());
        assert!(validate_output_path("  ").is_err());
        assert!(matches!(
            validate_output_path(missing_parent.to_str().unwrap()),
            Err(Error::InvalidDirectory { .. })
        ));
    }

    #[test]
    fn test_layout_paths() {
        let layout = ResourceLayout::new("/res");

        assert_eq!(layout.configs_dir(), PathBuf::from("/res/configs"));
        assert_eq!(layout.model_path("m.gguf"), PathBuf::from("/res/model/m.gguf"));
        assert_eq!(layout.vae_path("v.gguf"), PathBuf::from("/res/vae/v.gguf"));
        assert_eq!(layout.lora_dir(), PathBuf::from("/res/lora"));
        assert_eq!(layout.embedding_dir(), PathBuf::from("/res/embedding"));
    }

    #[test]
    fn test_list_loras_returns_sorted_stems_of_files_only() {
        let dir = tempdir().unwrap();
        let lora_dir = dir.path().join("lora");
        fs::create_dir(&lora_dir).unwrap();
        File::create(lora_dir.join("watercolor.safetensors")).unwrap();
        File::create(lora_dir.join("ink.safetensors")).unwrap();
        fs::create_dir(lora_dir.join("nested")).unwrap();

        let layout = ResourceLayout::new(dir.path());

        assert_eq!(layout.list_loras(), vec!["ink", "watercolor"]);
        assert!(layout.list_embeddings().is_empty());
    }
}
