//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Values given here win over the settings file.

use clap::Parser;
use sd_configurator_core::config::SettingsOverrides;

/// Command-line arguments for the `sdc` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use sd_configurator_cli::cli_args::Args;
///
/// let args = Args::parse_from(["sdc", "--preset", "portrait"]);
/// assert_eq!(args.preset.as_deref(), Some("portrait"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the settings file YAML.
    ///
    /// If not provided, defaults to `~/.sd-configurator/settings.yml`.
    #[arg(long, short = 'c')]
    pub settings_path: Option<String>,

    /// Resource base directory containing `configs`, `model`, `vae`, `lora` and `embedding`.
    #[arg(long, short = 'b')]
    pub base_path: Option<String>,

    /// Path to the image generation executable.
    #[arg(long, short = 'e')]
    pub executable: Option<String>,

    /// Two-letter language code for messages (`en` or `ru`). Skips the language prompt.
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Name of the preset to load, skipping the preset selection.
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Run the generator without first confirming if the command should be run.
    #[arg(long, short = 'f', action)]
    pub force: bool,
}

impl Args {
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_path: self.base_path.clone(),
            executable: self.executable.clone(),
            language: self.language.clone(),
        }
    }
}
