//! Assembly of the generator invocation from the configuration state.

use std::fmt::{Display, Formatter};
use std::path::Path;

use log::debug;

use crate::config::ResourceLayout;
use crate::error::{Error, Result};
use crate::state::ConfigurationState;

/// Ordered tokens of one generator invocation: the executable followed by
/// its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandVector {
    tokens: Vec<String>,
}

impl CommandVector {
    #[must_use]
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens joined by single spaces, as shown to the user before running.
    #[must_use]
    pub fn preview(&self) -> String {
        self.tokens.join(" ")
    }
}

impl Display for CommandVector {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.preview())
    }
}

struct CommandBuilder {
    tokens: Vec<String>,
}

impl CommandBuilder {
    fn new(program: &str) -> Self {
        Self {
            tokens: vec![program.to_string()],
        }
    }

    fn flag(&mut self, flag: &str, value: impl ToString) {
        self.tokens.push(flag.to_string());
        self.tokens.push(value.to_string());
    }

    fn optional_flag<T: ToString>(&mut self, flag: &str, value: Option<T>) {
        if let Some(value) = value {
            self.flag(flag, value);
        }
    }

    fn path_flag(&mut self, flag: &str, path: &Path) {
        self.flag(flag, path.display());
    }
}

fn required<'a>(value: Option<&'a String>, field: &'static str) -> Result<&'a str> {
    value.map(String::as_str).ok_or(Error::MissingField(field))
}

/// Wraps prompt text in literal double quotes. Quotes inside the text are
/// not escaped.
fn quote_prompt(text: &str) -> String {
    format!("\"{text}\"")
}

/// Splits the additional arguments with POSIX shell word rules.
///
/// # Errors
///
/// Returns [`Error::AdditionalArguments`] when quoting is unbalanced.
pub fn split_additional_args(additional_args: &str) -> Result<Vec<String>> {
    if additional_args.trim().is_empty() {
        return Ok(Vec::new());
    }

    shlex::split(additional_args).ok_or_else(|| Error::AdditionalArguments(additional_args.to_string()))
}

/// Builds the generator invocation for `state`, writing to `output_path`.
///
/// Optional parameters that are unset are left out; prompt, negative prompt,
/// model and VAE must be set.
///
/// # Errors
///
/// Returns [`Error::MissingField`] for an unset required field and
/// [`Error::AdditionalArguments`] when the additional arguments cannot be split.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use sd_configurator_core::command::build_command;
/// use sd_configurator_core::config::ResourceLayout;
/// use sd_configurator_core::preset::Preset;
/// use sd_configurator_core::state::ConfigurationState;
///
/// let preset = Preset {
///     model: Some("m.safetensors".to_string()),
///     vae: Some("v.safetensors".to_string()),
///     prompt: Some("cat".to_string()),
///     negative_prompt: Some(String::new()),
///     ..Preset::default()
/// };
/// let state = ConfigurationState::new("cats", preset, "");
/// let command = build_command("sd", &ResourceLayout::new("/res"), &state, Path::new("out.png"))?;
///
/// assert_eq!(command.program(), "sd");
/// # Ok::<(), sd_configurator_core::error::Error>(())
/// ```
pub fn build_command(
    executable: &str,
    layout: &ResourceLayout,
    state: &ConfigurationState,
    output_path: &Path,
) -> Result<CommandVector> {
    let preset = state.preset();
    let mut builder = CommandBuilder::new(executable);

    builder.optional_flag("--sampling-method", preset.sampling_method);
    builder.optional_flag("--height", preset.height);
    builder.optional_flag("--width", preset.width);
    builder.optional_flag("--guidance", preset.guidance);
    builder.optional_flag("--clip-skip", preset.clip_skip);
    builder.optional_flag("--steps", preset.steps);

    builder.flag(
        "--prompt",
        quote_prompt(required(preset.prompt.as_ref(), "prompt")?),
    );
    builder.flag(
        "--negative-prompt",
        quote_prompt(required(preset.negative_prompt.as_ref(), "negative_prompt")?),
    );

    builder.path_flag(
        "--model",
        &layout.model_path(required(preset.model.as_ref(), "model")?),
    );
    builder.path_flag(
        "--vae",
        &layout.vae_path(required(preset.vae.as_ref(), "vae")?),
    );

    builder.path_flag("--lora-model-dir", &layout.lora_dir());
    builder.path_flag("--embd-dir", &layout.embedding_dir());
    builder.path_flag("--output", output_path);

    builder
        .tokens
        .extend(split_additional_args(state.additional_args())?);

    let command = CommandVector {
        tokens: builder.tokens,
    };
    debug!("Built command: {}", command);

    Ok(command)
}
