//! Turns the configuration into a running generator process and reports how
//! it went.

use std::path::Path;

use log::{info, warn};
use sd_configurator_core::command::build_command;
use sd_configurator_core::config::{validate_output_path, ResourceLayout};
use sd_configurator_core::error::Result;
use sd_configurator_core::execution::{ProcessRunner, OUTPUT_TAIL_LINES};
use sd_configurator_core::state::ConfigurationState;

use crate::locale::{MessageKey, Messages};
use crate::prompt::Prompt;

/// How a generation attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The generator exited with code 0.
    Completed { output_path: String, tail: Vec<String> },
    /// The generator exited with a non-zero code, or was killed (`None`).
    Failed { exit_code: Option<i32>, stderr: String },
    /// The generator could not be started.
    LaunchFailed(String),
    /// The command could not be built from the current configuration.
    Invalid(String),
    DryRun,
    Canceled,
}

pub struct GenerationRequest<'a> {
    pub executable: &'a str,
    pub layout: &'a ResourceLayout,
    pub state: &'a ConfigurationState,
    /// Pre-filled answer of the output path prompt.
    pub default_output: &'a Path,
    pub dry_run: bool,
    pub force: bool,
}

/// Asks for the output path, shows the command and runs it once confirmed.
///
/// Problems with the configuration or the generator are reported to the user
/// and returned as a [`GenerationOutcome`]; only terminal and message errors
/// are returned as `Err`.
pub fn run_generation(
    prompt: &mut dyn Prompt,
    runner: &mut dyn ProcessRunner,
    messages: &Messages,
    request: &GenerationRequest<'_>,
) -> Result<GenerationOutcome> {
    let invalid_directory = messages.get(MessageKey::InvalidDir);
    let validate = |path: &str| validate_output_path(path).map_err(|_| invalid_directory.to_string());

    let default_output = request.default_output.display().to_string();
    let Some(output_path) = prompt.path(messages.get(MessageKey::OutputPath), &default_output, &validate)? else {
        prompt.message(messages.get(MessageKey::GenerationCanceled))?;
        return Ok(GenerationOutcome::Canceled);
    };

    let command = match build_command(
        request.executable,
        request.layout,
        request.state,
        Path::new(&output_path),
    ) {
        Ok(command) => command,
        Err(e) if !e.is_fatal() => {
            warn!("Cannot build command: {e}");
            let error = e.to_string();
            prompt.message(&messages.format(MessageKey::UsageError, &[("error", &error)])?)?;
            return Ok(GenerationOutcome::Invalid(error));
        }
        Err(e) => return Err(e),
    };

    prompt.message(messages.get(MessageKey::CommandPreview))?;
    prompt.message(&command.preview())?;

    if request.dry_run {
        prompt.message(messages.get(MessageKey::DryRun))?;
        return Ok(GenerationOutcome::DryRun);
    }

    if !request.force {
        let confirmed = prompt
            .confirm(messages.get(MessageKey::ConfirmGenerate), true)?
            .unwrap_or(false);
        if !confirmed {
            prompt.message(messages.get(MessageKey::GenerationCanceled))?;
            return Ok(GenerationOutcome::Canceled);
        }
    }

    prompt.message(messages.get(MessageKey::GenerationStarted))?;

    let output = match runner.run(&command) {
        Ok(output) => output,
        Err(e) => {
            warn!("Generator could not be run: {e}");
            let error = e.to_string();
            prompt.message(&messages.format(MessageKey::CriticalError, &[("error", &error)])?)?;
            return Ok(GenerationOutcome::LaunchFailed(error));
        }
    };
    info!("Generator finished with exit code {:?}", output.exit_code);

    if output.success() {
        prompt.message(messages.get(MessageKey::GenerationSuccess))?;
        prompt.message(&messages.format(MessageKey::SavedTo, &[("path", &output_path)])?)?;

        let tail: Vec<String> = output
            .stdout_tail(OUTPUT_TAIL_LINES)
            .into_iter()
            .map(ToString::to_string)
            .collect();
        if !tail.is_empty() {
            prompt.message(messages.get(MessageKey::LastOutput))?;
            for line in &tail {
                prompt.message(line)?;
            }
        }

        return Ok(GenerationOutcome::Completed { output_path, tail });
    }

    let code = output
        .exit_code
        .map_or_else(|| messages.get(MessageKey::UnknownExitCode).to_string(), |code| code.to_string());
    prompt.message(messages.get(MessageKey::GenerationError))?;
    prompt.message(&messages.format(MessageKey::ErrorCode, &[("code", &code)])?)?;
    prompt.message(&messages.format(MessageKey::ErrorMessage, &[("message", output.stderr.trim())])?)?;

    Ok(GenerationOutcome::Failed {
        exit_code: output.exit_code,
        stderr: output.stderr,
    })
}
