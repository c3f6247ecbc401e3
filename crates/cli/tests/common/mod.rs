//! Scripted collaborators for driving sessions without a terminal.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sd_configurator_cli::locale::Language;
use sd_configurator_cli::prompt::{NumberRequest, PathValidator, Prompt};
use sd_configurator_cli::session::SessionOptions;
use sd_configurator_core::command::CommandVector;
use sd_configurator_core::config::ResourceLayout;
use sd_configurator_core::error::{Error, Result};
use sd_configurator_core::execution::{ProcessOutput, ProcessRunner};

/// One scripted answer. `None` cancels the question.
#[derive(Debug, Clone)]
pub enum Answer {
    Select(Option<usize>),
    /// Raw text typed into a number prompt.
    Number(Option<String>),
    Text(Option<String>),
    Confirm(Option<bool>),
    Path(Option<String>),
}

/// A [`Prompt`] answering from a script and recording what it was shown.
///
/// When the script runs out every question is cancelled, so a session
/// always ends at the main menu.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    /// Every question asked, in order.
    pub questions: Vec<String>,
    /// Every line shown with `message`, in order.
    pub messages: Vec<String>,
    /// Choices and default of every `select`.
    pub selections: Vec<(Vec<String>, Option<usize>)>,
    /// Defaults offered by `text`, `number` and `path`.
    pub defaults: Vec<String>,
    pub clears: usize,
    pub pauses: usize,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn shown(&self, text: &str) -> bool {
        self.messages.iter().any(|message| message.contains(text))
    }

    fn next_answer(&mut self, question: &str) -> Option<Answer> {
        self.questions.push(question.to_string());
        self.answers.pop_front()
    }
}

impl Prompt for ScriptedPrompt {
    fn select(&mut self, message: &str, choices: &[String], default: Option<usize>) -> Result<Option<usize>> {
        self.selections.push((choices.to_vec(), default));
        match self.next_answer(message) {
            Some(Answer::Select(choice)) => {
                if let Some(index) = choice {
                    assert!(index < choices.len(), "Choice {index} out of {choices:?}");
                }
                Ok(choice)
            }
            None => Ok(None),
            Some(other) => panic!("Expected a select answer for `{message}`, got {other:?}"),
        }
    }

    fn number(&mut self, request: &NumberRequest<'_>) -> Result<Option<f64>> {
        self.defaults.push(request.default_text());
        loop {
            match self.next_answer(request.message) {
                Some(Answer::Number(Some(text))) => match request.parse(&text) {
                    Some(value) => return Ok(Some(value)),
                    None => self.messages.push(request.invalid_message.clone()),
                },
                Some(Answer::Number(None)) | None => return Ok(None),
                Some(other) => panic!("Expected a number answer for `{}`, got {other:?}", request.message),
            }
        }
    }

    fn text(&mut self, message: &str, default: &str, _multiline: bool) -> Result<Option<String>> {
        self.defaults.push(default.to_string());
        match self.next_answer(message) {
            Some(Answer::Text(text)) => Ok(text),
            None => Ok(None),
            Some(other) => panic!("Expected a text answer for `{message}`, got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>> {
        match self.next_answer(message) {
            Some(Answer::Confirm(answer)) => Ok(answer),
            None => Ok(None),
            Some(other) => panic!("Expected a confirm answer for `{message}`, got {other:?}"),
        }
    }

    fn path(&mut self, message: &str, default: &str, validate: PathValidator<'_>) -> Result<Option<String>> {
        self.defaults.push(default.to_string());
        loop {
            match self.next_answer(message) {
                Some(Answer::Path(Some(path))) => match validate(&path) {
                    Ok(()) => return Ok(Some(path)),
                    Err(reason) => self.messages.push(reason),
                },
                Some(Answer::Path(None)) | None => return Ok(None),
                Some(other) => panic!("Expected a path answer for `{message}`, got {other:?}"),
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }

    fn pause(&mut self, _message: &str) -> Result<()> {
        self.pauses += 1;
        Ok(())
    }
}

/// A [`ProcessRunner`] that records commands and replays canned results.
/// With nothing left to replay it reports a silent success.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    results: VecDeque<Result<ProcessOutput>>,
    pub commands: Vec<CommandVector>,
}

impl RecordingRunner {
    pub fn new(results: impl IntoIterator<Item = Result<ProcessOutput>>) -> Self {
        Self {
            results: results.into_iter().collect(),
            commands: Vec::new(),
        }
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&mut self, command: &CommandVector) -> Result<ProcessOutput> {
        self.commands.push(command.clone());
        self.results.pop_front().unwrap_or_else(|| {
            Ok(ProcessOutput {
                exit_code: Some(0),
                ..ProcessOutput::default()
            })
        })
    }
}

pub fn exited_with(code: i32, stdout: &str, stderr: &str) -> Result<ProcessOutput> {
    Ok(ProcessOutput {
        exit_code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}

pub fn launch_failure(program: &str) -> Result<ProcessOutput> {
    Err(Error::Launch {
        program: program.to_string(),
        original: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
    })
}

pub const COMPLETE_PRESET: &str = r#"{
    "model": "m.safetensors",
    "vae": "v.safetensors",
    "sampling-method": "euler_a",
    "height": 512,
    "width": 512,
    "guidance": 7.5,
    "steps": 25,
    "default_prompt": "cat",
    "default_negative": "blurry"
}"#;

/// A resource base directory with the given presets and empty resource
/// directories.
pub fn resource_dir(presets: &[(&str, &str)]) -> tempfile::TempDir {
    let base = tempfile::tempdir().unwrap();
    for directory in ["configs", "model", "vae", "lora", "embedding"] {
        fs::create_dir_all(base.path().join(directory)).unwrap();
    }
    for (name, content) in presets {
        fs::write(base.path().join("configs").join(format!("{name}.json")), content).unwrap();
    }
    base
}

pub fn options(base: &Path, output_directory: PathBuf) -> SessionOptions {
    SessionOptions {
        layout: ResourceLayout::new(base),
        executable: "sd".to_string(),
        additional_args: "-s -1 --diffusion-fa".to_string(),
        preset: None,
        language: Some(Language::English),
        output_directory,
        dry_run: false,
        force: false,
    }
}
