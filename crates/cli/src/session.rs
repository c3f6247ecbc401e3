//! The menu-driven configuration session.
//!
//! A [`Session`] is a small state machine:
//!
//! ```text
//! SelectingLanguage -> SelectingPreset -> MainMenu <-> Editing(field)
//!                                            |  ^
//!                                            v  |
//!                                         Generating
//! ```
//!
//! Any state may move to `Exit`, which ends [`Session::run`].

use std::path::PathBuf;

use log::{debug, info, warn};
use sd_configurator_core::config::{default_output_path, ResourceLayout};
use sd_configurator_core::error::Result;
use sd_configurator_core::execution::ProcessRunner;
use sd_configurator_core::preset_store::PresetStore;
use sd_configurator_core::state::ConfigurationState;

use crate::display::{settings_table, title_banner};
use crate::editors::{EditorContext, Field};
use crate::generation::{run_generation, GenerationOutcome, GenerationRequest};
use crate::locale::{Language, MessageKey, Messages, LANGUAGE_PROMPT};
use crate::prompt::Prompt;

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Edit(Field),
    Generate,
    Exit,
}

impl MenuAction {
    /// In the order they are offered.
    pub const ALL: [MenuAction; 10] = [
        MenuAction::Edit(Field::SamplingMethod),
        MenuAction::Edit(Field::ImageSize),
        MenuAction::Edit(Field::Guidance),
        MenuAction::Edit(Field::ClipSkip),
        MenuAction::Edit(Field::Steps),
        MenuAction::Edit(Field::Prompt),
        MenuAction::Edit(Field::NegativePrompt),
        MenuAction::Edit(Field::AdditionalArgs),
        MenuAction::Generate,
        MenuAction::Exit,
    ];

    #[must_use]
    pub fn label(self) -> MessageKey {
        match self {
            MenuAction::Edit(field) => field.menu_label(),
            MenuAction::Generate => MessageKey::Generate,
            MenuAction::Exit => MessageKey::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SelectingLanguage,
    SelectingPreset,
    MainMenu,
    Editing(Field),
    Generating,
    Exit,
}

/// Resolved settings a session runs with.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub layout: ResourceLayout,
    pub executable: String,
    /// Initial additional arguments of every loaded preset.
    pub additional_args: String,
    /// Preset to load instead of asking.
    pub preset: Option<String>,
    /// Language to use instead of asking.
    pub language: Option<Language>,
    /// Directory of the proposed output file.
    pub output_directory: PathBuf,
    pub dry_run: bool,
    pub force: bool,
}

pub struct Session<P: Prompt, R: ProcessRunner> {
    prompt: P,
    runner: R,
    options: SessionOptions,
    store: PresetStore,
    messages: Messages,
    state: SessionState,
    configuration: Option<ConfigurationState>,
    last_outcome: Option<GenerationOutcome>,
}

impl<P: Prompt, R: ProcessRunner> Session<P, R> {
    pub fn new(prompt: P, runner: R, options: SessionOptions) -> Self {
        let (messages, state) = match options.language {
            Some(language) => (Messages::new(language), SessionState::SelectingPreset),
            None => (Messages::default(), SessionState::SelectingLanguage),
        };

        Self {
            prompt,
            runner,
            store: PresetStore::from_layout(&options.layout),
            options,
            messages,
            state,
            configuration: None,
            last_outcome: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// The working configuration, once a preset has been loaded.
    #[must_use]
    pub fn configuration(&self) -> Option<&ConfigurationState> {
        self.configuration.as_ref()
    }

    /// Outcome of the most recent generation attempt.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&GenerationOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn into_parts(self) -> (P, R) {
        (self.prompt, self.runner)
    }

    /// Steps the session until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal fails or a message cannot be
    /// rendered. Problems with presets and the generator are shown to the
    /// user instead.
    pub fn run(&mut self) -> Result<()> {
        while self.state != SessionState::Exit {
            self.step()?;
        }
        Ok(())
    }

    /// Handles the current state and moves to the next one.
    pub fn step(&mut self) -> Result<SessionState> {
        let next = match self.state {
            SessionState::SelectingLanguage => self.select_language()?,
            SessionState::SelectingPreset => self.select_preset()?,
            SessionState::MainMenu => self.main_menu()?,
            SessionState::Editing(field) => self.edit(field)?,
            SessionState::Generating => self.generate()?,
            SessionState::Exit => SessionState::Exit,
        };

        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(next)
    }

    fn select_language(&mut self) -> Result<SessionState> {
        let choices: Vec<String> = Language::ALL
            .iter()
            .map(|language| language.native_name().to_string())
            .collect();

        match self.prompt.select(LANGUAGE_PROMPT, &choices, Some(0))? {
            Some(index) => {
                self.messages = Messages::new(Language::ALL[index]);
                Ok(SessionState::SelectingPreset)
            }
            None => Ok(SessionState::Exit),
        }
    }

    fn select_preset(&mut self) -> Result<SessionState> {
        for line in title_banner(&self.messages) {
            self.prompt.message(&line)?;
        }

        let name = match &self.options.preset {
            Some(name) => name.clone(),
            None => {
                let presets = self.store.list_presets();
                if presets.is_empty() {
                    self.prompt.message(self.messages.get(MessageKey::NoConfigs))?;
                    return Ok(SessionState::Exit);
                }

                let message = self.messages.get(MessageKey::SelectConfig);
                match self.prompt.select(message, &presets, Some(0))? {
                    Some(index) => presets[index].clone(),
                    None => return Ok(SessionState::Exit),
                }
            }
        };

        match self.store.load_preset(&name) {
            Ok(preset) => {
                info!("Loaded preset `{name}`");
                self.configuration = Some(ConfigurationState::new(
                    name,
                    preset,
                    self.options.additional_args.clone(),
                ));
                Ok(SessionState::MainMenu)
            }
            Err(e) => {
                warn!("Could not load preset `{name}`: {e}");
                let text = self
                    .messages
                    .format(MessageKey::LoadError, &[("error", e.to_string().as_str())])?;
                self.prompt.message(&text)?;
                Ok(SessionState::Exit)
            }
        }
    }

    fn main_menu(&mut self) -> Result<SessionState> {
        let Some(configuration) = self.configuration.as_ref() else {
            return Ok(SessionState::SelectingPreset);
        };

        self.prompt.clear()?;
        for line in settings_table(configuration, &self.messages)? {
            self.prompt.message(&line)?;
        }

        let choices: Vec<String> = MenuAction::ALL
            .iter()
            .map(|action| self.messages.get(action.label()).to_string())
            .collect();

        let action = self
            .prompt
            .select(self.messages.get(MessageKey::MainMenu), &choices, Some(0))?
            .map_or(MenuAction::Exit, |index| MenuAction::ALL[index]);

        Ok(match action {
            MenuAction::Edit(field) => SessionState::Editing(field),
            MenuAction::Generate => SessionState::Generating,
            MenuAction::Exit => SessionState::Exit,
        })
    }

    fn edit(&mut self, field: Field) -> Result<SessionState> {
        let Some(configuration) = self.configuration.as_mut() else {
            return Ok(SessionState::SelectingPreset);
        };

        let mut context = EditorContext {
            prompt: &mut self.prompt,
            messages: &self.messages,
            layout: &self.options.layout,
            state: configuration,
        };
        (field.editor())(&mut context)?;

        Ok(SessionState::MainMenu)
    }

    fn generate(&mut self) -> Result<SessionState> {
        let Some(configuration) = self.configuration.as_ref() else {
            return Ok(SessionState::SelectingPreset);
        };

        let default_output = default_output_path(&self.options.output_directory);
        let request = GenerationRequest {
            executable: &self.options.executable,
            layout: &self.options.layout,
            state: configuration,
            default_output: &default_output,
            dry_run: self.options.dry_run,
            force: self.options.force,
        };

        let outcome = run_generation(&mut self.prompt, &mut self.runner, &self.messages, &request)?;
        debug!("Generation outcome: {outcome:?}");
        self.last_outcome = Some(outcome);

        self.prompt.pause(self.messages.get(MessageKey::PressAnyKey))?;
        Ok(SessionState::MainMenu)
    }
}
