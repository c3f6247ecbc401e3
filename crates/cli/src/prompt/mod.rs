//! The interactive prompt capability and its terminal implementation.
//!
//! Everything the configurator asks the user goes through the [`Prompt`]
//! trait, so that the menu logic can be driven by a scripted implementation
//! in tests.
//!
//! # User Interface
//!
//! The terminal implementation supports:
//! - Arrow keys or vim-style (j/k) navigation in lists
//! - `/` to filter a list (fuzzy search)
//! - Enter to confirm, Escape or Ctrl-C to cancel
//! - Alt+Enter or Ctrl-D to finish multi-line text

pub mod input;
pub mod select;
pub mod terminal;
pub mod types;

pub use terminal::TerminalPrompt;

use std::ops::RangeInclusive;

use sd_configurator_core::error::Result;

/// Checks a candidate path; `Err` carries the message shown before asking again.
pub type PathValidator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// A bounded numeric question.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRequest<'a> {
    pub message: &'a str,
    pub default: f64,
    pub range: RangeInclusive<f64>,
    pub float_allowed: bool,
    /// Shown when the answer is not a number in `range`.
    pub invalid_message: String,
}

impl NumberRequest<'_> {
    /// Parses an answer, returning `None` unless it is a number within the
    /// range (and a whole number when floats are not allowed).
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<f64> {
        let input = input.trim();

        let value = if self.float_allowed {
            input.parse::<f64>().ok()?
        } else {
            input.parse::<i64>().ok()? as f64
        };

        (value.is_finite() && self.range.contains(&value)).then_some(value)
    }

    /// The default rendered the way it is pre-filled in the input line.
    #[must_use]
    pub fn default_text(&self) -> String {
        if self.float_allowed {
            self.default.to_string()
        } else {
            format!("{}", self.default.round() as i64)
        }
    }
}

/// Interactive questions asked during a session.
///
/// Every question returns `Ok(None)` when the user cancels it.
pub trait Prompt {
    /// Single choice from `choices`, returning the chosen index.
    fn select(&mut self, message: &str, choices: &[String], default: Option<usize>) -> Result<Option<usize>>;

    fn number(&mut self, request: &NumberRequest<'_>) -> Result<Option<f64>>;

    /// Free text, pre-filled with `default`.
    fn text(&mut self, message: &str, default: &str, multiline: bool) -> Result<Option<String>>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    /// A file path, asked again until `validate` accepts it.
    fn path(&mut self, message: &str, default: &str, validate: PathValidator<'_>) -> Result<Option<String>>;

    fn clear(&mut self) -> Result<()>;

    /// Shows a line of read-only output.
    fn message(&mut self, text: &str) -> Result<()>;

    /// Waits for any key.
    fn pause(&mut self, message: &str) -> Result<()>;
}
