use std::io::{stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use sd_configurator_core::error::Result;

use super::input::{read_confirm, read_text, wait_for_key};
use super::select::select_from_list;
use super::{NumberRequest, PathValidator, Prompt};

/// [`Prompt`] backed by the user's terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn warn(text: &str) -> Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::Red),
            Print(text),
            ResetColor,
            Print("\n"),
        )?;
        Ok(())
    }
}

impl Prompt for TerminalPrompt {
    fn select(&mut self, message: &str, choices: &[String], default: Option<usize>) -> Result<Option<usize>> {
        select_from_list(message, choices, default)
    }

    fn number(&mut self, request: &NumberRequest<'_>) -> Result<Option<f64>> {
        let mut default = request.default_text();
        loop {
            let Some(answer) = read_text(request.message, &default, false)? else {
                return Ok(None);
            };
            if let Some(value) = request.parse(&answer) {
                return Ok(Some(value));
            }
            Self::warn(&request.invalid_message)?;
            default = answer;
        }
    }

    fn text(&mut self, message: &str, default: &str, multiline: bool) -> Result<Option<String>> {
        read_text(message, default, multiline)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        read_confirm(message, default)
    }

    fn path(&mut self, message: &str, default: &str, validate: PathValidator<'_>) -> Result<Option<String>> {
        let mut default = default.to_string();
        loop {
            let Some(answer) = read_text(message, &default, false)? else {
                return Ok(None);
            };
            let answer = answer.trim().to_string();
            match validate(&answer) {
                Ok(()) => return Ok(Some(answer)),
                Err(reason) => Self::warn(&reason)?,
            }
            default = answer;
        }
    }

    fn clear(&mut self) -> Result<()> {
        let mut stdout = stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        let mut stdout = stdout();
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
        Ok(())
    }

    fn pause(&mut self, message: &str) -> Result<()> {
        wait_for_key(message)
    }
}
