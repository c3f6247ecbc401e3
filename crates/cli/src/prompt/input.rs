use std::io::{stdout, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkGreen, Reset};
use crossterm::style::{Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{cursor, queue};
use sd_configurator_core::error::Result;

/// Puts the terminal into raw mode until dropped.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = queue!(stdout, cursor::Show);
        let _ = stdout.flush();
    }
}

/// What a key press did to the line being edited.
#[derive(Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Submit(String),
    Cancel,
    Continue,
}

/// Text buffer behind a text prompt.
///
/// Single-line editors submit on Enter. Multi-line editors insert a line
/// break on Enter and submit on Alt+Enter or Ctrl-D.
#[derive(Debug, Clone)]
pub struct LineEditor {
    buffer: String,
    multiline: bool,
}

impl LineEditor {
    #[must_use]
    pub fn new(default: &str, multiline: bool) -> Self {
        let buffer = if multiline {
            default.to_string()
        } else {
            default.replace(['\r', '\n'], " ")
        };
        Self { buffer, multiline }
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) -> EditOutcome {
        let control = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key_event.modifiers.contains(KeyModifiers::ALT);

        match key_event.code {
            KeyCode::Char('c') if control => EditOutcome::Cancel,
            KeyCode::Char('d') if control => EditOutcome::Submit(self.buffer.clone()),
            KeyCode::Char('u') if control => {
                self.buffer.clear();
                EditOutcome::Continue
            }
            KeyCode::Esc => EditOutcome::Cancel,
            KeyCode::Enter if self.multiline && !alt => {
                self.buffer.push('\n');
                EditOutcome::Continue
            }
            KeyCode::Enter => EditOutcome::Submit(self.buffer.clone()),
            KeyCode::Backspace => {
                self.buffer.pop();
                EditOutcome::Continue
            }
            KeyCode::Char(c) if !control => {
                self.buffer.push(c);
                EditOutcome::Continue
            }
            _ => EditOutcome::Continue,
        }
    }
}

/// Number of terminal rows taken by `text` at the given terminal width.
fn rendered_rows(text: &str, columns: usize) -> u16 {
    let columns = columns.max(1);
    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().max(1).div_ceil(columns))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_question(stdout: &mut Stdout, message: &str, body: &str, previous_rows: u16) -> Result<u16> {
    if previous_rows > 1 {
        queue!(stdout, cursor::MoveUp(previous_rows - 1))?;
    }
    queue!(
        stdout,
        cursor::MoveToColumn(0),
        Clear(ClearType::FromCursorDown),
        SetForegroundColor(DarkGreen),
        Print("? "),
        SetForegroundColor(Reset),
        SetAttribute(Attribute::Bold),
        Print(message),
        SetAttribute(Attribute::Reset),
        Print(" "),
        Print(body.replace('\n', "\r\n")),
    )?;
    stdout.flush()?;

    let (columns, _) = terminal::size()?;
    Ok(rendered_rows(&format!("? {message} {body}"), columns as usize))
}

fn next_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind != KeyEventKind::Release {
                return Ok(key_event);
            }
        }
    }
}

/// Reads a line (or several) of text, starting from `default`.
pub fn read_text(message: &str, default: &str, multiline: bool) -> Result<Option<String>> {
    let mut stdout = stdout();
    let _raw_mode_guard = RawModeGuard::enable()?;

    let mut editor = LineEditor::new(default, multiline);
    let mut rows = draw_question(&mut stdout, message, editor.buffer(), 0)?;

    let answer = loop {
        match editor.handle_key(next_key()?) {
            EditOutcome::Submit(text) => break Some(text),
            EditOutcome::Cancel => break None,
            EditOutcome::Continue => {
                rows = draw_question(&mut stdout, message, editor.buffer(), rows)?;
            }
        }
    };

    queue!(stdout, Print("\r\n"))?;
    stdout.flush()?;
    Ok(answer)
}

/// Maps a key press to a yes/no answer. `Some(None)` means the question
/// was cancelled, `None` that the key is not an answer.
fn confirm_key(key_event: KeyEvent, default: bool) -> Option<Option<bool>> {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => Some(None),
        KeyCode::Esc => Some(None),
        KeyCode::Enter => Some(Some(default)),
        KeyCode::Char('y' | 'Y' | 'д' | 'Д') => Some(Some(true)),
        KeyCode::Char('n' | 'N' | 'н' | 'Н') => Some(Some(false)),
        _ => None,
    }
}

pub fn read_confirm(message: &str, default: bool) -> Result<Option<bool>> {
    let mut stdout = stdout();
    let _raw_mode_guard = RawModeGuard::enable()?;

    let hint = if default { "(Y/n)" } else { "(y/N)" };
    draw_question(&mut stdout, message, hint, 0)?;

    let answer = loop {
        if let Some(answer) = confirm_key(next_key()?, default) {
            break answer;
        }
    };

    let shown = match answer {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    };
    queue!(stdout, Print(" "), Print(shown), Print("\r\n"))?;
    stdout.flush()?;
    Ok(answer)
}

pub fn wait_for_key(message: &str) -> Result<()> {
    let mut stdout = stdout();
    let _raw_mode_guard = RawModeGuard::enable()?;

    queue!(stdout, Print(message))?;
    stdout.flush()?;
    next_key()?;
    queue!(stdout, Print("\r\n"))?;
    stdout.flush()?;
    Ok(())
}
