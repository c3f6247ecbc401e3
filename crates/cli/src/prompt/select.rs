use std::io::{stdout, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::input::RawModeGuard;
use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, UiState};
use sd_configurator_core::error::Result;

/// Lines used by the question, the filter line and a spare row.
const RESERVED_ROWS: usize = 3;

enum KeyOutcome {
    Chosen(usize),
    Cancelled,
    Changed(UiState),
    Move(CycleDirection),
    Ignored,
}

/// Indexes of the choices matching `filter_text`, best matches first.
/// An empty filter keeps every choice in its original order.
pub fn filter_choices(choices: &[String], filter_text: &str) -> Vec<usize> {
    if filter_text.is_empty() {
        return (0..choices.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = choices
        .iter()
        .enumerate()
        .filter_map(|(i, choice)| matcher.fuzzy_match(choice, filter_text).map(|score| (score, i)))
        .collect();

    scored.sort_by(|(s1, i1), (s2, i2)| s2.cmp(s1).then(i1.cmp(i2)));
    scored.into_iter().map(|(_, i)| i).collect()
}

fn viewport_height(choice_count: usize) -> Result<usize> {
    let (_, height) = terminal::size()?;
    let available = (height as usize).saturating_sub(RESERVED_ROWS).max(1);
    Ok(choice_count.clamp(1, available))
}

/// Redraws the question and the visible part of the list, returning the
/// number of lines written.
fn draw(
    stdout: &mut Stdout,
    message: &str,
    choices: &[String],
    visible: &[usize],
    ui_state: &UiState,
    previous_lines: u16,
) -> Result<u16> {
    if previous_lines > 0 {
        queue!(stdout, cursor::MoveUp(previous_lines))?;
    }
    queue!(stdout, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;

    let mut lines: u16 = 0;

    queue!(
        stdout,
        SetForegroundColor(DarkGreen),
        Print("? "),
        SetForegroundColor(Reset),
        SetAttribute(Attribute::Bold),
        Print(message),
        SetAttribute(Attribute::Reset),
    )?;
    if ui_state.is_filtering {
        queue!(stdout, Print(format!("  /{}", ui_state.filter_text)))?;
    }
    queue!(stdout, Print("\r\n"))?;
    lines += 1;

    if visible.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(Color::Red),
            Print("  No matching entries!"),
            SetForegroundColor(Reset),
            Print("\r\n"),
        )?;
        lines += 1;
    }

    let viewport = &ui_state.viewport;
    for (row, choice_index) in visible
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height)
    {
        if row == ui_state.selected_index {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
                Print(format!("❯ {}", choices[*choice_index])),
                SetAttribute(Attribute::Reset),
                SetBackgroundColor(Reset),
                SetForegroundColor(Reset),
            )?;
        } else {
            queue!(stdout, Print(format!("  {}", choices[*choice_index])))?;
        }
        queue!(stdout, Print("\r\n"))?;
        lines += 1;
    }

    stdout.flush()?;
    Ok(lines)
}

fn handle_key_event(key_event: KeyEvent, ui_state: &UiState, visible: &[usize]) -> KeyOutcome {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Cancelled
        }
        KeyCode::Up => KeyOutcome::Move(Up),
        KeyCode::Down | KeyCode::Tab => KeyOutcome::Move(Down),
        KeyCode::Enter => match visible.get(ui_state.selected_index) {
            Some(choice_index) => KeyOutcome::Chosen(*choice_index),
            None => KeyOutcome::Ignored,
        },
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.with_filter(String::new());
            updated_state.is_filtering = false;
            KeyOutcome::Changed(updated_state)
        }
        KeyCode::Esc => KeyOutcome::Cancelled,
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut filter_text = ui_state.filter_text.clone();
            filter_text.pop();
            KeyOutcome::Changed(ui_state.with_filter(filter_text))
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut filter_text = ui_state.filter_text.clone();
            filter_text.push(c);
            KeyOutcome::Changed(ui_state.with_filter(filter_text))
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyOutcome::Changed(updated_state)
        }
        KeyCode::Char('k') => KeyOutcome::Move(Up),
        KeyCode::Char('j') => KeyOutcome::Move(Down),
        _ => KeyOutcome::Ignored,
    }
}

/// Shows `choices` below `message` and lets the user pick one.
///
/// Returns the index into `choices`, or `None` if the user cancelled.
pub fn select_from_list(message: &str, choices: &[String], default: Option<usize>) -> Result<Option<usize>> {
    let mut stdout = stdout();
    let _raw_mode_guard = RawModeGuard::enable()?; // When this goes out of scope, raw mode is disabled
    queue!(stdout, cursor::Hide)?;

    let initial_index = default.filter(|index| *index < choices.len()).unwrap_or(0);
    let mut ui_state = UiState::new(initial_index, viewport_height(choices.len())?);
    let mut visible = filter_choices(choices, &ui_state.filter_text);
    let mut drawn_lines = draw(&mut stdout, message, choices, &visible, &ui_state, 0)?;

    let choice = loop {
        let new_state = match event::read()? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                match handle_key_event(key_event, &ui_state, &visible) {
                    KeyOutcome::Chosen(index) => break Some(index),
                    KeyOutcome::Cancelled => break None,
                    KeyOutcome::Changed(state) => Some(state),
                    KeyOutcome::Move(direction) => Some(ui_state.moved(direction, visible.len())),
                    KeyOutcome::Ignored => None,
                }
            }
            Event::Resize(_, _) => Some(ui_state.resized(viewport_height(choices.len())?)),
            _ => None,
        };

        if let Some(new_state) = new_state {
            if new_state != ui_state {
                visible = filter_choices(choices, &new_state.filter_text);
                ui_state = new_state;
                drawn_lines = draw(&mut stdout, message, choices, &visible, &ui_state, drawn_lines)?;
            }
        }
    };

    // Collapse the list into a single answered line
    queue!(
        stdout,
        cursor::MoveUp(drawn_lines),
        cursor::MoveToColumn(0),
        Clear(ClearType::FromCursorDown),
        SetForegroundColor(DarkGreen),
        Print("? "),
        SetForegroundColor(Reset),
        Print(message),
        Print(" "),
        SetForegroundColor(Color::Cyan),
        Print(choice.map(|index| choices[index].as_str()).unwrap_or("")),
        SetForegroundColor(Reset),
        Print("\r\n"),
        cursor::Show,
    )?;
    stdout.flush()?;

    Ok(choice)
}
