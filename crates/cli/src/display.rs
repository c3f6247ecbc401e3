//! Text blocks shown around the menus: the settings table, banners and the
//! resource listings above the prompt editors.

use sd_configurator_core::config::ResourceLayout;
use sd_configurator_core::error::Result;
use sd_configurator_core::state::ConfigurationState;

use crate::locale::{MessageKey, Messages};

pub const TABLE_WIDTH: usize = 60;
pub const TITLE_WIDTH: usize = 50;
pub const PROMPT_PREVIEW_LENGTH: usize = 50;

/// Cuts `text` to `max_chars` characters, appending `...` when anything was cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Pads `text` on both sides with `fill` up to `width` characters.
#[must_use]
pub fn center(text: &str, width: usize, fill: char) -> String {
    let length = text.chars().count();
    if length >= width {
        return text.to_string();
    }

    let padding = width - length;
    let left = padding / 2;
    let right = padding - left;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        text,
        fill.to_string().repeat(right)
    )
}

fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn row(label: &str, value: &str) -> String {
    format!("  {label:<25}: {value}")
}

/// The program banner shown once before the preset list.
#[must_use]
pub fn title_banner(messages: &Messages) -> Vec<String> {
    vec![
        String::new(),
        rule(TITLE_WIDTH),
        center(messages.get(MessageKey::Title), TITLE_WIDTH, '='),
        rule(TITLE_WIDTH),
    ]
}

/// The current configuration as table lines.
///
/// Unset text values show the localized "not set" text and unset numbers
/// show `0`.
pub fn settings_table(state: &ConfigurationState, messages: &Messages) -> Result<Vec<String>> {
    let preset = state.preset();
    let not_set = messages.get(MessageKey::NotSet);

    let text_or_not_set = |value: Option<&str>| value.unwrap_or(not_set).to_string();
    let number_or_zero = |value: Option<String>| value.unwrap_or_else(|| "0".to_string());

    let rows = [
        (MessageKey::Model, text_or_not_set(preset.model.as_deref())),
        (MessageKey::Vae, text_or_not_set(preset.vae.as_deref())),
        (
            MessageKey::SamplingMethod,
            text_or_not_set(preset.sampling_method.map(|method| method.as_str())),
        ),
        (
            MessageKey::ImageSize,
            format!(
                "{}x{}",
                preset.height.unwrap_or_default(),
                preset.width.unwrap_or_default()
            ),
        ),
        (MessageKey::Guidance, number_or_zero(preset.guidance.map(|v| v.to_string()))),
        (MessageKey::ClipSkip, number_or_zero(preset.clip_skip.map(|v| v.to_string()))),
        (MessageKey::Steps, number_or_zero(preset.steps.map(|v| v.to_string()))),
        (
            MessageKey::Prompt,
            truncate(preset.prompt.as_deref().unwrap_or_default(), PROMPT_PREVIEW_LENGTH),
        ),
        (
            MessageKey::NegativePrompt,
            truncate(
                preset.negative_prompt.as_deref().unwrap_or_default(),
                PROMPT_PREVIEW_LENGTH,
            ),
        ),
        (MessageKey::AdditionalParams, state.additional_args().to_string()),
    ];

    let heading = messages.format(MessageKey::CurrentSettings, &[("name", state.preset_name())])?;

    let mut lines = vec![
        String::new(),
        rule(TABLE_WIDTH),
        center(&heading, TABLE_WIDTH, ' '),
        rule(TABLE_WIDTH),
    ];
    lines.extend(
        rows.iter()
            .map(|(key, value)| row(messages.get(*key), value)),
    );
    lines.push(rule(TABLE_WIDTH));
    lines.push(String::new());

    Ok(lines)
}

/// Heading of the prompt editors, listing the embeddings and LORAs that can
/// be referenced from prompt text. Empty listings are left out.
pub fn prompt_editor_header(
    layout: &ResourceLayout,
    messages: &Messages,
    title: MessageKey,
) -> Result<Vec<String>> {
    let mut lines = vec![
        rule(TABLE_WIDTH),
        center(messages.get(title), TABLE_WIDTH, '='),
        rule(TABLE_WIDTH),
    ];

    let embeddings = layout.list_embeddings();
    if !embeddings.is_empty() {
        lines.push(messages.format(
            MessageKey::AvailableEmbeddings,
            &[("embeddings", &embeddings.join(", "))],
        )?);
        lines.push(messages.get(MessageKey::EmbeddingUsage).to_string());
    }

    let loras = layout.list_loras();
    if !loras.is_empty() {
        lines.push(messages.format(MessageKey::AvailableLoras, &[("loras", &loras.join(", "))])?);
        lines.push(messages.get(MessageKey::LoraUsage).to_string());
    }

    lines.push(String::new());
    lines.push(rule(TABLE_WIDTH));
    lines.push(String::new());

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;
    use sd_configurator_core::preset::{Preset, SamplingMethod};
    use std::fs;
    use tempfile::tempdir;

    fn table_row<'a>(lines: &'a [String], label: &str) -> &'a str {
        lines
            .iter()
            .find(|line| line.trim_start().starts_with(label))
            .map(String::as_str)
            .unwrap_or_else(|| panic!("No row for {label}"))
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        // Counts characters, not bytes
        assert_eq!(truncate("кот и собака", 3), "кот...");
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6, '='), "==ab==");
        assert_eq!(center("abc", 6, '='), "=abc==");
        assert_eq!(center("too long", 4, '='), "too long");
    }

    #[test]
    fn test_settings_table_unset_values() {
        let state = ConfigurationState::new("empty", Preset::default(), "-s -1");
        let messages = Messages::new(Language::English);
        let lines = settings_table(&state, &messages).unwrap();

        assert!(lines.iter().any(|line| line.contains("Current settings: empty")));
        assert_eq!(table_row(&lines, "Model"), "  Model                    : not set");
        assert!(table_row(&lines, "Image size").ends_with(": 0x0"));
        assert!(table_row(&lines, "Guidance").ends_with(": 0"));
        assert!(table_row(&lines, "Steps").ends_with(": 0"));
        assert!(table_row(&lines, "Additional parameters").ends_with(": -s -1"));
    }

    #[test]
    fn test_settings_table_values() {
        let preset = Preset {
            model: Some("m.safetensors".to_string()),
            sampling_method: Some(SamplingMethod::EulerA),
            height: Some(768),
            width: Some(512),
            guidance: Some(7.5),
            clip_skip: Some(2.0),
            prompt: Some("x".repeat(60)),
            ..Preset::default()
        };
        let state = ConfigurationState::new("portrait", preset, "");
        let lines = settings_table(&state, &Messages::new(Language::English)).unwrap();

        assert!(table_row(&lines, "Sampling method").ends_with(": euler_a"));
        assert!(table_row(&lines, "Image size").ends_with(": 768x512"));
        assert!(table_row(&lines, "Guidance").ends_with(": 7.5"));
        assert!(table_row(&lines, "CLIP skip").ends_with(": 2"));
        assert!(table_row(&lines, "Prompt").ends_with(&format!(": {}...", "x".repeat(50))));
    }

    #[test]
    fn test_settings_table_russian_labels() {
        let state = ConfigurationState::new("p", Preset::default(), "");
        let lines = settings_table(&state, &Messages::new(Language::Russian)).unwrap();

        assert!(table_row(&lines, "Модель").ends_with(": не задан"));
    }

    #[test]
    fn test_prompt_editor_header_lists_resources() {
        let base = tempdir().unwrap();
        fs::create_dir_all(base.path().join("embedding")).unwrap();
        fs::create_dir_all(base.path().join("lora")).unwrap();
        fs::write(base.path().join("embedding/easynegative.pt"), "").unwrap();
        fs::write(base.path().join("lora/detail.safetensors"), "").unwrap();
        fs::write(base.path().join("lora/anime.safetensors"), "").unwrap();

        let layout = ResourceLayout::new(base.path());
        let lines =
            prompt_editor_header(&layout, &Messages::new(Language::English), MessageKey::EditPromptTitle)
                .unwrap();

        assert!(lines.contains(&"Available embedding models: easynegative".to_string()));
        assert!(lines.contains(&"Available LORA models: anime, detail".to_string()));
    }

    #[test]
    fn test_prompt_editor_header_omits_missing_listings() {
        let base = tempdir().unwrap();
        let layout = ResourceLayout::new(base.path());
        let lines =
            prompt_editor_header(&layout, &Messages::new(Language::English), MessageKey::EditNegativeTitle)
                .unwrap();

        assert!(!lines.iter().any(|line| line.contains("Available")));
        assert!(lines.iter().any(|line| line.contains(" Editing negative prompt ")));
    }
}
