//! One editor per editable field.
//!
//! Every editor shows the current value as the default, keeps the answer
//! inside the field's domain and writes it back to the configuration. A
//! cancelled prompt leaves the field as it was.

use std::ops::RangeInclusive;

use log::debug;
use sd_configurator_core::config::ResourceLayout;
use sd_configurator_core::error::Result;
use sd_configurator_core::preset::{
    SamplingMethod, CLIP_SKIP_RANGE, DEFAULT_CLIP_SKIP, DEFAULT_GUIDANCE, DEFAULT_IMAGE_SIZE,
    DEFAULT_STEPS, GUIDANCE_RANGE, IMAGE_SIZES, STEPS_RANGE,
};
use sd_configurator_core::state::ConfigurationState;

use crate::display::prompt_editor_header;
use crate::locale::{MessageKey, Messages};
use crate::prompt::{NumberRequest, Prompt};

/// What an editor needs to ask for and store a value.
pub struct EditorContext<'a> {
    pub prompt: &'a mut dyn Prompt,
    pub messages: &'a Messages,
    pub layout: &'a ResourceLayout,
    pub state: &'a mut ConfigurationState,
}

pub type FieldEditor = fn(&mut EditorContext<'_>) -> Result<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SamplingMethod,
    ImageSize,
    Guidance,
    ClipSkip,
    Steps,
    Prompt,
    NegativePrompt,
    AdditionalArgs,
}

impl Field {
    #[must_use]
    pub fn menu_label(self) -> MessageKey {
        match self {
            Field::SamplingMethod => MessageKey::MenuMethod,
            Field::ImageSize => MessageKey::MenuSize,
            Field::Guidance => MessageKey::MenuGuidance,
            Field::ClipSkip => MessageKey::MenuClipSkip,
            Field::Steps => MessageKey::MenuSteps,
            Field::Prompt => MessageKey::MenuPrompt,
            Field::NegativePrompt => MessageKey::MenuNegative,
            Field::AdditionalArgs => MessageKey::MenuAdditional,
        }
    }

    #[must_use]
    pub fn editor(self) -> FieldEditor {
        match self {
            Field::SamplingMethod => edit_sampling_method,
            Field::ImageSize => edit_image_size,
            Field::Guidance => edit_guidance,
            Field::ClipSkip => edit_clip_skip,
            Field::Steps => edit_steps,
            Field::Prompt => edit_prompt,
            Field::NegativePrompt => edit_negative_prompt,
            Field::AdditionalArgs => edit_additional_args,
        }
    }
}

pub fn edit_sampling_method(context: &mut EditorContext<'_>) -> Result<()> {
    let choices: Vec<String> = SamplingMethod::ALL
        .iter()
        .map(ToString::to_string)
        .collect();
    let current = context.state.preset().sampling_method.unwrap_or_default();
    let default = SamplingMethod::ALL.iter().position(|method| *method == current);

    let message = context.messages.get(MessageKey::SelectMethod);
    if let Some(index) = context.prompt.select(message, &choices, default)? {
        context.state.set_sampling_method(SamplingMethod::ALL[index]);
    }
    Ok(())
}

fn select_image_size(prompt: &mut dyn Prompt, message: &str, current: Option<u32>) -> Result<Option<u32>> {
    let choices: Vec<String> = IMAGE_SIZES.iter().map(ToString::to_string).collect();
    let current = current.unwrap_or(DEFAULT_IMAGE_SIZE);
    let default = IMAGE_SIZES
        .iter()
        .position(|size| *size == current)
        .or_else(|| IMAGE_SIZES.iter().position(|size| *size == DEFAULT_IMAGE_SIZE));

    Ok(prompt.select(message, &choices, default)?.map(|index| IMAGE_SIZES[index]))
}

/// Height first, then width. Each confirmed value is kept even if the other
/// prompt is cancelled.
pub fn edit_image_size(context: &mut EditorContext<'_>) -> Result<()> {
    let height_message = context.messages.get(MessageKey::SelectHeight);
    let Some(height) = select_image_size(context.prompt, height_message, context.state.preset().height)? else {
        return Ok(());
    };
    context.state.set_height(height);

    let width_message = context.messages.get(MessageKey::SelectWidth);
    if let Some(width) = select_image_size(context.prompt, width_message, context.state.preset().width)? {
        context.state.set_width(width);
    }
    Ok(())
}

fn ask_number(
    context: &mut EditorContext<'_>,
    message_key: MessageKey,
    default: f64,
    range: RangeInclusive<f64>,
    float_allowed: bool,
) -> Result<Option<f64>> {
    let invalid_message = context.messages.format(
        MessageKey::NumberOutOfRange,
        &[
            ("min", &range.start().to_string()),
            ("max", &range.end().to_string()),
        ],
    )?;
    let request = NumberRequest {
        message: context.messages.get(message_key),
        default,
        range,
        float_allowed,
        invalid_message,
    };

    context.prompt.number(&request)
}

pub fn edit_guidance(context: &mut EditorContext<'_>) -> Result<()> {
    let current = context.state.preset().guidance.unwrap_or(DEFAULT_GUIDANCE);
    if let Some(guidance) = ask_number(context, MessageKey::EnterGuidance, current, GUIDANCE_RANGE, true)? {
        context.state.set_guidance(guidance);
    }
    Ok(())
}

pub fn edit_clip_skip(context: &mut EditorContext<'_>) -> Result<()> {
    let current = context.state.preset().clip_skip.unwrap_or(DEFAULT_CLIP_SKIP);
    if let Some(clip_skip) = ask_number(context, MessageKey::EnterClipSkip, current, CLIP_SKIP_RANGE, true)? {
        context.state.set_clip_skip(clip_skip);
    }
    Ok(())
}

pub fn edit_steps(context: &mut EditorContext<'_>) -> Result<()> {
    let current = context.state.preset().steps.unwrap_or(DEFAULT_STEPS);
    let range = f64::from(*STEPS_RANGE.start())..=f64::from(*STEPS_RANGE.end());

    let steps = ask_number(context, MessageKey::EnterSteps, f64::from(current), range, false)?
        .and_then(|steps| u32::try_from(steps as i64).ok());
    if let Some(steps) = steps {
        context.state.set_steps(steps);
    }
    Ok(())
}

fn show_prompt_editor_header(context: &mut EditorContext<'_>, title: MessageKey) -> Result<()> {
    context.prompt.clear()?;
    for line in prompt_editor_header(context.layout, context.messages, title)? {
        context.prompt.message(&line)?;
    }
    Ok(())
}

pub fn edit_prompt(context: &mut EditorContext<'_>) -> Result<()> {
    show_prompt_editor_header(context, MessageKey::EditPromptTitle)?;

    let current = context.state.preset().prompt.clone().unwrap_or_default();
    let message = context.messages.get(MessageKey::EnterPrompt);
    if let Some(prompt) = context.prompt.text(message, &current, true)? {
        debug!("Prompt set to {prompt:?}");
        context.state.set_prompt(prompt);
    }
    Ok(())
}

pub fn edit_negative_prompt(context: &mut EditorContext<'_>) -> Result<()> {
    show_prompt_editor_header(context, MessageKey::EditNegativeTitle)?;

    let current = context.state.preset().negative_prompt.clone().unwrap_or_default();
    let message = context.messages.get(MessageKey::EnterNegative);
    if let Some(negative_prompt) = context.prompt.text(message, &current, true)? {
        debug!("Negative prompt set to {negative_prompt:?}");
        context.state.set_negative_prompt(negative_prompt);
    }
    Ok(())
}

pub fn edit_additional_args(context: &mut EditorContext<'_>) -> Result<()> {
    let current = context.state.additional_args().to_string();
    let message = context.messages.get(MessageKey::EnterAdditional);
    if let Some(additional_args) = context.prompt.text(message, &current, false)? {
        context.state.set_additional_args(additional_args);
    }
    Ok(())
}
