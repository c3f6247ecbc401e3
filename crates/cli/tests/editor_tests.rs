mod common;

use std::fs;

use common::{Answer, ScriptedPrompt};
use sd_configurator_cli::editors::{EditorContext, Field};
use sd_configurator_cli::locale::{Language, Messages};
use sd_configurator_core::config::ResourceLayout;
use sd_configurator_core::preset::{Preset, SamplingMethod};
use sd_configurator_core::state::ConfigurationState;
use tempfile::tempdir;

fn edit(field: Field, prompt: &mut ScriptedPrompt, layout: &ResourceLayout, state: &mut ConfigurationState) {
    let messages = Messages::new(Language::English);
    let mut context = EditorContext {
        prompt,
        messages: &messages,
        layout,
        state,
    };
    (field.editor())(&mut context).unwrap();
}

fn empty_state() -> ConfigurationState {
    ConfigurationState::new("test", Preset::default(), "-s -1")
}

#[test]
fn test_sampling_method_defaults_to_euler() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([Answer::Select(Some(11))]);

    edit(Field::SamplingMethod, &mut prompt, &layout, &mut state);

    let (choices, default) = &prompt.selections[0];
    assert_eq!(choices.len(), 12);
    assert_eq!(choices[4], "dpm++2s_a");
    assert_eq!(*default, Some(0));
    assert_eq!(state.preset().sampling_method, Some(SamplingMethod::Tcd));
}

#[test]
fn test_sampling_method_offers_current_value() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    state.set_sampling_method(SamplingMethod::Lcm);
    let mut prompt = ScriptedPrompt::new([Answer::Select(None)]);

    edit(Field::SamplingMethod, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.selections[0].1, Some(9));
    assert_eq!(state.preset().sampling_method, Some(SamplingMethod::Lcm));
}

#[test]
fn test_image_size_edits_height_then_width() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([Answer::Select(Some(3)), Answer::Select(Some(2))]);

    edit(Field::ImageSize, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.questions, vec!["Image height:", "Image width:"]);
    // Both default to 512
    assert_eq!(prompt.selections[0].1, Some(1));
    assert_eq!(prompt.selections[1].1, Some(1));
    assert_eq!(state.preset().height, Some(1024));
    assert_eq!(state.preset().width, Some(768));
}

#[test]
fn test_cancelled_height_skips_width() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([Answer::Select(None), Answer::Select(Some(0))]);

    edit(Field::ImageSize, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.remaining(), 1);
    assert_eq!(state.preset().height, None);
    assert_eq!(state.preset().width, None);
}

#[test]
fn test_cancelled_width_keeps_new_height() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    state.set_width(256);
    let mut prompt = ScriptedPrompt::new([Answer::Select(Some(4)), Answer::Select(None)]);

    edit(Field::ImageSize, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.selections[1].1, Some(0));
    assert_eq!(state.preset().height, Some(2048));
    assert_eq!(state.preset().width, Some(256));
}

#[test]
fn test_unlisted_size_defaults_to_512() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    state.set_height(640);
    let mut prompt = ScriptedPrompt::new([Answer::Select(None)]);

    edit(Field::ImageSize, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.selections[0].1, Some(1));
    assert_eq!(state.preset().height, Some(640));
}

#[test]
fn test_guidance_range_and_default() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([
        Answer::Number(Some("0.05".to_string())),
        Answer::Number(Some("12.25".to_string())),
    ]);

    edit(Field::Guidance, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.defaults, vec!["7.5"]);
    assert!(prompt.shown("Enter a number between 0.1 and 30."));
    assert_eq!(state.preset().guidance, Some(12.25));
}

#[test]
fn test_clip_skip_accepts_floats() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([Answer::Number(Some("2".to_string()))]);

    edit(Field::ClipSkip, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.defaults, vec!["1"]);
    assert_eq!(state.preset().clip_skip, Some(2.0));
}

#[test]
fn test_steps_are_whole_numbers() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([Answer::Number(Some("200".to_string()))]);

    edit(Field::Steps, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.defaults, vec!["25"]);
    assert_eq!(state.preset().steps, Some(200));
}

#[test]
fn test_steps_reject_fractions_and_out_of_range() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    state.set_steps(40);
    let mut prompt = ScriptedPrompt::new([
        Answer::Number(Some("12.5".to_string())),
        Answer::Number(Some("0".to_string())),
        Answer::Number(Some("-3".to_string())),
        Answer::Number(Some("201".to_string())),
        Answer::Number(Some("1".to_string())),
    ]);

    edit(Field::Steps, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.defaults, vec!["40"]);
    assert_eq!(
        prompt
            .messages
            .iter()
            .filter(|message| *message == "Enter a number between 1 and 200.")
            .count(),
        4
    );
    assert_eq!(state.preset().steps, Some(1));
}

#[test]
fn test_prompt_editor_lists_resources() {
    let base = tempdir().unwrap();
    fs::create_dir_all(base.path().join("embedding")).unwrap();
    fs::write(base.path().join("embedding").join("easynegative.pt"), "").unwrap();
    let layout = ResourceLayout::new(base.path());

    let mut state = empty_state();
    state.set_prompt("a cat");
    let mut prompt = ScriptedPrompt::new([Answer::Text(Some("a cat\non a mat".to_string()))]);

    edit(Field::Prompt, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.clears, 1);
    assert!(prompt.shown("Available embedding models: easynegative"));
    assert!(!prompt.shown("Available LORA models"));
    assert_eq!(prompt.defaults, vec!["a cat"]);
    assert_eq!(state.preset().prompt.as_deref(), Some("a cat\non a mat"));
}

#[test]
fn test_cancelled_negative_prompt_keeps_value() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    state.set_negative_prompt("blurry");
    let mut prompt = ScriptedPrompt::new([Answer::Text(None)]);

    edit(Field::NegativePrompt, &mut prompt, &layout, &mut state);

    assert!(prompt.shown(" Editing negative prompt "));
    assert_eq!(state.preset().negative_prompt.as_deref(), Some("blurry"));
}

#[test]
fn test_additional_args_edit() {
    let layout = ResourceLayout::new("/res");
    let mut state = empty_state();
    let mut prompt = ScriptedPrompt::new([Answer::Text(Some("--seed 42".to_string()))]);

    edit(Field::AdditionalArgs, &mut prompt, &layout, &mut state);

    assert_eq!(prompt.defaults, vec!["-s -1"]);
    assert_eq!(state.additional_args(), "--seed 42");
}
