//! The live, session-scoped working copy of a preset.

use crate::preset::{Preset, SamplingMethod};

/// A loaded preset plus the free-form additional arguments.
///
/// Created fresh every time a preset is selected and discarded at the end of
/// the session; edits are never written back to the preset file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationState {
    preset_name: String,
    preset: Preset,
    additional_args: String,
}

impl ConfigurationState {
    pub fn new(preset_name: impl Into<String>, preset: Preset, additional_args: impl Into<String>) -> Self {
        Self {
            preset_name: preset_name.into(),
            preset,
            additional_args: additional_args.into(),
        }
    }

    #[must_use]
    pub fn preset_name(&self) -> &str {
        &self.preset_name
    }

    #[must_use]
    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    #[must_use]
    pub fn additional_args(&self) -> &str {
        &self.additional_args
    }

    pub fn set_additional_args(&mut self, additional_args: impl Into<String>) {
        self.additional_args = additional_args.into();
    }

    pub fn set_sampling_method(&mut self, method: SamplingMethod) {
        self.preset.sampling_method = Some(method);
    }

    pub fn set_height(&mut self, height: u32) {
        self.preset.height = Some(height);
    }

    pub fn set_width(&mut self, width: u32) {
        self.preset.width = Some(width);
    }

    pub fn set_guidance(&mut self, guidance: f64) {
        self.preset.guidance = Some(guidance);
    }

    pub fn set_clip_skip(&mut self, clip_skip: f64) {
        self.preset.clip_skip = Some(clip_skip);
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.preset.steps = Some(steps);
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.preset.prompt = Some(prompt.into());
    }

    pub fn set_negative_prompt(&mut self, negative_prompt: impl Into<String>) {
        self.preset.negative_prompt = Some(negative_prompt.into());
    }

    #[cfg(test)]
    pub(crate) fn preset_mut(&mut self) -> &mut Preset {
        &mut self.preset
    }
}
