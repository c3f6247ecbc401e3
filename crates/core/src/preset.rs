//! Preset model and the value domains of its editable fields.
//!
//! A preset is one JSON object stored under the `configs` resource directory.
//! Recognised keys map onto typed fields; every other key is kept verbatim in
//! [`Preset::extra`] so that nothing in the file is lost.

use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Error;

/// Image sizes offered for both height and width.
pub const IMAGE_SIZES: [u32; 5] = [256, 512, 768, 1024, 2048];
pub const DEFAULT_IMAGE_SIZE: u32 = 512;

pub const GUIDANCE_RANGE: RangeInclusive<f64> = 0.1..=30.0;
pub const DEFAULT_GUIDANCE: f64 = 7.5;

pub const CLIP_SKIP_RANGE: RangeInclusive<f64> = 0.0..=12.0;
pub const DEFAULT_CLIP_SKIP: f64 = 1.0;

pub const STEPS_RANGE: RangeInclusive<u32> = 1..=200;
pub const DEFAULT_STEPS: u32 = 25;

/// Sampler names understood by the generator executable.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum SamplingMethod {
    #[default]
    Euler,
    EulerA,
    Heun,
    Dpm2,
    DpmPlusPlus2sA,
    DpmPlusPlus2m,
    DpmPlusPlus2mv2,
    Ipndm,
    IpndmV,
    Lcm,
    DdimTrailing,
    Tcd,
}

impl SamplingMethod {
    pub const ALL: [SamplingMethod; 12] = [
        SamplingMethod::Euler,
        SamplingMethod::EulerA,
        SamplingMethod::Heun,
        SamplingMethod::Dpm2,
        SamplingMethod::DpmPlusPlus2sA,
        SamplingMethod::DpmPlusPlus2m,
        SamplingMethod::DpmPlusPlus2mv2,
        SamplingMethod::Ipndm,
        SamplingMethod::IpndmV,
        SamplingMethod::Lcm,
        SamplingMethod::DdimTrailing,
        SamplingMethod::Tcd,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SamplingMethod::Euler => "euler",
            SamplingMethod::EulerA => "euler_a",
            SamplingMethod::Heun => "heun",
            SamplingMethod::Dpm2 => "dpm2",
            SamplingMethod::DpmPlusPlus2sA => "dpm++2s_a",
            SamplingMethod::DpmPlusPlus2m => "dpm++2m",
            SamplingMethod::DpmPlusPlus2mv2 => "dpm++2mv2",
            SamplingMethod::Ipndm => "ipndm",
            SamplingMethod::IpndmV => "ipndm_v",
            SamplingMethod::Lcm => "lcm",
            SamplingMethod::DdimTrailing => "ddim_trailing",
            SamplingMethod::Tcd => "tcd",
        }
    }
}

impl Display for SamplingMethod {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SamplingMethod {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SamplingMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
            .ok_or_else(|| Error::UnknownSamplingMethod(value.to_string()))
    }
}

impl TryFrom<String> for SamplingMethod {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A named, stored set of generation parameters.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Preset {
    pub model: Option<String>,
    pub vae: Option<String>,
    #[serde(rename = "sampling-method")]
    pub sampling_method: Option<SamplingMethod>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub guidance: Option<f64>,
    #[serde(rename = "clip-skip")]
    pub clip_skip: Option<f64>,
    pub steps: Option<u32>,
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub default_prompt: Option<String>,
    pub default_negative: Option<String>,
    /// Keys this program does not interpret, in file order.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Preset {
    /// Fills `prompt` and `negative_prompt` from the preset defaults when they
    /// are absent. A value that is already present is never replaced.
    pub fn apply_default_prompts(&mut self) {
        if self.prompt.is_none() {
            self.prompt = Some(self.default_prompt.clone().unwrap_or_default());
        }

        if self.negative_prompt.is_none() {
            self.negative_prompt = Some(self.default_negative.clone().unwrap_or_default());
        }
    }
}
