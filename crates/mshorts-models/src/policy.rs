//! Resize and audio-mix policy definitions.
//!
//! Both policies exist because the product shipped two variants of the same
//! pipeline that disagreed on these choices. They are explicit, named
//! configuration values rather than separate code paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the looped video is fitted to the target frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Scale to the target height, width follows the source aspect ratio.
    #[default]
    PreserveAspect,
    /// Scale to the exact target width and height, distorting if needed.
    Stretch,
}

impl ResizePolicy {
    pub const ALL: &'static [ResizePolicy] = &[ResizePolicy::PreserveAspect, ResizePolicy::Stretch];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizePolicy::PreserveAspect => "preserve_aspect",
            ResizePolicy::Stretch => "stretch",
        }
    }
}

impl fmt::Display for ResizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResizePolicy {
    type Err = ResizePolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve_aspect" => Ok(ResizePolicy::PreserveAspect),
            "stretch" => Ok(ResizePolicy::Stretch),
            _ => Err(ResizePolicyParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown resize policy: {0}")]
pub struct ResizePolicyParseError(String);

/// How the speech and music tracks are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MixPolicy {
    /// Speech and volume-scaled music play simultaneously for the full duration.
    #[default]
    Overlay,
    /// Music segment followed by the speech segment.
    Sequential,
}

impl MixPolicy {
    pub const ALL: &'static [MixPolicy] = &[MixPolicy::Overlay, MixPolicy::Sequential];

    pub fn as_str(&self) -> &'static str {
        match self {
            MixPolicy::Overlay => "overlay",
            MixPolicy::Sequential => "sequential",
        }
    }
}

impl fmt::Display for MixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MixPolicy {
    type Err = MixPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overlay" => Ok(MixPolicy::Overlay),
            "sequential" => Ok(MixPolicy::Sequential),
            _ => Err(MixPolicyParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown mix policy: {0}")]
pub struct MixPolicyParseError(String);
