use std::str::FromStr;

use crate::foundation::error::PhotoverseError;

/// Share template selected for an export.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Tall 9:16 story: cover-fit photo band with a rounded text card.
    #[default]
    Story,
    /// 1:1 post: contained photo above the poem.
    Square,
    /// 4:5 polaroid: framed photo and a typewriter body.
    Polaroid,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [Self::Story, Self::Square, Self::Polaroid];

    /// Canvas size before output scaling.
    pub fn base_size(self) -> (u32, u32) {
        match self {
            Self::Story => (1080, 1920),
            Self::Square => (1080, 1080),
            Self::Polaroid => (1080, 1350),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Square => "square",
            Self::Polaroid => "polaroid",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = PhotoverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "story" => Ok(Self::Story),
            "square" | "post" => Ok(Self::Square),
            "polaroid" => Ok(Self::Polaroid),
            other => Err(PhotoverseError::validation(format!(
                "unknown template '{other}' (expected story, square or polaroid)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/kind.rs"]
mod tests;
