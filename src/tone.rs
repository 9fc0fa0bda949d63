use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TranslatorError;

/// Voice tone passed to the translation provider to steer phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceTone {
    #[default]
    Neutral,
    Formal,
    Casual,
    Friendly,
    Professional,
    Informative,
    Persuasive,
    Enthusiastic,
    Empathetic,
    Humorous,
    Serious,
    Respectful,
}

impl VoiceTone {
    pub const ALL: &'static [Self] = &[
        Self::Neutral,
        Self::Formal,
        Self::Casual,
        Self::Friendly,
        Self::Professional,
        Self::Informative,
        Self::Persuasive,
        Self::Enthusiastic,
        Self::Empathetic,
        Self::Humorous,
        Self::Serious,
        Self::Respectful,
    ];

    /// Wire value sent to the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Formal => "formal",
            Self::Casual => "casual",
            Self::Friendly => "friendly",
            Self::Professional => "professional",
            Self::Informative => "informative",
            Self::Persuasive => "persuasive",
            Self::Enthusiastic => "enthusiastic",
            Self::Empathetic => "empathetic",
            Self::Humorous => "humorous",
            Self::Serious => "serious",
            Self::Respectful => "respectful",
        }
    }

    /// Capitalized label for listings.
    pub fn label(self) -> String {
        let value = self.as_str();
        let mut chars = value.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for VoiceTone {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tone| tone.as_str() == wanted)
            .ok_or_else(|| TranslatorError::InvalidTone(s.to_string()))
    }
}

impl fmt::Display for VoiceTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
