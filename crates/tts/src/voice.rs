use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::error::TtsError;

/// Stock and cloned `ElevenLabs` voices available to Posecast
///
/// The set is closed: a voice outside this table is rejected before any
/// request reaches the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceIdentifier {
    Alice,
    Aria,
    Bill,
    Brian,
    Callum,
    Charlie,
    Charlotte,
    Chris,
    Daniel,
    Eric,
    George,
    Jessica,
    Laura,
    Liam,
    Lily,
    Matilda,
    River,
    Roger,
    Sarah,
    Will,
    Ayush,
    AtharvaDeosthale,
}

impl VoiceIdentifier {
    /// Opaque provider token selecting this voice
    pub const fn token(self) -> &'static str {
        match self {
            Self::Alice => "Xb7hH8MSUJpSbSDYk0k2",
            Self::Aria => "9BWtsMINqrJLrRacOk9x",
            Self::Bill => "pqHfZKP75CvOlQylNhV4",
            Self::Brian => "nPczCjzI2devNBz1zQrb",
            Self::Callum => "N2lVS1w4EtoT3dr4eOWO",
            Self::Charlie => "IKne3meq5aSn9XLyUdCD",
            Self::Charlotte => "XB0fDUnXU5powFXDhCwa",
            Self::Chris => "iP95p4xoKVk53GoZ742B",
            Self::Daniel => "onwK4e9ZLuTAKqWW03F9",
            Self::Eric => "cjVigY5qzO86Huf0OWal",
            Self::George => "JBFqnCBsd6RMkjVDRZzb",
            Self::Jessica => "cgSgspJ2msm6clMCkdW9",
            Self::Laura => "FGY2WhTYpPnrIDTdsKH5",
            Self::Liam => "TX3LPaxmHKxFdv7VOQHJ",
            Self::Lily => "pFZP5JQG7iQjIQuC4Bku",
            Self::Matilda => "XrExE9yKIg1WjnnlVkGX",
            Self::River => "SAz9YHcvj6GT2YYXdXww",
            Self::Roger => "CwhRBWXzGAHq8TQ4Fs17",
            Self::Sarah => "EXAVITQu4vr4xnSDxMaL",
            Self::Will => "bIHbv24MWmeRgasZH58o",
            Self::Ayush => "gtVylSAXuNzydSb0uL4b",
            Self::AtharvaDeosthale => "OLVqN4DdAueWrd8yyVHn",
        }
    }

    /// Symbolic name, e.g. `ATHARVA_DEOSTHALE`
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look a voice up by its provider token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::iter().find(|voice| voice.token() == token)
    }
}

impl FromStr for VoiceIdentifier {
    type Err = TtsError;

    /// Accepts a symbolic name in any case (`will`, `Atharva-Deosthale`) or a
    /// raw provider token
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.replace('-', "_").to_ascii_uppercase();

        Self::iter()
            .find(|voice| voice.name() == normalized)
            .or_else(|| Self::from_token(trimmed))
            .ok_or_else(|| TtsError::Validation(format!("unknown voice '{trimmed}'")))
    }
}
