use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageTheme {
    #[default]
    Auto,
    Roast,
    Flirty,
    Funny,
    Loving,
    DarkFlirt,
    Sarcasm,
    Mystery,
    GenZ,
    Motivational,
}

impl MessageTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageTheme::Auto => "auto",
            MessageTheme::Roast => "roast",
            MessageTheme::Flirty => "flirty",
            MessageTheme::Funny => "funny",
            MessageTheme::Loving => "loving",
            MessageTheme::DarkFlirt => "dark_flirt",
            MessageTheme::Sarcasm => "sarcasm",
            MessageTheme::Mystery => "mystery",
            MessageTheme::GenZ => "gen_z",
            MessageTheme::Motivational => "motivational",
        }
    }

    /// Human-readable label used when prompting the generation provider.
    pub fn label(&self) -> &'static str {
        match self {
            MessageTheme::Auto => "Auto-Pilot (model decides)",
            MessageTheme::Roast => "Playful Roast",
            MessageTheme::Flirty => "Sweet Flirt",
            MessageTheme::Funny => "Comedy",
            MessageTheme::Loving => "Pure Love",
            MessageTheme::DarkFlirt => "Smooth Flirt",
            MessageTheme::Sarcasm => "Dry Sarcasm",
            MessageTheme::Mystery => "Mysterious/Deep",
            MessageTheme::GenZ => "Gen-Z Slang",
            MessageTheme::Motivational => "Motivation",
        }
    }
}
