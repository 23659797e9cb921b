use poem_openapi::Enum;

use crate::application::services::scheduler::RunState;
use crate::domain::models::{DispatchStatus, MessageTheme};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ThemeKind {
    #[oai(rename = "auto")]
    Auto,
    #[oai(rename = "roast")]
    Roast,
    #[oai(rename = "flirty")]
    Flirty,
    #[oai(rename = "funny")]
    Funny,
    #[oai(rename = "loving")]
    Loving,
    #[oai(rename = "dark_flirt")]
    DarkFlirt,
    #[oai(rename = "sarcasm")]
    Sarcasm,
    #[oai(rename = "mystery")]
    Mystery,
    #[oai(rename = "gen_z")]
    GenZ,
    #[oai(rename = "motivational")]
    Motivational,
}

impl From<ThemeKind> for MessageTheme {
    fn from(value: ThemeKind) -> Self {
        match value {
            ThemeKind::Auto => MessageTheme::Auto,
            ThemeKind::Roast => MessageTheme::Roast,
            ThemeKind::Flirty => MessageTheme::Flirty,
            ThemeKind::Funny => MessageTheme::Funny,
            ThemeKind::Loving => MessageTheme::Loving,
            ThemeKind::DarkFlirt => MessageTheme::DarkFlirt,
            ThemeKind::Sarcasm => MessageTheme::Sarcasm,
            ThemeKind::Mystery => MessageTheme::Mystery,
            ThemeKind::GenZ => MessageTheme::GenZ,
            ThemeKind::Motivational => MessageTheme::Motivational,
        }
    }
}

impl From<MessageTheme> for ThemeKind {
    fn from(value: MessageTheme) -> Self {
        match value {
            MessageTheme::Auto => ThemeKind::Auto,
            MessageTheme::Roast => ThemeKind::Roast,
            MessageTheme::Flirty => ThemeKind::Flirty,
            MessageTheme::Funny => ThemeKind::Funny,
            MessageTheme::Loving => ThemeKind::Loving,
            MessageTheme::DarkFlirt => ThemeKind::DarkFlirt,
            MessageTheme::Sarcasm => ThemeKind::Sarcasm,
            MessageTheme::Mystery => ThemeKind::Mystery,
            MessageTheme::GenZ => ThemeKind::GenZ,
            MessageTheme::Motivational => ThemeKind::Motivational,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunStateKind {
    #[oai(rename = "idle")]
    Idle,
    #[oai(rename = "running")]
    Running,
}

impl From<RunState> for RunStateKind {
    fn from(value: RunState) -> Self {
        match value {
            RunState::Idle => RunStateKind::Idle,
            RunState::Running => RunStateKind::Running,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum DispatchStatusDto {
    #[oai(rename = "sending")]
    Sending,
    #[oai(rename = "sent")]
    Sent,
    #[oai(rename = "failed")]
    Failed,
}

impl From<DispatchStatus> for DispatchStatusDto {
    fn from(value: DispatchStatus) -> Self {
        match value {
            DispatchStatus::Sending => DispatchStatusDto::Sending,
            DispatchStatus::Sent => DispatchStatusDto::Sent,
            DispatchStatus::Failed => DispatchStatusDto::Failed,
        }
    }
}
