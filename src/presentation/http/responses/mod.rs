use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::{DispatchStatusDto, RunStateKind, ThemeKind};

#[derive(Object)]
pub struct RecipientsDto {
    pub recipients: Vec<String>,
    pub max_recipients: u32,
}

#[derive(Object)]
pub struct SettingsDto {
    pub theme: ThemeKind,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub interval_ms: u64,
    pub total_sent: u64,
    pub is_active: bool,
}

#[derive(Object)]
pub struct DashboardDto {
    pub state: RunStateKind,
    pub scheduling_available: bool,
    pub interval_ms: u64,
    pub theme: ThemeKind,
    pub total_sent: u64,
    pub recipient_count: u32,
    pub queue_length: u32,
    pub generating: bool,
}

#[derive(Object)]
pub struct DispatchRecordDto {
    pub id: Uuid,
    pub recipient: String,
    pub text: String,
    pub status: DispatchStatusDto,
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
