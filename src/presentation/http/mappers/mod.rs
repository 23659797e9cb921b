use poem::http::StatusCode;

use crate::{
    application::usecases::get_dashboard::Dashboard,
    domain::{
        errors::DomainError,
        models::{DispatchRecord, MAX_RECIPIENTS, RecipientHandle, Settings},
    },
    presentation::http::responses::{DashboardDto, DispatchRecordDto, RecipientsDto, SettingsDto},
};

pub fn map_recipients(recipients: &[RecipientHandle]) -> RecipientsDto {
    RecipientsDto {
        recipients: recipients.iter().map(ToString::to_string).collect(),
        max_recipients: MAX_RECIPIENTS as u32,
    }
}

pub fn map_settings(settings: &Settings) -> SettingsDto {
    SettingsDto {
        theme: settings.theme.into(),
        hours: settings.interval.hours,
        minutes: settings.interval.minutes,
        seconds: settings.interval.seconds,
        interval_ms: settings.interval.as_millis(),
        total_sent: settings.total_sent,
        is_active: settings.is_active,
    }
}

pub fn map_dashboard(dashboard: &Dashboard) -> DashboardDto {
    DashboardDto {
        state: dashboard.state.into(),
        scheduling_available: dashboard.scheduling_available,
        interval_ms: dashboard.interval_ms,
        theme: dashboard.theme.into(),
        total_sent: dashboard.total_sent,
        recipient_count: dashboard.recipient_count as u32,
        queue_length: dashboard.queue_length as u32,
        generating: dashboard.generating,
    }
}

pub fn map_dispatch(record: &DispatchRecord) -> DispatchRecordDto {
    DispatchRecordDto {
        id: record.id,
        recipient: record.recipient.to_string(),
        text: record.text.clone(),
        status: record.status.into(),
        error: record.error.clone(),
        created_at: record.created_at.to_rfc3339(),
        updated_at: record.updated_at.to_rfc3339(),
    }
}

pub fn map_domain_error(err: DomainError) -> poem::Error {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::State(_) => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    poem::Error::from_string(err.to_string(), status)
}

pub fn internal_error(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
}
