use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::services::scheduler::DispatchScheduler;
use crate::application::usecases::{
    add_recipient::AddRecipientUseCase, get_dashboard::GetDashboardUseCase,
    get_settings::GetSettingsUseCase, list_dispatches::ListDispatchesUseCase,
    list_recipients::ListRecipientsUseCase,
    remove_recipient::RemoveRecipientUseCase, update_run_config::UpdateRunConfigUseCase,
};

#[derive(Clone)]
pub struct ApiState {
    pub add_recipient_usecase: Arc<AddRecipientUseCase>,
    pub remove_recipient_usecase: Arc<RemoveRecipientUseCase>,
    pub list_recipients_usecase: Arc<ListRecipientsUseCase>,
    pub get_settings_usecase: Arc<GetSettingsUseCase>,
    pub update_run_config_usecase: Arc<UpdateRunConfigUseCase>,
    pub get_dashboard_usecase: Arc<GetDashboardUseCase>,
    pub list_dispatches_usecase: Arc<ListDispatchesUseCase>,
    pub scheduler: Arc<DispatchScheduler>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Recipients,
    Settings,
    Run,
    Dispatches,
}
