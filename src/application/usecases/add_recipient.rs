use std::sync::Arc;

use crate::{
    application::services::settings::SettingsStore,
    domain::{errors::DomainError, models::RecipientHandle},
};

pub struct AddRecipientUseCase {
    settings: Arc<SettingsStore>,
}

pub struct AddRecipientRequest {
    pub handle: String,
}

impl AddRecipientUseCase {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self { settings }
    }

    pub async fn execute(
        &self,
        request: AddRecipientRequest,
    ) -> Result<Vec<RecipientHandle>, DomainError> {
        let handle = RecipientHandle::parse(&request.handle)?;
        self.settings.add_recipient(handle).await
    }
}
