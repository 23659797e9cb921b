use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use crate::{
    application::usecases::update_run_config::UpdateRunConfigRequest,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::{map_domain_error, map_settings},
        requests::UpdateSettingsRequestDto,
        responses::SettingsDto,
    },
};

#[derive(Clone)]
pub struct SettingsEndpoints {
    state: Arc<ApiState>,
}

impl SettingsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl SettingsEndpoints {
    #[oai(path = "/settings", method = "get", tag = EndpointsTags::Settings)]
    pub async fn get_settings(&self) -> Json<SettingsDto> {
        let settings = self.state.get_settings_usecase.execute().await;
        Json(map_settings(&settings))
    }

    #[oai(path = "/settings", method = "put", tag = EndpointsTags::Settings)]
    pub async fn update_settings(
        &self,
        request: Json<UpdateSettingsRequestDto>,
    ) -> poem::Result<Json<SettingsDto>> {
        let settings = self
            .state
            .update_run_config_usecase
            .execute(UpdateRunConfigRequest {
                theme: request.theme.map(Into::into),
                hours: request.hours,
                minutes: request.minutes,
                seconds: request.seconds,
            })
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_settings(&settings)))
    }
}
