use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::{map_dashboard, map_domain_error},
    responses::DashboardDto,
};

#[derive(Clone)]
pub struct RunEndpoints {
    state: Arc<ApiState>,
}

impl RunEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }

    async fn dashboard(&self) -> Json<DashboardDto> {
        let dashboard = self.state.get_dashboard_usecase.execute().await;
        Json(map_dashboard(&dashboard))
    }
}

#[OpenApi]
impl RunEndpoints {
    #[oai(path = "/run", method = "get", tag = EndpointsTags::Run)]
    pub async fn status(&self) -> Json<DashboardDto> {
        self.dashboard().await
    }

    #[oai(path = "/run/start", method = "post", tag = EndpointsTags::Run)]
    pub async fn start(&self) -> poem::Result<Json<DashboardDto>> {
        self.state.scheduler.start().await.map_err(map_domain_error)?;
        Ok(self.dashboard().await)
    }

    #[oai(path = "/run/stop", method = "post", tag = EndpointsTags::Run)]
    pub async fn stop(&self) -> poem::Result<Json<DashboardDto>> {
        self.state.scheduler.stop().await.map_err(map_domain_error)?;
        Ok(self.dashboard().await)
    }

    #[oai(path = "/run/reset", method = "post", tag = EndpointsTags::Run)]
    pub async fn reset(&self) -> poem::Result<Json<DashboardDto>> {
        self.state.scheduler.reset().await.map_err(map_domain_error)?;
        Ok(self.dashboard().await)
    }
}
