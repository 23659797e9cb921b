use std::sync::Arc;

use poem_openapi::{OpenApi, payload::PlainText};

use crate::presentation::http::endpoints::root::{ApiState, EndpointsTags};

#[derive(Clone)]
pub struct HealthEndpoints {
    state: Arc<ApiState>,
}

impl HealthEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl HealthEndpoints {
    /// `DEGRADED` when the process came up without a timer facility.
    #[oai(path = "/health", method = "get", tag = EndpointsTags::Health)]
    pub async fn health(&self) -> PlainText<&'static str> {
        if self.state.scheduler.is_scheduling_available().await {
            PlainText("OK")
        } else {
            PlainText("DEGRADED")
        }
    }
}
