use std::sync::Arc;

use poem_openapi::{OpenApi, param::Query, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::{internal_error, map_dispatch},
    responses::DispatchRecordDto,
};

#[derive(Clone)]
pub struct DispatchesEndpoints {
    state: Arc<ApiState>,
}

impl DispatchesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl DispatchesEndpoints {
    /// Most recent attempts first.
    #[oai(path = "/dispatches", method = "get", tag = EndpointsTags::Dispatches)]
    pub async fn list_dispatches(
        &self,
        limit: Query<Option<u32>>,
    ) -> poem::Result<Json<Vec<DispatchRecordDto>>> {
        let records = self
            .state
            .list_dispatches_usecase
            .execute(limit.0.map(|l| l as usize))
            .await
            .map_err(internal_error)?;

        Ok(Json(records.iter().map(map_dispatch).collect()))
    }
}
