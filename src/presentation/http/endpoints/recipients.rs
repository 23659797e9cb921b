use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use crate::{
    application::usecases::add_recipient::AddRecipientRequest,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::{map_domain_error, map_recipients},
        requests::AddRecipientRequestDto,
        responses::RecipientsDto,
    },
};

#[derive(Clone)]
pub struct RecipientsEndpoints {
    state: Arc<ApiState>,
}

impl RecipientsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl RecipientsEndpoints {
    #[oai(path = "/recipients", method = "get", tag = EndpointsTags::Recipients)]
    pub async fn list_recipients(&self) -> Json<RecipientsDto> {
        let recipients = self.state.list_recipients_usecase.execute().await;
        Json(map_recipients(&recipients))
    }

    #[oai(path = "/recipients", method = "post", tag = EndpointsTags::Recipients)]
    pub async fn add_recipient(
        &self,
        request: Json<AddRecipientRequestDto>,
    ) -> poem::Result<Json<RecipientsDto>> {
        let recipients = self
            .state
            .add_recipient_usecase
            .execute(AddRecipientRequest {
                handle: request.handle.clone(),
            })
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_recipients(&recipients)))
    }

    #[oai(
        path = "/recipients/:handle",
        method = "delete",
        tag = EndpointsTags::Recipients,
    )]
    pub async fn remove_recipient(&self, handle: Path<String>) -> poem::Result<Json<RecipientsDto>> {
        let recipients = self
            .state
            .remove_recipient_usecase
            .execute(&handle.0)
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_recipients(&recipients)))
    }
}
