use std::sync::Arc;

use crate::domain::{models::DispatchRecord, repositories::DispatchLogRepository};

pub struct ListDispatchesUseCase {
    repo: Arc<dyn DispatchLogRepository>,
}

impl ListDispatchesUseCase {
    pub fn new(repo: Arc<dyn DispatchLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, limit: Option<usize>) -> anyhow::Result<Vec<DispatchRecord>> {
        self.repo.list(limit).await
    }
}
