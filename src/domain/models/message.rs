use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recipient::RecipientHandle;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Sending,
    Sent,
    Failed,
}

/// One send attempt as shown in the dispatch log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub id: Uuid,
    pub text: String,
    pub recipient: RecipientHandle,
    pub status: DispatchStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DispatchRecord {
    pub fn sending(recipient: RecipientHandle, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            recipient,
            status: DispatchStatus::Sending,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}
