use async_trait::async_trait;

use crate::{application::services::generator::MessageGenerator, domain::models::MessageTheme};

pub const PLACEHOLDER_MESSAGE: &str = "Configuration error: API key missing.";

/// Stands in for the real provider when no credentials are configured.
pub struct PlaceholderGenerator;

#[async_trait]
impl MessageGenerator for PlaceholderGenerator {
    async fn generate(&self, _theme: MessageTheme, _count: usize) -> anyhow::Result<Vec<String>> {
        Ok(vec![PLACEHOLDER_MESSAGE.to_string()])
    }
}
