//! Business card operations.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::{AdditionalFields, RequestArguments};
use crate::types::{Document, ListQuery};
use serde_json::Value;

/// Client for business cards (`/business-cards/`).
///
/// Access via `client.business_cards()`.
pub struct BusinessCardsClient {
    resource: Resource,
}

impl BusinessCardsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/business-cards/"),
        }
    }

    /// Process a business card.
    pub async fn process(&self, source: Source, extra: &AdditionalFields) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        args.extend_fields(extra);
        self.resource.create(args).await
    }

    /// Get a processed business card.
    pub async fn get(&self, document_id: u64) -> Result<Document> {
        let args = RequestArguments::new().with("id", document_id);
        self.resource.get(document_id, args, None).await
    }

    /// List processed business cards.
    pub async fn list(&self, query: ListQuery) -> Result<Value> {
        self.resource
            .list(query.arguments(), Some(&query.extra))
            .await
    }

    /// Delete a business card.
    pub async fn delete(&self, document_id: u64) -> Result<Value> {
        self.resource.delete(document_id).await
    }
}
