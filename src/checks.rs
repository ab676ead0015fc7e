//! Check operations.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::RequestArguments;
use crate::types::{Document, ExtractionOptions, ListQuery};
use serde_json::Value;

/// Client for checks (`/checks/`).
///
/// Access via `client.checks()`.
pub struct ChecksClient {
    resource: Resource,
}

impl ChecksClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/checks/"),
        }
    }

    /// Process a check.
    pub async fn process(&self, source: Source, options: ExtractionOptions) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        options.apply(&mut args);
        self.resource.create(args).await
    }

    /// Get a processed check.
    pub async fn get(&self, document_id: u64) -> Result<Document> {
        let args = RequestArguments::new().with("id", document_id);
        self.resource.get(document_id, args, None).await
    }

    /// List processed checks.
    pub async fn list(&self, query: ListQuery) -> Result<Value> {
        self.resource
            .list(query.arguments(), Some(&query.extra))
            .await
    }

    /// Delete a check.
    pub async fn delete(&self, document_id: u64) -> Result<Value> {
        self.resource.delete(document_id).await
    }
}
