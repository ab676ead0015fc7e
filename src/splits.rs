//! Document splitting.
//!
//! A multi-document file (for example a PDF holding several receipts) is
//! split into a document set whose members are processed separately.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::{AdditionalFields, RequestArguments};
use crate::types::{Document, ListQuery};
use serde_json::Value;

/// Client for document sets (`/documents-set/`).
///
/// Access via `client.splits()`.
pub struct SplitsClient {
    resource: Resource,
}

impl SplitsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/documents-set/"),
        }
    }

    /// Split a file into separate documents.
    pub async fn split(&self, source: Source, extra: &AdditionalFields) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        args.extend_fields(extra);
        self.resource.create(args).await
    }

    /// Get a document set.
    pub async fn get(&self, document_id: u64, query: &AdditionalFields) -> Result<Document> {
        let args = RequestArguments::new().with("id", document_id);
        self.resource.get(document_id, args, Some(query)).await
    }

    /// List document sets.
    pub async fn list(&self, query: ListQuery) -> Result<Value> {
        self.resource
            .list(query.arguments(), Some(&query.extra))
            .await
    }
}
