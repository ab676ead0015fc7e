//! Blueprinted ("any") document operations.
//!
//! A blueprint is a named extraction schema configured in the Veryfi hub that
//! maps a custom document layout to structured fields.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::RequestArguments;
use crate::types::{AnyDocumentOptions, Document, ListQuery};
use serde_json::Value;

/// Client for blueprinted documents (`/any-documents/`).
///
/// Access via `client.any_documents()`.
pub struct AnyDocumentsClient {
    resource: Resource,
}

impl AnyDocumentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/any-documents/"),
        }
    }

    /// Process a document against a blueprint.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials, Source};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let passport = client
    ///         .any_documents()
    ///         .process(Source::path("passport.png"), "us_passport", Default::default())
    ///         .await?;
    ///     println!("{:?}", passport.get("first_name"));
    ///     Ok(())
    /// }
    /// ```
    pub async fn process(
        &self,
        source: Source,
        blueprint_name: &str,
        options: AnyDocumentOptions,
    ) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        args.insert("blueprint_name", blueprint_name);
        options.apply(&mut args);
        self.resource.create(args).await
    }

    /// Get a processed document.
    pub async fn get(&self, document_id: u64) -> Result<Document> {
        let args = RequestArguments::new().with("id", document_id);
        self.resource.get(document_id, args, None).await
    }

    /// List processed documents.
    pub async fn list(&self, query: ListQuery) -> Result<Value> {
        self.resource
            .list(query.arguments(), Some(&query.extra))
            .await
    }

    /// Delete a document.
    pub async fn delete(&self, document_id: u64) -> Result<Value> {
        self.resource.delete(document_id).await
    }
}
