//! Receipt and invoice operations.
//!
//! This module provides the DocumentsClient for processing, retrieving,
//! listing, updating and deleting receipts and invoices.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::{AdditionalFields, RequestArguments};
use crate::types::{Document, DocumentOptions, ListQuery};
use serde_json::Value;

/// Client for receipts and invoices (`/documents/`).
///
/// Access via `client.documents()`.
pub struct DocumentsClient {
    resource: Resource,
}

impl DocumentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/documents/"),
        }
    }

    /// Process a receipt or invoice and extract all of its fields.
    ///
    /// When `options.categories` is `None` the
    /// [`DEFAULT_CATEGORIES`](crate::types::DEFAULT_CATEGORIES) are sent.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials, DocumentOptions, Source};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///
    ///     let receipt = client.documents().process(
    ///         Source::path("receipts/coffee.jpg"),
    ///         DocumentOptions {
    ///             categories: Some(vec!["Meals & Entertainment".to_string()]),
    ///             auto_delete: Some(true),
    ///             ..Default::default()
    ///         },
    ///     ).await?;
    ///
    ///     println!("Vendor: {:?}", receipt.pointer("/vendor/name"));
    ///     Ok(())
    /// }
    /// ```
    pub async fn process(&self, source: Source, options: DocumentOptions) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        options.apply(&mut args);
        self.resource.create(args).await
    }

    /// Get a previously processed document.
    ///
    /// `query` is sent as query-string parameters.
    pub async fn get(&self, document_id: u64, query: &AdditionalFields) -> Result<Document> {
        let args = RequestArguments::new().with("id", document_id);
        self.resource.get(document_id, args, Some(query)).await
    }

    /// List previously processed documents.
    ///
    /// `bounding_boxes` and `confidence_details` are always sent, false
    /// unless set on the query.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials, ListQuery};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let page = client.documents().list(ListQuery::page(2, 10)).await?;
    ///     println!("{}", page);
    ///     Ok(())
    /// }
    /// ```
    pub async fn list(&self, query: ListQuery) -> Result<Value> {
        let mut args = query.arguments();
        args.insert("bounding_boxes", query.bounding_boxes.unwrap_or(false));
        args.insert("confidence_details", query.confidence_details.unwrap_or(false));
        self.resource.list(args, Some(&query.extra)).await
    }

    /// Update writable fields of a document, such as `date` or `notes`.
    pub async fn update(&self, document_id: u64, fields: &AdditionalFields) -> Result<Document> {
        let mut args = RequestArguments::new();
        args.extend_fields(fields);
        self.resource.update(document_id, args).await
    }

    /// Delete a document.
    pub async fn delete(&self, document_id: u64) -> Result<Value> {
        self.resource.delete(document_id).await
    }
}
