//! Bank statement operations.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::RequestArguments;
use crate::types::{Document, ExtractionOptions, ListQuery};
use serde_json::Value;

/// Client for bank statements (`/bank-statements/`).
///
/// Access via `client.bank_statements()`.
pub struct BankStatementsClient {
    resource: Resource,
}

impl BankStatementsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/bank-statements/"),
        }
    }

    /// Process a bank statement.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials, ExtractionOptions, Source};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let statement = client.bank_statements().process(
    ///         Source::path("statement.pdf"),
    ///         ExtractionOptions { bounding_boxes: true, ..Default::default() },
    ///     ).await?;
    ///     println!("{:?}", statement.get("account_number"));
    ///     Ok(())
    /// }
    /// ```
    pub async fn process(&self, source: Source, options: ExtractionOptions) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        options.apply(&mut args);
        self.resource.create(args).await
    }

    /// Get a processed bank statement.
    ///
    /// `options.extra` is sent as query-string parameters.
    pub async fn get(&self, document_id: u64, options: &ExtractionOptions) -> Result<Document> {
        let args = RequestArguments::new()
            .with("bounding_boxes", options.bounding_boxes)
            .with("confidence_details", options.confidence_details);
        self.resource
            .get(document_id, args, Some(&options.extra))
            .await
    }

    /// List processed bank statements.
    pub async fn list(&self, query: ListQuery) -> Result<Value> {
        self.resource
            .list(query.arguments(), Some(&query.extra))
            .await
    }

    /// Delete a bank statement.
    pub async fn delete(&self, document_id: u64) -> Result<Value> {
        self.resource.delete(document_id).await
    }
}
