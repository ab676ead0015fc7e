//! Document classification.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::AdditionalFields;
use crate::types::Document;

/// Client for classification (`/classify/`).
///
/// Access via `client.classify()`.
pub struct ClassifyClient {
    resource: Resource,
}

impl ClassifyClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/classify/"),
        }
    }

    /// Classify a document, returning its detected type.
    ///
    /// Extra fields such as `document_types` narrow the candidates.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{AdditionalFields, Client, Credentials, Source};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let result = client
    ///         .classify()
    ///         .classify(Source::url("https://cdn.example.com/doc.pdf"), &AdditionalFields::new())
    ///         .await?;
    ///     println!("{:?}", result.get("document_type"));
    ///     Ok(())
    /// }
    /// ```
    pub async fn classify(&self, source: Source, extra: &AdditionalFields) -> Result<Document> {
        let mut args = source.into_arguments().await?;
        args.extend_fields(extra);
        self.resource.create(args).await
    }
}
