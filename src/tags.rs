//! Document tag operations.

use crate::client::Client;
use crate::error::Result;
use crate::request::RequestArguments;
use crate::types::Document;
use reqwest::Method;
use serde_json::Value;

/// Client for tags on receipts and invoices.
///
/// Access via `client.tags()`.
pub struct TagsClient {
    client: Client,
}

impl TagsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn tags_path(document_id: u64) -> String {
        format!("/documents/{}/tags/", document_id)
    }

    /// Add one tag to a document.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let tag = client.tags().add_tag(4662609, "travel").await?;
    ///     println!("Tag id: {:?}", tag.id());
    ///     Ok(())
    /// }
    /// ```
    pub async fn add_tag(&self, document_id: u64, tag: &str) -> Result<Document> {
        let args = RequestArguments::new().with("name", tag);
        let response = self
            .client
            .dispatch(Method::PUT, &Self::tags_path(document_id), args, None)
            .await?;
        Ok(Document::from_response(response))
    }

    /// Add several tags to a document, keeping existing ones.
    pub async fn add_tags<I, S>(&self, document_id: u64, tags: I) -> Result<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let args = RequestArguments::new().with("tags", tags);
        let response = self
            .client
            .dispatch(Method::POST, &Self::tags_path(document_id), args, None)
            .await?;
        Ok(Document::from_response(response))
    }

    /// Replace every tag of a document.
    pub async fn replace_tags<I, S>(&self, document_id: u64, tags: I) -> Result<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let args = RequestArguments::new().with("tags", tags);
        let response = self
            .client
            .dispatch(
                Method::PUT,
                &format!("/documents/{}/", document_id),
                args,
                None,
            )
            .await?;
        Ok(Document::from_response(response))
    }

    /// Remove every tag from a document. The raw response is returned.
    pub async fn delete_tags(&self, document_id: u64) -> Result<Value> {
        self.client
            .dispatch(
                Method::DELETE,
                &Self::tags_path(document_id),
                RequestArguments::new(),
                None,
            )
            .await
    }
}
