//! Tax form operations: W-2, W-9 and W-8BEN-E.
//!
//! Listing these collections pages with a `page` query parameter and returns
//! the `results` array.

use crate::client::Client;
use crate::error::Result;
use crate::process::{Resource, Source};
use crate::request::{AdditionalFields, RequestArguments};
use crate::types::{Document, ExtractionOptions, W2Options};
use serde_json::Value;

fn page_query(page: Option<u32>) -> AdditionalFields {
    let mut query = AdditionalFields::new();
    if let Some(page) = page {
        query.insert("page", page);
    }
    query
}

/// Client for W-2 forms (`/w2s/`).
///
/// Access via `client.w2s()`. Every call fails with
/// [`VeryfiError::Config`](crate::VeryfiError::Config) unless the client uses
/// API v8.
pub struct W2sClient {
    resource: Resource,
}

impl W2sClient {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            resource: Resource::new(client, "/w2s/"),
        }
    }

    /// Process a W-2.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials, Source, W2Options};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let w2 = client.w2s().process(
    ///         Source::url("https://cdn.example.com/w2.png"),
    ///         W2Options { max_pages_to_process: Some(1), ..Default::default() },
    ///     ).await?;
    ///     println!("{:?}", w2.get("employee_name"));
    ///     Ok(())
    /// }
    /// ```
    pub async fn process(&self, source: Source, options: W2Options) -> Result<Document> {
        self.resource.client().ensure_w2_supported()?;
        let mut args = source.into_arguments().await?;
        options.apply(&mut args);
        self.resource.create(args).await
    }

    /// Get a processed W-2.
    pub async fn get(&self, document_id: u64) -> Result<Document> {
        self.resource.client().ensure_w2_supported()?;
        let args = RequestArguments::new().with("id", document_id);
        self.resource.get(document_id, args, None).await
    }

    /// List processed W-2s, optionally one page at a time.
    pub async fn list(&self, page: Option<u32>) -> Result<Value> {
        self.resource.client().ensure_w2_supported()?;
        self.resource
            .list(RequestArguments::new(), Some(&page_query(page)))
            .await
    }

    /// Delete a W-2.
    pub async fn delete(&self, document_id: u64) -> Result<Value> {
        self.resource.client().ensure_w2_supported()?;
        self.resource.delete(document_id).await
    }
}

macro_rules! extraction_form_client {
    ($(#[$doc:meta])* $name:ident, $path:literal) => {
        $(#[$doc])*
        pub struct $name {
            resource: Resource,
        }

        impl $name {
            pub(crate) fn new(client: Client) -> Self {
                Self {
                    resource: Resource::new(client, $path),
                }
            }

            /// Process a form.
            pub async fn process(
                &self,
                source: Source,
                options: ExtractionOptions,
            ) -> Result<Document> {
                let mut args = source.into_arguments().await?;
                options.apply(&mut args);
                self.resource.create(args).await
            }

            /// Get a processed form.
            pub async fn get(&self, document_id: u64) -> Result<Document> {
                let args = RequestArguments::new().with("id", document_id);
                self.resource.get(document_id, args, None).await
            }

            /// List processed forms, optionally one page at a time.
            pub async fn list(&self, page: Option<u32>) -> Result<Value> {
                self.resource
                    .list(RequestArguments::new(), Some(&page_query(page)))
                    .await
            }

            /// Delete a form.
            pub async fn delete(&self, document_id: u64) -> Result<Value> {
                self.resource.delete(document_id).await
            }
        }
    };
}

extraction_form_client!(
    /// Client for W-9 forms (`/w9s/`).
    ///
    /// Access via `client.w9s()`.
    W9sClient,
    "/w9s/"
);

extraction_form_client!(
    /// Client for W-8BEN-E forms (`/w-8ben-e/`).
    ///
    /// Access via `client.w8ben_e()`.
    W8BenEClient,
    "/w-8ben-e/"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FieldValue;

    #[test]
    fn test_page_query() {
        assert!(page_query(None).is_empty());
        assert_eq!(page_query(Some(3)).get("page"), Some(&FieldValue::Integer(3)));
    }
}
