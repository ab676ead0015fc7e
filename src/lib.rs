//! # Veryfi Rust SDK
//!
//! Rust client for the Veryfi OCR API.
//!
//! Veryfi extracts structured data from receipts, invoices, bank statements,
//! checks, tax forms and arbitrary documents described by a blueprint. This
//! crate signs and sends the requests and hands back the extracted JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veryfi::{Client, Credentials, DocumentOptions, Source};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("client_id", "username", "api_key")
//!         .with_client_secret("client_secret");
//!     let client = Client::new(credentials)?;
//!
//!     // Upload a local receipt
//!     let receipt = client
//!         .documents()
//!         .process(Source::path("receipt.jpg"), DocumentOptions::default())
//!         .await?;
//!     println!("Total: {:?}", receipt.get("total"));
//!
//!     // Or let Veryfi fetch it
//!     let invoice = client
//!         .documents()
//!         .process(
//!             Source::url("https://cdn.example.com/invoice.pdf"),
//!             DocumentOptions { boost_mode: Some(true), ..Default::default() },
//!         )
//!         .await?;
//!     println!("Vendor: {:?}", invoice.pointer("/vendor/name"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Documents**: Process, get, list, update and delete receipts and invoices
//! - **Tags**: Attach, replace and remove document tags
//! - **Any documents**: Extract any document type through a named blueprint
//! - **Bank statements, checks, business cards**: Family-specific extraction
//! - **Tax forms**: W-2, W-9 and W-8BEN-E
//! - **Splitting and classification**: Split multi-document files, detect document types
//! - **Request signing**: HMAC-SHA256 signatures when a client secret is configured
//!
//! ## Error Handling
//!
//! All operations return `Result<T, VeryfiError>`:
//!
//! ```rust,no_run
//! use veryfi::{ApiErrorKind, Client, Credentials, VeryfiError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(Credentials::new("client_id", "username", "api_key")).unwrap();
//!
//!     match client.documents().get(42, &Default::default()).await {
//!         Ok(doc) => println!("Found document {:?}", doc.id()),
//!         Err(e) if e.is_auth_error() => println!("Check your credentials"),
//!         Err(e) if e.kind() == Some(ApiErrorKind::NotFound) => println!("No such document"),
//!         Err(VeryfiError::Api { status_code, message, .. }) => {
//!             println!("API error {}: {}", status_code, message)
//!         }
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

pub mod any_documents;
pub mod bank_statements;
pub mod business_cards;
pub mod checks;
pub mod classify;
pub mod client;
pub mod documents;
pub mod envelope;
pub mod error;
pub mod mime;
pub mod process;
pub mod request;
pub mod signature;
pub mod splits;
pub mod tags;
pub mod tax_forms;
pub mod types;

// Re-export main types at the crate root
pub use client::{Client, ClientConfig, Credentials, DEFAULT_API_VERSION};
pub use error::{ApiErrorKind, Result, VeryfiError};
pub use process::Source;
pub use request::{AdditionalFields, Argument, FieldValue, FileUpload, RequestArguments};

pub use types::{
    AnyDocumentOptions, Document, DocumentOptions, ExtractionOptions, ListQuery, VeryfiDocument,
    W2Options, DEFAULT_CATEGORIES,
};
