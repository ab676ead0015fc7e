//! Basic usage example for the Veryfi SDK.
//!
//! This example demonstrates:
//! - Creating a signed client from the environment
//! - Processing a receipt by URL
//! - Tagging and fetching it back
//! - Deleting it
//!
//! Run with:
//! ```bash
//! VERYFI_CLIENT_ID=... VERYFI_CLIENT_SECRET=... VERYFI_USERNAME=... VERYFI_API_KEY=... \
//!     cargo run --example basic
//! ```

use veryfi::{AdditionalFields, Client, ClientConfig, Credentials, DocumentOptions, Source};

fn env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{name} environment variable required").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut credentials = Credentials::new(
        env("VERYFI_CLIENT_ID")?,
        env("VERYFI_USERNAME")?,
        env("VERYFI_API_KEY")?,
    );
    if let Ok(secret) = std::env::var("VERYFI_CLIENT_SECRET") {
        credentials = credentials.with_client_secret(secret);
    }

    let client = Client::with_config(
        credentials,
        ClientConfig {
            base_url: std::env::var("VERYFI_URL").ok(),
            ..Default::default()
        },
    )?;

    // Process a receipt
    println!("Processing receipt...");
    let receipt = client
        .documents()
        .process(
            Source::url("https://cdn.veryfi.com/receipts/92233902-c94a-491d-a4f9-0d61f9407cd2.png"),
            DocumentOptions {
                categories: Some(vec!["Meals & Entertainment".to_string()]),
                ..Default::default()
            },
        )
        .await?;

    let id = receipt.id().ok_or("response has no document id")?;
    println!("Processed document:");
    println!("  ID:     {}", id);
    println!("  Vendor: {}", receipt.pointer("/vendor/name").unwrap_or(&serde_json::Value::Null));
    println!("  Total:  {}", receipt.get("total").unwrap_or(&serde_json::Value::Null));

    // Tag and update
    println!("\nTagging document...");
    client.tags().add_tag(id, "demo").await?;
    client
        .documents()
        .update(id, &AdditionalFields::new().with("notes", "processed by example"))
        .await?;

    let fetched = client.documents().get(id, &AdditionalFields::new()).await?;
    println!("Tags: {}", fetched.get("tags").unwrap_or(&serde_json::Value::Null));

    // Clean up
    println!("\nDeleting document...");
    client.documents().delete(id).await?;

    println!("\nDone!");
    Ok(())
}
