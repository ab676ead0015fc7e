//! Concurrent upload example for the Veryfi SDK.
//!
//! Uploads every PNG, JPEG and PDF file in a directory, several at a time,
//! and prints the vendor and total of each.
//!
//! Run with:
//! ```bash
//! VERYFI_CLIENT_ID=... VERYFI_USERNAME=... VERYFI_API_KEY=... \
//!     cargo run --example process_receipts -- ./receipts
//! ```

use std::path::PathBuf;
use std::time::Instant;
use tokio::task::JoinSet;
use veryfi::{Client, Credentials, DocumentOptions, Source};

const MAX_IN_FLIGHT: usize = 4;

fn env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{name} environment variable required").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let dir: PathBuf = std::env::args()
        .nth(1)
        .ok_or("usage: process_receipts <directory>")?
        .into();

    let mut credentials = Credentials::new(
        env("VERYFI_CLIENT_ID")?,
        env("VERYFI_USERNAME")?,
        env("VERYFI_API_KEY")?,
    );
    if let Ok(secret) = std::env::var("VERYFI_CLIENT_SECRET") {
        credentials = credentials.with_client_secret(secret);
    }
    let client = Client::new(credentials)?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        let supported = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("png" | "jpg" | "jpeg" | "pdf")
        );
        if supported {
            files.push(path);
        }
    }
    println!("Uploading {} files from {}...", files.len(), dir.display());

    let start = Instant::now();
    let mut tasks = JoinSet::new();
    let mut files = files.into_iter();
    let mut done = 0usize;

    loop {
        while tasks.len() < MAX_IN_FLIGHT {
            let Some(path) = files.next() else { break };
            let client = client.clone();
            tasks.spawn(async move {
                let result = client
                    .documents()
                    .process(Source::path(&path), DocumentOptions::default())
                    .await;
                (path, result)
            });
        }

        let Some(joined) = tasks.join_next().await else { break };
        let (path, result) = joined?;
        done += 1;
        match result {
            Ok(doc) => println!(
                "  - {}: vendor={} total={}",
                path.display(),
                doc.pointer("/vendor/name").unwrap_or(&serde_json::Value::Null),
                doc.get("total").unwrap_or(&serde_json::Value::Null),
            ),
            Err(e) => println!("  - {}: failed: {}", path.display(), e),
        }
    }

    println!("\nProcessed {} files in {:?}", done, start.elapsed());
    Ok(())
}
