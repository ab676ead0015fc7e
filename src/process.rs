//! Shared processing path for every document family.
//!
//! A [`Source`] says where the document comes from. Local files, buffers and
//! streams are uploaded as multipart; base64 strings and URLs travel in a JSON
//! body. Every family builds its arguments from a source and hands them to a
//! [`Resource`], which owns the endpoint path and the envelope handling.

use crate::client::Client;
use crate::envelope::unwrap_list;
use crate::error::Result;
use crate::mime::add_mime_type;
use crate::request::{AdditionalFields, FileUpload, RequestArguments};
use crate::types::Document;
use reqwest::Method;
use serde_json::Value;
use std::path::PathBuf;

/// Where a document comes from.
#[derive(Debug)]
pub enum Source {
    /// A file on disk, streamed as it is uploaded.
    Path(PathBuf),
    /// Bytes already in memory.
    Buffer {
        /// File name including the extension.
        file_name: String,
        /// File contents.
        bytes: Vec<u8>,
    },
    /// A caller-provided byte stream.
    Stream(FileUpload),
    /// A base64-encoded file, with or without a `data:` prefix.
    Base64 {
        /// File name including the extension.
        file_name: String,
        /// Encoded contents.
        data: String,
    },
    /// A publicly reachable URL.
    Url(String),
    /// Several URLs processed as one document.
    Urls(Vec<String>),
}

impl Source {
    /// A file on disk.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    /// Bytes in memory.
    pub fn buffer(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Source::Buffer {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// A byte stream, e.g. an open `tokio::fs::File`.
    pub fn stream(
        file_name: impl Into<String>,
        body: impl Into<reqwest::Body>,
        length: Option<u64>,
    ) -> Self {
        Source::Stream(FileUpload::from_body(file_name, body, length))
    }

    /// A base64 string.
    pub fn base64(file_name: impl Into<String>, data: impl Into<String>) -> Self {
        Source::Base64 {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// A single URL.
    pub fn url(url: impl Into<String>) -> Self {
        Source::Url(url.into())
    }

    /// Several URLs.
    pub fn urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Source::Urls(urls.into_iter().map(Into::into).collect())
    }

    /// Whether this source is sent as a multipart upload.
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            Source::Path(_) | Source::Buffer { .. } | Source::Stream(_)
        )
    }

    /// Turn the source into the leading request arguments.
    pub(crate) async fn into_arguments(self) -> Result<RequestArguments> {
        let mut args = RequestArguments::new();
        match self {
            Source::Path(path) => {
                let upload = FileUpload::from_path(&path).await?;
                args.insert("file_name", upload.file_name());
                args.insert_file("file", upload);
            }
            Source::Buffer { file_name, bytes } => {
                args.insert("file_name", file_name.as_str());
                args.insert_file("file", FileUpload::from_bytes(file_name, bytes));
            }
            Source::Stream(upload) => {
                args.insert("file_name", upload.file_name());
                args.insert_file("file", upload);
            }
            Source::Base64 { file_name, data } => {
                let file_data = add_mime_type(&data, &file_name);
                args.insert("file_name", file_name);
                args.insert("file_data", file_data);
            }
            Source::Url(url) => args.insert("file_url", url),
            Source::Urls(urls) => args.insert("file_urls", urls),
        }
        Ok(args)
    }
}

/// One REST collection such as `/documents/`.
#[derive(Debug, Clone)]
pub(crate) struct Resource {
    client: Client,
    path: &'static str,
}

impl Resource {
    pub(crate) fn new(client: Client, path: &'static str) -> Self {
        Self { client, path }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    fn item(&self, id: u64) -> String {
        format!("{}{}/", self.path, id)
    }

    /// POST a new document to the collection.
    pub(crate) async fn create(&self, args: RequestArguments) -> Result<Document> {
        let response = self
            .client
            .dispatch(Method::POST, self.path, args, None)
            .await?;
        Ok(Document::from_response(response))
    }

    /// GET one document.
    pub(crate) async fn get(
        &self,
        id: u64,
        args: RequestArguments,
        query: Option<&AdditionalFields>,
    ) -> Result<Document> {
        let response = self
            .client
            .dispatch(Method::GET, &self.item(id), args, query)
            .await?;
        Ok(Document::from_response(response))
    }

    /// GET the collection, unwrapping `data`/`results`.
    pub(crate) async fn list(
        &self,
        args: RequestArguments,
        query: Option<&AdditionalFields>,
    ) -> Result<Value> {
        let response = self
            .client
            .dispatch(Method::GET, self.path, args, query)
            .await?;
        Ok(unwrap_list(response))
    }

    /// PUT fields onto one document.
    pub(crate) async fn update(&self, id: u64, args: RequestArguments) -> Result<Document> {
        let response = self
            .client
            .dispatch(Method::PUT, &self.item(id), args, None)
            .await?;
        Ok(Document::from_response(response))
    }

    /// DELETE one document; the raw response is returned.
    pub(crate) async fn delete(&self, id: u64) -> Result<Value> {
        let args = RequestArguments::new().with("id", id);
        self.client
            .dispatch(Method::DELETE, &self.item(id), args, None)
            .await
    }
}
