//! Veryfi API client.
//!
//! The main entry point for interacting with the Veryfi API. Every endpoint
//! client funnels into [`Client::dispatch`], which builds the URL, the
//! (optionally signed) headers and the JSON or multipart body.

use crate::any_documents::AnyDocumentsClient;
use crate::bank_statements::BankStatementsClient;
use crate::business_cards::BusinessCardsClient;
use crate::checks::ChecksClient;
use crate::classify::ClassifyClient;
use crate::documents::DocumentsClient;
use crate::error::{Result, VeryfiError};
use crate::request::{AdditionalFields, RequestArguments};
use crate::signature::generate_signature;
use crate::splits::SplitsClient;
use crate::tags::TagsClient;
use crate::tax_forms::{W2sClient, W8BenEClient, W9sClient};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.veryfi.com/";
/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v8";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const CLIENT_ID: HeaderName = HeaderName::from_static("client-id");
const REQUEST_TIMESTAMP: HeaderName = HeaderName::from_static("x-veryfi-request-timestamp");
const REQUEST_SIGNATURE: HeaderName = HeaderName::from_static("x-veryfi-request-signature");

/// Credentials issued by Veryfi.
///
/// `client_secret` is optional: without it requests are sent unsigned and
/// authenticate with the username and API key alone.
#[derive(Clone)]
pub struct Credentials {
    /// Client ID.
    pub client_id: String,
    /// Client secret used to sign requests.
    pub client_secret: Option<String>,
    /// Account username.
    pub username: String,
    /// API key.
    pub api_key: String,
}

impl Credentials {
    /// Credentials without a signing secret.
    pub fn new(
        client_id: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Attach a client secret so requests are signed.
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Configuration options for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL for the API (default: https://api.veryfi.com/).
    pub base_url: Option<String>,
    /// API version (default: v8).
    pub api_version: Option<String>,
    /// Request timeout (default: 120 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

/// Veryfi API client.
///
/// Cheap to clone; clones share the underlying connection pool. Calls from
/// one client may run concurrently since no state is mutated per request.
///
/// # Example
///
/// ```rust,no_run
/// use veryfi::{Client, Credentials, Source};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new(
///         Credentials::new("client_id", "username", "api_key")
///             .with_client_secret("client_secret"),
///     )?;
///
///     let receipt = client
///         .documents()
///         .process(Source::path("receipt.jpg"), Default::default())
///         .await?;
///     println!("Total: {:?}", receipt.get("total"));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    base_url: String,
    api_version: String,
    timeout: Duration,
    user_agent: String,
    credentials: Credentials,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl Client {
    /// Create a new Veryfi client with default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new Veryfi client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, ClientConfig, Credentials};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(
    ///     Credentials::new("client_id", "username", "api_key"),
    ///     ClientConfig {
    ///         base_url: Some("https://api.sandbox.veryfi.com/".to_string()),
    ///         timeout: Some(Duration::from_secs(60)),
    ///         ..Default::default()
    ///     },
    /// )?;
    /// # Ok::<(), veryfi::VeryfiError>(())
    /// ```
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("Rust Veryfi-Rust/{}", env!("CARGO_PKG_VERSION")));

        let mut base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let http = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_version: config
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout,
            user_agent,
            credentials,
        })
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL of a partner endpoint such as `/documents/`.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}api/{}/partner{}",
            self.base_url, self.api_version, endpoint
        )
    }

    /// Receipts and invoices.
    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.clone())
    }

    /// Tags on receipts and invoices.
    pub fn tags(&self) -> TagsClient {
        TagsClient::new(self.clone())
    }

    /// Blueprinted documents.
    pub fn any_documents(&self) -> AnyDocumentsClient {
        AnyDocumentsClient::new(self.clone())
    }

    /// Bank statements.
    pub fn bank_statements(&self) -> BankStatementsClient {
        BankStatementsClient::new(self.clone())
    }

    /// Business cards.
    pub fn business_cards(&self) -> BusinessCardsClient {
        BusinessCardsClient::new(self.clone())
    }

    /// Checks.
    pub fn checks(&self) -> ChecksClient {
        ChecksClient::new(self.clone())
    }

    /// W-2 forms.
    pub fn w2s(&self) -> W2sClient {
        W2sClient::new(self.clone())
    }

    /// W-9 forms.
    pub fn w9s(&self) -> W9sClient {
        W9sClient::new(self.clone())
    }

    /// W-8BEN-E forms.
    pub fn w8ben_e(&self) -> W8BenEClient {
        W8BenEClient::new(self.clone())
    }

    /// Split document sets.
    pub fn splits(&self) -> SplitsClient {
        SplitsClient::new(self.clone())
    }

    /// Document classification.
    pub fn classify(&self) -> ClassifyClient {
        ClassifyClient::new(self.clone())
    }

    /// W-2 extraction only exists on API v8.
    pub(crate) fn ensure_w2_supported(&self) -> Result<()> {
        if self.api_version != DEFAULT_API_VERSION {
            return Err(VeryfiError::Config(format!(
                "W-2 documents are only supported on API {}, client is configured for {}",
                DEFAULT_API_VERSION, self.api_version
            )));
        }
        Ok(())
    }

    /// Headers for one request, signed with the current time.
    pub(crate) fn headers(&self, arguments: &RequestArguments) -> Result<HeaderMap> {
        self.headers_at(arguments, chrono::Utc::now().timestamp_millis())
    }

    fn headers_at(&self, arguments: &RequestArguments, timestamp: i64) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        // Multipart requests get their boundary content type from reqwest.
        if !arguments.has_files() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        headers.insert(header::USER_AGENT, header_value(&self.user_agent)?);
        headers.insert(CLIENT_ID, header_value(&self.credentials.client_id)?);
        headers.insert(
            header::AUTHORIZATION,
            header_value(&format!(
                "apikey {}:{}",
                self.credentials.username, self.credentials.api_key
            ))?,
        );

        if let Some(secret) = &self.credentials.client_secret {
            let signature = generate_signature(secret, arguments, timestamp)?;
            headers.insert(REQUEST_TIMESTAMP, HeaderValue::from(timestamp));
            headers.insert(REQUEST_SIGNATURE, header_value(&signature)?);
        }

        Ok(headers)
    }

    /// Send one request to a partner endpoint and return the parsed body.
    ///
    /// Arguments become a JSON body, or a multipart form when one of them is a
    /// file upload. `query` is appended to the URL. Envelopes are not
    /// unwrapped here.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use veryfi::{Client, Credentials, RequestArguments};
    /// use reqwest::Method;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(Credentials::new("client_id", "username", "api_key"))?;
    ///     let args = RequestArguments::new().with("id", 42);
    ///     let body = client.dispatch(Method::GET, "/documents/42/", args, None).await?;
    ///     println!("{}", body);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip_all, fields(method = %method, endpoint = %endpoint))]
    pub async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        arguments: RequestArguments,
        query: Option<&AdditionalFields>,
    ) -> Result<Value> {
        let url = self.url(endpoint);
        let headers = self.headers(&arguments)?;

        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query);
        }

        request = if arguments.has_files() {
            debug!(fields = arguments.len(), "sending multipart request");
            request.multipart(arguments.into_form()?)
        } else {
            debug!(fields = arguments.len(), "sending json request");
            request.body(serde_json::to_vec(&arguments.to_json())?)
        };

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "request to Veryfi failed");
            VeryfiError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "received response");

        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| VeryfiError::InvalidRequest(format!("invalid header value: {e}")))
}

/// Map a non-2xx response to [`VeryfiError::Api`].
fn api_error(status: StatusCode, bytes: &[u8]) -> VeryfiError {
    let body: Option<Value> = serde_json::from_slice(bytes).ok();

    let message = match &body {
        Some(Value::Object(map)) => match map.get("error") {
            Some(Value::String(error)) => error.clone(),
            _ => Value::Object(map.clone()).to_string(),
        },
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => {
            let text = String::from_utf8_lossy(bytes).trim().to_string();
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                text
            }
        }
    };

    warn!(status = status.as_u16(), error = %message, "Veryfi API returned an error");
    VeryfiError::Api {
        status_code: status.as_u16(),
        message,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FileUpload;
    use crate::signature::generate_signature;

    fn credentials() -> Credentials {
        Credentials::new("client_id", "username", "api_key")
    }

    #[test]
    fn test_client_new() {
        let client = Client::new(credentials()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.api_version(), DEFAULT_API_VERSION);
        assert_eq!(client.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_client_with_config() {
        let client = Client::with_config(
            credentials(),
            ClientConfig {
                base_url: Some("https://custom.api.com".to_string()),
                api_version: Some("v7".to_string()),
                timeout: Some(Duration::from_secs(60)),
                user_agent: None,
            },
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://custom.api.com/");
        assert_eq!(client.api_version(), "v7");
        assert_eq!(client.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.api_version.is_none());
        assert!(config.timeout.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_url() {
        let client = Client::new(credentials()).unwrap();
        assert_eq!(
            client.url("/documents/"),
            "https://api.veryfi.com/api/v8/partner/documents/"
        );
    }

    #[test]
    fn test_unsigned_headers() {
        let client = Client::new(credentials()).unwrap();
        let headers = client.headers(&RequestArguments::new()).unwrap();

        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["client-id"], "client_id");
        assert_eq!(headers["authorization"], "apikey username:api_key");
        assert!(headers["user-agent"]
            .to_str()
            .unwrap()
            .starts_with("Rust Veryfi-Rust/"));
        assert!(!headers.contains_key("x-veryfi-request-timestamp"));
        assert!(!headers.contains_key("x-veryfi-request-signature"));
    }

    #[test]
    fn test_signed_headers() {
        let client = Client::new(credentials().with_client_secret("secret")).unwrap();
        let args = RequestArguments::new().with("id", 42);
        let headers = client.headers_at(&args, 1_700_000_000_000).unwrap();

        assert_eq!(headers["x-veryfi-request-timestamp"], "1700000000000");
        let expected = generate_signature("secret", &args, 1_700_000_000_000).unwrap();
        assert_eq!(headers["x-veryfi-request-signature"], expected.as_str());
    }

    #[test]
    fn test_multipart_headers_leave_content_type_to_form() {
        let client = Client::new(credentials()).unwrap();
        let mut args = RequestArguments::new();
        args.insert_file("file", FileUpload::from_bytes("a.png", vec![1]));
        let headers = client.headers(&args).unwrap();
        assert!(!headers.contains_key("content-type"));
    }

    #[test]
    fn test_invalid_header_value() {
        let client = Client::new(Credentials::new("bad\nid", "u", "k")).unwrap();
        let err = client.headers(&RequestArguments::new()).unwrap_err();
        assert!(matches!(err, VeryfiError::InvalidRequest(_)));
    }

    #[test]
    fn test_w2_version_check() {
        let v8 = Client::new(credentials()).unwrap();
        assert!(v8.ensure_w2_supported().is_ok());

        let v7 = Client::with_config(
            credentials(),
            ClientConfig {
                api_version: Some("v7".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(matches!(
            v7.ensure_w2_supported(),
            Err(VeryfiError::Config(_))
        ));
    }

    #[test]
    fn test_api_error_with_error_field() {
        let err = api_error(
            StatusCode::UNAUTHORIZED,
            br#"{"status":"fail","error":"Unauthorized"}"#,
        );
        match err {
            VeryfiError::Api {
                status_code,
                message,
                body,
            } => {
                assert_eq!(status_code, 401);
                assert_eq!(message, "Unauthorized");
                assert!(body.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_with_raw_object() {
        let err = api_error(StatusCode::BAD_REQUEST, br#"{"file_url":["invalid"]}"#);
        assert_eq!(
            err.to_string(),
            r#"API error (400): {"file_url":["invalid"]}"#
        );
    }

    #[test]
    fn test_api_error_without_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(err.to_string(), "API error (502): Bad Gateway");

        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, b"upstream exploded");
        assert_eq!(err.to_string(), "API error (500): upstream exploded");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = credentials().with_client_secret("secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("\"api_key\""));
        assert!(!debug.contains("\"secret\""));
        assert!(debug.contains("<redacted>"));
    }
}
