//! Integration tests for the specialised document families.

use serde_json::json;
use veryfi::{
    AdditionalFields, AnyDocumentOptions, Client, ClientConfig, Credentials, ExtractionOptions,
    ListQuery, Source, VeryfiError, W2Options,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_client(server: &MockServer, api_version: Option<&str>) -> Client {
    Client::with_config(
        Credentials::new("test_client_id", "test_user", "test_api_key"),
        ClientConfig {
            base_url: Some(server.uri()),
            api_version: api_version.map(String::from),
            ..Default::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_any_document_with_blueprint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/any-documents/"))
        .and(body_json(json!({
            "file_url": "https://cdn.example.com/passport.jpg",
            "blueprint_name": "us_passport",
            "max_pages_to_process": 20
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5, "first_name": "Jane"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let doc = client
        .any_documents()
        .process(
            Source::url("https://cdn.example.com/passport.jpg"),
            "us_passport",
            AnyDocumentOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(doc.get("first_name"), Some(&json!("Jane")));
}

#[tokio::test]
async fn test_bank_statement_process_and_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/bank-statements/"))
        .and(body_json(json!({
            "file_url": "https://cdn.example.com/statement.pdf",
            "bounding_boxes": true,
            "confidence_details": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v8/partner/bank-statements/11/"))
        .and(body_json(json!({
            "bounding_boxes": false,
            "confidence_details": true
        })))
        .and(query_param("fields", "summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "account_number": "1234"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let statements = client.bank_statements();
    let created = statements
        .process(
            Source::url("https://cdn.example.com/statement.pdf"),
            ExtractionOptions {
                bounding_boxes: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id(), Some(11));

    let fetched = statements
        .get(
            11,
            &ExtractionOptions {
                confidence_details: true,
                extra: AdditionalFields::new().with("fields", "summary"),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(fetched.get("account_number"), Some(&json!("1234")));
}

#[tokio::test]
async fn test_business_card_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v8/partner/business-cards/"))
        .and(body_json(json!({"page": 1, "page_size": 50})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "name": "Jane Doe"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let cards = client
        .business_cards()
        .list(ListQuery::default())
        .await
        .unwrap();
    assert_eq!(cards[0]["name"], "Jane Doe");
}

#[tokio::test]
async fn test_check_process_from_buffer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/checks/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 21, "amount": 150.0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let check = client
        .checks()
        .process(
            Source::buffer("check.jpg", b"jpeg".to_vec()),
            ExtractionOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(check.get("amount"), Some(&json!(150.0)));

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("filename=\"check.jpg\""));
    assert!(body.contains("name=\"bounding_boxes\"\r\n\r\nfalse"));
}

#[tokio::test]
async fn test_w2_requires_v8() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, Some("v7"));
    let err = client
        .w2s()
        .process(
            Source::url("https://cdn.example.com/w2.png"),
            W2Options::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VeryfiError::Config(_)));

    let err = client.w2s().list(None).await.unwrap_err();
    assert!(matches!(err, VeryfiError::Config(_)));
}

#[tokio::test]
async fn test_w2_process_and_list_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/w2s/"))
        .and(body_json(json!({
            "file_url": "https://cdn.example.com/w2.png",
            "auto_delete": true,
            "max_pages_to_process": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 8, "employee_name": "John"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v8/partner/w2s/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 8}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let w2 = client
        .w2s()
        .process(
            Source::url("https://cdn.example.com/w2.png"),
            W2Options {
                auto_delete: Some(true),
                max_pages_to_process: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(w2.get("employee_name"), Some(&json!("John")));

    let page = client.w2s().list(Some(2)).await.unwrap();
    assert_eq!(page, json!([{"id": 8}]));
}

#[tokio::test]
async fn test_w9_and_w8ben_e_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v7/partner/w9s/3/"))
        .and(body_json(json!({"id": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v7/partner/w-8ben-e/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, Some("v7"));
    let w9 = client.w9s().get(3).await.unwrap();
    assert_eq!(w9.id(), Some(3));

    let response = client.w8ben_e().delete(4).await.unwrap();
    assert_eq!(response["status"], "ok");
}

#[tokio::test]
async fn test_w2_default_page_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/w2s/"))
        .and(body_json(json!({
            "file_url": "https://cdn.example.com/w2.png",
            "auto_delete": false,
            "max_pages_to_process": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let w2 = client
        .w2s()
        .process(
            Source::url("https://cdn.example.com/w2.png"),
            W2Options::default(),
        )
        .await
        .unwrap();
    assert_eq!(w2.id(), Some(9));
}

#[tokio::test]
async fn test_split_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/documents-set/"))
        .and(body_json(json!({
            "file_url": "https://cdn.example.com/stack.pdf",
            "max_pages_to_process": 10
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 70, "status": "in_progress", "documents": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let set = client
        .splits()
        .split(
            Source::url("https://cdn.example.com/stack.pdf"),
            &AdditionalFields::new().with("max_pages_to_process", 10),
        )
        .await
        .unwrap();
    assert_eq!(set.get("status"), Some(&json!("in_progress")));
}

#[tokio::test]
async fn test_classify_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v8/partner/classify/"))
        .and(body_json(json!({
            "file_name": "doc.pdf",
            "file_data": "data:application/pdf;base64,JVBERi0=",
            "document_types": "receipt"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"document_type": {"value": "receipt", "score": 0.98}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_client(&mock_server, None);
    let result = client
        .classify()
        .classify(
            Source::base64("doc.pdf", "JVBERi0="),
            &AdditionalFields::new().with("document_types", "receipt"),
        )
        .await
        .unwrap();
    assert_eq!(
        result.pointer("/document_type/value"),
        Some(&json!("receipt"))
    );
}
