use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn rows(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn non_blank_trims_and_drops_empty_rows() {
    let input = rows(&["  Stocks sink ", "", "   ", "Oil slips"]);
    assert_eq!(non_blank(&input), rows(&["Stocks sink", "Oil slips"]));
}

#[tokio::test]
async fn check_status_accepts_ok_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "OK"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    assert_eq!(client.check_status().await.unwrap(), StatusCheck::Ok);
}

#[tokio::test]
async fn check_status_flags_unexpected_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "degraded"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    assert_eq!(client.check_status().await.unwrap(), StatusCheck::BadResponse);
}

#[tokio::test]
async fn check_status_errors_when_unreachable() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        client.check_status().await,
        Err(ClientError::Http(_))
    ));
}

#[tokio::test]
async fn score_rows_posts_trimmed_payload_and_pairs_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/score_headlines"))
        .and(body_json(serde_json::json!({
            "headlines": ["Stocks sink on inflation jitters", "Company beats earnings expectations"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "labels": ["Pessimistic", "Optimistic"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&format!("{}/", server.uri())).unwrap();
    let batch = score_rows(
        &client,
        &rows(&[
            " Stocks sink on inflation jitters ",
            "",
            "Company beats earnings expectations",
        ]),
    )
    .await
    .expect("score should succeed");

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.rows()[0].headline, "Stocks sink on inflation jitters");
    assert_eq!(batch.rows()[0].label, Label::Pessimistic);
    assert_eq!(batch.rows()[1].label, Label::Optimistic);
}

#[tokio::test]
async fn score_rows_with_only_blank_rows_never_calls_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = score_rows(&client, &rows(&["", "  "])).await.unwrap_err();
    assert!(matches!(err, ClientError::NoHeadlines));
    assert_eq!(err.to_string(), "Add at least one non-empty headline.");
}

#[tokio::test]
async fn score_surfaces_api_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/score_headlines"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"error\":\"boom\"}"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.score(&rows(&["Bonds sink"])).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(err.to_string(), "API error 500: {\"error\":\"boom\"}");
}

#[tokio::test]
async fn score_rejects_label_count_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/score_headlines"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "labels": ["Neutral"] })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.score(&rows(&["a", "b"])).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Misaligned {
            expected: 2,
            got: 1
        }
    ));
}
