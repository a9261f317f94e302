//! Mock TEI endpoint shared by the unit tests.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Responds to `/embed` with one 2-dim vector per input, chosen by keyword:
/// upbeat words point along +x, downbeat words along -x, anything else along +y.
pub(crate) struct KeywordEmbeddings;

pub(crate) fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    if ["rally", "beat", "surge"].iter().any(|w| lower.contains(w)) {
        vec![1.0, 0.0]
    } else if ["sink", "fall", "rattle"].iter().any(|w| lower.contains(w)) {
        vec![-1.0, 0.0]
    } else {
        vec![0.0, 1.0]
    }
}

impl Respond for KeywordEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let vectors: Vec<Vec<f32>> = body["inputs"]
            .as_array()
            .map(|inputs| {
                inputs
                    .iter()
                    .map(|v| keyword_vector(v.as_str().unwrap_or_default()))
                    .collect()
            })
            .unwrap_or_default();
        ResponseTemplate::new(200).set_body_json(vectors)
    }
}

pub(crate) async fn mount_info(server: &MockServer, model_id: &str) {
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model_id": model_id,
                "max_input_length": 256,
            })),
        )
        .mount(server)
        .await;
}

/// Start a mock TEI server serving `sentence-transformers/all-MiniLM-L6-v2`.
pub(crate) async fn start_tei() -> MockServer {
    let server = MockServer::start().await;
    mount_info(&server, "sentence-transformers/all-MiniLM-L6-v2").await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(KeywordEmbeddings)
        .mount(&server)
        .await;
    server
}

/// A three-class one-vs-rest linear model over the keyword vectors above.
pub(crate) const LINEAR_ARTIFACT: &str = r#"{
    "model": "linear",
    "classes": [0, 1, 2],
    "coef": [[-1.0, 0.0], [0.0, 1.0], [1.0, 0.0]],
    "intercept": [0.0, 0.0, 0.0]
}"#;
