//! JSON bodies exchanged between the service and its clients.

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// Body of `POST /score_headlines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub headlines: Vec<String>,
}

/// Successful response of `POST /score_headlines`.
///
/// `labels[i]` is the sentiment of `headlines[i]` from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub labels: Vec<Label>,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub const OK: &'static str = "OK";

    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: Self::OK.to_string(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ok_serializes_exactly() {
        let json = serde_json::to_value(StatusResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "OK" }));
    }

    #[test]
    fn score_request_parses_headline_list() {
        let req: ScoreRequest =
            serde_json::from_str(r#"{"headlines": ["Stocks rally", "Oil slips"]}"#).unwrap();
        assert_eq!(req.headlines, vec!["Stocks rally", "Oil slips"]);
    }

    #[test]
    fn score_request_requires_headlines_field() {
        let result = serde_json::from_str::<ScoreRequest>(r#"{"titles": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn score_response_tolerates_unmapped_label_strings() {
        let resp: ScoreResponse =
            serde_json::from_str(r#"{"labels": ["Neutral", "Sideways"]}"#).unwrap();
        assert_eq!(resp.labels, vec![Label::Neutral, Label::Unknown]);
    }
}
