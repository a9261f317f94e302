use axum::{extract::State, Extension, Json};
use hsl_core::{ScoreRequest, ScoreResponse};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn score_headlines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let count = request.headlines.len();
    tracing::info!(
        request_id = %req_id.0,
        headlines = count,
        "POST /score_headlines request received"
    );

    if request.headlines.is_empty() {
        tracing::warn!(request_id = %req_id.0, "received empty headline list");
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "No headlines provided.",
        ));
    }

    let labels = state
        .classifier
        .classify(&request.headlines)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "error during prediction");
            ApiError::internal(req_id.0.clone())
        })?;

    if labels.len() != count {
        tracing::error!(
            request_id = %req_id.0,
            expected = count,
            got = labels.len(),
            "classifier returned misaligned labels"
        );
        return Err(ApiError::internal(req_id.0));
    }

    Ok(Json(ScoreResponse { labels }))
}
