//! `/predict` request handling: multipart validation, frame scoring and the
//! JSON replies the upload client understands.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    domain::verdict_for_mean_score,
    protocol::{ErrorBody, PredictResponse, FILE_FIELD},
};
use tracing::{debug, error, info, warn};

use crate::{app_state::AppState, scoring::mean_score};

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

fn client_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn predict(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return client_error(StatusCode::BAD_REQUEST, "No file uploaded"),
        Err(response) => return response,
    };
    if upload.file_name.is_empty() {
        return client_error(StatusCode::BAD_REQUEST, "No file selected");
    }
    info!(
        file = %upload.file_name,
        bytes = upload.bytes.len(),
        "predict: video received"
    );

    let scores = match state.scorer.score_frames(&upload.bytes).await {
        Ok(scores) => scores,
        Err(e) => {
            error!(file = %upload.file_name, error = %e, "predict: scoring failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PredictResponse::failure(e.to_string())),
            )
                .into_response();
        }
    };
    for (index, score) in scores.iter().enumerate() {
        debug!(frame = index + 1, score, "predict: frame scored");
    }

    let usable = scores.len();
    let Some(mean) = mean_score(&scores).filter(|_| usable >= state.min_usable_frames) else {
        warn!(usable, required = state.min_usable_frames, "predict: too few usable frames");
        return client_error(
            StatusCode::BAD_REQUEST,
            format!("Not enough valid frames with faces (got {usable})"),
        );
    };

    let verdict = verdict_for_mean_score(mean);
    info!(file = %upload.file_name, verdict, mean, usable, "predict: verdict ready");
    Json(PredictResponse::success(verdict, mean)).into_response()
}

/// Pulls the `file` part out of the form. `Ok(None)` means there was none.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Option<Upload>, Response> {
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(client_error(e.status(), e.body_text())),
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| client_error(e.status(), e.body_text()))?;
        return Ok(Some(Upload {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
