//! Runs an issued submission against the prediction endpoint.

use shared::{domain::PredictionResult, error::UploadError};
use tracing::{info, warn};

use crate::{controller::events::Submission, PredictionEndpoint};

pub async fn run_submission<E>(
    endpoint: &E,
    submission: &Submission,
) -> Result<PredictionResult, UploadError>
where
    E: PredictionEndpoint + ?Sized,
{
    info!(
        token = submission.token.0,
        file = submission.file.name(),
        bytes = submission.file.len(),
        "upload: submitting video"
    );

    let outcome = endpoint.predict(&submission.file).await;
    match &outcome {
        Ok(result) => info!(
            token = submission.token.0,
            verdict = %result.verdict,
            confidence = result.confidence,
            "upload: prediction received"
        ),
        Err(error) => warn!(
            token = submission.token.0,
            kind = ?error.kind(),
            %error,
            "upload: prediction failed"
        ),
    }
    outcome
}
