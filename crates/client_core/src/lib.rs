//! Client side of the deepfake check: the upload workflow state machine and
//! the HTTP contract it expects from the prediction endpoint.

use std::{fmt, path::Path, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    header::ACCEPT,
    multipart::{Form, Part},
    Body, Client,
};
use shared::{
    error::UNKNOWN_REMOTE_ERROR,
    protocol::{ErrorBody, PredictResponse, FILE_FIELD},
};
use tracing::{debug, info};
use url::Url;

pub mod controller;

pub use controller::{
    events::{Effect, Submission, UploadEvent},
    reducer::{reduce, SubmissionState, Transition, UploadState},
    view::{render, DropZoneView, OutcomeView, SubmitControlView, UploadView},
    UploadController,
};
pub use shared::{
    domain::{format_confidence, PredictionResult, SubmissionToken, VerdictClass},
    error::{UploadError, UploadErrorKind},
};

/// A user-chosen video blob. Cloning shares the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: Option<String>,
    bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Reads the whole file and guesses its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("'{}' does not name a file", path.display()))?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read video file '{}'", path.display()))?;
        let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);

        Ok(Self {
            name,
            mime_type,
            bytes: Bytes::from(bytes),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[async_trait]
pub trait PredictionEndpoint: Send + Sync {
    /// Performs exactly one prediction attempt for `file`.
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, UploadError>;
}

#[async_trait]
impl<T> PredictionEndpoint for Arc<T>
where
    T: PredictionEndpoint + ?Sized,
{
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, UploadError> {
        (**self).predict(file).await
    }
}

/// Talks to a real `/predict` endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPredictionEndpoint {
    http: Client,
    url: Url,
}

impl HttpPredictionEndpoint {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url.trim())
            .with_context(|| format!("invalid prediction endpoint url '{url}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "prediction endpoint must be http or https, got '{}'",
                url.scheme()
            );
        }
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn file_part(file: &SelectedFile) -> Result<Part, UploadError> {
        let part = Part::stream_with_length(Body::from(file.bytes().clone()), file.len() as u64)
            .file_name(file.name().to_string());
        match file.mime_type() {
            Some(mime_type) => part
                .mime_str(mime_type)
                .map_err(|e| UploadError::transport(describe_error(&e))),
            None => Ok(part),
        }
    }
}

#[async_trait]
impl PredictionEndpoint for HttpPredictionEndpoint {
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, UploadError> {
        let form = Form::new().part(FILE_FIELD, Self::file_part(file)?);
        debug!(
            url = %self.url,
            file = file.name(),
            bytes = file.len(),
            "predict: posting video"
        );

        let response = self
            .http
            .post(self.url.clone())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::transport(describe_error(&e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::transport(describe_error(&e)))?;
        info!(
            status = status.as_u16(),
            body_bytes = body.len(),
            "predict: response received"
        );
        interpret_response(status.as_u16(), &body)
    }
}

/// Turns a settled HTTP exchange into a verdict or the error to show.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<PredictionResult, UploadError> {
    if !(200..300).contains(&status) {
        let payload: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        return Err(UploadError::remote(payload.error, || {
            UploadError::status_message(status)
        }));
    }

    let payload: PredictResponse =
        serde_json::from_slice(body).map_err(|_| UploadError::MalformedResponse)?;
    if payload.is_error() {
        return Err(UploadError::remote(payload.error, || {
            UNKNOWN_REMOTE_ERROR.to_string()
        }));
    }

    let (Some(verdict), Some(confidence)) = (payload.result, payload.confidence) else {
        return Err(UploadError::MalformedResponse);
    };
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(UploadError::MalformedResponse);
    }

    Ok(PredictionResult::new(verdict, confidence))
}

/// Flattens an error and its sources into one line, skipping repeated text.
fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
