use serde::{Deserialize, Serialize};

pub const PREDICT_ROUTE: &str = "/predict";
/// Multipart part name carrying the video.
pub const FILE_FIELD: &str = "file";
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:5001/predict";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// Body of a `/predict` reply. Every field is optional on the wire; the
/// client decides what a usable payload is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    pub fn success(result: impl Into<String>, confidence: f64) -> Self {
        Self {
            status: Some(ResponseStatus::Success),
            result: Some(result.into()),
            confidence: Some(confidence),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: Some(ResponseStatus::Error),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Some(ResponseStatus::Error)
    }
}

/// Lenient view of an error reply: only the `error` string is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_reply_omits_error_field() {
        let json = serde_json::to_value(PredictResponse::success("Genuine", 0.75)).expect("json");
        assert_eq!(
            json,
            serde_json::json!({ "status": "success", "result": "Genuine", "confidence": 0.75 })
        );
    }

    #[test]
    fn unknown_status_values_do_not_fail_parsing() {
        let parsed: PredictResponse =
            serde_json::from_str(r#"{"status":"queued","result":"real","confidence":0.1}"#)
                .expect("parse");
        assert_eq!(parsed.status, Some(ResponseStatus::Unknown));
        assert!(!parsed.is_error());
    }

    #[test]
    fn error_body_ignores_extra_fields() {
        let parsed: ErrorBody =
            serde_json::from_str(r#"{"error":"boom","status":"error","trace":[1,2]}"#)
                .expect("parse");
        assert_eq!(parsed.error.as_deref(), Some("boom"));
    }
}
