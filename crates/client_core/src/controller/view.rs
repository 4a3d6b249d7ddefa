//! Pure derivation of what the upload widget shows.

use std::fmt;

use shared::domain::VerdictClass;

use crate::controller::reducer::{SubmissionState, UploadState};

pub const DROP_ZONE_PROMPT: &str = "Drag & drop or click to upload a video";
pub const SUBMIT_LABEL: &str = "Check for Deepfake";
pub const BUSY_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq)]
pub struct UploadView {
    pub drop_zone: DropZoneView,
    pub submit: SubmitControlView,
    pub outcome: Option<OutcomeView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZoneView {
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControlView {
    pub enabled: bool,
    pub busy: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeView {
    Failure {
        message: String,
    },
    Verdict {
        verdict: String,
        confidence: String,
        class: VerdictClass,
    },
}

pub fn render(state: &UploadState) -> UploadView {
    let submitting = state.submission() == SubmissionState::Submitting;

    let drop_zone = DropZoneView {
        label: state
            .selected_file()
            .map(|file| file.name().to_string())
            .unwrap_or_else(|| DROP_ZONE_PROMPT.to_string()),
        highlighted: state.drag_active(),
    };

    let submit = SubmitControlView {
        enabled: state.can_submit(),
        busy: submitting,
        label: if submitting { BUSY_LABEL } else { SUBMIT_LABEL },
    };

    let outcome = if submitting {
        None
    } else if let Some(failure) = state.failure() {
        Some(OutcomeView::Failure {
            message: failure.message(),
        })
    } else {
        match (state.submission(), state.result()) {
            (SubmissionState::Succeeded, Some(result)) => Some(OutcomeView::Verdict {
                verdict: result.verdict.clone(),
                confidence: result.confidence_percent(),
                class: result.class(),
            }),
            _ => None,
        }
    };

    UploadView {
        drop_zone,
        submit,
        outcome,
    }
}

impl fmt::Display for OutcomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeView::Failure { message } => write!(f, "Error: {message}"),
            OutcomeView::Verdict {
                verdict,
                confidence,
                ..
            } => write!(f, "Result: {verdict}\nConfidence: {confidence}"),
        }
    }
}
