//! Upload events and the effects a transition may request.

use shared::{
    domain::{PredictionResult, SubmissionToken},
    error::UploadError,
};

use crate::SelectedFile;

#[derive(Debug, Clone)]
pub enum UploadEvent {
    FilePicked(SelectedFile),
    DragEntered,
    DragLeft,
    FileDropped(SelectedFile),
    SubmitRequested,
    SubmissionSettled {
        token: SubmissionToken,
        outcome: Result<PredictionResult, UploadError>,
    },
}

impl UploadEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UploadEvent::FilePicked(_) => "file_picked",
            UploadEvent::DragEntered => "drag_entered",
            UploadEvent::DragLeft => "drag_left",
            UploadEvent::FileDropped(_) => "file_dropped",
            UploadEvent::SubmitRequested => "submit_requested",
            UploadEvent::SubmissionSettled { .. } => "submission_settled",
        }
    }
}

/// One issued request. The token must come back with the outcome.
#[derive(Debug, Clone)]
pub struct Submission {
    pub token: SubmissionToken,
    pub file: SelectedFile,
}

#[derive(Debug, Clone)]
pub enum Effect {
    Predict(Submission),
}
