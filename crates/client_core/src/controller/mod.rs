//! Controller layer: upload events, reducer-like state transitions, view
//! derivation and the orchestration that runs submissions against an endpoint.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod view;

use std::mem;

use tracing::debug;

use crate::{PredictionEndpoint, SelectedFile};
use events::{Effect, UploadEvent};
use reducer::{reduce, SubmissionState, Transition, UploadState};
use view::{render, UploadView};

/// Owns one upload workflow and the endpoint its submissions go to.
pub struct UploadController<E> {
    state: UploadState,
    endpoint: E,
}

impl<E: PredictionEndpoint> UploadController<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            state: UploadState::default(),
            endpoint,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn view(&self) -> UploadView {
        render(&self.state)
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Single mutation entry point; returns the side effect the caller must run, if any.
    pub fn dispatch(&mut self, event: UploadEvent) -> Option<Effect> {
        debug!(event = event.name(), "upload: dispatch");
        let Transition { state, effect } = reduce(mem::take(&mut self.state), event);
        self.state = state;
        effect
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.dispatch(UploadEvent::FilePicked(file));
    }

    pub fn drag_enter(&mut self) {
        self.dispatch(UploadEvent::DragEntered);
    }

    pub fn drag_leave(&mut self) {
        self.dispatch(UploadEvent::DragLeft);
    }

    pub fn drop_file(&mut self, file: SelectedFile) {
        self.dispatch(UploadEvent::FileDropped(file));
    }

    /// Submits the current selection and waits for it to settle. Every failure
    /// ends up in the state; nothing is returned as an error.
    pub async fn submit(&mut self) -> SubmissionState {
        if let Some(Effect::Predict(submission)) = self.dispatch(UploadEvent::SubmitRequested) {
            let outcome = orchestration::run_submission(&self.endpoint, &submission).await;
            self.dispatch(UploadEvent::SubmissionSettled {
                token: submission.token,
                outcome,
            });
        }
        self.state.submission()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
