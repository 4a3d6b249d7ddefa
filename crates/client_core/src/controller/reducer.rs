//! Upload workflow state and its transitions.

use shared::{
    domain::{PredictionResult, SelectionGeneration, SubmissionToken},
    error::UploadError,
};
use tracing::{debug, warn};

use crate::{
    controller::events::{Effect, Submission, UploadEvent},
    SelectedFile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    token: SubmissionToken,
    generation: SelectionGeneration,
}

/// Everything the upload widget knows. Transitions consume the state and
/// return the next one.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    selected_file: Option<SelectedFile>,
    submission: SubmissionState,
    result: Option<PredictionResult>,
    failure: Option<UploadError>,
    drag_active: bool,
    // bumped on every pick/drop so a settlement can tell its file was replaced
    generation: SelectionGeneration,
    last_token: SubmissionToken,
    in_flight: Option<InFlight>,
}

pub struct Transition {
    pub state: UploadState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: UploadState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

pub fn reduce(state: UploadState, event: UploadEvent) -> Transition {
    match event {
        UploadEvent::FilePicked(file) => Transition::to(state.select_file(file)),
        UploadEvent::DragEntered => Transition::to(state.drag_enter()),
        UploadEvent::DragLeft => Transition::to(state.drag_leave()),
        UploadEvent::FileDropped(file) => Transition::to(state.drop_file(file)),
        UploadEvent::SubmitRequested => {
            let (state, submission) = state.submit();
            Transition {
                state,
                effect: submission.map(Effect::Predict),
            }
        }
        UploadEvent::SubmissionSettled { token, outcome } => {
            Transition::to(state.settle(token, outcome))
        }
    }
}

impl UploadState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&UploadError> {
        self.failure.as_ref()
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn in_flight_token(&self) -> Option<SubmissionToken> {
        self.in_flight.map(|in_flight| in_flight.token)
    }

    /// The submit control is usable only with a file and nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && self.submission != SubmissionState::Submitting
    }

    pub fn select_file(mut self, file: SelectedFile) -> Self {
        debug!(file = file.name(), bytes = file.len(), "upload: file selected");
        self.selected_file = Some(file);
        self.result = None;
        self.failure = None;
        self.generation = self.generation.next();
        self
    }

    pub fn drag_enter(mut self) -> Self {
        self.drag_active = true;
        self
    }

    pub fn drag_leave(mut self) -> Self {
        self.drag_active = false;
        self
    }

    pub fn drop_file(self, file: SelectedFile) -> Self {
        let mut state = self.select_file(file);
        state.drag_active = false;
        state
    }

    /// Starts a submission when possible. The returned [`Submission`] is the
    /// request the caller has to perform.
    pub fn submit(mut self) -> (Self, Option<Submission>) {
        if self.submission == SubmissionState::Submitting {
            warn!("upload: submit ignored, a submission is already in flight");
            return (self, None);
        }

        let Some(file) = self.selected_file.clone() else {
            self.result = None;
            self.failure = Some(UploadError::NoFileSelected);
            return (self, None);
        };

        let token = self.last_token.next();
        self.last_token = token;
        self.in_flight = Some(InFlight {
            token,
            generation: self.generation,
        });
        self.submission = SubmissionState::Submitting;
        self.result = None;
        self.failure = None;

        (self, Some(Submission { token, file }))
    }

    /// Applies a settled request. Outcomes for anything but the in-flight token
    /// are dropped; an outcome whose file was replaced meanwhile returns the
    /// workflow to idle without showing it.
    pub fn settle(
        mut self,
        token: SubmissionToken,
        outcome: Result<PredictionResult, UploadError>,
    ) -> Self {
        let Some(in_flight) = self.in_flight else {
            debug!(token = token.0, "upload: settlement with nothing in flight");
            return self;
        };
        if in_flight.token != token {
            debug!(
                token = token.0,
                in_flight = in_flight.token.0,
                "upload: dropping settlement for superseded submission"
            );
            return self;
        }

        self.in_flight = None;
        if in_flight.generation != self.generation {
            debug!(
                token = token.0,
                "upload: file replaced while submitting, discarding outcome"
            );
            self.submission = SubmissionState::Idle;
            return self;
        }

        match outcome {
            Ok(result) => {
                self.submission = SubmissionState::Succeeded;
                self.result = Some(result);
                self.failure = None;
            }
            Err(error) => {
                self.submission = SubmissionState::Failed;
                self.result = None;
                self.failure = Some(error);
            }
        }
        self
    }
}
