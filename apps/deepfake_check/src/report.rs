//! Plain-text rendering of the upload view.

use client_core::{OutcomeView, UploadView, VerdictClass};

pub fn treatment(class: VerdictClass) -> &'static str {
    match class {
        VerdictClass::Authentic => "looks authentic",
        VerdictClass::Deepfake => "likely deepfake",
    }
}

pub fn render_lines(view: &UploadView) -> Vec<String> {
    let mut lines = vec![format!("File: {}", view.drop_zone.label)];
    if view.submit.busy {
        lines.push(view.submit.label.to_string());
    }
    match &view.outcome {
        Some(outcome @ OutcomeView::Verdict { class, .. }) => {
            lines.extend(outcome.to_string().lines().map(str::to_string));
            lines.push(format!("Assessment: {}", treatment(*class)));
        }
        Some(outcome @ OutcomeView::Failure { .. }) => lines.push(outcome.to_string()),
        None => {}
    }
    lines
}
