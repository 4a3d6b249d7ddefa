use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use client_core::{
    controller::orchestration::run_submission, Effect, HttpPredictionEndpoint, SelectedFile,
    SubmissionState, UploadController, UploadEvent,
};
use shared::protocol::DEFAULT_PREDICT_URL;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser, Debug)]
#[command(
    name = "deepfake-check",
    about = "Submit a video to the deepfake prediction endpoint and print the verdict"
)]
struct Args {
    #[arg(long, env = "DEEPFAKE_ENDPOINT", default_value = DEFAULT_PREDICT_URL)]
    endpoint: String,
    /// Hand the file over as a drag-and-drop instead of a pick.
    #[arg(long)]
    drop: bool,
    video: PathBuf,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let endpoint = HttpPredictionEndpoint::new(&args.endpoint)?;
    let file = SelectedFile::from_path(&args.video).await?;
    debug!(endpoint = %endpoint.url(), file = file.name(), "deepfake-check: starting");

    let mut controller = UploadController::new(endpoint);
    if args.drop {
        controller.drag_enter();
        controller.drop_file(file);
    } else {
        controller.select_file(file);
    }

    if let Some(Effect::Predict(submission)) = controller.dispatch(UploadEvent::SubmitRequested) {
        for line in report::render_lines(&controller.view()) {
            eprintln!("{line}");
        }
        let outcome = run_submission(controller.endpoint(), &submission).await;
        controller.dispatch(UploadEvent::SubmissionSettled {
            token: submission.token,
            outcome,
        });
    }

    for line in report::render_lines(&controller.view()) {
        println!("{line}");
    }

    Ok(match controller.state().submission() {
        SubmissionState::Succeeded => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
