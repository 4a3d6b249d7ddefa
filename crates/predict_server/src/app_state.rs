use std::sync::Arc;

use crate::scoring::FrameScorer;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) scorer: Arc<dyn FrameScorer>,
    pub(crate) min_usable_frames: usize,
}
