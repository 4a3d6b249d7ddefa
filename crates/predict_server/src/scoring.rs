use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("uploaded video is empty")]
    EmptyVideo,
    #[error("frame score {0} is outside [0, 1]")]
    OutOfRange(f64),
    #[error("frame scorer failed: {0}")]
    Backend(String),
}

/// Produces one genuineness score in `[0, 1]` per usable frame of a video.
#[async_trait]
pub trait FrameScorer: Send + Sync {
    async fn score_frames(&self, video: &[u8]) -> Result<Vec<f64>, ScoringError>;
}

/// Development stand-in: answers every non-empty upload with the same scores.
#[derive(Debug, Clone)]
pub struct FixedScorer {
    scores: Vec<f64>,
}

impl FixedScorer {
    pub fn new(scores: Vec<f64>) -> Result<Self, ScoringError> {
        if let Some(bad) = scores
            .iter()
            .copied()
            .find(|score| !score.is_finite() || !(0.0..=1.0).contains(score))
        {
            return Err(ScoringError::OutOfRange(bad));
        }
        Ok(Self { scores })
    }

    pub fn uniform(frame_count: usize, score: f64) -> Result<Self, ScoringError> {
        Self::new(vec![score; frame_count])
    }
}

#[async_trait]
impl FrameScorer for FixedScorer {
    async fn score_frames(&self, video: &[u8]) -> Result<Vec<f64>, ScoringError> {
        if video.is_empty() {
            return Err(ScoringError::EmptyVideo);
        }
        Ok(self.scores.clone())
    }
}

pub fn mean_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}
