use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }
        }
    };
}

id_newtype!(SubmissionToken);
id_newtype!(SelectionGeneration);

/// Verdict labels that render as "not a deepfake". Compared case-insensitively.
pub const AUTHENTIC_VERDICTS: [&str; 2] = ["real", "genuine"];

pub const GENUINE_LABEL: &str = "Genuine";
pub const DEEPFAKE_LABEL: &str = "Deepfake";

/// Mean frame scores strictly above this value are reported as genuine.
pub const GENUINE_SCORE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictClass {
    Authentic,
    Deepfake,
}

impl VerdictClass {
    pub fn classify(verdict: &str) -> Self {
        let normalized = verdict.trim().to_lowercase();
        if AUTHENTIC_VERDICTS.contains(&normalized.as_str()) {
            VerdictClass::Authentic
        } else {
            VerdictClass::Deepfake
        }
    }

    pub fn is_authentic(self) -> bool {
        self == VerdictClass::Authentic
    }
}

/// Maps an averaged per-frame score onto the label the endpoint reports.
pub fn verdict_for_mean_score(mean: f64) -> &'static str {
    if mean > GENUINE_SCORE_THRESHOLD {
        GENUINE_LABEL
    } else {
        DEEPFAKE_LABEL
    }
}

/// Renders a `[0, 1]` confidence as a percentage with two decimals, e.g. `0.8734` -> `87.34%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub verdict: String,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn new(verdict: impl Into<String>, confidence: f64) -> Self {
        Self {
            verdict: verdict.into(),
            confidence,
        }
    }

    pub fn class(&self) -> VerdictClass {
        VerdictClass::classify(&self.verdict)
    }

    pub fn confidence_percent(&self) -> String {
        format_confidence(self.confidence)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.verdict, self.confidence_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentic_vocabulary_ignores_case_and_surrounding_whitespace() {
        for verdict in ["Real", "GENUINE", "real ", " genuine", "real"] {
            assert_eq!(
                VerdictClass::classify(verdict),
                VerdictClass::Authentic,
                "{verdict:?} should be authentic"
            );
        }
    }

    #[test]
    fn everything_outside_the_vocabulary_is_a_deepfake_verdict() {
        for verdict in ["fake", "deepfake", "", "FAKE", "unreal", "real-ish"] {
            assert_eq!(
                VerdictClass::classify(verdict),
                VerdictClass::Deepfake,
                "{verdict:?} should not be authentic"
            );
        }
    }

    #[test]
    fn confidence_renders_with_two_decimals() {
        assert_eq!(format_confidence(0.8734), "87.34%");
        assert_eq!(format_confidence(0.9123), "91.23%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
        assert_eq!(format_confidence(0.5), "50.00%");
    }

    #[test]
    fn mean_score_threshold_is_exclusive() {
        assert_eq!(verdict_for_mean_score(0.51), GENUINE_LABEL);
        assert_eq!(verdict_for_mean_score(0.5), DEEPFAKE_LABEL);
        assert_eq!(verdict_for_mean_score(0.02), DEEPFAKE_LABEL);
    }

    #[test]
    fn tokens_advance_monotonically() {
        let first = SubmissionToken::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second, SubmissionToken(1));
    }
}
