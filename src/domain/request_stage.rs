use std::fmt;

/// Progress of one transcription request through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequestStage {
    Received,
    Decoding,
    Persisting,
    Transcribing,
    Normalizing,
    Responding,
}

impl RequestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStage::Received => "received",
            RequestStage::Decoding => "decoding",
            RequestStage::Persisting => "persisting",
            RequestStage::Transcribing => "transcribing",
            RequestStage::Normalizing => "normalizing",
            RequestStage::Responding => "responding",
        }
    }

    /// Whether a scratch file may exist and must be released on exit.
    pub fn requires_cleanup(&self) -> bool {
        *self >= RequestStage::Persisting
    }
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
