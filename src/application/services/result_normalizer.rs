use crate::domain::{ResponseShape, TranscriptSegment, TranscriptionProfile, TranscriptionResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTranscription {
    pub text: String,
    pub language: String,
    pub segments: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailedTranscription {
    pub text: String,
    pub language: String,
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedTranscription {
    Summary(SummaryTranscription),
    Detailed(DetailedTranscription),
}

impl NormalizedTranscription {
    pub fn text(&self) -> &str {
        match self {
            Self::Summary(s) => &s.text,
            Self::Detailed(d) => &d.text,
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            Self::Summary(s) => s.segments,
            Self::Detailed(d) => d.segments.len(),
        }
    }
}

pub fn normalize(
    result: TranscriptionResult,
    profile: &TranscriptionProfile,
) -> NormalizedTranscription {
    let language = result
        .language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| profile.fallback_language.clone());
    let text = result.text.trim().to_string();

    match profile.shape {
        ResponseShape::Summary => NormalizedTranscription::Summary(SummaryTranscription {
            text,
            language,
            segments: result.segments.len(),
        }),
        ResponseShape::Detailed => NormalizedTranscription::Detailed(DetailedTranscription {
            text,
            language,
            segments: order_segments(result.segments),
        }),
    }
}

/// Stable sort by start time; an end before its start collapses onto the start.
/// Segment text is left exactly as the backend produced it.
fn order_segments(mut segments: Vec<TranscriptSegment>) -> Vec<TranscriptSegment> {
    segments.sort_by(|a, b| a.start.total_cmp(&b.start));
    for segment in &mut segments {
        if segment.end < segment.start {
            segment.end = segment.start;
        }
    }
    segments
}
