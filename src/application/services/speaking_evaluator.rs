use std::collections::HashSet;

use crate::domain::MAX_SCORE;

const GRAMMAR_BASELINE: f64 = 7.0;
const CONTENT_BASELINE: f64 = 7.5;

/// Word-count rubric. A placeholder for real assessment models.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakingEvaluation {
    pub pronunciation: f64,
    pub fluency: f64,
    pub grammar: f64,
    pub vocabulary: f64,
    pub content: f64,
    pub word_count: usize,
}

pub fn evaluate_speaking(transcription: &str) -> SpeakingEvaluation {
    let words: Vec<&str> = transcription.split_whitespace().collect();
    let word_count = words.len();
    let unique_words = words.iter().collect::<HashSet<_>>().len();

    SpeakingEvaluation {
        pronunciation: round_tenth(capped(6.0 + word_count as f64 / 20.0)),
        fluency: round_tenth(capped(5.0 + word_count as f64 / 15.0)),
        grammar: GRAMMAR_BASELINE,
        vocabulary: round_tenth(capped(6.0 + unique_words as f64 / 15.0)),
        content: CONTENT_BASELINE,
        word_count,
    }
}

fn capped(value: f64) -> f64 {
    value.min(MAX_SCORE)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
