use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{Score, ScoreResult};

const DEFAULT_SCORE: f64 = 5.0;
const FEEDBACK_FALLBACK_CHARS: usize = 200;

static SCORE_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{[^{}]*"score"[^{}]*"feedback"[^{}]*\}"#).unwrap()
});
static LOOSE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)score["\s:]+(-?\d+(?:\.\d*)?)"#).unwrap());
static LOOSE_FEEDBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)feedback["\s:]+["'](.*?)["']"#).unwrap());

/// Pulls `{score, feedback}` out of free-form model output.
///
/// Tries an embedded JSON object first, then loose `score: N` / `feedback: "..."`
/// patterns, then falls back to a neutral score and the head of the text. The
/// score is always clamped to the 0-10 scale.
pub fn extract_score(completion: &str) -> ScoreResult {
    if let Some(result) = extract_json_object(completion) {
        return result;
    }

    let raw_score = LOOSE_SCORE
        .captures(completion)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(DEFAULT_SCORE);

    let feedback = LOOSE_FEEDBACK
        .captures(completion)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| completion.chars().take(FEEDBACK_FALLBACK_CHARS).collect());

    ScoreResult {
        score: Score::new(raw_score),
        feedback,
    }
}

fn extract_json_object(completion: &str) -> Option<ScoreResult> {
    let candidate = SCORE_OBJECT.find(completion)?;
    let value: Value = serde_json::from_str(candidate.as_str()).ok()?;

    let raw_score = match value.get("score")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let feedback = match value.get("feedback")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Some(ScoreResult {
        score: Score::new(raw_score),
        feedback,
    })
}
