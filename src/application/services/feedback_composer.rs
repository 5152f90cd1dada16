use std::collections::BTreeMap;

const WEAK_THRESHOLD: f64 = 6.0;

const SUGGESTIONS: [&str; 4] = [
    "Practice speaking regularly",
    "Listen to native speakers",
    "Record yourself and review",
    "Focus on weak areas identified",
];

const CRITERION_ADVICE: [(&str, &str); 4] = [
    ("pronunciation", "Focus on pronunciation and clarity. "),
    ("fluency", "Try to speak more smoothly and naturally. "),
    ("vocabulary", "Expand your vocabulary range. "),
    ("grammar", "Pay attention to grammar structures. "),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub text: String,
    pub suggestions: Vec<String>,
}

/// Canned feedback keyed off the average and the weak criteria.
pub fn compose_feedback(scores: &BTreeMap<String, f64>) -> Feedback {
    let average = if scores.is_empty() {
        0.0
    } else {
        scores.values().sum::<f64>() / scores.len() as f64
    };

    let mut text = format!("Overall performance: {average:.1}/10. ");

    text.push_str(if average >= 8.0 {
        "Excellent work! Your speaking skills are very strong. "
    } else if average >= 6.0 {
        "Good effort! You're making solid progress. "
    } else {
        "Keep practicing! There's room for improvement. "
    });

    for (criterion, advice) in CRITERION_ADVICE {
        if scores.get(criterion).copied().unwrap_or(0.0) < WEAK_THRESHOLD {
            text.push_str(advice);
        }
    }

    Feedback {
        text,
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}
