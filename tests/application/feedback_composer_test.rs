use std::collections::BTreeMap;

use oratio::application::services::compose_feedback;

fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn given_strong_scores_when_composing_then_praises_without_advice() {
    let feedback = compose_feedback(&scores(&[
        ("pronunciation", 9.0),
        ("fluency", 8.0),
        ("vocabulary", 9.0),
        ("grammar", 8.0),
    ]));

    assert_eq!(
        feedback.text,
        "Overall performance: 8.5/10. Excellent work! Your speaking skills are very strong. "
    );
    assert_eq!(feedback.suggestions.len(), 4);
}

#[test]
fn given_middle_scores_when_composing_then_uses_progress_tier() {
    let feedback = compose_feedback(&scores(&[
        ("pronunciation", 7.0),
        ("fluency", 6.0),
        ("vocabulary", 7.0),
        ("grammar", 6.0),
    ]));
    assert!(feedback.text.contains("Good effort! You're making solid progress. "));
}

#[test]
fn given_no_scores_when_composing_then_average_is_zero_and_all_advice_given() {
    let feedback = compose_feedback(&BTreeMap::new());

    assert!(feedback.text.starts_with("Overall performance: 0.0/10. Keep practicing!"));
    assert!(feedback.text.contains("Focus on pronunciation and clarity."));
    assert!(feedback.text.contains("Try to speak more smoothly and naturally."));
    assert!(feedback.text.contains("Expand your vocabulary range."));
    assert!(feedback.text.contains("Pay attention to grammar structures."));
}

#[test]
fn given_only_unrelated_criteria_when_composing_then_missing_ones_count_as_weak() {
    let feedback = compose_feedback(&scores(&[("content", 9.0)]));

    assert!(feedback.text.starts_with("Overall performance: 9.0/10. Excellent work!"));
    assert!(feedback.text.contains("Focus on pronunciation and clarity."));
}
