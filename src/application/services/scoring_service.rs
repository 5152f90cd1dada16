use std::fmt::Write as _;
use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ScoreResult;

use super::score_extractor::extract_score;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an experienced English teacher grading a speaking test.

Reference answers with their scores may be provided. Use them as the main yardstick:
- If the candidate's answer is as good as or better than a reference scored X, give a score close to or above X.
- If it is weaker than every reference, give less than the lowest reference score.
- Adjust the score by the answer's quality relative to the references.

Criteria (0-10 scale):
- Content (40%): on topic, complete, logically organised
- Grammar (30%): correct sentence structure and tenses
- Vocabulary (20%): varied, precise, appropriate to context
- Pronunciation and fluency (10%): clear and natural, judged from the text

Reply with JSON only:
{"score": <0-10>, "feedback": "<detailed comments comparing the answer with the references>"}"#;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleAnswer {
    pub content: String,
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub question: String,
    pub transcript: String,
    pub system_prompt: Option<String>,
    pub sample_answers: Vec<SampleAnswer>,
}

/// Grades a transcribed answer with a chat model and normalizes the verdict.
pub struct ScoringService {
    llm_client: Arc<dyn LlmClient>,
}

impl ScoringService {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    pub fn model_name(&self) -> &str {
        self.llm_client.model_name()
    }

    #[tracing::instrument(skip_all, fields(samples = request.sample_answers.len()))]
    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoringError> {
        if request.transcript.trim().is_empty() {
            return Err(ScoringError::MissingTranscript);
        }

        let system_prompt = request
            .system_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let user_message = build_user_message(request);

        let completion = self
            .llm_client
            .complete(system_prompt, &user_message)
            .await
            .map_err(ScoringError::Completion)?;

        let result = extract_score(&completion);

        tracing::info!(score = %result.score, "Answer scored");

        Ok(result)
    }
}

fn build_user_message(request: &ScoreRequest) -> String {
    let mut message = format!("Question: {}\n", request.question);

    if !request.sample_answers.is_empty() {
        message.push_str("\nReference answers:\n");
        for (i, sample) in request.sample_answers.iter().enumerate() {
            let score = sample.score.as_deref().unwrap_or("N/A");
            let _ = writeln!(message, "{}. {} (reference score: {})", i + 1, sample.content, score);
        }
    }

    let _ = write!(
        message,
        "\nCandidate's answer: {}\n\nScore the answer and give detailed feedback in the JSON format above.",
        request.transcript
    );

    message
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("No transcribedText provided")]
    MissingTranscript,
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
