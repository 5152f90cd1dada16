use std::sync::{Arc, Mutex};

use oratio::application::ports::{LlmClient, LlmClientError};
use oratio::application::services::{
    DEFAULT_SYSTEM_PROMPT, SampleAnswer, ScoreRequest, ScoringError, ScoringService,
};
use oratio::domain::{ChatMessage, MessageRole};

struct RecordingLlmClient {
    reply: String,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        self.prompts
            .lock()
            .unwrap()
            .push((messages[0].content.clone(), messages[1].content.clone()));
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

struct RateLimitedLlmClient;

#[async_trait::async_trait]
impl LlmClient for RateLimitedLlmClient {
    async fn chat(&self, _: &[ChatMessage]) -> Result<String, LlmClientError> {
        Err(LlmClientError::RateLimited)
    }

    fn model_name(&self) -> &str {
        "limited"
    }
}

fn request(transcript: &str) -> ScoreRequest {
    ScoreRequest {
        question: "What do you do at weekends?".to_string(),
        transcript: transcript.to_string(),
        system_prompt: None,
        sample_answers: vec![
            SampleAnswer {
                content: "I go hiking with friends.".to_string(),
                score: Some("9".to_string()),
            },
            SampleAnswer {
                content: "Sleep.".to_string(),
                score: None,
            },
        ],
    }
}

#[tokio::test]
async fn given_answer_with_samples_when_scoring_then_prompt_lists_references() {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let service = ScoringService::new(Arc::new(RecordingLlmClient {
        reply: r#"{"score": 6, "feedback": "Fine"}"#.to_string(),
        prompts: Arc::clone(&prompts),
    }));

    let result = service.score(&request("I read books.")).await.unwrap();

    assert_eq!(result.score.value(), 6.0);
    let recorded = prompts.lock().unwrap();
    let (system, user) = &recorded[0];
    assert_eq!(system, DEFAULT_SYSTEM_PROMPT);
    assert!(user.contains("Question: What do you do at weekends?"));
    assert!(user.contains("1. I go hiking with friends. (reference score: 9)"));
    assert!(user.contains("2. Sleep. (reference score: N/A)"));
    assert!(user.contains("Candidate's answer: I read books."));
}

#[tokio::test]
async fn given_custom_system_prompt_when_scoring_then_overrides_default() {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let service = ScoringService::new(Arc::new(RecordingLlmClient {
        reply: "score: 4".to_string(),
        prompts: Arc::clone(&prompts),
    }));
    let mut req = request("Answer");
    req.system_prompt = Some("Grade strictly.".to_string());

    service.score(&req).await.unwrap();

    assert_eq!(prompts.lock().unwrap()[0].0, "Grade strictly.");
}

#[tokio::test]
async fn given_blank_transcript_when_scoring_then_returns_missing_transcript() {
    let service = ScoringService::new(Arc::new(RateLimitedLlmClient));

    let result = service.score(&request("   ")).await;

    assert!(matches!(result, Err(ScoringError::MissingTranscript)));
}

#[tokio::test]
async fn given_failing_client_when_scoring_then_returns_completion_error() {
    let service = ScoringService::new(Arc::new(RateLimitedLlmClient));

    let result = service.score(&request("An answer")).await;

    assert!(matches!(
        result,
        Err(ScoringError::Completion(LlmClientError::RateLimited))
    ));
}
