//! AI collaborator — asks the LLM to critique and rewrite a resume for a job title.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::{LlmClient, LlmError};
use crate::review::prompts::{build_review_prompt, REVIEW_SYSTEM};

#[derive(Debug, Error)]
pub enum AiServiceError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("LLM returned an empty response")]
    EmptyResponse,
}

/// Produces one free-form answer with a `1)` feedback section and a `2)` HTML section.
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate_feedback(
        &self,
        resume_html: &str,
        job_title: &str,
    ) -> Result<String, AiServiceError>;
}

pub struct LlmFeedbackGenerator {
    llm: LlmClient,
}

impl LlmFeedbackGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl FeedbackGenerator for LlmFeedbackGenerator {
    async fn generate_feedback(
        &self,
        resume_html: &str,
        job_title: &str,
    ) -> Result<String, AiServiceError> {
        let prompt = build_review_prompt(resume_html, job_title);
        self.llm
            .call_text(&prompt, REVIEW_SYSTEM)
            .await
            .map_err(|e| match e {
                LlmError::EmptyContent => AiServiceError::EmptyResponse,
                other => AiServiceError::Llm(other),
            })
    }
}
