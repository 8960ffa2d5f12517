//! Text generation used for summaries and reply drafts.

#[cfg(feature = "web-interface")]
mod gemini;
pub mod prompts;

#[cfg(feature = "web-interface")]
pub use gemini::GeminiGenerator;
pub use prompts::{ReplyLength, DEFAULT_TONE};

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::{validation_error, AppResult};

/// An opaque prompt-in, text-out service
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Generate plain text for a prompt
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Summarize an email into the labeled plain-text layout
pub async fn summarize(generator: &dyn TextGenerator, email: &str) -> AppResult<String> {
    let email = require_email(email)?;
    info!("Summarizing email ({} chars)", email.chars().count());

    generator
        .generate(&prompts::summary_prompt(email))
        .await
        .inspect_err(|e| error!("Error summarizing email: {}", e))
}

/// Draft a reply to an email
pub async fn draft_reply(
    generator: &dyn TextGenerator,
    email: &str,
    tone: &str,
    length: ReplyLength,
) -> AppResult<String> {
    let email = require_email(email)?;
    info!("Drafting {} reply", length.label());

    generator
        .generate(&prompts::reply_prompt(email, tone, length))
        .await
        .inspect_err(|e| error!("Error generating reply: {}", e))
}

fn require_email(email: &str) -> AppResult<&str> {
    if email.trim().is_empty() {
        return Err(validation_error("email body is required"));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{text_generation_error, Error};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> AppResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(text_generation_error("quota exceeded"))
            } else {
                Ok("生成結果".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt() {
        let generator = RecordingGenerator::default();
        let summary = summarize(&generator, "会議のお知らせ").await.unwrap();
        assert_eq!(summary, "生成結果");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("会議のお知らせ"));
    }

    #[tokio::test]
    async fn test_blank_email_never_reaches_service() {
        let generator = RecordingGenerator::default();
        let result = draft_reply(&generator, " \n ", DEFAULT_TONE, ReplyLength::Short).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let generator = RecordingGenerator {
            fail: true,
            ..Default::default()
        };
        let result = summarize(&generator, "本文").await;
        assert!(matches!(result, Err(Error::TextGeneration(_))));
    }
}
