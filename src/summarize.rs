use async_trait::async_trait;
use log::debug;

use crate::{NotesError, Result};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const ENGLISH_PROMPT: &str = "You are a YouTube video summarizer. Your task is to summarize the provided transcript text, \
highlighting the key points in bullet format within 500 words. Please provide the summary of the text:
- Introduction: The video introduces the main topic, explaining its relevance and setting the stage for the discussion.
- Key Point 1: The first major point, detailing important aspects and their implications.
- Key Point 2: The second key topic, providing relevant findings, examples, and insights.
- Key Point 3: Another critical topic discussed, highlighting key examples and their broader impact.
- Supporting Points: Additional topics that reinforce the main discussion and provide supporting evidence.
- Expert Opinion: Insights or recommendations from the speaker, adding depth and perspective.
- Conclusion: A wrap-up of the main takeaways, with a final call to action or thought for the viewer.";

pub const HINDI_PROMPT: &str = "Aap ek YouTube video summary creator hain. Transcript text ka summary \
tayar karein aur 250 shabdon ke andar Hindi mein sabse important points provide karein.";

/// Generative-language backend that turns a prompt and a transcript into prose
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str, text: &str) -> Result<String>;
}

/// Which hosted API a model name routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Gemini,
    Anthropic,
    OpenAi,
}

impl Backend {
    fn for_model(model: &str) -> Self {
        if model.starts_with("gemini") {
            Backend::Gemini
        } else if model.starts_with("claude") {
            Backend::Anthropic
        } else {
            Backend::OpenAi
        }
    }
}

/// Summarizer over a hosted LLM chosen by model name
#[derive(Debug, Clone)]
pub struct LlmSummarizer {
    client: reqwest::Client,
    model: String,
}

impl LlmSummarizer {
    pub fn new(client: reqwest::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    async fn post_json(&self, request: reqwest::RequestBuilder, body: &serde_json::Value) -> Result<serde_json::Value> {
        let resp = request.json(body).send().await.map_err(summarization_error)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotesError::Summarization(format!("API returned {status}: {body}")));
        }

        resp.json().await.map_err(summarization_error)
    }

    async fn summarize_gemini(&self, content: &str) -> Result<String> {
        let api_key = api_key(&["GOOGLE_API_KEY", "GEMINI_API_KEY"])?;
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [{ "text": content }]
                }
            ]
        });

        let request = self.client.post(&url).query(&[("key", api_key.as_str())]);
        let json = self.post_json(request, &body).await?;
        extract_gemini_text(&json)
    }

    async fn summarize_anthropic(&self, content: &str) -> Result<String> {
        let api_key = api_key(&["ANTHROPIC_API_KEY"])?;
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 4096,
            "messages": [
                {
                    "role": "user",
                    "content": content
                }
            ]
        });

        let request = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &api_key)
            .header("anthropic-version", "2023-06-01");
        let json = self.post_json(request, &body).await?;
        extract_anthropic_text(&json)
    }

    async fn summarize_openai(&self, content: &str) -> Result<String> {
        let api_key = api_key(&["OPENAI_API_KEY"])?;
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": content
                }
            ]
        });

        let request = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&api_key);
        let json = self.post_json(request, &body).await?;
        extract_openai_text(&json)
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, prompt: &str, text: &str) -> Result<String> {
        let content = format!("{prompt}{text}");
        let backend = Backend::for_model(&self.model);
        debug!("Summarizing {} chars via {backend:?} with model {}", text.len(), self.model);

        match backend {
            Backend::Gemini => self.summarize_gemini(&content).await,
            Backend::Anthropic => self.summarize_anthropic(&content).await,
            Backend::OpenAi => self.summarize_openai(&content).await,
        }
    }
}

fn summarization_error(e: reqwest::Error) -> NotesError {
    NotesError::Summarization(e.to_string())
}

/// First variable that is set wins; the error names the first candidate
fn api_key(vars: &[&'static str]) -> Result<String> {
    vars.iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .ok_or(NotesError::MissingApiKey(vars[0]))
}

fn extract_gemini_text(json: &serde_json::Value) -> Result<String> {
    let text: String = json
        .pointer("/candidates/0/content/parts")
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text")?.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(NotesError::Summarization("unexpected Gemini API response format".to_string()));
    }
    Ok(text)
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter_map(|block| {
                if block.get("type")?.as_str()? == "text" {
                    block.get("text")?.as_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    Err(NotesError::Summarization("unexpected Anthropic API response format".to_string()))
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String> {
    json.pointer("/choices/0/message/content")
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
        .ok_or_else(|| NotesError::Summarization("unexpected OpenAI API response format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_for_model() {
        assert_eq!(Backend::for_model("gemini-1.5-flash"), Backend::Gemini);
        assert_eq!(Backend::for_model("claude-sonnet-4-6"), Backend::Anthropic);
        assert_eq!(Backend::for_model("gpt-4o-mini"), Backend::OpenAi);
    }

    #[test]
    fn test_english_prompt_sections() {
        assert!(ENGLISH_PROMPT.contains("within 500 words"));
        for label in [
            "Introduction:",
            "Key Point 1:",
            "Key Point 2:",
            "Key Point 3:",
            "Supporting Points:",
            "Expert Opinion:",
            "Conclusion:",
        ] {
            assert!(ENGLISH_PROMPT.contains(label), "missing section {label}");
        }
    }

    #[test]
    fn test_hindi_prompt_limit() {
        assert!(HINDI_PROMPT.contains("250 shabdon"));
    }

    #[test]
    fn test_extract_gemini_text() {
        let json = serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "- Introduction: "}, {"text": "a video."}],
                        "role": "model"
                    }
                }
            ]
        });
        assert_eq!(extract_gemini_text(&json).unwrap(), "- Introduction: a video.");
    }

    #[test]
    fn test_extract_gemini_text_blocked() {
        let json = serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(extract_gemini_text(&json), Err(NotesError::Summarization(_))));
    }

    #[test]
    fn test_extract_anthropic_text() {
        let json = serde_json::json!({
            "content": [
                {
                    "type": "text",
                    "text": "Here is the summary."
                }
            ]
        });
        assert_eq!(extract_anthropic_text(&json).unwrap(), "Here is the summary.");
    }

    #[test]
    fn test_extract_anthropic_text_empty() {
        let json = serde_json::json!({"content": []});
        assert!(extract_anthropic_text(&json).is_err());
    }

    #[test]
    fn test_extract_openai_text() {
        let json = serde_json::json!({
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "Summary of the video."
                    }
                }
            ]
        });
        assert_eq!(extract_openai_text(&json).unwrap(), "Summary of the video.");
    }

    #[test]
    fn test_extract_openai_text_empty() {
        let json = serde_json::json!({"choices": []});
        assert!(extract_openai_text(&json).is_err());
    }

    #[test]
    fn test_api_key_missing() {
        let err = api_key(&["YTNOTES_TEST_KEY_THAT_IS_NEVER_SET"]).unwrap_err();
        assert!(matches!(err, NotesError::MissingApiKey("YTNOTES_TEST_KEY_THAT_IS_NEVER_SET")));
    }
}
