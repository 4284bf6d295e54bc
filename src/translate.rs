use async_trait::async_trait;
use log::debug;

use crate::{Language, NotesError, Result};

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Longest text sent in a single translation request
const MAX_CHUNK_CHARS: usize = 4500;

/// Machine translation between the supported note languages
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, src: Language, dest: Language) -> Result<String>;
}

/// Google Translate through its public `gtx` endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    client: reqwest::Client,
}

impl GoogleTranslate {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn translate_chunk(&self, chunk: &str, src: Language, dest: Language) -> Result<String> {
        let resp = self
            .client
            .get(TRANSLATE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", src.code()),
                ("tl", dest.code()),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(translation_error)?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(NotesError::Translation(format!("translate API returned {status}")));
        }

        let json: serde_json::Value = resp.json().await.map_err(translation_error)?;
        extract_translation(&json)
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str, src: Language, dest: Language) -> Result<String> {
        if src == dest || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let chunks = split_chunks(text, MAX_CHUNK_CHARS);
        debug!("Translating {} chars {src} -> {dest} in {} chunk(s)", text.len(), chunks.len());

        let mut translated = String::with_capacity(text.len());
        for chunk in &chunks {
            let (lead, body, trail) = split_edges(chunk);
            translated.push_str(lead);
            if !body.is_empty() {
                translated.push_str(&self.translate_chunk(body, src, dest).await?);
            }
            translated.push_str(trail);
        }
        Ok(translated)
    }
}

fn translation_error(e: reqwest::Error) -> NotesError {
    NotesError::Translation(e.to_string())
}

/// Response shape: `[[["translated", "original", ...], ...], ...]`
fn extract_translation(json: &serde_json::Value) -> Result<String> {
    let sentences = json
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| NotesError::Translation("unexpected translate API response format".to_string()))?;

    Ok(sentences
        .iter()
        .filter_map(|s| s.get(0)?.as_str())
        .collect::<Vec<_>>()
        .join(""))
}

/// Split after line breaks into chunks of at most `max_chars` characters. Each chunk keeps
/// its own line breaks, so concatenating the chunks gives back `text` exactly.
/// A single line longer than the limit is hard-split on char boundaries.
fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len > 0 && current_len + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_chars {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

/// Leading whitespace, body, trailing whitespace. The endpoint trims edges, so they are
/// carried around the request rather than through it.
fn split_edges(chunk: &str) -> (&str, &str, &str) {
    let body_start = chunk.len() - chunk.trim_start().len();
    let body_end = chunk.trim_end().len();
    if body_start >= body_end {
        return (chunk, "", "");
    }
    (&chunk[..body_start], &chunk[body_start..body_end], &chunk[body_end..])
}
