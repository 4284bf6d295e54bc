pub mod config;
pub mod error;
pub mod event;
pub mod output;
pub mod session;
pub mod summarize;
pub mod translate;
pub mod youtube;

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use error::{NotesError, Result};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"v=([^&]+)").expect("valid regex"));

/// Language of a transcript, a summary or the displayed notes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// ISO 639-1 code used for caption tracks and translation
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }

    /// Name of the downloaded notes file
    pub fn file_name(&self) -> &'static str {
        match self {
            Language::English => "summarized_notes_english.txt",
            Language::Hindi => "summarized_notes_hindi.txt",
        }
    }

    /// Summarization prompt for transcripts in this language
    pub fn prompt(&self) -> &'static str {
        match self {
            Language::English => summarize::ENGLISH_PROMPT,
            Language::Hindi => summarize::HINDI_PROMPT,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Language {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            other => Err(NotesError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Extract the video ID from a watch URL: the value of the `v=` parameter up to the next `&`
pub fn extract_video_id(link: &str) -> Result<String> {
    let link = link.trim();
    VIDEO_ID_RE
        .captures(link)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| NotesError::InvalidLink(link.to_string()))
}

/// Embeddable player URL for a video
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}
