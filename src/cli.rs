use clap::Parser;
use std::path::PathBuf;

use ytnotes::Language;

#[derive(Parser)]
#[command(
    name = "ytnotes",
    about = "Summarize a YouTube video's captions into notes",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL to start the session with
    pub url: Option<String>,

    /// Language of the video's captions and of the generated summary
    #[arg(short = 'l', long, value_enum)]
    pub video_lang: Option<Language>,

    /// Language the notes are displayed and downloaded in
    #[arg(short, long, value_enum)]
    pub note_lang: Option<Language>,

    /// LLM model for summarization (gemini-*, claude-*, or an OpenAI model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Directory downloaded notes are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Timeout in seconds for each call to an external service
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Show config and service details
    #[arg(short, long)]
    pub verbose: bool,
}
