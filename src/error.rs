use thiserror::Error;

/// Errors surfaced to the user by a session transition
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("invalid YouTube link, no video ID found in: {0}")]
    InvalidLink(String),

    #[error("no transcript found for video {video_id} in language '{language}'; ensure the video has captions enabled")]
    NoTranscript { video_id: String, language: String },

    #[error("transcripts are disabled for video {0}; try a different video")]
    TranscriptsDisabled(String),

    #[error("failed to generate a summary: {0}")]
    Summarization(String),

    #[error("failed to translate notes: {0}")]
    Translation(String),

    #[error("unexpected error from transcript service: {0}")]
    UnknownService(String),

    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    #[error("unknown language '{0}' (expected english or hindi)")]
    UnknownLanguage(String),

    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("no notes to download; generate a summary first")]
    NothingToDownload,

    #[error("notes already downloaded")]
    AlreadyDownloaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotesError>;
