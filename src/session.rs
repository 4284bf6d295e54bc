use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::event::Event;
use crate::output::NotesFile;
use crate::summarize::Summarizer;
use crate::translate::Translator;
use crate::youtube::TranscriptProvider;
use crate::{Language, NotesError, Result, extract_video_id};

/// Everything remembered between interactions of one user session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub video_link: String,
    pub last_video_link: String,
    pub video_language: Language,
    pub note_language: Language,
    pub summary: Option<String>,
    pub summary_language: Language,
    pub has_downloaded: bool,
}

/// Session phase, derived from [`SessionState`] fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LinkChanged,
    SummaryReady,
    Downloaded,
}

/// Phase of `state` when `incoming_link` is the link currently entered
pub fn phase(state: &SessionState, incoming_link: &str) -> Phase {
    if incoming_link != state.last_video_link {
        return Phase::LinkChanged;
    }
    match (&state.summary, state.has_downloaded) {
        (None, _) => Phase::Idle,
        (Some(_), false) => Phase::SummaryReady,
        (Some(_), true) => Phase::Downloaded,
    }
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        phase(self, &self.video_link)
    }

    /// A download is offered only for a summary that has not been saved yet
    pub fn download_available(&self) -> bool {
        self.summary.is_some() && !self.has_downloaded
    }
}

/// Why a generate request made no service calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoLink,
    SummaryCached,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoLink => write!(f, "enter a YouTube link first"),
            SkipReason::SummaryCached => write!(f, "notes for this video are already generated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generate {
    Generated,
    Skipped(SkipReason),
}

/// Notes as they are displayed: the summary or its translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotes {
    pub language: Language,
    pub text: String,
}

/// Result of handling one input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Generate(Generate),
    Downloaded(PathBuf),
}

/// External collaborators a session calls out to
pub struct Services {
    pub transcripts: Box<dyn TranscriptProvider>,
    pub summarizer: Box<dyn Summarizer>,
    pub translator: Box<dyn Translator>,
}

/// Session state machine: applies transitions and invokes services when they require it
pub struct Session {
    state: SessionState,
    services: Services,
}

impl Session {
    pub fn new(services: Services) -> Self {
        Self {
            state: SessionState::default(),
            services,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply one input event; the handler runs to completion before the next event
    pub async fn handle(&mut self, event: &Event, output_dir: &Path) -> Result<Outcome> {
        match event {
            Event::LinkEntered(link) => {
                self.set_link(link);
                Ok(Outcome::Updated)
            }
            Event::VideoLanguageSelected(lang) => {
                self.select_video_language(*lang);
                Ok(Outcome::Updated)
            }
            Event::GenerateClicked => {
                let lang = self.state.video_language;
                self.request_generate(lang).await.map(Outcome::Generate)
            }
            Event::NoteLanguageSelected(lang) => {
                self.set_note_language(*lang);
                Ok(Outcome::Updated)
            }
            Event::DownloadClicked => self.request_download(output_dir).await.map(Outcome::Downloaded),
        }
    }

    /// Record the entered link; a different link drops the summary and re-arms download
    pub fn set_link(&mut self, new_link: &str) {
        self.state.video_link = new_link.to_string();
        if new_link != self.state.last_video_link {
            info!("Video link changed to '{new_link}', clearing notes");
            self.state.summary = None;
            self.state.has_downloaded = false;
            self.state.last_video_link = new_link.to_string();
        }
    }

    pub fn select_video_language(&mut self, language: Language) {
        self.state.video_language = language;
    }

    /// Fetch the transcript and summarize it, unless a summary is already cached.
    /// A link that is empty or only whitespace counts as no link and is skipped, not
    /// reported as invalid. State is only written once every step has succeeded.
    pub async fn request_generate(&mut self, video_language: Language) -> Result<Generate> {
        if self.state.video_link.trim().is_empty() {
            return Ok(Generate::Skipped(SkipReason::NoLink));
        }
        if self.state.summary.is_some() {
            debug!("Summary already present, skipping generation");
            return Ok(Generate::Skipped(SkipReason::SummaryCached));
        }

        let video_id = extract_video_id(&self.state.video_link)?;
        info!("Generating {video_language} notes for video {video_id}");

        let transcript = self.services.transcripts.fetch(&video_id, video_language.code()).await?;
        debug!("Transcript for {video_id}: {} chars", transcript.len());

        let summary = self
            .services
            .summarizer
            .summarize(video_language.prompt(), &transcript)
            .await?;

        self.state.summary = Some(summary);
        self.state.summary_language = video_language;
        self.state.has_downloaded = false;
        Ok(Generate::Generated)
    }

    /// Switch the display language. The summary is dropped on any change, so notes in the
    /// new language require generating again.
    pub fn set_note_language(&mut self, new_language: Language) {
        if new_language != self.state.note_language {
            info!("Note language changed to {new_language}, clearing notes");
            self.state.note_language = new_language;
            self.state.summary = None;
            self.state.has_downloaded = false;
        }
    }

    /// Notes in the display language, translated on every call when it differs from the
    /// summary's language
    pub async fn render_summary(&self) -> Result<Option<RenderedNotes>> {
        let Some(summary) = &self.state.summary else {
            return Ok(None);
        };

        let language = self.state.note_language;
        let text = if language == self.state.summary_language {
            summary.clone()
        } else {
            self.services
                .translator
                .translate(summary, self.state.summary_language, language)
                .await?
        };

        Ok(Some(RenderedNotes { language, text }))
    }

    /// Save the rendered notes into `dir`; allowed once per displayed summary
    pub async fn request_download(&mut self, dir: &Path) -> Result<PathBuf> {
        if self.state.has_downloaded {
            return Err(NotesError::AlreadyDownloaded);
        }
        let notes = self.render_summary().await?.ok_or(NotesError::NothingToDownload)?;

        let path = NotesFile::new(&notes.text, notes.language).save(dir)?;
        self.state.has_downloaded = true;
        info!("Notes downloaded to {}", path.display());
        Ok(path)
    }
}
