use std::str::FromStr;

use crate::{Language, NotesError};

/// User interaction that drives a session transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LinkEntered(String),
    VideoLanguageSelected(Language),
    GenerateClicked,
    NoteLanguageSelected(Language),
    DownloadClicked,
}

/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(Event),
    Show,
    Help,
    Quit,
    Empty,
}

pub const USAGE: &str = "\
Commands:
  link <url>           enter a YouTube video link (a bare URL works too)
  video-lang <lang>    select the video language: english | hindi
  generate             generate notes for the current link
  note-lang <lang>     select the notes language: english | hindi
  download             save the displayed notes as a text file
  show                 show the current notes again
  help                 show this message
  quit                 end the session";

impl FromStr for Input {
    type Err = NotesError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Input::Empty);
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let input = match command.to_ascii_lowercase().as_str() {
            "link" => Input::Event(Event::LinkEntered(arg.to_string())),
            "video-lang" | "lang" => Input::Event(Event::VideoLanguageSelected(arg.parse()?)),
            "generate" | "gen" => Input::Event(Event::GenerateClicked),
            "note-lang" | "notes" => Input::Event(Event::NoteLanguageSelected(arg.parse()?)),
            "download" | "save" => Input::Event(Event::DownloadClicked),
            "show" => Input::Show,
            "help" | "?" => Input::Help,
            "quit" | "exit" => Input::Quit,
            _ if line.contains("://") || line.contains("v=") => Input::Event(Event::LinkEntered(line.to_string())),
            other => return Err(NotesError::UnknownCommand(other.to_string())),
        };
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> Event {
        match line.parse::<Input>().unwrap() {
            Input::Event(event) => event,
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[test]
    fn test_link_command() {
        assert_eq!(
            event("link https://www.youtube.com/watch?v=abc123"),
            Event::LinkEntered("https://www.youtube.com/watch?v=abc123".to_string())
        );
    }

    #[test]
    fn test_link_command_without_url_clears_link() {
        assert_eq!(event("link"), Event::LinkEntered(String::new()));
    }

    #[test]
    fn test_bare_url_is_link() {
        assert_eq!(
            event("https://x/watch?v=abc123&t=5"),
            Event::LinkEntered("https://x/watch?v=abc123&t=5".to_string())
        );
    }

    #[test]
    fn test_language_selection() {
        assert_eq!(event("video-lang hindi"), Event::VideoLanguageSelected(Language::Hindi));
        assert_eq!(event("note-lang EN"), Event::NoteLanguageSelected(Language::English));
    }

    #[test]
    fn test_bad_language() {
        assert!(matches!(
            "note-lang klingon".parse::<Input>(),
            Err(NotesError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_buttons() {
        assert_eq!(event("generate"), Event::GenerateClicked);
        assert_eq!(event("  Download "), Event::DownloadClicked);
    }

    #[test]
    fn test_session_commands() {
        assert_eq!("show".parse::<Input>().unwrap(), Input::Show);
        assert_eq!("help".parse::<Input>().unwrap(), Input::Help);
        assert_eq!("exit".parse::<Input>().unwrap(), Input::Quit);
        assert_eq!("   ".parse::<Input>().unwrap(), Input::Empty);
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!("frobnicate".parse::<Input>(), Err(NotesError::UnknownCommand(ref c)) if c == "frobnicate"));
    }
}
