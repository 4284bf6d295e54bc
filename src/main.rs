use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::Result;
use log::{debug, info, warn};

use ytnotes::event::{Event, Input, USAGE};
use ytnotes::session::{Generate, Outcome, Services, Session};
use ytnotes::summarize::{DEFAULT_MODEL, LlmSummarizer};
use ytnotes::translate::GoogleTranslate;
use ytnotes::youtube::YoutubeCaptions;

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytnotes.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytnotes")
        .join("logs")
}

fn build_after_help() -> String {
    let key_line = |var: &str| match std::env::var(var) {
        Ok(v) if !v.is_empty() => format!("  \x1b[32m✅\x1b[0m {var}"),
        _ => format!("  \x1b[31m❌\x1b[0m {var}"),
    };

    format!(
        "\nAPI KEYS:\n{}\n{}\n{}\n\n{USAGE}\n\nConfig: {}\nLogs are written to: {}",
        key_line("GOOGLE_API_KEY"),
        key_line("ANTHROPIC_API_KEY"),
        key_line("OPENAI_API_KEY"),
        ytnotes::config::config_path().display(),
        log_dir().join("ytnotes.log").display()
    )
}

/// Print the session as the user sees it after an interaction
async fn render(session: &Session) {
    let state = session.state();

    println!();
    if state.video_link.is_empty() {
        println!("Video: (no link entered)");
    } else {
        match ytnotes::extract_video_id(&state.video_link) {
            Ok(id) => println!("Video: {}\nEmbed: {}", state.video_link, ytnotes::embed_url(&id)),
            Err(e) => println!("Error: {e}"),
        }
    }
    println!(
        "Video language: {}    Notes language: {}",
        state.video_language, state.note_language
    );

    match session.render_summary().await {
        Ok(Some(notes)) => {
            println!("\nDetailed Notes ({}):\n{}", notes.language, notes.text);
            if state.download_available() {
                println!(
                    "\n[download] Download Notes as {} Text File ({})",
                    notes.language,
                    notes.language.file_name()
                );
            }
        }
        Ok(None) => {}
        Err(e) => println!("\nError: {e}"),
    }
}

fn prompt(interactive: bool) {
    if interactive {
        print!("> ");
        let _ = io::stdout().flush();
    }
}

/// Apply one event and report what happened; errors are shown and the session continues
async fn dispatch(session: &mut Session, event: &Event, output_dir: &Path) {
    debug!("Handling event: {event:?}");
    match session.handle(event, output_dir).await {
        Ok(Outcome::Updated) => {}
        Ok(Outcome::Generate(Generate::Generated)) => println!("Notes generated."),
        Ok(Outcome::Generate(Generate::Skipped(reason))) => println!("Nothing to generate: {reason}."),
        Ok(Outcome::Downloaded(path)) => println!("Notes saved to {}", path.display()),
        Err(e) => {
            warn!("Event {event:?} failed: {e}");
            println!("Error: {e}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = ytnotes::config::Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        ytnotes::config::Config::default()
    });

    // CLI flags take priority over config
    let model = cli
        .model
        .clone()
        .or_else(|| config.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let timeout = Duration::from_secs(cli.timeout.unwrap_or_else(|| config.timeout_secs()));
    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    if cli.verbose {
        let config_path = ytnotes::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!("Model: {model}\nTimeout: {timeout:?}\nOutput: {}", output_dir.display());
    }

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let mut session = Session::new(Services {
        transcripts: Box::new(YoutubeCaptions::new(client.clone())),
        summarizer: Box::new(LlmSummarizer::new(client.clone(), model)),
        translator: Box::new(GoogleTranslate::new(client)),
    });

    // Replay startup options as the first interactions of the session
    let mut startup = Vec::new();
    if let Some(lang) = cli.video_lang.or(config.default_video_language) {
        startup.push(Event::VideoLanguageSelected(lang));
    }
    if let Some(lang) = cli.note_lang.or(config.default_note_language) {
        startup.push(Event::NoteLanguageSelected(lang));
    }
    if let Some(ref url) = cli.url {
        startup.push(Event::LinkEntered(url.trim().to_string()));
    }
    for event in &startup {
        dispatch(&mut session, event, &output_dir).await;
    }

    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("YouTube Video Summarizer (type 'help' for commands)");
    }
    render(&session).await;
    prompt(interactive);

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.parse::<Input>() {
            Ok(Input::Event(event)) => {
                dispatch(&mut session, &event, &output_dir).await;
                render(&session).await;
            }
            Ok(Input::Show) => render(&session).await,
            Ok(Input::Help) => println!("{USAGE}"),
            Ok(Input::Quit) => break,
            Ok(Input::Empty) => {}
            Err(e) => println!("Error: {e}"),
        }
        prompt(interactive);
    }

    info!("Session ended");
    Ok(())
}
