//! Interactive console: one command per stdin line.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use studyforge_core::{FileUpload, ResultsTab, StudyError};
use studyforge_session::{Key, SessionHandle};

use crate::render;

pub const HELP: &str = "commands: upload <name> [mime] | cards | flip | next | prev | audio | play | \
search <query> | tab <summary|flashcards|audio|search> | key <escape|left|right|space> | \
summary | status | reset | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Upload(FileUpload),
    Cards,
    Flip,
    Next,
    Prev,
    Audio,
    Play,
    Search(String),
    Tab(ResultsTab),
    Key(Key),
    Summary,
    Status,
    Reset,
    Help,
    Quit,
}

/// Guess a MIME type from the extension, as a browser file picker would.
pub fn guess_mime(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else if lower.ends_with(".md") {
        "text/markdown"
    } else {
        ""
    }
}

pub fn parse(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let cmd = match word.to_lowercase().as_str() {
        "upload" => {
            let mut parts = rest.split_whitespace();
            let name = parts.next().ok_or("usage: upload <name> [mime]")?;
            let mime = parts.next().unwrap_or_else(|| guess_mime(name));
            ConsoleCommand::Upload(FileUpload::new(name, mime))
        }
        "cards" => ConsoleCommand::Cards,
        "flip" => ConsoleCommand::Flip,
        "next" => ConsoleCommand::Next,
        "prev" | "previous" => ConsoleCommand::Prev,
        "audio" => ConsoleCommand::Audio,
        "play" | "pause" => ConsoleCommand::Play,
        // Blank queries go through so the session can refuse them.
        "search" => ConsoleCommand::Search(rest.to_string()),
        "tab" => ConsoleCommand::Tab(
            ResultsTab::parse(rest).ok_or_else(|| format!("unknown tab '{rest}'"))?,
        ),
        "key" => ConsoleCommand::Key(
            Key::parse(rest).ok_or_else(|| format!("unknown key '{rest}'"))?,
        ),
        "summary" => ConsoleCommand::Summary,
        "status" => ConsoleCommand::Status,
        "reset" => ConsoleCommand::Reset,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "" => return Err(String::new()),
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(cmd)
}

pub async fn run(handle: SessionHandle) -> Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let cmd = match parse(&line) {
            Ok(cmd) => cmd,
            Err(msg) if msg.is_empty() => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };
        if cmd == ConsoleCommand::Quit {
            break;
        }
        execute(&handle, cmd).await?;
    }
    Ok(())
}

/// Session errors already reached the user as warning toasts, so only the
/// channel closing is fatal here.
async fn execute(handle: &SessionHandle, cmd: ConsoleCommand) -> Result<()> {
    match cmd {
        ConsoleCommand::Upload(upload) => {
            if refused_unless_closed(handle.submit(upload).await)?.is_some() {
                println!("processing...");
            }
        }
        ConsoleCommand::Cards => {
            if refused_unless_closed(handle.generate_flashcards().await)?.is_some() {
                print_card(handle.snapshot().await?.card.as_ref());
            }
        }
        ConsoleCommand::Flip => print_card(handle.flip().await?.as_ref()),
        ConsoleCommand::Next => print_card(handle.next_card().await?.as_ref()),
        ConsoleCommand::Prev => print_card(handle.previous_card().await?.as_ref()),
        ConsoleCommand::Key(key) => print_card(handle.key(key).await?.as_ref()),
        ConsoleCommand::Audio => {
            refused_unless_closed(handle.generate_audio().await)?;
        }
        ConsoleCommand::Play => {
            handle.toggle_audio().await?;
            println!("{}", render::player_line(&handle.snapshot().await?.audio));
        }
        ConsoleCommand::Search(query) => {
            if let Some(set) = refused_unless_closed(handle.search(query).await)? {
                for line in render::search_lines(&set) {
                    println!("{line}");
                }
            }
        }
        ConsoleCommand::Tab(tab) => handle.select_tab(tab).await?,
        ConsoleCommand::Summary => {
            let snap = handle.snapshot().await?;
            if snap.summary.is_empty() {
                println!("no summary yet");
            } else {
                println!("{}", render::plain_summary(&snap.summary));
            }
        }
        ConsoleCommand::Status => {
            for line in render::status_lines(&handle.snapshot().await?) {
                println!("{line}");
            }
            for toast in handle.notifier().active().await {
                println!("  toast: {}", toast.notification.message);
            }
        }
        ConsoleCommand::Reset => handle.reset().await?,
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit => {}
    }
    Ok(())
}

/// `None` for a refused operation, whose warning toast is already out.
/// A closed session channel is passed up.
fn refused_unless_closed<T>(result: Result<T, StudyError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ StudyError::ChannelClosed(_)) => Err(e.into()),
        Err(_) => Ok(None),
    }
}

fn print_card(card: Option<&studyforge_flashcards::CardView>) {
    match card {
        Some(card) => {
            for line in render::card_lines(card) {
                println!("{line}");
            }
        }
        None => println!("no flashcards yet"),
    }
}
