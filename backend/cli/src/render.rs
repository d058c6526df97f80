//! Terminal output: toast lines, cards, player, search results.

use studyforge_audio::AudioView;
use studyforge_core::{Notification, Severity};
use studyforge_flashcards::CardView;
use studyforge_search::ResultSet;
use studyforge_session::SessionSnapshot;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

pub fn toast_line(n: &Notification, color: bool) -> String {
    let (glyph, tint, label) = match n.severity {
        Severity::Success => ("✔", GREEN, "OK"),
        Severity::Warning => ("⚠", YELLOW, "WARN"),
        Severity::Info => ("ℹ", CYAN, "INFO"),
    };
    if color {
        format!("{tint}{BOLD}{glyph}{RESET} {}", n.message)
    } else {
        format!("{label}: {}", n.message)
    }
}

pub fn card_lines(card: &CardView) -> Vec<String> {
    let face = if card.is_flipped {
        format!("A: {}", card.answer)
    } else {
        format!("Q: {}", card.question)
    };
    vec![format!("[{}]", card.counter), face]
}

/// A 20-cell progress bar followed by the clock.
pub fn player_line(audio: &AudioView) -> String {
    let filled = ((audio.percentage / 100.0) * 20.0).floor() as usize;
    let filled = filled.min(20);
    format!(
        "{:?} [{}{}] {}",
        audio.state,
        "#".repeat(filled),
        "-".repeat(20 - filled),
        audio.time
    )
}

pub fn search_lines(set: &ResultSet) -> Vec<String> {
    set.render_lines()
}

/// Summary HTML flattened for the terminal.
pub fn plain_summary(html: &str) -> String {
    html.replace("<br>", "\n")
        .replace("<strong>", "")
        .replace("</strong>", "")
        .replace("<em>", "")
        .replace("</em>", "")
}

pub fn status_lines(snap: &SessionSnapshot) -> Vec<String> {
    let mut lines = vec![format!("view: {}  tab: {}", snap.view, snap.active_tab)];
    if let Some(doc) = &snap.document {
        lines.push(format!("document: {} ({:?})", doc.name, doc.kind));
    }
    if let Some(card) = &snap.card {
        lines.extend(card_lines(card));
    }
    lines.push(player_line(&snap.audio));
    lines
}
