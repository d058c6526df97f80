use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use studyforge_audio::{AudioSession, AudioState, AudioView, TickOutcome};
use studyforge_content as content;
use studyforge_core::{Document, DocumentKind, FileUpload, ResultsTab, StudyError, ViewState};
use studyforge_flashcards::{self as flashcards, CardView, FlashcardDeck};
use studyforge_search::{self as search, ResultSet};

use crate::keys::Key;
use crate::upload::classify;

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub view: ViewState,
    pub document: Option<Document>,
    pub summary: String,
    pub preview: String,
    pub active_tab: ResultsTab,
    pub card: Option<CardView>,
    pub deck_size: usize,
    pub audio: AudioView,
    /// True while a playback tick task is alive.
    pub audio_ticking: bool,
    pub search: Option<ResultSet>,
}

/// Session state and its transitions. No timers, no I/O.
///
/// Failed operations leave every field untouched.
#[derive(Debug, Clone)]
pub struct SessionState {
    view: ViewState,
    document: Option<Document>,
    summary: String,
    deck: FlashcardDeck,
    audio: AudioSession,
    tab: ResultsTab,
    last_search: Option<ResultSet>,
    reject_while_processing: bool,
}

impl SessionState {
    pub fn new(audio_duration: Duration, reject_while_processing: bool) -> Self {
        Self {
            view: ViewState::Idle,
            document: None,
            summary: String::new(),
            deck: FlashcardDeck::default(),
            audio: AudioSession::new(audio_duration),
            tab: ResultsTab::default(),
            last_search: None,
            reject_while_processing,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Empty until a document finishes processing.
    pub fn extracted_text(&self) -> &str {
        self.document
            .as_ref()
            .map(|d| d.extracted_text.as_str())
            .unwrap_or("")
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn deck(&self) -> &FlashcardDeck {
        &self.deck
    }

    pub fn audio(&self) -> &AudioSession {
        &self.audio
    }

    pub fn active_tab(&self) -> ResultsTab {
        self.tab
    }

    // -- Upload controller --------------------------------------------------

    /// Validate and start processing `upload`, replacing the live document.
    ///
    /// While already processing this is refused, unless the restart policy is
    /// active, in which case the pending document is replaced.
    pub fn begin_upload(&mut self, upload: &FileUpload) -> Result<DocumentKind, StudyError> {
        let kind = classify(upload)?;
        let next_view = match self.view.start_processing() {
            Ok(view) => view,
            Err(StudyError::UploadInProgress) if !self.reject_while_processing => {
                info!(file = %upload.name, "Restarting processing with new upload");
                ViewState::Processing
            }
            Err(e) => return Err(e),
        };

        self.view = next_view;
        self.document = Some(Document::new(upload.name.clone(), kind));
        self.summary.clear();
        self.deck = FlashcardDeck::default();
        self.audio.reset();
        self.tab = ResultsTab::default();
        self.last_search = None;
        Ok(kind)
    }

    /// Fill in the extracted text and summary, then reveal results.
    ///
    /// Returns false when no processing was pending.
    pub fn complete_processing(&mut self) -> bool {
        if self.view != ViewState::Processing {
            return false;
        }
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        doc.extracted_text = content::extract(&doc.name);
        self.summary = content::summarize(&doc.extracted_text);
        self.view = self.view.finish_processing();
        debug!(file = %doc.name, chars = doc.extracted_text.len(), "Processing complete");
        true
    }

    // -- Flashcards ---------------------------------------------------------

    /// Replace the deck. Returns the new deck size.
    pub fn generate_flashcards(&mut self) -> Result<usize, StudyError> {
        self.deck = flashcards::generate(self.extracted_text())?;
        Ok(self.deck.len())
    }

    pub fn flip(&mut self) -> Option<CardView> {
        self.deck.flip();
        self.deck.view()
    }

    pub fn next_card(&mut self) -> Option<CardView> {
        self.deck.next();
        self.deck.view()
    }

    pub fn previous_card(&mut self) -> Option<CardView> {
        self.deck.previous();
        self.deck.view()
    }

    /// Arrow keys and space need a deck; escape always un-flips.
    pub fn handle_key(&mut self, key: Key) -> Option<CardView> {
        match key {
            Key::Escape => self.deck.unflip(),
            Key::ArrowLeft => self.deck.previous(),
            Key::ArrowRight => self.deck.next(),
            Key::Space => self.deck.flip(),
        }
        self.deck.view()
    }

    // -- Audio --------------------------------------------------------------

    pub fn begin_audio(&mut self) -> Result<(), StudyError> {
        let text = self.extracted_text().to_string();
        self.audio.generate(&text)
    }

    pub fn arm_audio(&mut self) -> bool {
        self.audio.arm()
    }

    pub fn toggle_audio(&mut self) -> AudioState {
        self.audio.toggle()
    }

    pub fn tick_audio(&mut self, step: Duration) -> TickOutcome {
        self.audio.tick(step)
    }

    // -- Search and navigation ----------------------------------------------

    pub fn search(&mut self, query: &str) -> Result<ResultSet, StudyError> {
        let set = search::search(query, self.extracted_text())?;
        self.last_search = Some(set.clone());
        Ok(set)
    }

    pub fn select_tab(&mut self, tab: ResultsTab) {
        self.tab = tab;
    }

    /// Back to `Idle` with nothing loaded.
    pub fn reset(&mut self) {
        self.view = self.view.reset();
        self.document = None;
        self.summary.clear();
        self.deck = FlashcardDeck::default();
        self.audio.reset();
        self.tab = ResultsTab::default();
        self.last_search = None;
    }

    pub fn snapshot(&self, audio_ticking: bool) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view,
            document: self.document.clone(),
            summary: self.summary.clone(),
            preview: content::preview(self.extracted_text()),
            active_tab: self.tab,
            card: self.deck.view(),
            deck_size: self.deck.len(),
            audio: self.audio.view(),
            audio_ticking,
            search: self.last_search.clone(),
        }
    }
}
