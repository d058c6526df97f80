use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use studyforge_audio::{AudioState, TickOutcome, Ticker};
use studyforge_config::{StudyForgeConfig, Timings};
use studyforge_core::{FileUpload, ResultsTab, Severity, StudyError};
use studyforge_flashcards::CardView;
use studyforge_logging::{SessionEvent, SessionEventLogger};
use studyforge_notify::{Notifier, ToastEvent, ToastTimings};
use studyforge_search::ResultSet;

use crate::keys::Key;
use crate::state::{SessionSnapshot, SessionState};
use crate::timers::Delayed;
use crate::{MSG_AUDIO_READY, MSG_FLASHCARDS, MSG_PROCESSED, MSG_SEARCH};

const COMMAND_BUFFER_SIZE: usize = 64;
const TIMER_BUFFER_SIZE: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub timings: Timings,
    pub reject_while_processing: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            reject_while_processing: true,
        }
    }
}

impl From<&StudyForgeConfig> for SessionConfig {
    fn from(config: &StudyForgeConfig) -> Self {
        Self {
            timings: config.timings(),
            reject_while_processing: config.reject_while_processing(),
        }
    }
}

type Reply<T> = oneshot::Sender<T>;

/// Requests from handles to the actor.
#[derive(Debug)]
enum Command {
    Submit(FileUpload, Reply<Result<(), StudyError>>),
    GenerateFlashcards(Reply<Result<usize, StudyError>>),
    Flip(Reply<Option<CardView>>),
    Next(Reply<Option<CardView>>),
    Previous(Reply<Option<CardView>>),
    Key(Key, Reply<Option<CardView>>),
    GenerateAudio(Reply<Result<(), StudyError>>),
    ToggleAudio(Reply<AudioState>),
    Search(String, Reply<Result<ResultSet, StudyError>>),
    SelectTab(ResultsTab, Reply<()>),
    Reset(Reply<()>),
    Snapshot(Reply<SessionSnapshot>),
}

/// Timer callbacks. Each carries the epoch it was scheduled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    ProcessingDone { epoch: u64 },
    AudioArmed { epoch: u64 },
    AudioTick { epoch: u64 },
}

/// Owns the [`SessionState`] and every timer that mutates it.
pub struct SessionActor {
    session_id: Uuid,
    state: SessionState,
    timings: Timings,
    notifier: Notifier,
    commands: mpsc::Receiver<Command>,
    timer_tx: mpsc::Sender<TimerEvent>,
    timer_rx: mpsc::Receiver<TimerEvent>,
    upload_epoch: u64,
    audio_epoch: u64,
    processing: Option<Delayed>,
    arming: Option<Delayed>,
    ticker: Ticker,
}

impl SessionActor {
    /// Start the actor on the current tokio runtime and return its handle.
    ///
    /// The actor stops once every handle has been dropped.
    pub fn spawn(config: SessionConfig) -> SessionHandle {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER_SIZE);
        let (timer_tx, timer_rx) = mpsc::channel(TIMER_BUFFER_SIZE);
        let notifier = Notifier::new(ToastTimings::from(config.timings));
        let session_id = Uuid::new_v4();

        let actor = SessionActor {
            session_id,
            state: SessionState::new(
                config.timings.audio_duration,
                config.reject_while_processing,
            ),
            timings: config.timings,
            notifier: notifier.clone(),
            commands,
            timer_tx,
            timer_rx,
            upload_epoch: 0,
            audio_epoch: 0,
            processing: None,
            arming: None,
            ticker: Ticker::idle(),
        };
        tokio::spawn(actor.run());

        SessionHandle {
            session_id,
            tx,
            notifier,
        }
    }

    async fn run(mut self) {
        info!(session_id = %self.session_id, "Session started");
        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => {
                        info!(session_id = %self.session_id, "All handles dropped, closing");
                        break;
                    }
                },
                Some(event) = self.timer_rx.recv() => self.handle_timer(event).await,
            }
        }
        self.cancel_timers();
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit(upload, reply) => {
                let result = self.submit(upload).await;
                let _ = reply.send(result);
            }
            Command::GenerateFlashcards(reply) => {
                let result = match self.state.generate_flashcards() {
                    Ok(cards) => {
                        self.log(SessionEvent::DeckGenerated { cards });
                        self.notify(MSG_FLASHCARDS, Severity::Success).await;
                        Ok(cards)
                    }
                    Err(e) => Err(self.warn(e).await),
                };
                let _ = reply.send(result);
            }
            Command::Flip(reply) => {
                let _ = reply.send(self.state.flip());
            }
            Command::Next(reply) => {
                let _ = reply.send(self.state.next_card());
            }
            Command::Previous(reply) => {
                let _ = reply.send(self.state.previous_card());
            }
            Command::Key(key, reply) => {
                let _ = reply.send(self.state.handle_key(key));
            }
            Command::GenerateAudio(reply) => {
                let result = match self.state.begin_audio() {
                    Ok(()) => {
                        self.stop_ticker();
                        self.arming = Some(Delayed::schedule(
                            self.timings.audio_arm_delay,
                            self.timer_tx.clone(),
                            TimerEvent::AudioArmed {
                                epoch: self.audio_epoch,
                            },
                        ));
                        debug!(
                            delay_ms = self.timings.audio_arm_delay.as_millis() as u64,
                            "Audio arm scheduled"
                        );
                        Ok(())
                    }
                    Err(e) => Err(self.warn(e).await),
                };
                let _ = reply.send(result);
            }
            Command::ToggleAudio(reply) => {
                let before = self.state.audio().state();
                let after = self.state.toggle_audio();
                match (before, after) {
                    (AudioState::Ready, AudioState::Playing) => self.start_ticker(),
                    (AudioState::Playing, AudioState::Ready) => self.stop_ticker(),
                    _ => debug!(state = ?after, "Toggle ignored; audio not armed"),
                }
                let _ = reply.send(after);
            }
            Command::Search(query, reply) => {
                let result = match self.state.search(&query) {
                    Ok(set) => {
                        self.log(SessionEvent::SearchCompleted {
                            query: set.query.clone(),
                            results: set.len(),
                        });
                        self.notify(MSG_SEARCH, Severity::Success).await;
                        Ok(set)
                    }
                    Err(e) => Err(self.warn(e).await),
                };
                let _ = reply.send(result);
            }
            Command::SelectTab(tab, reply) => {
                self.state.select_tab(tab);
                let _ = reply.send(());
            }
            Command::Reset(reply) => {
                self.cancel_timers();
                self.upload_epoch += 1;
                self.state.reset();
                self.log(SessionEvent::SessionReset);
                let _ = reply.send(());
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot(self.ticker.is_running()));
            }
        }
    }

    async fn submit(&mut self, upload: FileUpload) -> Result<(), StudyError> {
        let kind = match self.state.begin_upload(&upload) {
            Ok(kind) => kind,
            Err(e) => {
                self.log(SessionEvent::UploadRejected {
                    file_name: upload.name.clone(),
                    reason: e.to_string(),
                });
                return Err(self.warn(e).await);
            }
        };

        // The previous document's audio and any pending processing are gone.
        self.cancel_timers();
        self.upload_epoch += 1;
        self.processing = Some(Delayed::schedule(
            self.timings.processing_delay,
            self.timer_tx.clone(),
            TimerEvent::ProcessingDone {
                epoch: self.upload_epoch,
            },
        ));

        info!(file = %upload.name, kind = ?kind, "Upload accepted, processing");
        self.log(SessionEvent::UploadAccepted {
            file_name: upload.name,
            kind: format!("{kind:?}").to_lowercase(),
        });
        Ok(())
    }

    async fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ProcessingDone { epoch } => {
                if epoch != self.upload_epoch {
                    debug!(epoch, current = self.upload_epoch, "Stale processing timer");
                    return;
                }
                self.processing = None;
                if !self.state.complete_processing() {
                    return;
                }
                if let Some(doc) = self.state.document() {
                    let (file_name, chars) = (doc.name.clone(), doc.extracted_text.len());
                    self.log(SessionEvent::DocumentProcessed { file_name, chars });
                }
                self.notify(MSG_PROCESSED, Severity::Success).await;
            }
            TimerEvent::AudioArmed { epoch } => {
                if epoch != self.audio_epoch {
                    debug!(epoch, current = self.audio_epoch, "Stale audio arm timer");
                    return;
                }
                self.arming = None;
                if self.state.arm_audio() {
                    self.log(SessionEvent::AudioArmed {
                        duration_secs: self.timings.audio_duration.as_secs_f64(),
                    });
                    self.notify(MSG_AUDIO_READY, Severity::Success).await;
                }
            }
            TimerEvent::AudioTick { epoch } => {
                if epoch != self.audio_epoch {
                    return;
                }
                if self.state.tick_audio(self.timings.audio_tick) == TickOutcome::Finished {
                    self.stop_ticker();
                    self.log(SessionEvent::PlaybackFinished);
                }
            }
        }
    }

    fn start_ticker(&mut self) {
        self.audio_epoch += 1;
        self.ticker = Ticker::spawn(
            self.timings.audio_tick,
            self.timer_tx.clone(),
            TimerEvent::AudioTick {
                epoch: self.audio_epoch,
            },
        );
        debug!(epoch = self.audio_epoch, "Playback ticker started");
    }

    /// Cancel the tick task and invalidate ticks already queued.
    fn stop_ticker(&mut self) {
        self.ticker.cancel();
        self.audio_epoch += 1;
    }

    fn cancel_timers(&mut self) {
        self.processing = None;
        self.arming = None;
        self.stop_ticker();
    }

    async fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity).await;
    }

    /// Surface a user error as a warning toast and hand it back.
    async fn warn(&self, err: StudyError) -> StudyError {
        warn!(session_id = %self.session_id, error = %err, "Operation refused");
        self.notify(err.user_message(), Severity::Warning).await;
        err
    }

    fn log(&self, event: SessionEvent) {
        SessionEventLogger::log(self.session_id, event);
    }
}

/// Cloneable front door to a running [`SessionActor`].
#[derive(Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    tx: mpsc::Sender<Command>,
    notifier: Notifier,
}

impl SessionHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.notifier.subscribe()
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, StudyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| StudyError::ChannelClosed("session command".into()))?;
        reply_rx
            .await
            .map_err(|_| StudyError::ChannelClosed("session reply".into()))
    }

    /// Validate and start processing. Returns once `Processing` is entered.
    pub async fn submit(&self, upload: FileUpload) -> Result<(), StudyError> {
        self.request(|r| Command::Submit(upload, r)).await?
    }

    pub async fn generate_flashcards(&self) -> Result<usize, StudyError> {
        self.request(Command::GenerateFlashcards).await?
    }

    pub async fn flip(&self) -> Result<Option<CardView>, StudyError> {
        self.request(Command::Flip).await
    }

    pub async fn next_card(&self) -> Result<Option<CardView>, StudyError> {
        self.request(Command::Next).await
    }

    pub async fn previous_card(&self) -> Result<Option<CardView>, StudyError> {
        self.request(Command::Previous).await
    }

    pub async fn key(&self, key: Key) -> Result<Option<CardView>, StudyError> {
        self.request(|r| Command::Key(key, r)).await
    }

    /// Start generating audio. The player is armed after the arm delay.
    pub async fn generate_audio(&self) -> Result<(), StudyError> {
        self.request(Command::GenerateAudio).await?
    }

    pub async fn toggle_audio(&self) -> Result<AudioState, StudyError> {
        self.request(Command::ToggleAudio).await
    }

    pub async fn search(&self, query: impl Into<String>) -> Result<ResultSet, StudyError> {
        let query = query.into();
        self.request(|r| Command::Search(query, r)).await?
    }

    pub async fn select_tab(&self, tab: ResultsTab) -> Result<(), StudyError> {
        self.request(|r| Command::SelectTab(tab, r)).await
    }

    pub async fn reset(&self) -> Result<(), StudyError> {
        self.request(Command::Reset).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, StudyError> {
        self.request(Command::Snapshot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use studyforge_core::ViewState;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn text_file(name: &str) -> FileUpload {
        FileUpload::new(name, "text/plain")
    }

    async fn processed(name: &str) -> SessionHandle {
        let handle = SessionActor::spawn(SessionConfig::default());
        handle.submit(text_file(name)).await.unwrap();
        sleep(ms(2100)).await;
        handle
    }

    async fn toast_messages(handle: &SessionHandle) -> Vec<(String, Severity)> {
        handle
            .notifier()
            .active()
            .await
            .into_iter()
            .map(|t| (t.notification.message, t.notification.severity))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_upload_reaches_results() {
        let handle = SessionActor::spawn(SessionConfig::default());
        assert_eq!(handle.snapshot().await.unwrap().view, ViewState::Idle);

        handle.submit(text_file("biology_notes.txt")).await.unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Processing);
        assert_eq!(snap.document.as_ref().unwrap().extracted_text, "");

        sleep(ms(1900)).await;
        assert_eq!(handle.snapshot().await.unwrap().view, ViewState::Processing);

        sleep(ms(200)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Results);
        let doc = snap.document.unwrap();
        assert_eq!(doc.name, "biology_notes.txt");
        assert!(doc.extracted_text.starts_with("Photosynthesis"));
        assert!(snap.summary.contains("Calvin cycle."));
        assert_eq!(
            toast_messages(&handle).await,
            vec![(MSG_PROCESSED.to_string(), Severity::Success)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_upload_warns_without_state_change() {
        let handle = SessionActor::spawn(SessionConfig::default());
        let err = handle
            .submit(FileUpload::new("holiday.jpg", "image/jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::UnsupportedType { .. }));

        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Idle);
        assert!(snap.document.is_none());
        assert_eq!(
            toast_messages(&handle).await,
            vec![("Please upload a PDF or text file.".to_string(), Severity::Warning)]
        );

        sleep(ms(3000)).await;
        assert_eq!(handle.snapshot().await.unwrap().view, ViewState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_upload_while_processing_is_rejected() {
        let handle = SessionActor::spawn(SessionConfig::default());
        handle.submit(text_file("history.txt")).await.unwrap();
        sleep(ms(500)).await;
        let err = handle.submit(text_file("physics.txt")).await.unwrap_err();
        assert_eq!(err, StudyError::UploadInProgress);

        sleep(ms(1600)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Results);
        assert_eq!(snap.document.unwrap().name, "history.txt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_policy_replaces_pending_upload() {
        let handle = SessionActor::spawn(SessionConfig {
            reject_while_processing: false,
            ..Default::default()
        });
        handle.submit(text_file("history.txt")).await.unwrap();
        sleep(ms(1000)).await;
        handle.submit(text_file("physics.txt")).await.unwrap();

        // The first timer would have fired here.
        sleep(ms(1500)).await;
        assert_eq!(handle.snapshot().await.unwrap().view, ViewState::Processing);

        sleep(ms(600)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Results);
        let doc = snap.document.unwrap();
        assert_eq!(doc.name, "physics.txt");
        assert!(doc.extracted_text.starts_with("Newton's laws"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generators_need_a_document() {
        let handle = SessionActor::spawn(SessionConfig::default());
        assert_eq!(
            handle.generate_flashcards().await,
            Err(StudyError::EmptyDocument)
        );
        assert_eq!(handle.generate_audio().await, Err(StudyError::EmptyDocument));

        handle.submit(text_file("notes.txt")).await.unwrap();
        assert_eq!(
            handle.generate_flashcards().await,
            Err(StudyError::EmptyDocument)
        );
        assert_eq!(handle.snapshot().await.unwrap().view, ViewState::Processing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flashcard_session_through_handle() {
        let handle = processed("machine_learning.pdf").await;
        assert_eq!(handle.generate_flashcards().await, Ok(5));

        let card = handle.previous_card().await.unwrap().unwrap();
        assert_eq!(card.counter, "5 / 5");
        assert!(handle.flip().await.unwrap().unwrap().is_flipped);
        let card = handle.next_card().await.unwrap().unwrap();
        assert_eq!(card.counter, "1 / 5");
        assert!(!card.is_flipped);

        let card = handle.key(Key::ArrowRight).await.unwrap().unwrap();
        assert_eq!(card.counter, "2 / 5");

        // Regenerating replaces the deck and rewinds it.
        handle.generate_flashcards().await.unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.deck_size, 5);
        assert_eq!(snap.card.unwrap().counter, "1 / 5");
    }

    #[tokio::test(start_paused = true)]
    async fn test_audio_plays_to_completion() {
        let handle = processed("physics.txt").await;
        handle.generate_audio().await.unwrap();
        assert_eq!(
            handle.snapshot().await.unwrap().audio.state,
            AudioState::Generating
        );

        sleep(ms(1600)).await;
        assert_eq!(handle.snapshot().await.unwrap().audio.state, AudioState::Ready);
        assert!(toast_messages(&handle)
            .await
            .contains(&(MSG_AUDIO_READY.to_string(), Severity::Success)));

        assert_eq!(handle.toggle_audio().await, Ok(AudioState::Playing));

        sleep(ms(29_750)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.state, AudioState::Playing);
        assert_eq!(snap.audio.elapsed_secs, 29.5);
        assert!(snap.audio_ticking);

        sleep(ms(500)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.state, AudioState::Ready);
        assert_eq!(snap.audio.elapsed_secs, 0.0);
        assert_eq!(snap.audio.time, "0:00 / 0:30");
        assert!(!snap.audio_ticking);

        sleep(ms(5000)).await;
        assert_eq!(handle.snapshot().await.unwrap().audio.elapsed_secs, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_cancels_ticker_and_keeps_position() {
        let handle = processed("physics.txt").await;
        handle.generate_audio().await.unwrap();
        sleep(ms(1600)).await;

        handle.toggle_audio().await.unwrap();
        sleep(ms(2250)).await;
        assert_eq!(handle.toggle_audio().await, Ok(AudioState::Ready));

        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.elapsed_secs, 2.0);
        assert!(!snap.audio_ticking);

        sleep(ms(5000)).await;
        assert_eq!(handle.snapshot().await.unwrap().audio.elapsed_secs, 2.0);

        handle.toggle_audio().await.unwrap();
        sleep(ms(1100)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.elapsed_secs, 3.0);
        assert_eq!(snap.audio.time, "0:03 / 0:30");
    }

    #[tokio::test(start_paused = true)]
    async fn test_regenerating_audio_restarts_arm_window() {
        let handle = processed("physics.txt").await;
        handle.generate_audio().await.unwrap();
        sleep(ms(1000)).await;
        handle.generate_audio().await.unwrap();

        // The first arm would have landed at 1500 ms.
        sleep(ms(1000)).await;
        assert_eq!(
            handle.snapshot().await.unwrap().audio.state,
            AudioState::Generating
        );

        sleep(ms(600)).await;
        assert_eq!(handle.snapshot().await.unwrap().audio.state, AudioState::Ready);
        let ready_toasts = toast_messages(&handle)
            .await
            .into_iter()
            .filter(|(m, _)| m == MSG_AUDIO_READY)
            .count();
        assert_eq!(ready_toasts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_regenerating_while_playing_stops_ticker() {
        let handle = processed("physics.txt").await;
        handle.generate_audio().await.unwrap();
        sleep(ms(1600)).await;
        handle.toggle_audio().await.unwrap();
        sleep(ms(2250)).await;
        assert_eq!(handle.snapshot().await.unwrap().audio.elapsed_secs, 2.0);

        handle.generate_audio().await.unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.state, AudioState::Generating);
        assert_eq!(snap.audio.elapsed_secs, 0.0);
        assert!(!snap.audio_ticking);

        sleep(ms(1600)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.state, AudioState::Ready);
        assert!(!snap.audio_ticking);

        sleep(ms(5000)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.audio.state, AudioState::Ready);
        assert_eq!(snap.audio.elapsed_secs, 0.0);
        assert!(!snap.audio_ticking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_before_arming_is_ignored() {
        let handle = processed("physics.txt").await;
        assert_eq!(handle.toggle_audio().await, Ok(AudioState::Unarmed));
        handle.generate_audio().await.unwrap();
        assert_eq!(handle.toggle_audio().await, Ok(AudioState::Generating));
        assert!(!handle.snapshot().await.unwrap().audio_ticking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_flow() {
        let handle = SessionActor::spawn(SessionConfig::default());
        assert_eq!(handle.search("   ").await, Err(StudyError::EmptyQuery));
        assert_eq!(
            handle.search("what is F=ma?").await,
            Err(StudyError::EmptyDocument)
        );

        handle.submit(text_file("physics.txt")).await.unwrap();
        sleep(ms(2100)).await;
        let set = handle.search("what is F=ma?").await.unwrap();
        let relevances: Vec<f64> = set.results.iter().map(|r| r.relevance).collect();
        assert_eq!(relevances, vec![0.95, 0.87, 0.74]);
        assert!(toast_messages(&handle)
            .await
            .contains(&(MSG_SEARCH.to_string(), Severity::Success)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_processing_cancels_it() {
        let handle = SessionActor::spawn(SessionConfig::default());
        handle.submit(text_file("biology.txt")).await.unwrap();
        sleep(ms(1000)).await;
        handle.reset().await.unwrap();

        sleep(ms(3000)).await;
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Idle);
        assert!(snap.document.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_upload_stops_playback() {
        let handle = processed("physics.txt").await;
        handle.generate_flashcards().await.unwrap();
        handle.generate_audio().await.unwrap();
        sleep(ms(1600)).await;
        handle.toggle_audio().await.unwrap();
        sleep(ms(1000)).await;

        handle.submit(text_file("history.txt")).await.unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.view, ViewState::Processing);
        assert_eq!(snap.audio.state, AudioState::Unarmed);
        assert!(!snap.audio_ticking);
        assert_eq!(snap.deck_size, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_tab() {
        let handle = processed("biology.txt").await;
        handle.select_tab(ResultsTab::Flashcards).await.unwrap();
        assert_eq!(
            handle.snapshot().await.unwrap().active_tab,
            ResultsTab::Flashcards
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_are_broadcast() {
        let handle = SessionActor::spawn(SessionConfig::default());
        let mut rx = handle.subscribe();
        let _ = handle.generate_flashcards().await;
        match rx.recv().await.unwrap() {
            ToastEvent::Shown(n) => {
                assert_eq!(n.message, "Please upload a document first!");
                assert_eq!(n.severity, Severity::Warning);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
