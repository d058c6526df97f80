//! Scripted walk through the whole page on the configured timers.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time::{sleep, timeout, Instant};
use tracing::info;

use studyforge_audio::AudioState;
use studyforge_config::Timings;
use studyforge_core::{FileUpload, ResultsTab, ViewState};
use studyforge_session::{SessionHandle, SessionSnapshot};

use crate::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const GRACE: Duration = Duration::from_secs(2);
const DEMO_QUERY: &str = "What are the key concepts?";

/// Poll snapshots until `done` holds or `limit` passes.
async fn wait_until(
    handle: &SessionHandle,
    limit: Duration,
    what: &str,
    done: impl Fn(&SessionSnapshot) -> bool,
) -> Result<SessionSnapshot> {
    let poll = async {
        loop {
            let snap = handle.snapshot().await?;
            if done(&snap) {
                return Ok::<_, anyhow::Error>(snap);
            }
            sleep(POLL_INTERVAL).await;
        }
    };
    timeout(limit, poll)
        .await
        .with_context(|| format!("timed out waiting for {what}"))?
}

pub async fn run(handle: SessionHandle, upload: FileUpload, timings: Timings) -> Result<()> {
    let started = Instant::now();
    info!(file = %upload.name, mime = %upload.mime, "Demo starting");

    if handle.submit(upload).await.is_err() {
        bail!("upload was refused");
    }
    println!("processing...");
    let snap = wait_until(&handle, timings.processing_delay + GRACE, "results", |s| {
        s.view == ViewState::Results
    })
    .await?;

    println!("\n{}", snap.preview);
    println!("\n{}\n", render::plain_summary(&snap.summary));

    handle.select_tab(ResultsTab::Flashcards).await?;
    let cards = handle.generate_flashcards().await?;
    for _ in 0..cards {
        if let Some(card) = handle.flip().await? {
            println!("[{}] Q: {}", card.counter, card.question);
            println!("{}A: {}", " ".repeat(card.counter.len() + 3), card.answer);
        }
        handle.next_card().await?;
    }

    handle.select_tab(ResultsTab::Search).await?;
    let set = handle.search(DEMO_QUERY).await?;
    println!();
    for line in render::search_lines(&set) {
        println!("{line}");
    }

    handle.select_tab(ResultsTab::Audio).await?;
    handle.generate_audio().await?;
    wait_until(&handle, timings.audio_arm_delay + GRACE, "audio", |s| {
        s.audio.state == AudioState::Ready
    })
    .await?;

    handle.toggle_audio().await?;
    println!();
    let limit = timings.audio_duration + GRACE;
    let progress = async {
        loop {
            sleep(timings.audio_duration / 6).await;
            let snap = handle.snapshot().await?;
            println!("{}", render::player_line(&snap.audio));
            if snap.audio.state != AudioState::Playing {
                return Ok::<_, anyhow::Error>(());
            }
        }
    };
    timeout(limit, progress)
        .await
        .context("timed out waiting for playback to finish")??;

    // Let the last toasts finish fading.
    sleep(timings.toast_dismiss_after + timings.toast_fade_out).await;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Demo finished");
    Ok(())
}
