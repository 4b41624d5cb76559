//! Headless play loop
//!
//! Drives a [`PlayerSession`] the way a browser page would: it plays the
//! cued track, reports starts and ends from a [`TrackProbe`], forwards stall
//! alarms, and runs cover lookups on background tasks so they race the
//! playback reports just like in an interactive client.

use crate::probe::TrackProbe;
use serde::Serialize;
use std::sync::Arc;
use tocata_playback::{
    CoverJob, PlayerEvent, PlayerSession, ResolvedCover, StallAlarms, SurfaceStatus,
};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A track that played
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedTrack {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub favorite: bool,
}

/// A track the watchdog skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTrack {
    pub index: usize,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayReport {
    pub played: Vec<PlayedTrack>,
    pub skipped: Vec<SkippedTrack>,
}

pub struct HeadlessDriver {
    session: PlayerSession,
    alarms: StallAlarms,
    probe: Arc<dyn TrackProbe>,
    covers: JoinSet<ResolvedCover>,
}

impl HeadlessDriver {
    pub fn new(session: PlayerSession, alarms: StallAlarms, probe: Arc<dyn TrackProbe>) -> Self {
        Self {
            session,
            alarms,
            probe,
            covers: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlayerSession {
        &mut self.session
    }

    pub fn into_session(self) -> PlayerSession {
        self.session
    }

    /// Attempt `steps` tracks, starting with the cued one.
    pub async fn run(&mut self, steps: usize) -> PlayReport {
        let mut report = PlayReport::default();
        self.session.play();
        self.log_events();

        for _ in 0..steps {
            let Some(track) = self.session.current_track().cloned() else {
                warn!("Nothing to play");
                break;
            };
            let index = self.session.current_index().unwrap_or_default();

            if let Some(job) = self.session.cover_job() {
                self.spawn_cover(job);
            }

            if self.probe.reachable(&track.url).await {
                self.session.on_playback_started();
                self.settle_covers().await;

                let key = track.key();
                let cover = self
                    .session
                    .resolver()
                    .cached(&key)
                    .unwrap_or_else(|| self.session.resolver().fallback_url().to_string());

                info!(index, title = %track.title, artist = %track.artist, "Playing");
                report.played.push(PlayedTrack {
                    index,
                    title: track.title.clone(),
                    artist: track.artist.clone(),
                    cover,
                    favorite: self.session.is_current_favorite(),
                });

                if let Some(prefetch) = self.session.on_track_ended() {
                    self.spawn_cover(prefetch);
                }
            } else {
                self.await_stall().await;
                report.skipped.push(SkippedTrack {
                    index,
                    title: track.title.clone(),
                    url: track.url.clone(),
                });
            }

            self.log_events();
        }

        self.settle_covers().await;
        self.log_events();
        report
    }

    fn spawn_cover(&mut self, job: CoverJob) {
        debug!(key = %job.key(), purpose = ?job.purpose(), "Starting cover lookup");
        self.covers.spawn(job.run());
    }

    /// Wait until the watchdog skips the current track, applying covers
    /// that finish in the meantime.
    async fn await_stall(&mut self) {
        loop {
            tokio::select! {
                alarm = self.alarms.recv() => {
                    let Some(alarm) = alarm else {
                        return;
                    };
                    if self.session.on_stall_alarm(alarm, SurfaceStatus::idle()) {
                        return;
                    }
                }
                Some(joined) = self.covers.join_next() => {
                    self.apply_joined(joined);
                }
            }
        }
    }

    /// Wait for every in-flight cover lookup.
    async fn settle_covers(&mut self) {
        while let Some(joined) = self.covers.join_next().await {
            self.apply_joined(joined);
        }
    }

    fn apply_joined(&mut self, joined: Result<ResolvedCover, tokio::task::JoinError>) {
        match joined {
            Ok(resolved) => {
                self.session.apply_cover(resolved);
            }
            Err(e) => warn!(error = %e, "Cover lookup task failed"),
        }
    }

    fn log_events(&mut self) {
        for event in self.session.drain_events() {
            match &event {
                PlayerEvent::Stalled { index, key } => {
                    warn!(index, key = %key, "Skipped stalled track");
                }
                PlayerEvent::CoverResolved { key, url } => {
                    info!(key = %key, url = %url, "Cover");
                }
                other => debug!(event = ?other, "Player event"),
            }
        }
    }
}
