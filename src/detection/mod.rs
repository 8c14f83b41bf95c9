// ABOUTME: Detection loop driving pose estimation into the active exercise session
// ABOUTME: Cooperative select! loop with warm-up, stale-frame dropping, 1 s timer, and stop handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Detection Loop
//!
//! One task multiplexes four event sources with a biased `tokio::select!`:
//!
//! 1. the stop notification from a [`DetectionHandle`],
//! 2. the elapsed-time ticker (created once the video is ready, dropped once
//!    the goal is reached),
//! 3. the single outstanding pose estimate,
//! 4. the frame interval, armed only while no estimate is outstanding.
//!
//! Results of frame N are applied before frame N+1 is requested. Frames
//! captured while an estimate is running are overwritten by the source and
//! never queued. The liveness flag is checked before every continuation, so
//! nothing reaches the session after [`DetectionHandle::stop`].

/// Recorded keypoint streams for offline runs and tests
pub mod replay;

/// Video frame and pose estimator interfaces
pub mod sources;

use std::future::{self, Future};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use coach_core::constants::{messages, timing::CONSECUTIVE_FAILURE_WARN_THRESHOLD};
use coach_core::models::{Keypoint, KeypointFrame};
use coach_intelligence::ExerciseSession;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

pub use crate::config::DetectionConfig;
pub use sources::{FrameSource, PoseSource, SourceStatus, VideoFrame};

use crate::errors::{AppResult, DetectionError};
use crate::lifecycle::WorkoutManager;
use crate::notifications::SessionObserver;

type EstimateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Keypoint>, DetectionError>> + Send + 'a>>;

/// Why [`DetectionLoop::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopExit {
    /// [`DetectionHandle::stop`] was called
    Stopped,
    /// The session goal was reached and `stop_on_goal` is set
    GoalReached,
    /// The manager has no active session
    NoActiveSession,
}

/// Liveness flag shared between the loop and whoever may stop it
#[derive(Debug, Clone)]
pub struct DetectionHandle {
    running: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Default for DetectionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionHandle {
    /// Handle in the running state
    #[must_use]
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Request the loop to stop; idempotent
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            debug!("Detection stop requested");
        }
        self.notify.notify_one();
    }

    /// Whether the loop may continue
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn stopped(&self) {
        self.notify.notified().await;
    }
}

/// Counters accumulated across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Estimates applied to the session
    pub frames_processed: u64,
    /// Frames skipped as stale or invalid
    pub frames_dropped: u64,
    /// Estimator errors
    pub estimator_failures: u64,
    /// Estimator errors since the last success
    pub consecutive_failures: u32,
}

/// Warm-up and staleness bookkeeping for one run
#[derive(Debug, Default)]
struct FrameCursor {
    ready_since: Option<Instant>,
    last_sequence: Option<u64>,
}

/// Drives a pose source into a [`WorkoutManager`]
pub struct DetectionLoop<P, F> {
    pose_source: P,
    frame_source: F,
    config: DetectionConfig,
    handle: DetectionHandle,
    stats: DetectionStats,
}

impl<P: PoseSource, F: FrameSource> DetectionLoop<P, F> {
    /// Loop over the given sources with a fresh handle
    #[must_use]
    pub fn new(pose_source: P, frame_source: F, config: DetectionConfig) -> Self {
        Self {
            pose_source,
            frame_source,
            config,
            handle: DetectionHandle::new(),
            stats: DetectionStats::default(),
        }
    }

    /// Use an existing handle, e.g. one already given to a source
    #[must_use]
    pub fn with_handle(mut self, handle: DetectionHandle) -> Self {
        self.handle = handle;
        self
    }

    /// Handle that stops this loop
    #[must_use]
    pub fn handle(&self) -> DetectionHandle {
        self.handle.clone()
    }

    /// Counters so far
    #[must_use]
    pub const fn stats(&self) -> DetectionStats {
        self.stats
    }

    /// The pose source
    #[must_use]
    pub const fn pose_source(&self) -> &P {
        &self.pose_source
    }

    /// Run until stopped, the goal is reached, or the session goes away
    ///
    /// Estimator failures are reported through `on_error` and the loop keeps
    /// going on the next frame.
    ///
    /// # Errors
    ///
    /// Returns `VideoSourceUnavailable` when the frame source fails; the
    /// failure is also reported through `on_error`.
    #[allow(clippy::cognitive_complexity)]
    pub async fn run(
        &mut self,
        manager: &mut WorkoutManager,
        observer: &mut dyn SessionObserver,
    ) -> AppResult<LoopExit> {
        let Self {
            pose_source,
            frame_source,
            config,
            handle,
            stats,
        } = self;

        let mut frame_timer = interval(config.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticker: Option<Interval> = None;
        let mut pending: Option<EstimateFuture<'_>> = None;
        let mut cursor = FrameCursor::default();

        info!(
            session.id = ?manager.session().map(ExerciseSession::session_id),
            frame_interval_ms = config.frame_interval.as_millis(),
            "Detection loop started"
        );

        let exit = loop {
            if let Some(exit) = exit_reason(handle, manager, config) {
                break exit;
            }
            if manager.goal_reached() && ticker.take().is_some() {
                debug!("Goal reached, elapsed-time timer stopped");
            }

            tokio::select! {
                biased;
                () = handle.stopped() => {}
                () = next_tick(&mut ticker) => {
                    if handle.is_running() {
                        manager.tick(observer);
                    }
                }
                result = next_estimate(&mut pending) => {
                    pending = None;
                    if handle.is_running() {
                        apply_estimate(result, manager, observer, stats);
                    }
                }
                _ = frame_timer.tick(), if pending.is_none() => {
                    let frame = match next_frame(frame_source, &mut cursor, config, stats) {
                        Ok(frame) => frame,
                        Err(e) => {
                            error!(error = %e, "Video source failed, stopping detection");
                            observer.on_error(&e.to_string());
                            return Err(e.into());
                        }
                    };
                    if ticker.is_none() && cursor.ready_since.is_some() && !manager.goal_reached() {
                        ticker = Some(start_ticker(config));
                    }
                    if let Some(frame) = frame {
                        pending = Some(pose_source.estimate(frame));
                    }
                }
            }
        };

        info!(
            exit = ?exit,
            frames.processed = stats.frames_processed,
            frames.dropped = stats.frames_dropped,
            estimator.failures = stats.estimator_failures,
            "Detection loop finished"
        );
        Ok(exit)
    }
}

fn exit_reason(
    handle: &DetectionHandle,
    manager: &WorkoutManager,
    config: &DetectionConfig,
) -> Option<LoopExit> {
    if !handle.is_running() {
        Some(LoopExit::Stopped)
    } else if manager.session().is_none() {
        Some(LoopExit::NoActiveSession)
    } else if config.stop_on_goal && manager.goal_reached() {
        Some(LoopExit::GoalReached)
    } else {
        None
    }
}

/// First tick one full period after the video became ready
fn start_ticker(config: &DetectionConfig) -> Interval {
    interval_at(Instant::now() + config.tick_interval, config.tick_interval)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => future::pending().await,
    }
}

async fn next_estimate(
    pending: &mut Option<EstimateFuture<'_>>,
) -> Result<Vec<Keypoint>, DetectionError> {
    match pending {
        Some(estimate) => estimate.await,
        None => future::pending().await,
    }
}

/// Frame to estimate on this interval, if the source has a usable new one
fn next_frame<F: FrameSource>(
    frame_source: &mut F,
    cursor: &mut FrameCursor,
    config: &DetectionConfig,
    stats: &mut DetectionStats,
) -> Result<Option<VideoFrame>, DetectionError> {
    let status = frame_source.status()?;
    if !status.ready {
        return Ok(None);
    }
    let ready_since = *cursor.ready_since.get_or_insert_with(|| {
        debug!(
            video.width = status.width,
            video.height = status.height,
            warmup_ms = config.warmup.as_millis(),
            "Video source ready, warming up"
        );
        Instant::now()
    });
    if ready_since.elapsed() < config.warmup {
        return Ok(None);
    }

    let Some(frame) = frame_source.latest_frame() else {
        return Ok(None);
    };
    if cursor.last_sequence.is_some_and(|last| frame.sequence <= last) {
        stats.frames_dropped += 1;
        return Ok(None);
    }
    cursor.last_sequence = Some(frame.sequence);
    if !frame.is_valid() {
        debug!(frame.sequence = frame.sequence, "Dropping frame with zero dimensions");
        stats.frames_dropped += 1;
        return Ok(None);
    }
    Ok(Some(frame))
}

fn apply_estimate(
    result: Result<Vec<Keypoint>, DetectionError>,
    manager: &mut WorkoutManager,
    observer: &mut dyn SessionObserver,
    stats: &mut DetectionStats,
) {
    match result {
        Ok(keypoints) => {
            stats.consecutive_failures = 0;
            stats.frames_processed += 1;
            manager.process_frame(&KeypointFrame::new(keypoints), observer);
        }
        Err(e) => {
            stats.estimator_failures += 1;
            stats.consecutive_failures = stats.consecutive_failures.saturating_add(1);
            if stats.consecutive_failures >= CONSECUTIVE_FAILURE_WARN_THRESHOLD {
                warn!(
                    error = %e,
                    consecutive_failures = stats.consecutive_failures,
                    "Pose estimator keeps failing"
                );
            } else {
                debug!(error = %e, "Pose estimation failed for one frame");
            }
            observer.on_error(messages::DETECTION_FAILED);
        }
    }
}
