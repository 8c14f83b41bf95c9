// ABOUTME: Session notifications delivered to the UI layer as they happen
// ABOUTME: Observer trait plus recording, broadcast, and tracing implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session notifications
//!
//! Observers are called synchronously from the frame and timer paths, so an
//! implementation must not block. Forward to a channel
//! ([`BroadcastObserver`]) when the consumer lives on another task.

use std::mem;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Receives progress notifications for the active session
pub trait SessionObserver: Send {
    /// Rep count changed (also sent with 0 after every reset)
    fn on_rep_update(&mut self, count: u32);

    /// The session goal was reached; fires at most once per session
    fn on_goal_reached(&mut self);

    /// A condition the user should see
    fn on_error(&mut self, message: &str);

    /// A new session replaced the previous one
    fn on_session_reset(&mut self);
}

/// Owned form of a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// See [`SessionObserver::on_rep_update`]
    RepUpdate {
        /// New rep count
        count: u32,
    },
    /// See [`SessionObserver::on_goal_reached`]
    GoalReached,
    /// See [`SessionObserver::on_error`]
    Error {
        /// Message for the user
        message: String,
    },
    /// See [`SessionObserver::on_session_reset`]
    SessionReset,
}

/// Keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<SessionEvent>,
}

impl EventRecorder {
    /// Empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far
    #[must_use]
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Take the recorded notifications, leaving the recorder empty
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    /// Number of goal notifications received
    #[must_use]
    pub fn goal_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SessionEvent::GoalReached))
            .count()
    }

    /// Last rep count reported
    #[must_use]
    pub fn last_rep_count(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|event| match event {
            SessionEvent::RepUpdate { count } => Some(*count),
            _ => None,
        })
    }
}

impl SessionObserver for EventRecorder {
    fn on_rep_update(&mut self, count: u32) {
        self.events.push(SessionEvent::RepUpdate { count });
    }

    fn on_goal_reached(&mut self) {
        self.events.push(SessionEvent::GoalReached);
    }

    fn on_error(&mut self, message: &str) {
        self.events.push(SessionEvent::Error {
            message: message.to_owned(),
        });
    }

    fn on_session_reset(&mut self) {
        self.events.push(SessionEvent::SessionReset);
    }
}

/// Publishes notifications on a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastObserver {
    sender: broadcast::Sender<SessionEvent>,
}

impl BroadcastObserver {
    /// Observer and its first receiver
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, broadcast::Receiver<SessionEvent>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Additional receiver
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        if self.sender.send(event).is_err() {
            debug!("Session event dropped, no subscribers");
        }
    }
}

impl SessionObserver for BroadcastObserver {
    fn on_rep_update(&mut self, count: u32) {
        self.publish(SessionEvent::RepUpdate { count });
    }

    fn on_goal_reached(&mut self) {
        self.publish(SessionEvent::GoalReached);
    }

    fn on_error(&mut self, message: &str) {
        self.publish(SessionEvent::Error {
            message: message.to_owned(),
        });
    }

    fn on_session_reset(&mut self) {
        self.publish(SessionEvent::SessionReset);
    }
}

/// Logs every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_rep_update(&mut self, count: u32) {
        info!(rep.count = count, "Rep update");
    }

    fn on_goal_reached(&mut self) {
        info!("Goal reached");
    }

    fn on_error(&mut self, message: &str) {
        warn!(error.message = %message, "Session error");
    }

    fn on_session_reset(&mut self) {
        debug!("Session reset");
    }
}

/// Delivers every notification to both observers, left first
impl<A: SessionObserver, B: SessionObserver> SessionObserver for (A, B) {
    fn on_rep_update(&mut self, count: u32) {
        self.0.on_rep_update(count);
        self.1.on_rep_update(count);
    }

    fn on_goal_reached(&mut self) {
        self.0.on_goal_reached();
        self.1.on_goal_reached();
    }

    fn on_error(&mut self, message: &str) {
        self.0.on_error(message);
        self.1.on_error(message);
    }

    fn on_session_reset(&mut self) {
        self.0.on_session_reset();
        self.1.on_session_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_helpers() {
        let mut recorder = EventRecorder::new();
        recorder.on_session_reset();
        recorder.on_rep_update(0);
        recorder.on_rep_update(1);
        recorder.on_goal_reached();
        assert_eq!(recorder.last_rep_count(), Some(1));
        assert_eq!(recorder.goal_count(), 1);
        assert_eq!(recorder.drain().len(), 4);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&SessionEvent::RepUpdate { count: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"rep_update","count":3}"#);
    }

    #[tokio::test]
    async fn test_broadcast_observer_delivers_in_order() {
        let (mut observer, mut receiver) = BroadcastObserver::channel(8);
        observer.on_rep_update(1);
        observer.on_error("Pose detection failed");
        assert_eq!(
            receiver.recv().await.unwrap(),
            SessionEvent::RepUpdate { count: 1 }
        );
        assert_eq!(
            receiver.recv().await.unwrap(),
            SessionEvent::Error {
                message: "Pose detection failed".into()
            }
        );
    }

    #[tokio::test]
    async fn test_broadcast_observer_zero_capacity() {
        let (mut observer, mut receiver) = BroadcastObserver::channel(0);
        observer.on_goal_reached();
        assert_eq!(receiver.recv().await.unwrap(), SessionEvent::GoalReached);
    }
}
