//! Common test utilities
//!
//! Scripted remote sources, a recording notifier and an in-process HTTP
//! server for exercising the clients against canned responses.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use roblox_monitor::fetcher::{FetchError, RemoteStateSource};
use roblox_monitor::model::{BadgeRecord, BadgeSnapshot, PresenceSnapshot, PresenceStatus};
use roblox_monitor::notifier::{MonitorEvent, Notifier};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One scripted fetch result. `Err` stands for any failed request.
pub type Scripted<T> = Result<T, ()>;

pub fn badge(id: u64) -> BadgeRecord {
    BadgeRecord {
        id,
        name: format!("Badge {id}"),
        description: None,
        created: None,
        icon_image_id: None,
    }
}

pub fn badges(ids: &[u64]) -> BadgeSnapshot {
    ids.iter().copied().map(badge).collect()
}

pub fn presence(code: i64) -> PresenceSnapshot {
    PresenceSnapshot::new(PresenceStatus::from(code))
}

fn scripted_error() -> FetchError {
    FetchError::MissingPresence(0)
}

/// Source that replays a fixed script, one entry per call.
///
/// Once a script runs out the last entry repeats.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    badges: Mutex<VecDeque<Scripted<BadgeSnapshot>>>,
    presence: Mutex<VecDeque<Scripted<PresenceSnapshot>>>,
}

impl ScriptedSource {
    pub fn new(
        badges: Vec<Scripted<BadgeSnapshot>>,
        presence: Vec<Scripted<PresenceSnapshot>>,
    ) -> Self {
        Self {
            badges: Mutex::new(badges.into()),
            presence: Mutex::new(presence.into()),
        }
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Scripted<T> {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap_or(Err(()))
        }
    }
}

#[async_trait]
impl RemoteStateSource for ScriptedSource {
    async fn badges(&self) -> Result<BadgeSnapshot, FetchError> {
        Self::next(&self.badges).map_err(|()| scripted_error())
    }

    async fn presence(&self) -> Result<PresenceSnapshot, FetchError> {
        Self::next(&self.presence).map_err(|()| scripted_error())
    }
}

/// Notifier that records every event it is asked to deliver
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<MonitorEvent>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<MonitorEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &MonitorEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Serve `app` on an ephemeral localhost port and return its address
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
