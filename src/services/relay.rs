//! Relay service — turns pointer input into a shared color and fans it out.
//!
//! DESIGN
//! ======
//! The `Relay` owns the current hue and the broadcast group (client ID ->
//! outbound frame sender). It is driven by `RelayEvent`s, one at a time, from
//! a single dispatch task, so hue updates and membership changes never race
//! and no lock is needed.
//!
//! Fan-out is unconditional: every member, the sender included, gets every
//! `color:update`. Delivery is best-effort: a member whose queue is full or
//! closed is skipped for that frame and nothing is reported.
//!
//! LIFECYCLE
//! =========
//! 1. `Connect` → member added, `session:connected` queued for it
//! 2. `PointerSample` → `color:update` to all members
//! 3. `Activation` → hue re-rolled
//! 4. `Disconnect` → member removed (no-op if already gone)
//!
//! `MemberCount` is a read-only query answered on a oneshot channel; it goes
//! through the same queue, so it observes every event sent before it.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::frame::{Data, Frame};
use crate::services::color::{self, Hue, PointerSample};

/// Capacity of the queue feeding the dispatch task.
pub const RELAY_QUEUE_CAPACITY: usize = 1024;

// =============================================================================
// EVENTS
// =============================================================================

/// Everything the relay reacts to.
#[derive(Debug)]
pub enum RelayEvent {
    Connect { client_id: Uuid, tx: mpsc::Sender<Frame> },
    PointerSample { client_id: Uuid, sample: PointerSample },
    Activation { client_id: Uuid },
    Disconnect { client_id: Uuid },
    MemberCount { reply: oneshot::Sender<usize> },
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay dispatch loop has stopped")]
    Closed,
}

impl crate::frame::ErrorCode for RelayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "E_RELAY_CLOSED",
        }
    }
}

// =============================================================================
// RELAY
// =============================================================================

pub struct Relay {
    hue: Hue,
    members: HashMap<Uuid, mpsc::Sender<Frame>>,
    rng: StdRng,
}

impl Relay {
    #[must_use]
    pub fn new(initial_hue: Hue) -> Self {
        Self::with_rng(initial_hue, StdRng::from_os_rng())
    }

    /// Build a relay with a caller-supplied random source (seeded in tests).
    #[must_use]
    pub fn with_rng(initial_hue: Hue, rng: StdRng) -> Self {
        Self { hue: initial_hue, members: HashMap::new(), rng }
    }

    #[must_use]
    pub fn hue(&self) -> Hue {
        self.hue
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_member(&self, client_id: Uuid) -> bool {
        self.members.contains_key(&client_id)
    }

    /// Apply one event. The only entry point used by the dispatch task.
    pub fn dispatch(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Connect { client_id, tx } => self.on_connect(client_id, tx),
            RelayEvent::PointerSample { client_id, sample } => {
                self.on_pointer_sample(client_id, &sample);
            }
            RelayEvent::Activation { client_id } => {
                self.on_activation(client_id);
            }
            RelayEvent::Disconnect { client_id } => {
                self.on_disconnect(client_id);
            }
            RelayEvent::MemberCount { reply } => {
                let _ = reply.send(self.member_count());
            }
        }
    }

    /// Add a client to the broadcast group and queue its welcome frame.
    /// Re-registering an ID replaces the previous sender.
    pub fn on_connect(&mut self, client_id: Uuid, tx: mpsc::Sender<Frame>) {
        let welcome = Frame::request("session:connected", Data::new())
            .with_data("client_id", client_id.to_string())
            .with_data("hue", self.hue().value());
        let _ = tx.try_send(welcome);

        self.members.insert(client_id, tx);
        info!(%client_id, members = self.member_count(), "relay: client connected");
    }

    /// Compute the color for this sample and send it to every member.
    /// Returns how many members the frame was queued for.
    pub fn on_pointer_sample(&self, client_id: Uuid, sample: &PointerSample) -> usize {
        let color = color::hsl(self.hue, sample);
        let frame = Frame::request("color:update", Data::new()).with_data("color", color.as_str());
        let delivered = self.broadcast(&frame);
        debug!(%client_id, %color, delivered, "relay: color update");
        delivered
    }

    /// Re-roll the hue. Returns the new value.
    pub fn on_activation(&mut self, client_id: Uuid) -> Hue {
        self.hue = Hue::random(&mut self.rng);
        info!(%client_id, hue = %self.hue, "relay: hue changed");
        self.hue
    }

    /// Drop a client from the broadcast group. Returns whether it was present.
    pub fn on_disconnect(&mut self, client_id: Uuid) -> bool {
        let removed = self.members.remove(&client_id).is_some();
        if removed {
            info!(%client_id, members = self.member_count(), "relay: client disconnected");
        }
        removed
    }

    fn broadcast(&self, frame: &Frame) -> usize {
        let mut delivered = 0;
        for (client_id, tx) in &self.members {
            match tx.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => debug!(%client_id, "relay: outbound queue full, frame dropped"),
                Err(TrySendError::Closed(_)) => debug!(%client_id, "relay: outbound queue closed"),
            }
        }
        delivered
    }
}

// =============================================================================
// DISPATCH TASK
// =============================================================================

/// Cloneable front door to the dispatch task. Stored in `AppState`.
#[derive(Clone, Debug)]
pub struct RelayHandle {
    tx: mpsc::Sender<RelayEvent>,
}

impl RelayHandle {
    /// Queue an event for the dispatch task.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Closed` if the dispatch task has exited.
    pub async fn send(&self, event: RelayEvent) -> Result<(), RelayError> {
        self.tx.send(event).await.map_err(|_| RelayError::Closed)
    }

    /// # Errors
    ///
    /// Returns `RelayError::Closed` if the dispatch task has exited.
    pub async fn connect(&self, client_id: Uuid, tx: mpsc::Sender<Frame>) -> Result<(), RelayError> {
        self.send(RelayEvent::Connect { client_id, tx }).await
    }

    /// # Errors
    ///
    /// Returns `RelayError::Closed` if the dispatch task has exited.
    pub async fn disconnect(&self, client_id: Uuid) -> Result<(), RelayError> {
        self.send(RelayEvent::Disconnect { client_id }).await
    }

    /// Size of the broadcast group once all previously queued events apply.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Closed` if the dispatch task has exited.
    pub async fn member_count(&self) -> Result<usize, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayEvent::MemberCount { reply }).await?;
        rx.await.map_err(|_| RelayError::Closed)
    }
}

/// Spawn the dispatch task that owns `relay`. The task ends, handing the
/// relay back, once every `RelayHandle` has been dropped.
pub fn spawn_relay_task(mut relay: Relay) -> (RelayHandle, JoinHandle<Relay>) {
    let (tx, mut rx) = mpsc::channel(RELAY_QUEUE_CAPACITY);
    let task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            relay.dispatch(event);
        }
        relay
    });
    (RelayHandle { tx }, task)
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
