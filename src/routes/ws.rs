//! WebSocket handler — pointer input in, color updates out.
//!
//! DESIGN
//! ======
//! On upgrade, generates a client ID, registers an outbound queue with the
//! relay, and enters a `select!` loop:
//! - Incoming client frames → parse → `RelayEvent` → relay dispatch task
//! - Frames queued by the relay → forward to client
//!
//! The handler never computes colors itself. The only frames it writes on its
//! own are error replies for input it cannot map to a relay event.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → `Connect` (relay queues `session:connected`)
//! 2. `mouse:move` / `mouse:click` → relay
//! 3. `color:update` frames from the relay → client
//! 4. Close → `Disconnect`

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::frame::{Data, Frame, Status};
use crate::services::color::PointerSample;
use crate::services::relay::RelayEvent;
use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection queue the relay fans frames into.
    let (client_tx, mut client_rx) = mpsc::channel::<Frame>(state.client_buffer);

    if let Err(e) = state.relay.connect(client_id, client_tx).await {
        warn!(%client_id, error = %e, "ws: relay unavailable, dropping connection");
        return;
    }
    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        if let Some(reply) = process_inbound_text(&state, client_id, text.as_str()).await {
                            if send_frame(&mut socket, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            frame = client_rx.recv() => {
                // Relay dropped our sender: it has stopped.
                let Some(frame) = frame else { break };
                if send_frame(&mut socket, &frame).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = state.relay.disconnect(client_id).await;
    info!(%client_id, "ws: client disconnected");
}

// =============================================================================
// FRAME DISPATCH
// =============================================================================

/// Parse one inbound text frame and hand it to the relay. Returns a frame for
/// the sender only when the input could not be dispatched.
async fn process_inbound_text(state: &AppState, client_id: Uuid, text: &str) -> Option<Frame> {
    let req: Frame = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: invalid inbound frame");
            let err = Frame::request("gateway:error", Data::new()).with_data("message", format!("invalid json: {e}"));
            return Some(err);
        }
    };

    let Some(event) = inbound_event(client_id, &req) else {
        warn!(%client_id, syscall = %req.syscall, "ws: unknown syscall");
        return Some(req.error(format!("unknown syscall: {}", req.syscall)));
    };

    debug!(%client_id, id = %req.id, syscall = %req.syscall, "ws: recv frame");
    match state.relay.send(event).await {
        Ok(()) => None,
        Err(e) => Some(req.error_from(&e)),
    }
}

/// Map a frame onto a relay event. Both the colon form and the spaced names
/// older clients used are accepted.
fn inbound_event(client_id: Uuid, req: &Frame) -> Option<RelayEvent> {
    match req.syscall.as_str() {
        "mouse:move" | "mouse move" => Some(RelayEvent::PointerSample {
            client_id,
            sample: PointerSample::from_data(&req.data),
        }),
        "mouse:click" | "mouse click" | "click" => Some(RelayEvent::Activation { client_id }),
        _ => None,
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_frame(socket: &mut WebSocket, frame: &Frame) -> Result<(), ()> {
    let json = match serde_json::to_string(frame) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize frame");
            return Err(());
        }
    };
    if frame.status == Status::Error {
        let message = frame
            .data
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("-");
        warn!(id = %frame.id, syscall = %frame.syscall, message, "ws: send frame status=Error");
    }
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
