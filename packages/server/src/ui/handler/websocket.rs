//! WebSocket connection handlers.

use std::{fmt, sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::{Sink, SinkExt},
    stream::{Stream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{domain::PlayerId, ui::state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // The player is only admitted once the upgrade succeeded, so a failed
    // handshake never leaves an entry behind.
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket.
///
/// Each write is bounded by `write_timeout`; a stalled socket ends the task,
/// which in turn tears the connection down.
///
/// # Arguments
///
/// * `rx` - Outbound queue filled by the MessagePusher
/// * `sender` - Sink half of this connection
/// * `write_timeout` - Longest a single write may take
/// * `player_id` - For logging only
fn pusher_loop<S>(
    mut rx: mpsc::Receiver<String>,
    mut sender: S,
    write_timeout: Duration,
    player_id: PlayerId,
) -> JoinHandle<()>
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: fmt::Display + Send,
{
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(write_timeout, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!("Failed to write to '{}': {}", player_id, e);
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "Write to '{}' timed out after {:?}, dropping connection",
                        player_id,
                        write_timeout
                    );
                    break;
                }
            }
        }
    })
}

/// Spawns a task that reads frames from this client and relays them.
fn receiver_loop<R, E>(mut receiver: R, state: Arc<AppState>, player_id: PlayerId) -> JoinHandle<()>
where
    R: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
    E: fmt::Display + Send,
{
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error from '{}': {}", player_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::trace!("Received text from '{}': {}", player_id, text.as_str());

                    match state
                        .relay_message_usecase
                        .execute(&player_id, text.as_str())
                        .await
                    {
                        Ok(outcome) => tracing::trace!(
                            "Relayed message from '{}' to {} player(s), state changed: {}",
                            player_id,
                            outcome.delivered,
                            outcome.state_changed
                        ),
                        // One bad message must not end the session
                        Err(e) => tracing::warn!("Dropping message from '{}': {}", player_id, e),
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", player_id);
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::debug!("Client '{}' requested close", player_id);
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    serve_connection(sender, receiver, state).await;
}

/// Runs one connection from admission to disconnect.
async fn serve_connection<S, R, E>(sender: S, receiver: R, state: Arc<AppState>)
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: fmt::Display + Send,
    R: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
    E: fmt::Display + Send,
{
    // Outbound queue: assignId and the join full-sync are queued before the
    // pusher loop starts and are flushed first.
    let (tx, rx) = mpsc::channel(state.outbound_capacity);

    let player_id = match state.connect_player_usecase.execute(tx).await {
        Ok(player_id) => player_id,
        Err(e) => {
            tracing::error!("Failed to admit new connection: {}", e);
            return;
        }
    };

    let mut send_task = pusher_loop(rx, sender, state.write_timeout, player_id.clone());
    let mut recv_task = receiver_loop(receiver, state.clone(), player_id.clone());

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Clean close, transport error and write timeout all end up here
    if let Err(e) = state.disconnect_player_usecase.execute(&player_id).await {
        tracing::warn!("Failed to disconnect player '{}': {}", player_id, e);
    }
}
