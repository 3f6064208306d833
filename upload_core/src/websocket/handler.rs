use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::upload::UploadSimulator;
use crate::websocket::messages::WebSocketMessage;
use crate::AppState;

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    info!("WebSocket connection request received");

    let simulator = state.simulator.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, simulator))
}

/// Streams every upload event to the client until either side goes away.
async fn handle_socket(socket: WebSocket, simulator: UploadSimulator) {
    let connection_id = Uuid::new_v4();
    info!("WebSocket connection established: {}", connection_id);

    // Subscribe before taking the snapshot so no change falls in between.
    let mut events = simulator.subscribe();

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WebSocketMessage>();

    let _ = tx.send(WebSocketMessage::Connected { connection_id });
    let _ = tx.send(WebSocketMessage::Snapshot {
        files: simulator.files(),
        active_stage: simulator.active_stage(),
    });

    let outgoing_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize WebSocket message: {}", e);
                    continue;
                }
            };

            if sender.send(Message::Text(json)).await.is_err() {
                debug!("WebSocket connection closed, stopping outgoing message handler");
                break;
            }
        }
    });

    let event_tx = tx.clone();
    let event_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if event_tx.send(WebSocketMessage::from(event)).is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("WebSocket subscriber lagged behind by {} events", skipped);
                    if event_tx.send(WebSocketMessage::Lagged { skipped }).is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let incoming_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match WebSocketMessage::from_json(&text) {
                    Ok(WebSocketMessage::Ping) => {
                        let _ = tx.send(WebSocketMessage::Pong);
                    }
                    Ok(_) => debug!("Received unhandled WebSocket message type"),
                    Err(_) => {
                        let _ = tx.send(WebSocketMessage::Error {
                            message: "Unrecognized message".to_string(),
                        });
                    }
                },
                Ok(Message::Close(_)) => {
                    debug!("WebSocket connection closed by client");
                    break;
                }
                Err(e) => {
                    warn!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = outgoing_task => debug!("Outgoing message handler completed"),
        _ = incoming_task => debug!("Incoming message handler completed"),
    }
    event_task.abort();

    info!("WebSocket connection closed: {}", connection_id);
}
