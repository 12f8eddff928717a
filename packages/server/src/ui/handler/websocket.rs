//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, Identity, MessageBody},
    infrastructure::dto::{
        conversion::draft_from_add_product,
        websocket::{
            AddErrorMessage, ChatMessageEvent, ClientFrame, InitialProductsMessage, ProductDto,
            ProductUpdatedMessage,
        },
    },
    ui::state::AppState,
    usecase::ConnectError,
};

/// Name of the cookie carrying the session token
const SESSION_COOKIE: &str = "session_id";

/// Extracts the session token from the Cookie header, if present.
fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Some(value.to_string())
        } else {
            None
        }
    })
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let session_token = session_token_from_headers(&headers);

    // Assign a fresh connection id for the lifetime of this socket
    let connection_id = ConnectionIdFactory::generate();

    // Use ConnectClientUseCase to authenticate and authorize. Registration
    // into the pusher registry happens inside handle_socket, after the
    // protocol upgrade actually completed; a handshake that never finishes
    // leaves no registry entry behind.
    match state
        .connect_client_usecase
        .execute(session_token.as_deref())
        .await
    {
        Ok(identity) => {
            tracing::info!(
                "Connection '{}' admitted as {}",
                connection_id,
                identity
            );
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, identity)))
        }
        Err(ConnectError::Denied) => {
            tracing::warn!(
                "Connection '{}' denied: not authorized to browse the catalog",
                connection_id
            );
            Err(StatusCode::FORBIDDEN)
        }
    }
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound event flow: events published by the
/// usecases (via rx channel) are sent to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    identity: Identity,
) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the connection and activate it before reading the snapshot:
    // a product added while the snapshot is read reaches this client as a
    // broadcast queued behind the snapshot, and full snapshots converge.
    // The broadcasts stay queued in rx until pusher_loop starts, so the
    // snapshot is always the first frame on the wire.
    state
        .connect_client_usecase
        .admit(connection_id.clone(), identity.clone(), tx)
        .await;
    state.connect_client_usecase.activate(&connection_id).await;

    // Send the full catalog snapshot to the newly connected client
    match state.connect_client_usecase.initial_snapshot().await {
        Ok(products) => {
            // Domain Model から DTO への変換
            let dtos: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();
            let snapshot_msg = InitialProductsMessage::new(dtos);

            let snapshot_json = serde_json::to_string(&snapshot_msg).unwrap();
            if let Err(e) = sender.send(Message::Text(snapshot_json.into())).await {
                tracing::error!(
                    "Failed to send initial products to '{}': {}",
                    connection_id,
                    e
                );
                state.disconnect_client_usecase.execute(&connection_id).await;
                return;
            }
            tracing::info!("Sent initial products to '{}'", connection_id);
        }
        Err(e) => {
            // The connection stays up without a snapshot; the client will
            // catch up on the next productUpdated broadcast
            tracing::warn!(
                "Failed to load catalog snapshot for '{}': {}",
                connection_id,
                e
            );
        }
    }

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();
    let identity_clone = identity.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_frame(
                        &state_clone,
                        &connection_id_clone,
                        &identity_clone,
                        &text,
                    )
                    .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive published events and send them to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use DisconnectClientUseCase to handle disconnection (idempotent)
    state.disconnect_client_usecase.execute(&connection_id).await;
    let remaining = state.disconnect_client_usecase.count_remaining().await;
    tracing::info!(
        "Connection '{}' removed from registry ({} active remaining)",
        connection_id,
        remaining
    );
}

/// Dispatches a single inbound frame.
///
/// Errors never reach other connections: every failure path answers the
/// originator with an `addError` event.
async fn handle_client_frame(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    identity: &Identity,
    text: &str,
) {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(
                "Unsupported frame from '{}': {} ({})",
                connection_id,
                e,
                text
            );
            notify_add_error(state, connection_id, "unsupported message type").await;
            return;
        }
    };

    match frame {
        ClientFrame::AddProduct {
            title,
            price,
            stock,
            attributes,
        } => {
            // Convert payload -> Domain Model (validation happens here)
            let draft = match draft_from_add_product(title, price, stock, attributes) {
                Ok(draft) => draft,
                Err(e) => {
                    tracing::warn!("Invalid addProduct from '{}': {}", connection_id, e);
                    notify_add_error(state, connection_id, &e.to_string()).await;
                    return;
                }
            };

            match state.add_product_usecase.execute(identity, draft).await {
                Ok(snapshot) => {
                    // Domain Model から DTO への変換
                    let dtos: Vec<ProductDto> =
                        snapshot.into_iter().map(ProductDto::from).collect();
                    let updated_msg = ProductUpdatedMessage::new(dtos);

                    let updated_json = serde_json::to_string(&updated_msg).unwrap();
                    state
                        .add_product_usecase
                        .broadcast_snapshot(&updated_json)
                        .await;
                    tracing::info!("Broadcasted productUpdated for '{}'", connection_id);
                }
                Err(e) => {
                    tracing::warn!("Failed to add product from '{}': {}", connection_id, e);
                    notify_add_error(state, connection_id, &e.to_string()).await;
                }
            }
        }
        ClientFrame::ChatMessage { user, message } => {
            // The user field is informational; the session identity decides
            // the author
            if let Some(claimed) = user {
                tracing::debug!("Chat frame from '{}' claims user '{}'", connection_id, claimed);
            }

            let body = match message.map(MessageBody::new) {
                Some(Ok(body)) => body,
                Some(Err(e)) => {
                    tracing::warn!("Invalid chatMessage from '{}': {}", connection_id, e);
                    notify_add_error(state, connection_id, &e.to_string()).await;
                    return;
                }
                None => {
                    tracing::warn!("chatMessage from '{}' without message", connection_id);
                    notify_add_error(state, connection_id, "chat message is required").await;
                    return;
                }
            };

            match state
                .send_chat_message_usecase
                .execute(identity, body)
                .await
            {
                Ok(persisted) => {
                    let event = ChatMessageEvent::from(persisted);
                    let event_json = serde_json::to_string(&event).unwrap();
                    state
                        .send_chat_message_usecase
                        .broadcast_message(&event_json)
                        .await;
                    tracing::info!("Broadcasted chatMessage from '{}'", connection_id);
                }
                Err(e) => {
                    tracing::warn!("Rejected chatMessage from '{}': {}", connection_id, e);
                    notify_add_error(state, connection_id, &e.to_string()).await;
                }
            }
        }
    }
}

/// Sends an `addError` event to the originating connection only.
async fn notify_add_error(state: &Arc<AppState>, connection_id: &ConnectionId, message: &str) {
    let error_msg = AddErrorMessage::new(message);
    let error_json = serde_json::to_string(&error_msg).unwrap();
    if let Err(e) = state
        .add_product_usecase
        .notify_originator(connection_id, &error_json)
        .await
    {
        tracing::warn!("Failed to notify '{}' of error: {}", connection_id, e);
    }
}
