//! WebSocket and HTTP transport.
//!
//! `/ws` carries one JSON-RPC message per text frame; `/mcp` takes one
//! message per POST body. All connections share the handler's session.

use std::{io, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    body::Bytes,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::{SinkExt, StreamExt};
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::handler::McpHandler;

/// Router state.
#[derive(Clone)]
pub struct McpState {
    /// Handler shared by every connection.
    pub handler: Arc<McpHandler>,
}

impl McpState {
    #[must_use]
    pub const fn new(handler: Arc<McpHandler>) -> Self {
        Self { handler }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<McpState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: McpState) {
    let connection_id = Uuid::new_v4();
    tracing::info!(%connection_id, "WebSocket connected");

    let (mut sender, mut receiver) = socket.split();

    // Channel for sending messages to the client
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let send_task = tokio::spawn(async move {
        while let Some(json) = rx.recv().await {
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        let response = match msg {
            Ok(Message::Text(text)) => state.handler.handle_text(text.as_str()).await,
            Ok(Message::Binary(data)) => state.handler.handle_bytes(&data).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::error!(%connection_id, "WebSocket error: {e}");
                break;
            }
        };

        let Some(response) = response else {
            continue;
        };
        if tx.send(response).is_err() {
            break;
        }
    }

    drop(tx);
    if let Err(e) = send_task.await {
        tracing::error!(%connection_id, "WebSocket sender failed: {e}");
    }
    tracing::info!(%connection_id, "WebSocket disconnected");
}

/// Handle one JSON-RPC message posted as the request body.
///
/// Notifications are acknowledged with `202 Accepted` and an empty body.
pub async fn rpc_handler(State(state): State<McpState>, body: Bytes) -> Response {
    match state.handler.handle_bytes(&body).await {
        Some(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Create the transport router.
#[must_use]
pub fn create_router(handler: Arc<McpHandler>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/mcp", post(rpc_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(McpState::new(handler))
}

/// Bind `addr` and serve until the server fails.
///
/// # Errors
/// Fails if the address cannot be bound or the server stops with an I/O error.
pub async fn serve_websocket(handler: Arc<McpHandler>, addr: SocketAddr) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Serving MCP on ws://{addr}/ws and http://{addr}/mcp");
    axum::serve(listener, create_router(handler)).await
}
