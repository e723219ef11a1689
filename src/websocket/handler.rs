use crate::{
    error::PuzzleError,
    game::{GameEvent, WordSearch},
    models::Position,
    websocket::messages::{ClientMessage, ServerMessage},
    AppState, GameSession,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::{sync::Arc, time::Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Board owned by one connection plus the engine's event stream
pub struct Session {
    pub session_id: Uuid,
    pub game: WordSearch,
    pub events: mpsc::UnboundedReceiver<GameEvent>,
}

impl Session {
    pub fn start(session_id: Uuid, state: &AppState) -> Result<Self, PuzzleError> {
        let mut rng = rand::rng();
        let (game, events) = WordSearch::with_channel(&state.layout, &mut rng)?;
        Ok(Self {
            session_id,
            game,
            events,
        })
    }

    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::GameState {
            session_id: self.session_id.to_string(),
            size: self.game.size(),
            grid: self.game.rows(),
            words: self.game.words().to_vec(),
            active_word: self.game.active_word().map(str::to_string),
        }
    }

    /// Everything the engine emitted since the last call, as wire messages
    pub fn drain_events(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            messages.push(ServerMessage::from(event));
        }
        messages
    }
}

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let session_id = Uuid::new_v4();

    let mut session = match Session::start(session_id, &state) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to build board for session {}: {}", session_id, e);
            let msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Ok(json) = serde_json::to_string(&msg) {
                let _ = sender.send(Message::Text(json.into())).await;
            }
            return;
        }
    };

    state.sessions.insert(session_id, GameSession::new(session_id));
    tracing::info!("WebSocket connection established for session {}", session_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        if tx.send(session.snapshot()).await.is_err() {
            return;
        }

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &mut session, &state_for_recv, &tx)
                                .await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected: session {}", session.session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    state.sessions.remove(&session_id);

    tracing::info!("WebSocket connection closed for session {}", session_id);
}

/// Apply one client message to the session's board and forward what the engine emitted
async fn handle_client_message(
    msg: ClientMessage,
    session: &mut Session,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
) -> anyhow::Result<()> {
    let mut replies = apply_client_message(msg, session, state)?;
    replies.extend(session.drain_events());

    if let Some(mut entry) = state.sessions.get_mut(&session.session_id) {
        entry.words_found = session.game.found_count();
        entry.completed = session.game.is_complete();
    }

    for reply in replies {
        tx.send(reply).await?;
    }

    Ok(())
}

/// Drive the engine. Returns direct replies; engine events are drained separately.
fn apply_client_message(
    msg: ClientMessage,
    session: &mut Session,
    state: &AppState,
) -> Result<Vec<ServerMessage>, PuzzleError> {
    let game = &mut session.game;

    match msg {
        ClientMessage::NewGame => {
            tracing::info!("Session {} starting a new board", session.session_id);
            *session = Session::start(session.session_id, state)?;
            if let Some(mut entry) = state.sessions.get_mut(&session.session_id) {
                entry.started_at = Instant::now();
            }
            return Ok(vec![session.snapshot()]);
        }
        ClientMessage::PointerDown { row, col } => {
            game.pointer_down(Position::new(row, col));
        }
        ClientMessage::PointerMove { row, col } => {
            game.pointer_move(Position::new(row, col));
        }
        ClientMessage::PointerUp { cell } => {
            game.pointer_up(cell);
        }
        ClientMessage::SelectWord { word } => {
            if !game.select_word(&word.to_uppercase()) {
                tracing::debug!("Ignoring selection of '{}'", word);
            }
        }
        ClientMessage::ClearActive => {
            game.clear_active();
        }
        ClientMessage::SubmitCode { code } => {
            let correct = game.check_code(&code);
            tracing::info!(
                "Session {} submitted code ({})",
                session.session_id,
                if correct { "correct" } else { "wrong" }
            );
            return Ok(vec![ServerMessage::CodeChecked { correct }]);
        }
    }

    Ok(Vec::new())
}
