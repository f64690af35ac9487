use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::EngineError,
    models::{GameSnapshot, GuessOutcome},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct GameQuery {
    #[serde(default)]
    pub reveal_key: bool,
    /// Reveals the key when this player is a Spymaster or Tester
    pub player_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ClueRequest {
    pub clue: String,
    pub number: i32,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub word: String,
}

pub async fn start_game(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>, EngineError> {
    state.sessions.start(room_id).map(Json)
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<GameQuery>,
) -> Result<Json<GameSnapshot>, EngineError> {
    let reveal_key = match query.player_id {
        Some(player_id) => {
            let room = state.rooms.get_room_by_id(room_id)?;
            let player = room
                .player(player_id)
                .ok_or(EngineError::PlayerNotFound(player_id))?;
            query.reveal_key || player.role.sees_key()
        }
        None => query.reveal_key,
    };

    state
        .sessions
        .get(room_id, reveal_key)
        .map(Json)
        .ok_or(EngineError::GameNotFound(room_id))
}

pub async fn set_clue(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<ClueRequest>,
) -> Result<Json<GameSnapshot>, EngineError> {
    state
        .sessions
        .set_clue(room_id, &payload.clue, payload.number)
        .map(Json)
}

pub async fn guess_word(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<GuessRequest>,
) -> Result<Json<GuessOutcome>, EngineError> {
    let word = payload.word.trim();
    if word.is_empty() {
        return Err(EngineError::validation("word", "must not be empty"));
    }

    state.sessions.guess(room_id, word).map(Json)
}

pub async fn end_turn(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>, EngineError> {
    state.sessions.end_turn(room_id).map(Json)
}
