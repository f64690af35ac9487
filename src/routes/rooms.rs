use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::EngineError,
    models::{PlayerSnapshot, RolePreference, RoomSnapshot, TeamPreference},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub game_key: String,
    /// When present the named player joins immediately and becomes host
    pub host_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room: RoomSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<PlayerSnapshot>,
    pub invite_url: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRoomRequest {
    pub player_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub team: String,
    pub role: String,
}

/// A player together with the room they belong to
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerInRoomResponse {
    pub player: PlayerSnapshot,
    pub room: RoomSnapshot,
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), EngineError> {
    // Reject a blank host name up front so no orphan room is left behind
    if let Some(name) = &payload.host_name {
        if name.trim().is_empty() {
            return Err(EngineError::validation("host_name", "must not be empty"));
        }
    }

    let mut room = state.rooms.create_room(&payload.game_key)?;
    let host = match payload.host_name.as_deref() {
        Some(name) => {
            let host = state.rooms.join_room(room.room_id, name)?;
            room = state.rooms.get_room_by_id(room.room_id)?;
            Some(host)
        }
        None => None,
    };

    let invite_url = state.config.invite_url(&room.invite_code);
    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            room,
            host,
            invite_url,
        }),
    ))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomSnapshot>, EngineError> {
    state.rooms.get_room_by_id(room_id).map(Json)
}

pub async fn get_room_by_invite(
    State(state): State<Arc<AppState>>,
    Path(invite_code): Path<String>,
) -> Result<Json<RoomSnapshot>, EngineError> {
    state.rooms.get_room_by_invite_code(&invite_code).map(Json)
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<JoinRoomRequest>,
) -> Result<Json<PlayerInRoomResponse>, EngineError> {
    let player = state.rooms.join_room(room_id, &payload.player_name)?;
    let room = state.rooms.get_room_by_id(room_id)?;
    Ok(Json(PlayerInRoomResponse { player, room }))
}

pub async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path((room_id, player_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, EngineError> {
    if state.rooms.remove_player(room_id, player_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(EngineError::PlayerNotFound(player_id))
    }
}

pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    Path((room_id, player_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AssignmentRequest>,
) -> Result<Json<PlayerInRoomResponse>, EngineError> {
    let team: TeamPreference = payload.team.parse()?;
    let role: RolePreference = payload.role.parse()?;

    let (player, room) = state
        .rooms
        .update_assignment(room_id, player_id, team, role)?;
    Ok(Json(PlayerInRoomResponse { player, room }))
}

pub async fn randomize_assignments(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomSnapshot>, EngineError> {
    state.rooms.randomize_assignments(room_id).map(Json)
}
