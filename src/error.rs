use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::models::GamePhase;

/// Failures reported by the room and session engine.
///
/// Every variant is raised before any state is mutated, so a rejected
/// operation leaves the room or game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Room {0} not found")]
    RoomNotFound(Uuid),

    #[error("Invalid invite code '{0}'")]
    InviteCodeNotFound(String),

    #[error("Player {0} not found in room")]
    PlayerNotFound(Uuid),

    #[error("Game not started for room {0}")]
    GameNotFound(Uuid),

    #[error("Player name '{0}' is already taken in this room")]
    DuplicateName(String),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Cannot {action} while the game is in phase {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: GamePhase,
    },
}

impl EngineError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RoomNotFound(_)
            | Self::InviteCodeNotFound(_)
            | Self::PlayerNotFound(_)
            | Self::GameNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateName(_) | Self::InvalidPhase { .. } => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!("Rejected request ({}): {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
