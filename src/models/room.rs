use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn other(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "Red"),
            Team::Blue => write!(f, "Blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Operative,
    Spymaster,
    /// Sees the full key like a spymaster, for free-form exploration
    Tester,
}

impl Role {
    /// Whether the role is allowed to see unrevealed card teams
    pub fn sees_key(self) -> bool {
        matches!(self, Role::Spymaster | Role::Tester)
    }
}

/// Team requested by a player; `Random` applies the balancing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamPreference {
    Random,
    Red,
    Blue,
}

impl FromStr for TeamPreference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            _ => Err(EngineError::validation(
                "team",
                format!("'{}' is not one of Random, Red, Blue", s),
            )),
        }
    }
}

/// Role requested by a player; `Random` means Operative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePreference {
    Operative,
    Spymaster,
    Tester,
    Random,
}

impl RolePreference {
    pub fn resolve(self) -> Role {
        match self {
            Self::Operative | Self::Random => Role::Operative,
            Self::Spymaster => Role::Spymaster,
            Self::Tester => Role::Tester,
        }
    }
}

impl FromStr for RolePreference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operative" => Ok(Self::Operative),
            "spymaster" => Ok(Self::Spymaster),
            "tester" => Ok(Self::Tester),
            "random" => Ok(Self::Random),
            _ => Err(EngineError::validation(
                "role",
                format!("'{}' is not one of Operative, Spymaster, Tester", s),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: Uuid,
    /// Unique within the room, compared case-sensitively
    pub name: String,
    pub is_host: bool,
    pub joined_at: DateTime<Utc>,
    pub team: Team,
    pub role: Role,
}

/// A room players gather in before and during a game.
///
/// The immutable header lives outside the lock; the player list is only
/// touched while holding `players`.
#[derive(Debug)]
pub struct Room {
    pub id: Uuid,
    pub game_key: String,
    /// Stored upper-case; lookups are case-insensitive
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
    /// Players in join order
    pub players: Mutex<Vec<Player>>,
}

impl Room {
    pub fn new(id: Uuid, game_key: String, invite_code: String) -> Self {
        Self {
            id,
            game_key,
            invite_code,
            created_at: Utc::now(),
            players: Mutex::new(Vec::new()),
        }
    }
}
