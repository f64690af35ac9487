pub mod game;
pub mod room;
pub mod snapshot;

pub use game::{Card, CardTeam, EndReason, GamePhase, GameResult, GuessResult};
pub use room::{Player, Role, RolePreference, Room, Team, TeamPreference};
pub use snapshot::{CardSnapshot, GameSnapshot, GuessOutcome, PlayerSnapshot, RoomSnapshot};
