//! Point-in-time copies handed to callers so no lock outlives an operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Card, CardTeam, GamePhase, GameResult, GuessResult, Player, Role, Room, Team};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player_id: Uuid,
    pub name: String,
    pub is_host: bool,
    pub joined_at: DateTime<Utc>,
    pub team: Team,
    pub role: Role,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.id,
            name: player.name.clone(),
            is_host: player.is_host,
            joined_at: player.joined_at,
            team: player.team,
            role: player.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: Uuid,
    pub game_key: String,
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<PlayerSnapshot>,
}

impl RoomSnapshot {
    /// Build a snapshot from a room header and an already-locked player list
    pub fn capture(room: &Room, players: &[Player]) -> Self {
        Self {
            room_id: room.id,
            game_key: room.game_key.clone(),
            invite_code: room.invite_code.clone(),
            created_at: room.created_at,
            players: players.iter().map(PlayerSnapshot::from).collect(),
        }
    }

    pub fn player(&self, player_id: Uuid) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub word: String,
    pub revealed: bool,
    /// `None` when the key is withheld and the card is still face down
    pub team: Option<CardTeam>,
}

impl CardSnapshot {
    pub fn capture(card: &Card, reveal_key: bool) -> Self {
        Self {
            word: card.word.clone(),
            revealed: card.revealed,
            team: (reveal_key || card.revealed).then_some(card.team),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub room_id: Uuid,
    pub starting_team: Team,
    pub current_team: Team,
    pub phase: GamePhase,
    pub current_clue: Option<String>,
    pub current_clue_number: u32,
    pub guesses_remaining: u32,
    pub red_cards_remaining: u32,
    pub blue_cards_remaining: u32,
    pub cards: Vec<CardSnapshot>,
    pub result: Option<GameResult>,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// A guess outcome together with the game state it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub guess_result: GuessResult,
    pub game: GameSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_snapshot_withholds_unrevealed_team() {
        let mut card = Card::new("APPLE".to_string(), CardTeam::Assassin);

        assert_eq!(CardSnapshot::capture(&card, false).team, None);
        assert_eq!(
            CardSnapshot::capture(&card, true).team,
            Some(CardTeam::Assassin)
        );

        card.revealed = true;
        assert_eq!(
            CardSnapshot::capture(&card, false).team,
            Some(CardTeam::Assassin)
        );
    }

    #[test]
    fn test_room_snapshot_copies_players() {
        let room = Room::new(
            Uuid::new_v4(),
            "codenames".to_string(),
            "ABCD2345".to_string(),
        );
        let players = vec![Player {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            is_host: true,
            joined_at: Utc::now(),
            team: Team::Red,
            role: Role::Operative,
        }];

        let snapshot = RoomSnapshot::capture(&room, &players);
        assert_eq!(snapshot.room_id, room.id);
        assert_eq!(snapshot.players.len(), 1);
        assert!(snapshot.player(players[0].id).unwrap().is_host);
    }
}
