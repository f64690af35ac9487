use serde::{Deserialize, Serialize};

use super::Team;

/// Key label printed on a card when the deck is dealt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTeam {
    Red,
    Blue,
    Neutral,
    Assassin,
}

impl CardTeam {
    /// The playing team a card belongs to, if any
    pub fn side(self) -> Option<Team> {
        match self {
            CardTeam::Red => Some(Team::Red),
            CardTeam::Blue => Some(Team::Blue),
            CardTeam::Neutral | CardTeam::Assassin => None,
        }
    }
}

impl From<Team> for CardTeam {
    fn from(team: Team) -> Self {
        match team {
            Team::Red => CardTeam::Red,
            Team::Blue => CardTeam::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub team: CardTeam,
    pub revealed: bool,
}

impl Card {
    pub fn new(word: String, team: CardTeam) -> Self {
        Self {
            word,
            team,
            revealed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    SpymasterClue,
    TeamGuessing,
    GameOver,
}

/// Outcome of a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessResult {
    InvalidPhase,
    NotFound,
    AlreadyRevealed,
    CorrectTeam,
    CorrectTeamTurnEnds,
    Neutral,
    EnemyTeam,
    Assassin,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    AllCardsRevealed,
    AssassinRevealed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Team,
    pub reason: String,
    pub end_reason: EndReason,
}

impl GameResult {
    pub fn all_cards_revealed(winner: Team) -> Self {
        Self {
            winner,
            reason: format!("All {} cards revealed", winner.to_string().to_lowercase()),
            end_reason: EndReason::AllCardsRevealed,
        }
    }

    pub fn assassin_revealed(winner: Team) -> Self {
        Self {
            winner,
            reason: "Assassin revealed".to_string(),
            end_reason: EndReason::AssassinRevealed,
        }
    }
}
