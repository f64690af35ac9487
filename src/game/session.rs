use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::deck::{Deck, SECOND_TEAM_CARDS, STARTING_TEAM_CARDS};
use crate::{
    error::EngineError,
    models::{
        Card, CardSnapshot, CardTeam, GamePhase, GameResult, GameSnapshot, GuessResult, Team,
    },
};

/// Turn-based state for one Codenames game bound to a room.
///
/// Phases cycle `SpymasterClue -> TeamGuessing -> SpymasterClue` until a
/// result is recorded, after which the session stays in `GameOver`.
/// Callers are responsible for serialising access; the session registry
/// keeps each session behind its own mutex.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    room_id: Uuid,
    cards: Vec<Card>,
    starting_team: Team,
    current_team: Team,
    phase: GamePhase,
    current_clue: Option<String>,
    current_clue_number: u32,
    guesses_remaining: u32,
    red_cards_remaining: u32,
    blue_cards_remaining: u32,
    result: Option<GameResult>,
    created_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new(room_id: Uuid, deck: Deck) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            room_id,
            cards: Vec::new(),
            starting_team: deck.starting_team,
            current_team: deck.starting_team,
            phase: GamePhase::SpymasterClue,
            current_clue: None,
            current_clue_number: 0,
            guesses_remaining: 0,
            red_cards_remaining: 0,
            blue_cards_remaining: 0,
            result: None,
            created_at: Utc::now(),
            ended_at: None,
        };
        session.initialize(deck);
        session
    }

    /// Lay out a fresh deck and reset all turn and result state
    pub fn initialize(&mut self, deck: Deck) {
        let (red, blue) = if deck.starts_with_red() {
            (STARTING_TEAM_CARDS, SECOND_TEAM_CARDS)
        } else {
            (SECOND_TEAM_CARDS, STARTING_TEAM_CARDS)
        };

        self.cards = deck.cards;
        self.starting_team = deck.starting_team;
        self.current_team = deck.starting_team;
        self.red_cards_remaining = red;
        self.blue_cards_remaining = blue;
        self.phase = GamePhase::SpymasterClue;
        self.clear_clue();
        self.result = None;
        self.ended_at = None;
    }

    /// Record the spymaster's clue and open the guessing phase.
    ///
    /// The team gets `number + 1` guesses (the bonus guess).
    pub fn set_clue(&mut self, clue: &str, number: i32) -> Result<(), EngineError> {
        if self.result.is_some() || self.phase != GamePhase::SpymasterClue {
            return Err(EngineError::InvalidPhase {
                action: "set a clue",
                phase: self.phase,
            });
        }

        let clue = clue.trim();
        if clue.is_empty() {
            return Err(EngineError::validation("clue", "clue is required"));
        }
        if number < 1 {
            return Err(EngineError::validation(
                "number",
                "clue number must be at least 1",
            ));
        }

        let number = number as u32;
        self.current_clue = Some(clue.to_string());
        self.current_clue_number = number;
        self.guesses_remaining = number + 1;
        self.phase = GamePhase::TeamGuessing;

        tracing::debug!(
            "Room {}: {} clue '{}' for {}",
            self.room_id,
            self.current_team,
            clue,
            number
        );

        Ok(())
    }

    /// Resolve a guess for the current team
    pub fn process_guess(&mut self, word: &str) -> GuessResult {
        if self.result.is_some()
            || self.phase != GamePhase::TeamGuessing
            || self.guesses_remaining == 0
        {
            return GuessResult::InvalidPhase;
        }

        let needle = word.to_lowercase();
        let Some(card) = self
            .cards
            .iter_mut()
            .find(|card| card.word.to_lowercase() == needle)
        else {
            return GuessResult::NotFound;
        };

        if card.revealed {
            return GuessResult::AlreadyRevealed;
        }
        card.revealed = true;
        let card_team = card.team;

        tracing::debug!(
            "Room {}: {} guessed {} ({:?})",
            self.room_id,
            self.current_team,
            word,
            card_team
        );

        match card_team {
            CardTeam::Assassin => {
                self.finish(GameResult::assassin_revealed(self.current_team.other()));
                GuessResult::Assassin
            }
            CardTeam::Neutral => {
                self.advance_turn();
                GuessResult::Neutral
            }
            other => match other.side() {
                Some(team) if team == self.current_team => self.resolve_own_card(team),
                Some(enemy) => self.resolve_enemy_card(enemy),
                None => GuessResult::Unknown,
            },
        }
    }

    /// Pass the turn to the other team. Not allowed once the game has ended.
    pub fn end_turn(&mut self) -> Result<(), EngineError> {
        if self.result.is_some() {
            return Err(EngineError::InvalidPhase {
                action: "end the turn",
                phase: self.phase,
            });
        }
        self.advance_turn();
        Ok(())
    }

    fn resolve_own_card(&mut self, team: Team) -> GuessResult {
        self.decrement(team);
        self.check_for_winner();
        if self.result.is_some() {
            return GuessResult::CorrectTeam;
        }

        self.guesses_remaining = self.guesses_remaining.saturating_sub(1);
        if self.guesses_remaining == 0 {
            self.advance_turn();
            return GuessResult::CorrectTeamTurnEnds;
        }

        GuessResult::CorrectTeam
    }

    // Emptying the enemy's pile wins the game for the enemy, not the guesser.
    fn resolve_enemy_card(&mut self, enemy: Team) -> GuessResult {
        self.decrement(enemy);
        self.check_for_winner();
        if self.result.is_none() {
            self.advance_turn();
        }
        GuessResult::EnemyTeam
    }

    fn check_for_winner(&mut self) {
        for team in [Team::Red, Team::Blue] {
            if self.cards_remaining(team) == 0 {
                self.finish(GameResult::all_cards_revealed(team));
            }
        }
    }

    /// First result wins; later calls are no-ops
    fn finish(&mut self, result: GameResult) {
        if self.result.is_some() {
            return;
        }

        tracing::info!(
            "Game {} in room {} over: {} wins ({})",
            self.id,
            self.room_id,
            result.winner,
            result.reason
        );

        self.result = Some(result);
        self.phase = GamePhase::GameOver;
        self.ended_at = Some(Utc::now());
    }

    fn advance_turn(&mut self) {
        self.current_team = self.current_team.other();
        self.phase = GamePhase::SpymasterClue;
        self.clear_clue();
    }

    fn clear_clue(&mut self) {
        self.current_clue = None;
        self.current_clue_number = 0;
        self.guesses_remaining = 0;
    }

    fn decrement(&mut self, team: Team) {
        let counter = match team {
            Team::Red => &mut self.red_cards_remaining,
            Team::Blue => &mut self.blue_cards_remaining,
        };
        *counter = counter.saturating_sub(1);
    }

    pub fn cards_remaining(&self, team: Team) -> u32 {
        match team {
            Team::Red => self.red_cards_remaining,
            Team::Blue => self.blue_cards_remaining,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn room_id(&self) -> Uuid {
        self.room_id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_team(&self) -> Team {
        self.current_team
    }

    pub fn guesses_remaining(&self) -> u32 {
        self.guesses_remaining
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn snapshot(&self, reveal_key: bool) -> GameSnapshot {
        GameSnapshot {
            room_id: self.room_id,
            starting_team: self.starting_team,
            current_team: self.current_team,
            phase: self.phase,
            current_clue: self.current_clue.clone(),
            current_clue_number: self.current_clue_number,
            guesses_remaining: self.guesses_remaining,
            red_cards_remaining: self.red_cards_remaining,
            blue_cards_remaining: self.blue_cards_remaining,
            cards: self
                .cards
                .iter()
                .map(|card| CardSnapshot::capture(card, reveal_key))
                .collect(),
            result: self.result.clone(),
            created_at: self.created_at,
            ended_at: self.ended_at,
        }
    }
}
