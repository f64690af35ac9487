use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    error::EngineError,
    game::{DeckGenerator, GameSession},
    lexicon::Lexicon,
    models::{GameSnapshot, GuessOutcome},
    rooms::RoomDirectory,
};

/// Active games keyed by the room they belong to.
///
/// Each session sits behind its own mutex. The index is only locked to
/// look a session up or swap one in, never while a game is being mutated.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<Mutex<GameSession>>>,
    rooms: Arc<dyn RoomDirectory>,
    lexicon: Arc<Lexicon>,
}

impl SessionRegistry {
    pub fn new(rooms: Arc<dyn RoomDirectory>, lexicon: Arc<Lexicon>) -> Self {
        Self {
            sessions: DashMap::new(),
            rooms,
            lexicon,
        }
    }

    fn session(&self, room_id: Uuid) -> Result<Arc<Mutex<GameSession>>, EngineError> {
        self.sessions
            .get(&room_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(EngineError::GameNotFound(room_id))
    }

    /// Deal a new game for the room, replacing any game already in progress
    pub fn start(&self, room_id: Uuid) -> Result<GameSnapshot, EngineError> {
        if !self.rooms.room_exists(room_id) {
            return Err(EngineError::RoomNotFound(room_id));
        }

        let deck = DeckGenerator::generate(&self.lexicon);
        let session = GameSession::new(room_id, deck);
        let snapshot = session.snapshot(true);
        let game_id = session.id();

        if self
            .sessions
            .insert(room_id, Arc::new(Mutex::new(session)))
            .is_some()
        {
            tracing::info!("Replaced previous game in room {}", room_id);
        }

        tracing::info!(
            "Started game {} in room {}, {} goes first",
            game_id,
            room_id,
            snapshot.starting_team
        );

        Ok(snapshot)
    }

    pub fn get(&self, room_id: Uuid, reveal_key: bool) -> Option<GameSnapshot> {
        let session = self.session(room_id).ok()?;
        let snapshot = session.lock().snapshot(reveal_key);
        Some(snapshot)
    }

    pub fn set_clue(
        &self,
        room_id: Uuid,
        clue: &str,
        number: i32,
    ) -> Result<GameSnapshot, EngineError> {
        let session = self.session(room_id)?;
        let mut game = session.lock();
        game.set_clue(clue, number)?;
        Ok(game.snapshot(false))
    }

    pub fn guess(&self, room_id: Uuid, word: &str) -> Result<GuessOutcome, EngineError> {
        let session = self.session(room_id)?;
        let mut game = session.lock();
        let guess_result = game.process_guess(word);
        Ok(GuessOutcome {
            guess_result,
            game: game.snapshot(false),
        })
    }

    pub fn end_turn(&self, room_id: Uuid) -> Result<GameSnapshot, EngineError> {
        let session = self.session(room_id)?;
        let mut game = session.lock();
        game.end_turn()?;
        Ok(game.snapshot(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{CardTeam, GamePhase, GuessResult, Team},
        rooms::RoomRegistry,
    };
    use std::collections::HashSet;

    fn setup() -> (Arc<RoomRegistry>, SessionRegistry, Uuid) {
        let rooms = Arc::new(RoomRegistry::new());
        let room_id = rooms.create_room("codenames").unwrap().room_id;
        let sessions = SessionRegistry::new(rooms.clone(), Arc::new(Lexicon::builtin()));
        (rooms, sessions, room_id)
    }

    fn word_of(game: &GameSnapshot, team: CardTeam) -> String {
        game.cards
            .iter()
            .find(|card| card.team == Some(team) && !card.revealed)
            .map(|card| card.word.clone())
            .unwrap()
    }

    #[test]
    fn test_start_requires_room() {
        let (_, sessions, _) = setup();
        let missing = Uuid::new_v4();
        assert_eq!(
            sessions.start(missing).unwrap_err(),
            EngineError::RoomNotFound(missing)
        );
    }

    #[test]
    fn test_start_and_get() {
        let (_, sessions, room_id) = setup();
        assert!(sessions.get(room_id, false).is_none());

        let started = sessions.start(room_id).unwrap();
        assert_eq!(started.room_id, room_id);
        assert_eq!(started.phase, GamePhase::SpymasterClue);
        assert_eq!(started.current_team, started.starting_team);
        assert!(started.cards.iter().all(|card| card.team.is_some()));

        let hidden = sessions.get(room_id, false).unwrap();
        assert!(hidden.cards.iter().all(|card| card.team.is_none()));
        assert_eq!(sessions.get(room_id, true).unwrap(), started);
    }

    #[test]
    fn test_restart_replaces_game() {
        let (_, sessions, room_id) = setup();
        sessions.start(room_id).unwrap();
        sessions.set_clue(room_id, "ANIMALS", 2).unwrap();

        let restarted = sessions.start(room_id).unwrap();
        assert_eq!(restarted.phase, GamePhase::SpymasterClue);
        assert_eq!(restarted.current_clue, None);
    }

    #[test]
    fn test_operations_without_game() {
        let (_, sessions, room_id) = setup();
        let expected = EngineError::GameNotFound(room_id);
        assert_eq!(sessions.set_clue(room_id, "X", 1).unwrap_err(), expected);
        assert_eq!(sessions.guess(room_id, "X").unwrap_err(), expected);
        assert_eq!(sessions.end_turn(room_id).unwrap_err(), expected);
    }

    #[test]
    fn test_clue_guess_end_turn_flow() {
        let (_, sessions, room_id) = setup();
        let started = sessions.start(room_id).unwrap();
        let team = started.starting_team;
        let own_word = word_of(&started, CardTeam::from(team));

        assert!(matches!(
            sessions.guess(room_id, &own_word).unwrap().guess_result,
            GuessResult::InvalidPhase
        ));

        let game = sessions.set_clue(room_id, "ANIMALS", 2).unwrap();
        assert_eq!(game.guesses_remaining, 3);
        assert_eq!(game.phase, GamePhase::TeamGuessing);

        let outcome = sessions.guess(room_id, &own_word.to_lowercase()).unwrap();
        assert_eq!(outcome.guess_result, GuessResult::CorrectTeam);
        assert_eq!(outcome.game.guesses_remaining, 2);
        assert_eq!(
            outcome.game.red_cards_remaining + outcome.game.blue_cards_remaining,
            16
        );

        let game = sessions.end_turn(room_id).unwrap();
        assert_eq!(game.current_team, team.other());
        assert_eq!(game.phase, GamePhase::SpymasterClue);
    }

    #[test]
    fn test_phase_violation_is_reported() {
        let (_, sessions, room_id) = setup();
        sessions.start(room_id).unwrap();
        sessions.set_clue(room_id, "ANIMALS", 1).unwrap();
        assert!(matches!(
            sessions.set_clue(room_id, "PLANTS", 1),
            Err(EngineError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_concurrent_guesses_serialize() {
        let (_, sessions, room_id) = setup();
        let started = sessions.start(room_id).unwrap();
        let team = started.starting_team;
        sessions.set_clue(room_id, "EVERYTHING", 20).unwrap();

        // Every thread races for the same set of the current team's cards
        let own_words: Vec<String> = started
            .cards
            .iter()
            .filter(|card| card.team == Some(CardTeam::from(team)))
            .take(5)
            .map(|card| card.word.clone())
            .collect();

        let results: Vec<GuessResult> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .flat_map(|_| own_words.iter())
                .map(|word| {
                    let sessions = &sessions;
                    scope.spawn(move || sessions.guess(room_id, word).unwrap().guess_result)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let correct = results
            .iter()
            .filter(|r| **r == GuessResult::CorrectTeam)
            .count();
        let repeats = results
            .iter()
            .filter(|r| **r == GuessResult::AlreadyRevealed)
            .count();
        assert_eq!(correct, own_words.len());
        assert_eq!(repeats, results.len() - own_words.len());

        let game = sessions.get(room_id, true).unwrap();
        let revealed: HashSet<_> = game
            .cards
            .iter()
            .filter(|card| card.revealed)
            .map(|card| card.word.clone())
            .collect();
        assert_eq!(revealed, own_words.iter().cloned().collect::<HashSet<_>>());
        let remaining = match team {
            Team::Red => game.red_cards_remaining,
            Team::Blue => game.blue_cards_remaining,
        };
        assert_eq!(remaining, 9 - own_words.len() as u32);
        assert_eq!(game.guesses_remaining, 21 - own_words.len() as u32);
    }

    #[test]
    fn test_sessions_are_independent_per_room() {
        let (rooms, sessions, first) = setup();
        let second = rooms.create_room("codenames").unwrap().room_id;

        sessions.start(first).unwrap();
        sessions.start(second).unwrap();
        sessions.set_clue(first, "ANIMALS", 2).unwrap();

        assert_eq!(
            sessions.get(first, false).unwrap().phase,
            GamePhase::TeamGuessing
        );
        assert_eq!(
            sessions.get(second, false).unwrap().phase,
            GamePhase::SpymasterClue
        );
    }
}
