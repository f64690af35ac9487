use rand::{seq::index, seq::SliceRandom, Rng};

use crate::{
    lexicon::Lexicon,
    models::{Card, CardTeam, Team},
};

pub const DECK_SIZE: usize = 25;
/// Cards owned by the team that moves first
pub const STARTING_TEAM_CARDS: u32 = 9;
/// Cards owned by the team that moves second
pub const SECOND_TEAM_CARDS: u32 = 8;
pub const NEUTRAL_CARDS: usize = 7;
pub const ASSASSIN_CARDS: usize = 1;

/// A freshly dealt board
#[derive(Debug, Clone)]
pub struct Deck {
    pub cards: Vec<Card>,
    pub starting_team: Team,
}

impl Deck {
    pub fn starts_with_red(&self) -> bool {
        self.starting_team == Team::Red
    }
}

pub struct DeckGenerator;

impl DeckGenerator {
    /// Deal a new 25-card deck using the thread-local RNG
    pub fn generate(lexicon: &Lexicon) -> Deck {
        Self::generate_with(lexicon, &mut rand::rng())
    }

    /// Deal a new deck: 9 cards for the starting team, 8 for the other,
    /// 7 neutral and 1 assassin, paired positionally with 25 distinct words.
    pub fn generate_with(lexicon: &Lexicon, rng: &mut impl Rng) -> Deck {
        let words = Self::sample_words(lexicon, rng);
        let starting_team = if rng.random_bool(0.5) {
            Team::Red
        } else {
            Team::Blue
        };

        let mut labels = Self::team_labels(starting_team);
        labels.shuffle(rng);

        let cards = words
            .into_iter()
            .zip(labels)
            .map(|(word, team)| Card::new(word, team))
            .collect();

        Deck {
            cards,
            starting_team,
        }
    }

    fn sample_words(lexicon: &Lexicon, rng: &mut impl Rng) -> Vec<String> {
        let words = lexicon.words();
        index::sample(rng, words.len(), DECK_SIZE)
            .into_iter()
            .map(|i| words[i].clone())
            .collect()
    }

    fn team_labels(starting_team: Team) -> Vec<CardTeam> {
        let mut labels = Vec::with_capacity(DECK_SIZE);
        labels.extend(
            std::iter::repeat(CardTeam::from(starting_team)).take(STARTING_TEAM_CARDS as usize),
        );
        labels.extend(
            std::iter::repeat(CardTeam::from(starting_team.other()))
                .take(SECOND_TEAM_CARDS as usize),
        );
        labels.extend(std::iter::repeat(CardTeam::Neutral).take(NEUTRAL_CARDS));
        labels.extend(std::iter::repeat(CardTeam::Assassin).take(ASSASSIN_CARDS));
        labels
    }
}
