use std::cmp::Ordering;

use rand::{
    seq::{IndexedMutRandom, IndexedRandom, SliceRandom},
    Rng,
};

use crate::models::{Player, Role, Team};

pub fn random_team(rng: &mut impl Rng) -> Team {
    if rng.random_bool(0.5) {
        Team::Red
    } else {
        Team::Blue
    }
}

/// Pick the team with fewer members among `others`, breaking ties at random
pub fn balanced_team<'a>(
    others: impl IntoIterator<Item = &'a Player>,
    rng: &mut impl Rng,
) -> Team {
    let (red, blue) = others
        .into_iter()
        .fold((0usize, 0usize), |(red, blue), player| match player.team {
            Team::Red => (red + 1, blue),
            Team::Blue => (red, blue + 1),
        });

    match red.cmp(&blue) {
        Ordering::Less => Team::Red,
        Ordering::Greater => Team::Blue,
        Ordering::Equal => random_team(rng),
    }
}

/// Deal every player onto alternating teams in a random order, then give
/// each non-empty team one randomly chosen spymaster.
///
/// The slice keeps its order; only team and role change.
pub fn randomize(players: &mut [Player], rng: &mut impl Rng) {
    if players.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..players.len()).collect();
    order.shuffle(rng);
    let starting_team = random_team(rng);

    for (position, &index) in order.iter().enumerate() {
        let player = &mut players[index];
        player.team = if position % 2 == 0 {
            starting_team
        } else {
            starting_team.other()
        };
        player.role = Role::Operative;
    }

    for team in [Team::Red, Team::Blue] {
        let members: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.team == team)
            .map(|(index, _)| index)
            .collect();
        if let Some(&index) = members.choose(rng) {
            players[index].role = Role::Spymaster;
        }
    }

    if !players.iter().any(|player| player.role == Role::Spymaster) {
        if let Some(player) = players.choose_mut(rng) {
            player.role = Role::Spymaster;
        }
    }
}
