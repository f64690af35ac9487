pub mod assignment;

use std::sync::Arc;

use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::{
    error::EngineError,
    models::{
        Player, PlayerSnapshot, Role, RolePreference, Room, RoomSnapshot, Team, TeamPreference,
    },
    utils::invite_code::{generate_invite_code, normalize_invite_code},
};

/// Read-only view of room existence, used by components that must not
/// reach into room internals
pub trait RoomDirectory: Send + Sync {
    fn room_exists(&self, room_id: Uuid) -> bool;
}

/// In-memory store of rooms, indexed by id and by invite code.
///
/// Index maps only hold their shard locks long enough to clone the `Arc`
/// out; all player-list work happens under the room's own mutex, so
/// operations on different rooms never wait on each other.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<Uuid, Arc<Room>>,
    /// Index from upper-case invite code to room id
    code_index: DashMap<String, Uuid>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn room(&self, room_id: Uuid) -> Result<Arc<Room>, EngineError> {
        self.rooms
            .get(&room_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(EngineError::RoomNotFound(room_id))
    }

    /// Reserve a fresh invite code for `room_id`, regenerating on collision
    fn claim_invite_code(&self, room_id: Uuid) -> String {
        loop {
            let code = generate_invite_code();
            match self.code_index.entry(code.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(room_id);
                    return code;
                }
                Entry::Occupied(_) => {
                    tracing::debug!("Invite code collision on {}, regenerating", code);
                }
            }
        }
    }

    pub fn create_room(&self, game_key: &str) -> Result<RoomSnapshot, EngineError> {
        let game_key = game_key.trim();
        if game_key.is_empty() {
            return Err(EngineError::validation("game_key", "game key is required"));
        }

        let room_id = Uuid::new_v4();
        let invite_code = self.claim_invite_code(room_id);
        let room = Arc::new(Room::new(room_id, game_key.to_string(), invite_code));
        let snapshot = RoomSnapshot::capture(&room, &[]);
        self.rooms.insert(room_id, room);

        tracing::info!(
            "Created {} room {} with invite code {}",
            snapshot.game_key,
            room_id,
            snapshot.invite_code
        );

        Ok(snapshot)
    }

    pub fn get_room_by_id(&self, room_id: Uuid) -> Result<RoomSnapshot, EngineError> {
        let room = self.room(room_id)?;
        let players = room.players.lock();
        Ok(RoomSnapshot::capture(&room, &players))
    }

    pub fn get_room_by_invite_code(&self, invite_code: &str) -> Result<RoomSnapshot, EngineError> {
        let code = normalize_invite_code(invite_code);
        let not_found = || EngineError::InviteCodeNotFound(code.clone());

        let room_id = self
            .code_index
            .get(&code)
            .map(|entry| *entry.value())
            .ok_or_else(not_found)?;
        let room = self.room(room_id).map_err(|_| not_found())?;

        let players = room.players.lock();
        Ok(RoomSnapshot::capture(&room, &players))
    }

    /// Add a player to a room. The first player becomes host; the team is
    /// chosen by the balancing rule and the role starts as Operative.
    pub fn join_room(&self, room_id: Uuid, name: &str) -> Result<PlayerSnapshot, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("player_name", "player name is required"));
        }

        let room = self.room(room_id)?;
        let mut players = room.players.lock();

        if players.iter().any(|player| player.name == name) {
            return Err(EngineError::DuplicateName(name.to_string()));
        }

        let player = Player {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_host: players.is_empty(),
            joined_at: Utc::now(),
            team: assignment::balanced_team(players.iter(), &mut rand::rng()),
            role: Role::Operative,
        };
        let snapshot = PlayerSnapshot::from(&player);
        players.push(player);

        tracing::info!(
            "Player {} ({}) joined room {} on team {}",
            snapshot.name,
            snapshot.player_id,
            room_id,
            snapshot.team
        );

        Ok(snapshot)
    }

    /// Change a player's team and role. `Random` team re-balances against
    /// everyone else in the room.
    pub fn update_assignment(
        &self,
        room_id: Uuid,
        player_id: Uuid,
        team: TeamPreference,
        role: RolePreference,
    ) -> Result<(PlayerSnapshot, RoomSnapshot), EngineError> {
        let room = self.room(room_id)?;
        let mut players = room.players.lock();

        let index = players
            .iter()
            .position(|player| player.id == player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;

        let team = match team {
            TeamPreference::Red => Team::Red,
            TeamPreference::Blue => Team::Blue,
            TeamPreference::Random => assignment::balanced_team(
                players.iter().filter(|player| player.id != player_id),
                &mut rand::rng(),
            ),
        };
        players[index].team = team;
        players[index].role = role.resolve();

        tracing::info!(
            "Player {} in room {} assigned to {} as {:?}",
            player_id,
            room_id,
            team,
            players[index].role
        );

        Ok((
            PlayerSnapshot::from(&players[index]),
            RoomSnapshot::capture(&room, &players),
        ))
    }

    pub fn randomize_assignments(&self, room_id: Uuid) -> Result<RoomSnapshot, EngineError> {
        let room = self.room(room_id)?;
        let mut players = room.players.lock();

        assignment::randomize(&mut players, &mut rand::rng());

        tracing::info!(
            "Randomized assignments for {} players in room {}",
            players.len(),
            room_id
        );

        Ok(RoomSnapshot::capture(&room, &players))
    }

    /// Remove a player. If the host leaves, the longest-standing remaining
    /// player becomes host. Returns false if the room or player is unknown.
    pub fn remove_player(&self, room_id: Uuid, player_id: Uuid) -> bool {
        let Ok(room) = self.room(room_id) else {
            return false;
        };
        let mut players = room.players.lock();

        let Some(index) = players.iter().position(|player| player.id == player_id) else {
            return false;
        };
        let removed = players.remove(index);

        if removed.is_host {
            if let Some(next_host) = players.first_mut() {
                next_host.is_host = true;
                tracing::info!(
                    "Host {} left room {}, {} is now host",
                    removed.name,
                    room_id,
                    next_host.name
                );
            }
        }

        tracing::info!("Player {} ({}) left room {}", removed.name, player_id, room_id);

        true
    }
}

impl RoomDirectory for RoomRegistry {
    fn room_exists(&self, room_id: Uuid) -> bool {
        self.rooms.contains_key(&room_id)
    }
}
