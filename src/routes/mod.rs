pub mod codenames;
pub mod health;
pub mod rooms;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rooms", post(rooms::create_room))
        .route("/rooms/{room_id}", get(rooms::get_room))
        .route(
            "/rooms/by-invite/{invite_code}",
            get(rooms::get_room_by_invite),
        )
        .route("/rooms/{room_id}/join", post(rooms::join_room))
        .route(
            "/rooms/{room_id}/players/{player_id}",
            axum::routing::delete(rooms::remove_player),
        )
        .route(
            "/rooms/{room_id}/players/{player_id}/assignment",
            put(rooms::update_assignment),
        )
        .route(
            "/rooms/{room_id}/randomize",
            post(rooms::randomize_assignments),
        )
        .route("/rooms/{room_id}/codenames", get(codenames::get_game))
        .route(
            "/rooms/{room_id}/codenames/start",
            post(codenames::start_game),
        )
        .route("/rooms/{room_id}/codenames/clue", post(codenames::set_clue))
        .route(
            "/rooms/{room_id}/codenames/guess",
            post(codenames::guess_word),
        )
        .route(
            "/rooms/{room_id}/codenames/end-turn",
            post(codenames::end_turn),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, GameConfig, ServerConfig},
        lexicon::Lexicon,
        models::{CardTeam, GamePhase, GameSnapshot, GuessResult, Role, RoomSnapshot},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tokio_test::assert_ok;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                base_url: "http://play.test/".to_string(),
                frontend_url: "http://localhost:5173".to_string(),
            },
            game: GameConfig { lexicon_path: None },
        };
        let state = Arc::new(AppState::new(config, Lexicon::builtin()));
        create_routes().with_state(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_room_with_host(app: &Router) -> (String, String) {
        let (status, body) = send(
            app,
            "POST",
            "/api/rooms",
            Some(json!({ "game_key": "codenames", "host_name": "Ana" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let room_id = body["room"]["room_id"].as_str().unwrap().to_string();
        let host_id = body["host"]["player_id"].as_str().unwrap().to_string();
        (room_id, host_id)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "codenames-backend");
    }

    #[tokio::test]
    async fn test_create_room_with_host_and_invite_url() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/rooms",
            Some(json!({ "game_key": "codenames", "host_name": "Ana" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let room: RoomSnapshot = assert_ok!(serde_json::from_value(body["room"].clone()));
        assert_eq!(room.players.len(), 1);
        assert!(room.players[0].is_host);
        assert_eq!(
            body["invite_url"],
            format!("http://play.test/join/{}", room.invite_code)
        );

        let uri = format!("/api/rooms/by-invite/{}", room.invite_code.to_lowercase());
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["room_id"], room.room_id.to_string());
    }

    #[tokio::test]
    async fn test_create_room_without_host() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/rooms",
            Some(json!({ "game_key": "codenames" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.get("host").is_none());
        assert_eq!(body["room"]["players"], json!([]));
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let app = test_app();
        let (room_id, _) = create_room_with_host(&app).await;

        let missing = uuid::Uuid::new_v4();
        let (status, body) = send(&app, "GET", &format!("/api/rooms/{}", missing), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/rooms/{}/join", room_id),
            Some(json!({ "player_name": "Ana" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/rooms/{}/join", room_id),
            Some(json!({ "player_name": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/rooms/{}/codenames/end-turn", room_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_join_assign_and_remove() {
        let app = test_app();
        let (room_id, host_id) = create_room_with_host(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/rooms/{}/join", room_id),
            Some(json!({ "player_name": "Ben" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["player"]["is_host"], false);
        assert_eq!(body["room"]["players"].as_array().unwrap().len(), 2);
        let ben_id = body["player"]["player_id"].as_str().unwrap().to_string();

        let uri = format!("/api/rooms/{}/players/{}/assignment", room_id, ben_id);
        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "team": "blue", "role": "SPYMASTER" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["player"]["team"], "Blue");
        assert_eq!(body["player"]["role"], "Spymaster");

        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "team": "green", "role": "Operative" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("team"));

        let uri = format!("/api/rooms/{}/players/{}", room_id, host_id);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, "GET", &format!("/api/rooms/{}", room_id), None).await;
        assert_eq!(body["players"][0]["name"], "Ben");
        assert_eq!(body["players"][0]["is_host"], true);
    }

    #[tokio::test]
    async fn test_randomize_assignments() {
        let app = test_app();
        let (room_id, _) = create_room_with_host(&app).await;
        for name in ["Ben", "Cy", "Di"] {
            send(
                &app,
                "POST",
                &format!("/api/rooms/{}/join", room_id),
                Some(json!({ "player_name": name })),
            )
            .await;
        }

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/rooms/{}/randomize", room_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let room: RoomSnapshot = assert_ok!(serde_json::from_value(body));
        let spymasters = room
            .players
            .iter()
            .filter(|p| p.role == Role::Spymaster)
            .count();
        assert_eq!(spymasters, 2);
    }

    #[tokio::test]
    async fn test_game_flow_over_http() {
        let app = test_app();
        let (room_id, host_id) = create_room_with_host(&app).await;
        let base = format!("/api/rooms/{}/codenames", room_id);

        let (status, _) = send(&app, "GET", &base, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", &format!("{}/start", base), None).await;
        assert_eq!(status, StatusCode::OK);
        let started: GameSnapshot = assert_ok!(serde_json::from_value(body));
        assert!(started.cards.iter().all(|card| card.team.is_some()));

        // The host is an operative, so the key stays hidden for them
        let uri = format!("{}?player_id={}", base, host_id);
        let (_, body) = send(&app, "GET", &uri, None).await;
        let hidden: GameSnapshot = assert_ok!(serde_json::from_value(body));
        assert!(hidden.cards.iter().all(|card| card.team.is_none()));

        let (_, body) = send(&app, "GET", &format!("{}?reveal_key=true", base), None).await;
        let revealed: GameSnapshot = assert_ok!(serde_json::from_value(body));
        assert_eq!(revealed, started);

        let (status, _) = send(
            &app,
            "POST",
            &format!("{}/clue", base),
            Some(json!({ "clue": "ANIMALS", "number": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            &format!("{}/clue", base),
            Some(json!({ "clue": "ANIMALS", "number": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "TeamGuessing");

        let neutral = started
            .cards
            .iter()
            .find(|card| card.team == Some(CardTeam::Neutral))
            .unwrap();
        let (status, body) = send(
            &app,
            "POST",
            &format!("{}/guess", base),
            Some(json!({ "word": format!("  {}  ", neutral.word.to_lowercase()) })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["guess_result"], "Neutral");
        let game: GameSnapshot = assert_ok!(serde_json::from_value(body["game"].clone()));
        assert_eq!(game.phase, GamePhase::SpymasterClue);
        assert_eq!(game.current_team, started.starting_team.other());

        let (status, body) = send(
            &app,
            "POST",
            &format!("{}/guess", base),
            Some(json!({ "word": neutral.word })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_value::<GuessResult>(body["guess_result"].clone()).unwrap(),
            GuessResult::InvalidPhase
        );

        let (status, body) = send(&app, "POST", &format!("{}/end-turn", base), None).await;
        assert_eq!(status, StatusCode::OK);
        let game: GameSnapshot = assert_ok!(serde_json::from_value(body));
        assert_eq!(game.current_team, started.starting_team);

        let clue = json!({ "clue": "PLANTS", "number": 2 });
        let (status, _) = send(&app, "POST", &format!("{}/clue", base), Some(clue.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "POST", &format!("{}/clue", base), Some(clue)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
