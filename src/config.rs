use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public address used to build invite links (`{base_url}/join/{code}`)
    pub base_url: String,
    pub frontend_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Optional word list replacing the built-in vocabulary
    pub lexicon_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a number")?,
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        };

        let game = GameConfig {
            lexicon_path: env::var("LEXICON_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        };

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn invite_url(&self, invite_code: &str) -> String {
        format!(
            "{}/join/{}",
            self.server.base_url.trim_end_matches('/'),
            invite_code
        )
    }
}
