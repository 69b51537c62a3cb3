use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Channels the game runs in, empty for every channel
    pub channels: Vec<u64>,
    pub cooldown_secs: u64,
    pub allow_consecutive: bool,
    pub max_message_len: usize,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            channels: vec![],
            cooldown_secs: 30,
            allow_consecutive: false,
            max_message_len: 200,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
}

/// Rocket's configuration merged with `APP_` environment variables, so that
/// `APP_GAME_COOLDOWN_SECS` sets `game.cooldown_secs`
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}
