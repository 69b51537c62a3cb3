use std::collections::HashMap;
use std::time::Instant;

use log::debug;
use tokio::sync::Mutex;

use counting_client::{ChannelState, ChatMessage, MessageResponse};
use expression::{evaluate, parse_literal, parse_message, Number};
use telemetry::Measure;

use crate::config::GameConfig;
use crate::error::ApiError;
use crate::game::CountingGame;

lazy_static! {
    static ref CALCULATE_MEASURE: Measure = Measure::new("service", "calculate");
}

const CALC_PREFIX: &str = "calc:";

/// Evaluates `expr`, keeping bare integer literals exact
pub fn calculate(expr: &str) -> Result<Number, ApiError> {
    CALCULATE_MEASURE.record(|| -> Result<Number, ApiError> {
        let expr = expr.trim();
        if let Ok(v) = parse_literal(expr) {
            return Ok(Number::Int(v));
        }
        Ok(Number::Float(evaluate(expr)?))
    })
}

/// The expression of a `calc:` request, matched case-insensitively
fn calc_expression(content: &str) -> Option<&str> {
    let prefix = content.get(..CALC_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(CALC_PREFIX) {
        Some(&content[CALC_PREFIX.len()..])
    } else {
        None
    }
}

pub struct CountingService {
    config: GameConfig,
    games: Mutex<HashMap<u64, CountingGame>>,
}

impl CountingService {
    pub fn new(config: GameConfig) -> CountingService {
        CountingService {
            config,
            games: Mutex::new(Default::default()),
        }
    }

    fn in_scope(&self, channel_id: u64) -> bool {
        self.config.channels.is_empty() || self.config.channels.contains(&channel_id)
    }

    pub async fn handle_message(&self, message: &ChatMessage, now: Instant) -> MessageResponse {
        if !self.in_scope(message.channel_id) {
            return MessageResponse::default();
        }

        let content = message.content.trim();
        if content.chars().count() > self.config.max_message_len {
            debug!(
                "Ignoring {} character message {}",
                content.chars().count(),
                message.message_id
            );
            return MessageResponse::default();
        }

        if let Some(expr) = calc_expression(content) {
            let expr = expr.trim();
            let reply = match calculate(expr) {
                Ok(value) => format!("`{}` = {}", expr, value),
                Err(ApiError::InvalidExpression(e)) => format!("`{}`: {}", expr, e),
                Err(_) => format!("`{}`: could not be evaluated", expr),
            };
            return MessageResponse::reply(reply);
        }

        let value = match parse_message(content).and_then(Number::round) {
            Some(value) => value,
            None => return MessageResponse::default(),
        };

        let mut games = self.games.lock().await;
        games
            .entry(message.channel_id)
            .or_insert_with(|| CountingGame::new(&self.config))
            .count(message, value, now)
    }

    /// Returns `None` for channels the game does not run in
    pub async fn handle_delete(&self, channel_id: u64, message_id: u64) -> Option<MessageResponse> {
        if !self.in_scope(channel_id) {
            return None;
        }
        let games = self.games.lock().await;
        Some(
            games
                .get(&channel_id)
                .map(|game| game.delete(message_id))
                .unwrap_or_default(),
        )
    }

    /// The state of `channel_id` as of `now`
    pub async fn channel_state(&self, channel_id: u64, now: Instant) -> Option<ChannelState> {
        if !self.in_scope(channel_id) {
            return None;
        }
        let games = self.games.lock().await;
        Some(match games.get(&channel_id) {
            Some(game) => game.snapshot(now),
            None => CountingGame::new(&self.config).snapshot(now),
        })
    }
}
