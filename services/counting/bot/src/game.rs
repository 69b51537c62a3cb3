use std::time::{Duration, Instant};

use log::info;

use counting_client::{ChannelState, ChatMessage, MessageResponse, Phase, Reaction};

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    AwaitingStart,
    Counting {
        count: u64,
        last_author: u64,
        last_message: u64,
    },
    Cooldown {
        until: Instant,
    },
}

/// The counting game of a single channel
#[derive(Debug)]
pub struct CountingGame {
    state: State,
    best: u64,
    cooldown: Duration,
    allow_consecutive: bool,
}

impl CountingGame {
    pub fn new(config: &GameConfig) -> CountingGame {
        CountingGame {
            state: State::AwaitingStart,
            best: 0,
            cooldown: Duration::from_secs(config.cooldown_secs),
            allow_consecutive: config.allow_consecutive,
        }
    }

    /// The phase as of `now`, a cooldown past its deadline reads as awaiting start
    pub fn phase(&self, now: Instant) -> Phase {
        match self.state {
            State::AwaitingStart => Phase::AwaitingStart,
            State::Counting { .. } => Phase::Counting,
            State::Cooldown { until } if now >= until => Phase::AwaitingStart,
            State::Cooldown { .. } => Phase::Cooldown,
        }
    }

    pub fn snapshot(&self, now: Instant) -> ChannelState {
        ChannelState {
            phase: self.phase(now),
            count: self.current(),
            best: self.best,
        }
    }

    fn current(&self) -> u64 {
        match self.state {
            State::Counting { count, .. } => count,
            _ => 0,
        }
    }

    /// Applies `value`, the number read from `message`
    pub fn count(&mut self, message: &ChatMessage, value: i64, now: Instant) -> MessageResponse {
        if let State::Cooldown { until } = self.state {
            if now >= until {
                info!("Channel {} cooldown over", message.channel_id);
                self.state = State::AwaitingStart;
            }
        }

        let state = self.state;
        match state {
            State::Cooldown { .. } => MessageResponse::react(Reaction::CoolingDown),
            State::AwaitingStart if value == 1 => {
                info!("Channel {} started counting", message.channel_id);
                self.accept(message, 1)
            }
            State::AwaitingStart => MessageResponse::react(Reaction::Rejected)
                .with_reply("The count starts at 1.".to_string()),
            State::Counting { last_author, .. }
                if !self.allow_consecutive && last_author == message.author_id =>
            {
                let reply = format!(
                    "**WRONG!** <@{}> counted twice in a row. Starting back at 1.",
                    message.author_id
                );
                self.fail(message, reply, now)
            }
            State::Counting { count, .. } if value == count as i64 + 1 => {
                self.accept(message, count + 1)
            }
            State::Counting { .. } => {
                let reply = format!(
                    "**WRONG!** <@{}> messed up the count at {}. Starting back at 1.",
                    message.author_id, value
                );
                self.fail(message, reply, now)
            }
        }
    }

    /// Reacts to `message_id` being deleted from the channel
    pub fn delete(&self, message_id: u64) -> MessageResponse {
        match self.state {
            State::Counting {
                count,
                last_author,
                last_message,
            } if last_message == message_id => MessageResponse::reply(format!(
                "<@{}> deleted their count of {}. The next number is {}.",
                last_author,
                count,
                count + 1
            )),
            _ => MessageResponse::default(),
        }
    }

    fn accept(&mut self, message: &ChatMessage, count: u64) -> MessageResponse {
        self.state = State::Counting {
            count,
            last_author: message.author_id,
            last_message: message.message_id,
        };
        self.best = self.best.max(count);
        MessageResponse::react(Reaction::Accepted)
    }

    fn fail(&mut self, message: &ChatMessage, reply: String, now: Instant) -> MessageResponse {
        info!(
            "Channel {} count ended at {} by {}",
            message.channel_id,
            self.current(),
            message.author_id
        );
        self.state = if self.cooldown == Duration::from_secs(0) {
            State::AwaitingStart
        } else {
            State::Cooldown {
                until: now + self.cooldown,
            }
        };
        MessageResponse::react(Reaction::Rejected).with_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cooldown_secs: u64) -> GameConfig {
        GameConfig {
            cooldown_secs,
            ..Default::default()
        }
    }

    fn message(message_id: u64, author_id: u64) -> ChatMessage {
        ChatMessage {
            channel_id: 1,
            message_id,
            author_id,
            content: String::new(),
        }
    }

    fn accepted() -> MessageResponse {
        MessageResponse::react(Reaction::Accepted)
    }

    #[test]
    fn test_counting() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(30));
        assert_eq!(game.phase(now), Phase::AwaitingStart);

        assert_eq!(game.count(&message(1, 10), 1, now), accepted());
        assert_eq!(game.count(&message(2, 11), 2, now), accepted());
        assert_eq!(game.count(&message(3, 10), 3, now), accepted());

        assert_eq!(
            game.snapshot(now),
            ChannelState {
                phase: Phase::Counting,
                count: 3,
                best: 3,
            }
        );
    }

    #[test]
    fn test_must_start_at_one() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(30));

        let response = game.count(&message(1, 10), 5, now);
        assert_eq!(response.reactions, vec![Reaction::Rejected]);
        assert_eq!(response.reply.as_deref(), Some("The count starts at 1."));
        assert_eq!(game.phase(now), Phase::AwaitingStart);
    }

    #[test]
    fn test_wrong_number() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(30));
        game.count(&message(1, 10), 1, now);
        game.count(&message(2, 11), 2, now);

        let response = game.count(&message(3, 12), 4, now);
        assert_eq!(response.reactions, vec![Reaction::Rejected]);
        assert_eq!(
            response.reply.as_deref(),
            Some("**WRONG!** <@12> messed up the count at 4. Starting back at 1.")
        );
        assert_eq!(
            game.snapshot(now),
            ChannelState {
                phase: Phase::Cooldown,
                count: 0,
                best: 2,
            }
        );
    }

    #[test]
    fn test_cooldown() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(30));
        game.count(&message(1, 10), 1, now);
        game.count(&message(2, 11), 3, now);

        let later = now + Duration::from_secs(10);
        assert_eq!(
            game.count(&message(3, 12), 1, later),
            MessageResponse::react(Reaction::CoolingDown)
        );
        assert_eq!(game.phase(later), Phase::Cooldown);

        let expired = now + Duration::from_secs(30);
        assert_eq!(game.count(&message(4, 12), 1, expired), accepted());
        assert_eq!(game.phase(expired), Phase::Counting);
    }

    #[test]
    fn test_cooldown_expires_without_messages() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(30));
        game.count(&message(1, 10), 1, now);
        game.count(&message(2, 11), 3, now);

        let before = now + Duration::from_secs(29);
        assert_eq!(game.phase(before), Phase::Cooldown);

        let expired = now + Duration::from_secs(30);
        assert_eq!(
            game.snapshot(expired),
            ChannelState {
                phase: Phase::AwaitingStart,
                count: 0,
                best: 1,
            }
        );
    }

    #[test]
    fn test_no_cooldown() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(0));
        game.count(&message(1, 10), 1, now);
        game.count(&message(2, 11), 7, now);

        assert_eq!(game.phase(now), Phase::AwaitingStart);
        assert_eq!(game.count(&message(3, 11), 1, now), accepted());
    }

    #[test]
    fn test_consecutive() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(0));
        game.count(&message(1, 10), 1, now);

        let response = game.count(&message(2, 10), 2, now);
        assert_eq!(response.reactions, vec![Reaction::Rejected]);
        assert_eq!(
            response.reply.as_deref(),
            Some("**WRONG!** <@10> counted twice in a row. Starting back at 1.")
        );

        let mut game = CountingGame::new(&GameConfig {
            allow_consecutive: true,
            ..config(0)
        });
        game.count(&message(1, 10), 1, now);
        assert_eq!(game.count(&message(2, 10), 2, now), accepted());
    }

    #[test]
    fn test_delete() {
        let now = Instant::now();
        let mut game = CountingGame::new(&config(30));
        game.count(&message(1, 10), 1, now);
        game.count(&message(2, 11), 2, now);

        assert!(game.delete(1).is_empty());
        assert_eq!(
            game.delete(2).reply.as_deref(),
            Some("<@11> deleted their count of 2. The next number is 3.")
        );
        assert_eq!(game.snapshot(now).count, 2);
    }
}
