//! Wire types exchanged between a chat platform adapter and the counting
//! service.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub use expression::Number;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ChatMessage {
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Accepted,
    Rejected,
    CoolingDown,
}

impl Reaction {
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Accepted => "✅",
            Self::Rejected => "❌",
            Self::CoolingDown => "⏳",
        }
    }
}

/// What the adapter should do in response to a chat event
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct MessageResponse {
    pub reactions: Vec<Reaction>,
    pub reply: Option<String>,
}

impl MessageResponse {
    pub fn react(reaction: Reaction) -> Self {
        Self {
            reactions: vec![reaction],
            reply: None,
        }
    }

    pub fn reply(text: String) -> Self {
        Self {
            reactions: vec![],
            reply: Some(text),
        }
    }

    pub fn with_reply(mut self, text: String) -> Self {
        self.reply = Some(text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty() && self.reply.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    AwaitingStart,
    Counting,
    Cooldown,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ChannelState {
    pub phase: Phase,
    pub count: u64,
    pub best: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct EvaluateRequest {
    pub expr: String,
}
