//! Conversation state — an append-only turn log plus the question awaiting an answer.
//!
//! INVARIANT: `current_question` always equals the text of the most recent
//! assistant turn. Every assistant message, rebuke or not, becomes the next question.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::interview::prompts::opening_question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Assistant,
    User,
}

/// One message in the conversation. Immutable once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conversation {
    track: String,
    turns: Vec<Turn>,
    current_question: String,
}

impl Conversation {
    /// Starts a conversation already reset for `track`.
    pub fn new(track: impl Into<String>) -> Self {
        let mut conversation = Self {
            track: String::new(),
            turns: Vec::new(),
            current_question: String::new(),
        };
        conversation.reset(track);
        conversation
    }

    /// Clears the log and seeds the track's opening question as the first assistant turn.
    pub fn reset(&mut self, track: impl Into<String>) {
        self.track = track.into();
        self.turns.clear();
        let opening = opening_question(&self.track);
        self.record_assistant_turn(opening);
    }

    pub fn record_user_turn(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Role::User, text));
    }

    pub fn record_assistant_turn(&mut self, text: impl Into<String>) {
        let turn = Turn::new(Role::Assistant, text);
        self.current_question = turn.text.clone();
        self.turns.push(turn);
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    /// True until the candidate has answered anything since the last reset.
    pub fn awaiting_first_answer(&self) -> bool {
        !self.turns.iter().any(|t| t.role == Role::User)
    }
}
