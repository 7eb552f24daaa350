//! Router — picks exactly one follow-up chain from the classifier's label.
//!
//! Flow per turn: classify(question, answer) → route(label) → branch prompt → reply.
//! Each step is one sequential call; a failure at any step aborts the turn.

use serde::Serialize;
use tracing::info;

use crate::interview::classifier::{classify, Label};
use crate::interview::conversation::Conversation;
use crate::interview::prompts::{strong_follow_up_prompt, weak_follow_up_prompt};
use crate::llm_client::{LlmError, TextGenerator};

/// Result of one answered question.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub label: Label,
    pub reply: String,
}

/// Builds the branch prompt for a label. Strong validates and escalates,
/// weak rebukes and demands a concrete example.
pub fn branch_prompt(label: Label, answer: &str) -> String {
    match label {
        Label::Strong => strong_follow_up_prompt(answer),
        Label::Weak => weak_follow_up_prompt(answer),
    }
}

/// Invokes the chosen branch chain once. Output is free text, not validated.
pub async fn route(
    llm: &dyn TextGenerator,
    credential: &str,
    label: Label,
    answer: &str,
) -> Result<String, LlmError> {
    info!(?label, "Routing answer to follow-up branch");
    llm.generate(credential, &branch_prompt(label, answer)).await
}

/// Full classify-then-route chain for one (question, answer) pair.
pub async fn respond(
    llm: &dyn TextGenerator,
    credential: &str,
    question: &str,
    answer: &str,
) -> Result<TurnOutcome, LlmError> {
    let label = classify(llm, credential, question, answer).await?;
    let reply = route(llm, credential, label, answer).await?;
    Ok(TurnOutcome { label, reply })
}

/// Answers the conversation's current question and records both turns.
///
/// The conversation is only touched after the whole chain succeeds, so a
/// failed turn leaves it exactly as it was.
pub async fn take_turn(
    llm: &dyn TextGenerator,
    credential: &str,
    conversation: &mut Conversation,
    answer: &str,
) -> Result<TurnOutcome, LlmError> {
    let outcome = respond(llm, credential, conversation.current_question(), answer).await?;
    conversation.record_user_turn(answer);
    conversation.record_assistant_turn(outcome.reply.clone());
    Ok(outcome)
}
